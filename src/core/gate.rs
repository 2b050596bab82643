/// Shared-PIN check.
///
/// Exact, case-sensitive comparison with no trimming. The gate keeps no
/// session state; the workflow owns the "authorized" latch.
#[derive(Debug, Clone)]
pub struct AccessGate {
    secret: String,
}

impl AccessGate {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn verify(&self, supplied: &str) -> bool {
        supplied == self.secret
    }
}
