use crate::models::response::Response;
use serde::Serialize;

/// Today's responses split by answer, in input order.
#[derive(Debug, Default, Serialize)]
pub struct Board<'a> {
    pub yes: Vec<&'a Response>,
    pub no: Vec<&'a Response>,
}

impl Board<'_> {
    pub fn is_empty(&self) -> bool {
        self.yes.is_empty() && self.no.is_empty()
    }

    pub fn yes_names(&self) -> Vec<&str> {
        self.yes.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn no_names(&self) -> Vec<&str> {
        self.no.iter().map(|r| r.name.as_str()).collect()
    }
}

pub struct ResponseAggregator;

impl ResponseAggregator {
    /// Responses without an answer land in neither group.
    pub fn partition(responses: &[Response]) -> Board<'_> {
        let mut board = Board::default();
        for r in responses {
            if r.is_yes() {
                board.yes.push(r);
            } else if r.is_no() {
                board.no.push(r);
            }
        }
        board
    }
}
