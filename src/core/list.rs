use crate::core::workflow::SubmissionWorkflow;
use crate::errors::AppResult;
use crate::ui::board;

pub struct ListLogic;

impl ListLogic {
    /// The board is only shown behind the PIN, as in the form.
    pub async fn apply(workflow: &mut SubmissionWorkflow, pin: &str, json: bool) -> AppResult<()> {
        workflow.set_pin(pin);
        workflow.confirm_pin()?;

        workflow.load().await;

        let day = workflow.board_day();
        let view = workflow.board();

        if json {
            println!("{}", board::render_json(day, &view));
        } else {
            print!("{}", board::render(day, &view));
        }

        Ok(())
    }
}
