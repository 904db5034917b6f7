//! WrapFunctionHandler - questionnaire for adapting one existing function.

use super::handle_turn::TurnError;
use crate::domain::wizard::prompts;
use crate::ports::ResponseSink;

/// Command for `wrap-function <name>`.
#[derive(Debug, Clone)]
pub struct WrapFunctionCommand {
    pub name: String,
}

/// Handler for `wrap-function`. Stateless.
#[derive(Debug, Clone, Default)]
pub struct WrapFunctionHandler;

impl WrapFunctionHandler {
    pub fn new() -> Self {
        Self
    }

    /// Returns true if the questionnaire was shown, false for the usage hint.
    pub async fn handle(
        &self,
        cmd: WrapFunctionCommand,
        sink: &dyn ResponseSink,
    ) -> Result<bool, TurnError> {
        let name = cmd.name.trim();
        if name.is_empty() {
            sink.markdown(&prompts::wrap_function_usage()).await?;
            return Ok(false);
        }
        sink.markdown(&prompts::wrap_function_questions(name)).await?;
        Ok(true)
    }
}
