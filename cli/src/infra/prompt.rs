//! Infrastructure implementation of the `Prompter` port using `dialoguer`.

use crate::application::ports::Prompter;
use crate::domain::PromptError;

/// Terminal line prompt.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn prompt(&self, label: &str, default: Option<&str>) -> Result<String, PromptError> {
        if !console::user_attended_stderr() {
            return Err(PromptError::Unavailable("no terminal attached".to_string()));
        }

        let mut input = dialoguer::Input::<String>::new()
            .with_prompt(label)
            .allow_empty(true);
        if let Some(d) = default {
            input = input.default(d.to_string());
        }

        input.interact_text().map_err(|e| match e {
            dialoguer::Error::IO(ref io) if io.kind() == std::io::ErrorKind::Interrupted => {
                PromptError::Aborted
            }
            other => PromptError::Unavailable(other.to_string()),
        })
    }
}
