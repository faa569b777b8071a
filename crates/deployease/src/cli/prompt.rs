//! Terminal prompts

use deployease_core::error::Result;
use deployease_core::{DeployEaseError, Prompt, PromptError};
use dialoguer::{Confirm, Input, Select};

/// Prompt that asks on the terminal
#[derive(Debug, Default)]
pub struct TerminalPrompt;

fn interaction(e: dialoguer::Error) -> DeployEaseError {
    PromptError::Interaction(e.to_string()).into()
}

impl Prompt for TerminalPrompt {
    fn ask(&self, question: &str, default: &str) -> Result<String> {
        let mut input = Input::<String>::new()
            .with_prompt(question)
            .allow_empty(true);
        if !default.is_empty() {
            input = input.default(default.to_string());
        }

        let answer = input.interact_text().map_err(interaction)?;
        let answer = answer.trim();
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer.to_string())
        }
    }

    fn confirm(&self, question: &str, default: bool) -> Result<bool> {
        Confirm::new()
            .with_prompt(question)
            .default(default)
            .interact()
            .map_err(interaction)
    }

    fn select(&self, title: &str, items: &[String]) -> Result<String> {
        if items.is_empty() {
            return Err(PromptError::EmptyMenu(title.to_string()).into());
        }

        let index = Select::new()
            .with_prompt(title)
            .items(items)
            .default(0)
            .interact()
            .map_err(interaction)?;

        items
            .get(index)
            .cloned()
            .ok_or_else(|| PromptError::Interaction(format!("Invalid choice: {}", index + 1)).into())
    }
}
