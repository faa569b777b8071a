//! Interactive prompts
//!
//! Platforms never read stdin themselves; they ask through a [`Prompt`]
//! handed to them by the caller. The CLI supplies a terminal implementation,
//! tests supply a `ScriptedPrompt` (behind the `testing` feature).

#[cfg(any(test, feature = "testing"))]
use std::collections::VecDeque;
#[cfg(any(test, feature = "testing"))]
use std::sync::Mutex;

use crate::error::{PromptError, Result};

/// Capability for asking the user questions
pub trait Prompt: Send + Sync {
    /// Ask a free-text question; an empty answer yields `default`
    fn ask(&self, question: &str, default: &str) -> Result<String>;

    /// Ask a yes/no question
    fn confirm(&self, question: &str, default: bool) -> Result<bool>;

    /// Present a numbered menu and return the chosen item
    fn select(&self, title: &str, items: &[String]) -> Result<String>;
}

#[cfg(any(test, feature = "testing"))]
/// Interpret a typed yes/no answer; anything ambiguous falls back to `default`
pub fn parse_yes_no(answer: &str, default: bool) -> bool {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => true,
        "n" | "no" => false,
        _ => default,
    }
}

#[cfg(any(test, feature = "testing"))]
/// Resolve a menu answer given either as a 1-based number or the item text
pub fn parse_choice(answer: &str, items: &[String]) -> Option<String> {
    let answer = answer.trim();

    if let Ok(index) = answer.parse::<usize>() {
        if index >= 1 && index <= items.len() {
            return Some(items[index - 1].clone());
        }
    }

    items
        .iter()
        .find(|item| item.eq_ignore_ascii_case(answer))
        .cloned()
}

#[cfg(any(test, feature = "testing"))]
/// Prompt that answers from a fixed script (useful for testing)
///
/// Each call consumes one scripted answer. An empty answer selects the
/// default, mirroring a user pressing enter.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: Mutex<VecDeque<String>>,
    asked: Mutex<Vec<String>>,
}

#[cfg(any(test, feature = "testing"))]
impl ScriptedPrompt {
    /// Create a prompt with the given answers
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Questions asked so far, in order
    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }

    /// Number of answers not yet consumed
    pub fn remaining(&self) -> usize {
        self.answers.lock().unwrap().len()
    }

    fn next(&self, question: &str) -> Result<String> {
        self.asked.lock().unwrap().push(question.to_string());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| PromptError::Exhausted(question.to_string()).into())
    }
}

#[cfg(any(test, feature = "testing"))]
impl Prompt for ScriptedPrompt {
    fn ask(&self, question: &str, default: &str) -> Result<String> {
        let answer = self.next(question)?;
        let answer = answer.trim();
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer.to_string())
        }
    }

    fn confirm(&self, question: &str, default: bool) -> Result<bool> {
        let answer = self.next(question)?;
        Ok(parse_yes_no(&answer, default))
    }

    fn select(&self, title: &str, items: &[String]) -> Result<String> {
        if items.is_empty() {
            return Err(PromptError::EmptyMenu(title.to_string()).into());
        }
        let answer = self.next(title)?;
        parse_choice(&answer, items)
            .ok_or_else(|| PromptError::Interaction(format!("Invalid choice: {}", answer)).into())
    }
}

/// Non-interactive prompt that accepts every default
///
/// Menus have no default, so `select` fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultsPrompt;

impl Prompt for DefaultsPrompt {
    fn ask(&self, _question: &str, default: &str) -> Result<String> {
        Ok(default.to_string())
    }

    fn confirm(&self, _question: &str, default: bool) -> Result<bool> {
        Ok(default)
    }

    fn select(&self, title: &str, _items: &[String]) -> Result<String> {
        Err(PromptError::SelectionRequired(title.to_string()).into())
    }
}
