//! User input and interaction handling
//!
//! Recipes ask questions through the [`Prompter`] trait so the console
//! implementation can be swapped for a scripted one in tests and
//! non-interactive runs.

use std::collections::VecDeque;

use dialoguer::Input;

use crate::error::{Error, Result};

/// A labeled choice presented by [`Prompter::choose_one`]. The label is what
/// the user sees; the value is what the recipe receives.
#[derive(Debug, Clone)]
pub struct Choice {
    pub label: String,
    pub value: String,
}

impl Choice {
    pub fn new(label: &str, value: &str) -> Self {
        Self { label: label.to_string(), value: value.to_string() }
    }
}

/// Common interface for interactive questions.
pub trait Prompter {
    /// Asks a free-form question and returns the raw answer.
    fn ask(&mut self, question: &str) -> Result<String>;

    /// Asks a yes/no question. Re-asks on anything other than
    /// yes/y/no/n, case-insensitive.
    fn confirm(&mut self, question: &str) -> Result<bool> {
        loop {
            let answer = self.ask(&format!("{question} (y/n)"))?;
            if let Some(value) = parse_confirmation(&answer) {
                return Ok(value);
            }
        }
    }

    /// Presents a numbered menu and returns the value of the chosen entry.
    /// Re-asks until a valid selection is entered.
    fn choose_one(&mut self, question: &str, choices: &[Choice]) -> Result<String>;
}

fn parse_confirmation(answer: &str) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "yes" | "y" => Some(true),
        "no" | "n" => Some(false),
        _ => None,
    }
}

/// Parses a 1-based menu selection against the available choices.
fn parse_selection<'a>(answer: &str, choices: &'a [Choice]) -> Option<&'a Choice> {
    let index: usize = answer.trim().parse().ok()?;
    (1..=choices.len()).contains(&index).then(|| &choices[index - 1])
}

/// Prompts on the terminal via `dialoguer`.
#[derive(Debug, Default)]
pub struct ConsolePrompter;

impl ConsolePrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for ConsolePrompter {
    fn ask(&mut self, question: &str) -> Result<String> {
        let answer: String = Input::new()
            .with_prompt(question)
            .allow_empty(true)
            .interact_text()?;
        Ok(answer)
    }

    fn choose_one(&mut self, question: &str, choices: &[Choice]) -> Result<String> {
        println!("{question}");
        for (i, choice) in choices.iter().enumerate() {
            println!("{}) {}", i + 1, choice.label);
        }
        loop {
            let answer = self.ask("Enter your selection")?;
            if let Some(choice) = parse_selection(&answer, choices) {
                return Ok(choice.value.clone());
            }
        }
    }
}

/// Replays canned answers instead of reading the terminal. Used by tests and
/// by `--answers` for non-interactive runs.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { answers: answers.into_iter().map(Into::into).collect() }
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, question: &str) -> Result<String> {
        self.answers.pop_front().ok_or_else(|| {
            Error::PromptError(format!("no scripted answer left for question '{question}'"))
        })
    }

    fn choose_one(&mut self, question: &str, choices: &[Choice]) -> Result<String> {
        loop {
            let answer = self.ask(question)?;
            if let Some(choice) = parse_selection(&answer, choices) {
                return Ok(choice.value.clone());
            }
            log::debug!("ignoring invalid selection '{answer}'");
        }
    }
}
