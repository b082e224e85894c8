//! Line input for interactive flows.
//!
//! A single rustyline editor is reused for every prompt. Its helper completes
//! and hints from whatever choices the current prompt offers, plus the
//! `/back` and `/quit` commands of the interview.

use std::borrow::Cow::{self, Borrowed, Owned};

use anyhow::{Result, bail};
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

pub const BACK_COMMAND: &str = "/back";
pub const QUIT_COMMAND: &str = "/quit";

/// Completion source for the current prompt.
#[derive(Clone, Default)]
pub struct ChoiceHelper {
    choices: Vec<String>,
    commands: Vec<String>,
}

impl ChoiceHelper {
    fn candidates<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a String> + 'a {
        let pool = if prefix.starts_with('/') {
            &self.commands
        } else {
            &self.choices
        };
        pool.iter().filter(move |c| c.starts_with(prefix))
    }
}

impl Helper for ChoiceHelper {}

impl Completer for ChoiceHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        let candidates = self
            .candidates(line)
            .map(|c| Pair {
                display: c.clone(),
                replacement: c.clone(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for ChoiceHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(hint.bright_black().to_string())
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for ChoiceHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if line.is_empty() {
            return None;
        }
        self.candidates(line)
            .find(|c| c.len() > line.len())
            .map(|c| c[line.len()..].to_string())
    }
}

impl Validator for ChoiceHelper {}

/// What the user typed at a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Line(String),
    Back,
    Quit,
}

pub struct Prompter {
    editor: Editor<ChoiceHelper, DefaultHistory>,
}

impl Prompter {
    pub fn new() -> Result<Self> {
        let mut editor: Editor<ChoiceHelper, DefaultHistory> = Editor::new()?;
        editor.set_helper(Some(ChoiceHelper::default()));
        Ok(Self { editor })
    }

    fn configure(&mut self, choices: &[String], interview: bool) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.choices = choices.to_vec();
            helper.commands = if interview {
                vec![BACK_COMMAND.to_string(), QUIT_COMMAND.to_string()]
            } else {
                Vec::new()
            };
        }
    }

    fn read(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// One interview answer. Ctrl-C and Ctrl-D count as `/quit`.
    pub fn interview_line(&mut self, prompt: &str, choices: &[String]) -> Result<Input> {
        self.configure(choices, true);
        let Some(line) = self.read(prompt)? else {
            return Ok(Input::Quit);
        };
        Ok(match line.trim() {
            BACK_COMMAND => Input::Back,
            QUIT_COMMAND => Input::Quit,
            _ => Input::Line(line),
        })
    }

    /// Free input; blank input yields `default` when there is one.
    pub fn text(&mut self, label: &str, default: Option<&str>) -> Result<String> {
        self.configure(&[], false);
        let prompt = match default {
            Some(default) => format!("{label} [{default}]: "),
            None => format!("{label}: "),
        };
        loop {
            let Some(line) = self.read(&prompt)? else {
                bail!("Cancelled");
            };
            let value = line.trim();
            if !value.is_empty() {
                return Ok(value.to_string());
            }
            if let Some(default) = default {
                return Ok(default.to_string());
            }
            println!("{}", format!("{label} is required.").yellow());
        }
    }

    /// One of `choices`, by label or by its 1-based number.
    pub fn choose(&mut self, label: &str, choices: &[String]) -> Result<usize> {
        for (i, choice) in choices.iter().enumerate() {
            println!("  {} {}", format!("{}.", i + 1).bright_black(), choice);
        }
        self.configure(choices, false);
        loop {
            let Some(line) = self.read(&format!("{label}: "))? else {
                bail!("Cancelled");
            };
            match resolve_choice(line.trim(), choices) {
                Some(index) => return Ok(index),
                None => println!("{}", "Please pick one of the listed options.".yellow()),
            }
        }
    }

    /// Exactly one of `choices`, typed with tab completion instead of a list.
    pub fn completing(&mut self, label: &str, choices: &[String]) -> Result<String> {
        self.configure(choices, false);
        loop {
            let Some(line) = self.read(&format!("{label} (Tab to complete): "))? else {
                bail!("Cancelled");
            };
            let value = line.trim();
            if choices.iter().any(|c| c == value) {
                return Ok(value.to_string());
            }
            println!("{}", format!("Unknown {}: '{value}'", label.to_lowercase()).yellow());
        }
    }

    pub fn confirm(&mut self, question: &str, default_yes: bool) -> Result<bool> {
        self.configure(&[], false);
        let hint = if default_yes { "[Y/n]" } else { "[y/N]" };
        let Some(line) = self.read(&format!("{question} {hint} "))? else {
            return Ok(false);
        };
        Ok(match line.trim().to_ascii_lowercase().as_str() {
            "" => default_yes,
            "y" | "yes" => true,
            _ => false,
        })
    }
}

/// Maps a typed label or 1-based number to an index into `choices`.
pub fn resolve_choice(input: &str, choices: &[String]) -> Option<usize> {
    if let Some(index) = choices.iter().position(|c| c == input) {
        return Some(index);
    }
    input
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=choices.len()).contains(n))
        .map(|n| n - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choices() -> Vec<String> {
        vec!["Vomiting".into(), "Diarrhea".into(), "3 days".into()]
    }

    #[test]
    fn test_resolve_by_label_or_number() {
        assert_eq!(resolve_choice("Diarrhea", &choices()), Some(1));
        assert_eq!(resolve_choice("1", &choices()), Some(0));
        assert_eq!(resolve_choice("0", &choices()), None);
        assert_eq!(resolve_choice("4", &choices()), None);
        assert_eq!(resolve_choice("diarrhea", &choices()), None);
    }

    #[test]
    fn test_label_wins_over_number() {
        let numeric = vec!["2".to_string(), "1".to_string()];
        assert_eq!(resolve_choice("1", &numeric), Some(1));
    }

    #[test]
    fn test_candidates_split_commands_and_choices() {
        let helper = ChoiceHelper {
            choices: choices(),
            commands: vec![BACK_COMMAND.into(), QUIT_COMMAND.into()],
        };

        let found: Vec<_> = helper.candidates("D").collect();
        assert_eq!(found, vec!["Diarrhea"]);
        let commands: Vec<_> = helper.candidates("/b").collect();
        assert_eq!(commands, vec!["/back"]);
    }
}
