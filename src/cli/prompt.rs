//! Line-oriented prompts on standard input.

use super::OutputManager;
use crate::error::{CliError, Result};
use std::io::{BufRead, BufReader, Stdin};

/// Reads answers to questions, one line per answer
pub struct Prompter<R> {
    input: R,
    output: OutputManager,
}

impl Prompter<BufReader<Stdin>> {
    /// Prompter reading from the terminal
    pub fn stdin() -> Self {
        Self::new(BufReader::new(std::io::stdin()))
    }
}

impl<R: BufRead> Prompter<R> {
    /// Prompter reading from `input`
    pub fn new(input: R) -> Self {
        Self {
            input,
            output: OutputManager::new(false),
        }
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        self.output.prompt(question)?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Err(CliError::InputClosed {
                prompt: question.trim().to_string(),
            }
            .into());
        }
        Ok(answer.trim().to_string())
    }

    /// Ask until a non-blank answer is given
    pub fn line(&mut self, question: &str) -> Result<String> {
        loop {
            let answer = self.ask(question)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
        }
    }

    /// Ask until the answer parses as an integer
    pub fn integer(&mut self, question: &str) -> Result<i64> {
        loop {
            let answer = self.ask(question)?;
            match answer.parse::<i64>() {
                Ok(n) => return Ok(n),
                Err(_) if answer.is_empty() => {}
                Err(_) => self.output.error(&not_an_integer(&answer)),
            }
        }
    }
}

fn not_an_integer(answer: &str) -> String {
    format!("'{}' is not a valid integer.", answer)
}
