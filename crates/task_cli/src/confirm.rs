use std::io::{self, BufRead, Stdout, Write};
use task_core::AppError;

/// Yes/no question asked before destructive commands.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> Result<bool, AppError>;
}

/// Answers every prompt with yes (`--yes`).
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _prompt: &str) -> Result<bool, AppError> {
        Ok(true)
    }
}

/// Prints the prompt and blocks on one line of input.
pub struct LineConfirm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl LineConfirm<io::StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Confirm for LineConfirm<R, W> {
    fn confirm(&mut self, prompt: &str) -> Result<bool, AppError> {
        write!(self.output, "{prompt} (y/n): ").map_err(|err| AppError::io(err.to_string()))?;
        self.output
            .flush()
            .map_err(|err| AppError::io(err.to_string()))?;

        let mut response = String::new();
        self.input
            .read_line(&mut response)
            .map_err(|err| AppError::io(err.to_string()))?;

        Ok(is_affirmative(&response))
    }
}

pub fn is_affirmative(response: &str) -> bool {
    matches!(response.trim().to_lowercase().as_str(), "y" | "yes")
}
