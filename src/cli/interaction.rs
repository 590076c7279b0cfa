//! Terminal implementations of the user-facing host surfaces

use crate::adapters::host::{render_progress_template, Interaction, ProgressSurface};
use crate::core::cancel::CancellationToken;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Progress surface that prints one line per step to stdout
///
/// Cancellation is driven by the shared token, which the signal handler sets
/// on Ctrl+C.
#[derive(Debug)]
pub struct ConsoleProgress {
    token: CancellationToken,
    template: String,
    maximum: usize,
    value: usize,
    quiet: bool,
}

impl ConsoleProgress {
    /// Create a progress surface bound to `token`
    pub fn new(token: CancellationToken) -> Self {
        Self {
            token,
            template: String::new(),
            maximum: 0,
            value: 0,
            quiet: false,
        }
    }

    /// Suppress stdout output
    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    /// Status text for the current value
    pub fn status(&self) -> String {
        render_progress_template(&self.template, self.value, self.maximum)
    }
}

impl ProgressSurface for ConsoleProgress {
    fn show(&mut self, title: &str, message: &str, minimum: usize, maximum: usize) {
        self.template = message.to_string();
        self.value = minimum;
        self.maximum = maximum;
        if !self.quiet {
            println!("⏳ {title}");
        }
    }

    fn set_message(&mut self, template: &str) {
        self.template = template.to_string();
    }

    fn set_maximum(&mut self, maximum: usize) {
        self.maximum = maximum;
    }

    fn set_value(&mut self, value: usize) {
        self.value = value;
        if !self.quiet {
            println!();
            println!("{}", self.status());
        }
    }

    fn reset(&mut self) {
        self.value = 0;
    }

    fn was_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Prompts and messages on the terminal
///
/// With a configured destination the prompt only asks for confirmation, and
/// `assume_yes` skips it entirely. Without one the destination is read from
/// `input`; an empty answer cancels.
pub struct ConsoleInteraction<R: BufRead> {
    input: R,
    destination: Option<PathBuf>,
    assume_yes: bool,
    quiet: bool,
    progress: ConsoleProgress,
}

impl<R: BufRead> ConsoleInteraction<R> {
    /// Create an interaction reading answers from `input`
    pub fn new(
        input: R,
        destination: Option<PathBuf>,
        assume_yes: bool,
        token: CancellationToken,
    ) -> Self {
        Self {
            input,
            destination,
            assume_yes,
            quiet: false,
            progress: ConsoleProgress::new(token),
        }
    }

    /// Suppress stdout output
    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self.progress = self.progress.quiet();
        self
    }

    fn ask(&mut self, question: &str) -> Option<String> {
        if !self.quiet {
            print!("{question}");
            if let Err(e) = io::stdout().flush() {
                tracing::debug!(error = %e, "Failed to flush prompt");
            }
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(0) => None,
            Ok(_) => Some(answer.trim().to_string()),
            Err(e) => {
                tracing::error!(error = %e, "Failed to read answer");
                None
            }
        }
    }
}

impl<R: BufRead> Interaction for ConsoleInteraction<R> {
    fn choose_destination(&mut self) -> Option<PathBuf> {
        match self.destination.clone() {
            Some(destination) if self.assume_yes => Some(destination),
            Some(destination) => {
                let question = format!("Export to {}? [y/N]: ", destination.display());
                let answer = self.ask(&question)?;
                answer.eq_ignore_ascii_case("y").then_some(destination)
            }
            None => {
                let answer = self.ask("Destination directory (empty to cancel): ")?;
                (!answer.is_empty()).then(|| PathBuf::from(answer))
            }
        }
    }

    fn show_message(&mut self, message: &str) {
        if !self.quiet {
            println!();
            println!("{message}");
            println!();
        }
    }

    fn progress(&mut self) -> &mut dyn ProgressSurface {
        &mut self.progress
    }
}
