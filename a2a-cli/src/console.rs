//! Operator console: prompts for input and prints transcript lines.

use async_trait::async_trait;
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Question shown before every user turn.
pub const PROMPT: &str = "What do you want to send to the agent? (:q or quit to exit)";

#[async_trait]
pub trait Console: Send {
    /// Shows `question` and waits for one line of input.
    ///
    /// Returns `None` once input is exhausted.
    async fn prompt(&mut self, question: &str) -> io::Result<Option<String>>;

    /// Prints one transcript line.
    fn print(&mut self, line: &str);
}

/// Console bound to the process's stdin and stdout.
pub struct StdConsole {
    lines: Lines<BufReader<Stdin>>,
}

impl StdConsole {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Console for StdConsole {
    async fn prompt(&mut self, question: &str) -> io::Result<Option<String>> {
        {
            let mut stdout = io::stdout().lock();
            write!(stdout, "\n{}: ", question)?;
            stdout.flush()?;
        }
        self.lines.next_line().await
    }

    fn print(&mut self, line: &str) {
        println!("{}", line);
    }
}
