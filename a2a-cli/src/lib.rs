//! # a2a-cli
//!
//! An interactive client that talks to a remote A2A agent one task at a time.
//!
//! Each task is a sequence of turns. A turn sends the operator's text to the
//! agent, renders the reply (a single result, or a live event stream when the
//! agent supports it) and then looks at the task's state. `input-required`
//! keeps the same task and context for the next turn; any other state ends
//! the task and the session starts a new one.
//!
//! The pieces are usable on their own:
//!
//! - [`classify`] reduces one protocol event to ids and display lines
//! - [`resolve`] decides what a task's state means for the session
//! - [`TurnExecutor`] runs one turn against a [`RemoteAgent`]
//! - [`Session`] loops over tasks and turns on a [`Console`]

pub mod agent;
pub mod classify;
pub mod config;
pub mod console;
pub mod error;
pub mod logging;
pub mod resolve;
pub mod session;
pub mod turn;

#[cfg(test)]
mod test_support;

pub use agent::RemoteAgent;
pub use classify::{classify, task_lines, Classification, DisplayLine, EventKind, LineSource};
pub use config::CliConfig;
pub use console::{Console, StdConsole};
pub use error::{CliError, CliResult};
pub use resolve::{resolve, Resolution};
pub use session::{print_agent_card, Session, SessionSummary};
pub use turn::{FinishReason, IdAnomaly, TaskIds, TurnExecutor, TurnOutcome, TurnResult};
