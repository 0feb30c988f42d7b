//! The interactive session.
//!
//! The outer loop starts a fresh task each time round. The inner loop keeps
//! prompting on that task for as long as the agent asks for input, carrying
//! the task and context ids forward unchanged.

use crate::agent::RemoteAgent;
use crate::console::{Console, PROMPT};
use crate::error::CliResult;
use crate::turn::{FinishReason, TaskIds, TurnExecutor, TurnOutcome};
use a2a_types::AgentCard;

pub const AGENT_CARD_BANNER: &str = "======= Agent Card ========";
pub const NEW_TASK_BANNER: &str = "=========  starting a new task ========";

/// What happened over the life of a session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSummary {
    pub tasks_started: usize,
    /// Turns actually sent to the agent.
    pub turns: usize,
    pub finished: Vec<FinishReason>,
}

pub struct Session<A, C> {
    executor: TurnExecutor<A>,
    console: C,
}

impl<A: RemoteAgent, C: Console> Session<A, C> {
    pub fn new(executor: TurnExecutor<A>, console: C) -> Self {
        Self { executor, console }
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn executor(&self) -> &TurnExecutor<A> {
        &self.executor
    }

    /// Runs until the operator enters an exit sentinel or input ends.
    ///
    /// Only console I/O failures are returned as errors. Everything that goes
    /// wrong on the agent side ends the current task and the session moves on.
    pub async fn run(&mut self) -> CliResult<SessionSummary> {
        let mut summary = SessionSummary::default();

        'session: loop {
            self.console.print("");
            self.console.print(NEW_TASK_BANNER);
            summary.tasks_started += 1;
            let mut ids = TaskIds::default();

            loop {
                let Some(input) = self.console.prompt(PROMPT).await? else {
                    tracing::debug!("console input closed");
                    break 'session;
                };

                let result = self
                    .executor
                    .execute_turn(&input, ids, &mut self.console)
                    .await;
                ids = result.ids;

                match result.outcome {
                    TurnOutcome::Exit => break 'session,
                    TurnOutcome::InputRequired => {
                        summary.turns += 1;
                        tracing::debug!(task_id = ?ids.task_id, "agent needs more input");
                    }
                    TurnOutcome::Finished(reason) => {
                        summary.turns += 1;
                        tracing::info!(task_id = ?ids.task_id, %reason, "task finished");
                        self.console.print(&format!("[{}]", reason));
                        summary.finished.push(reason);
                        break;
                    }
                }
            }
        }

        Ok(summary)
    }
}

/// Prints the agent card as pretty JSON under a banner.
pub fn print_agent_card(console: &mut dyn Console, card: &AgentCard) -> CliResult<()> {
    console.print(AGENT_CARD_BANNER);
    console.print(&serde_json::to_string_pretty(card)?);
    Ok(())
}
