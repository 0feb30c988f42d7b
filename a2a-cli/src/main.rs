use a2a_cli::logging::init_logging;
use a2a_cli::{print_agent_card, CliConfig, Session, StdConsole, TurnExecutor};
use a2a_client::A2AClient;
use anyhow::Context;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();
    init_logging(&config.log_level);

    if let Err(e) = run(config).await {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
    Ok(())
}

async fn run(config: CliConfig) -> anyhow::Result<()> {
    config.validate()?;

    let http_client = config.http_client()?;
    let client = A2AClient::from_card_url_with_client(&config.agent, http_client)
        .await
        .with_context(|| format!("failed to load the agent card from {}", config.agent))?;

    let mut console = StdConsole::new();
    print_agent_card(&mut console, client.agent_card())?;

    let executor = TurnExecutor::new(client)
        .with_streaming(!config.no_streaming)
        .with_history_length(config.history_length);
    tracing::info!(
        agent = %config.agent,
        streaming = executor.is_streaming(),
        "connected to agent"
    );

    let summary = Session::new(executor, console).run().await?;
    tracing::info!(
        tasks = summary.tasks_started,
        turns = summary.turns,
        "session ended"
    );
    Ok(())
}
