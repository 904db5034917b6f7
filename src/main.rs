//! Debug Unlock Integration Wizard - interactive terminal host.
//!
//! Each stdin line is one turn. Replies are printed as Markdown as they
//! stream in; Ctrl-C cancels the running turn, or exits when idle.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use debug_unlock_wizard::adapters::{
    AnthropicConfig, AnthropicProvider, ChannelResponseSink, InMemorySessionStore, LocalWorkspace,
};
use debug_unlock_wizard::application::{
    GenerateIntegrationHandler, GenerationSettings, HandleTurnCommand, HandleTurnHandler,
    WorkspaceProber,
};
use debug_unlock_wizard::config::{AppConfig, LoggingConfig, SessionKeying};
use debug_unlock_wizard::domain::wizard::{prompts, DialogueEngine};
use debug_unlock_wizard::ports::{AIProvider, SessionStore};

#[derive(Debug, Parser)]
#[command(name = "debug-unlock-wizard", version, about)]
struct Args {
    /// Workspace root to probe (overrides configuration)
    #[arg(short, long)]
    workspace: Option<PathBuf>,

    /// Key the conversation by this identifier instead of the turn count
    #[arg(long)]
    session_id: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::load().context("Failed to load configuration")?;
    if let Some(root) = args.workspace {
        config.workspace.root = root;
    }
    if args.session_id.is_some() {
        config.session.keying = SessionKeying::SessionId;
    }
    config.logging.json |= args.log_json;
    config.validate().context("Invalid configuration")?;

    init_tracing(&config.logging)?;

    let workspace = Arc::new(LocalWorkspace::new(config.workspace.root.clone()));
    let prober =
        Arc::new(WorkspaceProber::new(workspace).with_limits(config.workspace.probe_limits()));
    let store = Arc::new(InMemorySessionStore::new());
    let engine = DialogueEngine::new(config.wizard.dialogue_config());

    let provider: Option<Arc<dyn AIProvider>> = match config.ai.anthropic_api_key.as_deref() {
        Some(key) if config.ai.has_anthropic() => {
            let mut anthropic = AnthropicConfig::new(key)
                .with_model(config.ai.model.clone())
                .with_base_url(config.ai.base_url.clone())
                .with_timeout(config.ai.timeout())
                .with_max_retries(config.ai.max_retries);
            if let Some(max_tokens) = config.ai.max_tokens {
                anthropic = anthropic.with_default_max_tokens(max_tokens);
            }
            Some(Arc::new(AnthropicProvider::new(anthropic)?) as Arc<dyn AIProvider>)
        }
        _ => {
            warn!("No Anthropic API key configured; completed configurations will be summarised");
            None
        }
    };
    let generate = GenerateIntegrationHandler::new(provider).with_settings(GenerationSettings {
        max_tokens: config.ai.max_tokens,
        ..GenerationSettings::default()
    });

    let handler = HandleTurnHandler::new(store.clone(), prober, engine, generate);

    let session_id = args
        .session_id
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    info!(
        workspace = %config.workspace.root.display(),
        keying = ?config.session.keying,
        "Wizard ready"
    );

    let mut stdout = tokio::io::stdout();
    stdout.write_all(prompts::overview().as_bytes()).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut turn_count: u64 = 0;

    loop {
        stdout.write_all(b"\n> ").await?;
        stdout.flush().await?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else { break };
        if matches!(line.trim(), "exit" | "quit") {
            break;
        }

        let key = config.session.key_for(turn_count, &session_id);
        run_turn(&handler, HandleTurnCommand::new(key, line)).await?;
        turn_count += 1;
    }

    store.clear().await?;
    info!(turns = turn_count, "Wizard stopped");
    Ok(())
}

/// Runs one turn, printing fragments as they arrive.
async fn run_turn(handler: &HandleTurnHandler, cmd: HandleTurnCommand) -> Result<()> {
    let (sink, mut fragments) = ChannelResponseSink::channel(64);
    let printer = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(fragment) = fragments.recv().await {
            stdout.write_all(fragment.as_bytes()).await?;
            stdout.flush().await?;
        }
        Ok::<_, std::io::Error>(())
    });

    let cancel = CancellationToken::new();
    let interrupt = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        })
    };

    handler.respond(cmd, &sink, &cancel).await;

    interrupt.abort();
    drop(sink);
    printer.await??;
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter = logging.env_filter()?;
    if logging.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()?;
    }
    Ok(())
}
