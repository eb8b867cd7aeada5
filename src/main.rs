use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use aura_assistant::db::{self, StatsRepo};
use aura_assistant::handlers::Effect;
use aura_assistant::services::{SummaryClient, SystemOpener, UrlOpener};
use aura_assistant::{CommandInterpreter, Config, Daemon};

/// Aura - wake-word gated voice command interpreter
#[derive(Parser)]
#[command(name = "aura", version, about)]
struct Cli {
    /// Wake word override
    #[arg(short, long)]
    wake_word: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable spoken responses (print only)
    #[arg(long, env = "AURA_DISABLE_VOICE")]
    disable_voice: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Dispatch one transcript (include the wake word) and print the response
    Simulate {
        /// The transcript, e.g. "aura what time is it"
        transcript: Vec<String>,
    },
    /// Dispatch a canned quick-action command
    Quick {
        /// Which quick action to run
        action: QuickAction,
    },
    /// Show usage counters
    Stats,
}

#[derive(Clone, Copy, ValueEnum)]
enum QuickAction {
    Weather,
    Time,
    Music,
    News,
}

impl QuickAction {
    /// The command as it would have been spoken, minus the wake word
    const fn phrase(self) -> &'static str {
        match self {
            Self::Weather => "what's the weather?",
            Self::Time => "what time is it?",
            Self::Music => "play music",
            Self::News => "what's the news?",
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "info,aura_assistant=info",
        1 => "info,aura_assistant=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

#[allow(clippy::future_not_send)]
async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load_with_options(cli.disable_voice)?;
    if let Some(wake_word) = cli.wake_word {
        config.wake_word = wake_word;
    }

    if let Some(cmd) = cli.command {
        return match cmd {
            Command::Simulate { transcript } => simulate(&config, &transcript.join(" ")).await,
            Command::Quick { action } => {
                let transcript = format!("{}, {}", config.wake_word, action.phrase());
                simulate(&config, &transcript).await
            }
            Command::Stats => cmd_stats(&config),
        };
    }

    tracing::info!(wake_word = %config.wake_word, "starting aura");

    let daemon = Daemon::new(config)?;
    daemon.run().await?;

    Ok(())
}

/// Dispatch a single transcript through the full pipeline
#[allow(clippy::future_not_send)]
async fn simulate(config: &Config, transcript: &str) -> anyhow::Result<()> {
    let pool = db::init(config.data_dir.join("aura.db"))?;
    let mut interpreter = CommandInterpreter::new(
        &config.wake_word,
        StatsRepo::new(pool),
        SummaryClient::new(&config.summary_base_url),
    );

    let Some(dispatch) = interpreter.process(transcript).await? else {
        println!("Ignored - transcript does not start with \"{}\"", config.wake_word);
        return Ok(());
    };

    println!("intent: {}", dispatch.intent);
    println!("aura> {}", dispatch.response.text);
    println!("[{}] {}", dispatch.response.notice.level.as_str(), dispatch.response.notice.message);

    run_effects(&dispatch.response.effects).await;

    Ok(())
}

/// Execute response effects inline (one-shot mode has no event loop)
async fn run_effects(effects: &[Effect]) {
    let opener = SystemOpener;

    for effect in effects {
        match effect {
            Effect::OpenUrl { url, delay } => {
                if let Some(delay) = delay {
                    tokio::time::sleep(*delay).await;
                }
                if let Err(e) = opener.open(url) {
                    tracing::warn!(error = %e, url, "failed to open url");
                }
            }
            Effect::FollowUp { delay, text } => {
                tokio::time::sleep(*delay).await;
                println!("aura> {text}");
            }
            Effect::DisconnectTv => {}
        }
    }
}

/// Print usage counters
fn cmd_stats(config: &Config) -> anyhow::Result<()> {
    let pool = db::init(config.data_dir.join("aura.db"))?;
    let stats = StatsRepo::new(pool).load()?;

    println!("Commands today:   {}", stats.commands_today);
    println!("Total commands:   {}", stats.total_commands);
    println!("Successful:       {}", stats.successful_commands);
    println!("Failed:           {}", stats.failed_commands);
    println!("Success rate:     {}%", stats.success_rate());

    Ok(())
}
