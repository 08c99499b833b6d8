use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use crymp_bot::application::commands;
use crymp_bot::application::errors::{BotError, ConfigError};
use crymp_bot::application::messaging::MessageDispatcher;
use crymp_bot::application::services::{MessageService, PresenceService};
use crymp_bot::application::state::SharedState;
use crymp_bot::domain::traits::{Bot, Directory};
use crymp_bot::infrastructure::adapters::{ConsoleAdapter, DiscordAdapter};
use crymp_bot::infrastructure::config::Config;
use crymp_bot::infrastructure::directory::HttpDirectory;
use crymp_bot::infrastructure::state_server;

#[derive(Parser)]
#[command(name = "crymp-bot")]
#[command(about = "Chat bot reporting who is playing on the game-server directory", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Discord bot token (overrides config)
    #[arg(short, long)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run => run_bot(&cli.config, cli.token),
        Commands::Version => {
            println!("crymp-bot v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(config_path: &str, token_override: Option<String>) -> Result<Config, ConfigError> {
    let mut config = if std::path::Path::new(config_path).exists() {
        let mut config = Config::load(config_path)?;
        config.apply_env();
        config
    } else {
        tracing::info!("{} not found, using defaults and environment", config_path);
        Config::load_env()
    };

    if let Some(token) = token_override {
        config.set_discord_token(token);
    }

    config.validate()?;
    Ok(config)
}

fn run_bot(config_path: &str, token_override: Option<String>) -> Result<(), BotError> {
    let config = load_config(config_path, token_override)?;
    tracing::info!("Starting {}", config.bot.name);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| BotError::Internal(format!("Failed to start runtime: {}", e)))?;
    rt.block_on(serve(config))
}

async fn serve(config: Config) -> Result<(), BotError> {
    let directory: Arc<dyn Directory> = Arc::new(HttpDirectory::new(
        config.directory.url.clone(),
        config.directory_timeout(),
    )?);

    let bot: Arc<dyn Bot> = if let Some(token) = config.discord_token() {
        Arc::new(DiscordAdapter::new(token))
    } else if config.adapters.console.as_ref().is_some_and(|c| c.enabled) {
        Arc::new(ConsoleAdapter::new())
    } else {
        return Err(ConfigError::MissingField("adapters.discord.token".to_string()).into());
    };

    let state = SharedState::default();

    if config.state_server.enabled {
        state_server::spawn(config.state_bind()?, state.reader()).await?;
    }

    let registry = commands::default_registry(Arc::clone(&directory));
    tracing::info!("Registered {} command(s) with prefix {:?}", registry.len(), config.bot.prefix);
    let dispatcher = MessageDispatcher::new(config.bot.prefix.clone(), registry, state.clone(), Arc::clone(&bot));

    let events = bot.start().await?;

    Arc::new(
        PresenceService::new(directory, Arc::clone(&bot), state.clone())
            .with_period(config.refresh_period()),
    )
    .spawn();

    MessageService::new(bot, dispatcher, state).run(events).await;
    Ok(())
}

fn init_config() -> Result<(), BotError> {
    let yaml = Config::default().to_yaml()?;
    println!("{}", yaml);
    println!("\nSave this to config.yaml and adjust as needed.");
    Ok(())
}
