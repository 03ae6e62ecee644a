use clap::{Parser, Subcommand};
use std::sync::Arc;

mod domain;
mod application;
mod infrastructure;

use application::errors::ChatError;
use application::services::{ChatService, ConversationStore};
use infrastructure::adapters::ConsoleAdapter;
use infrastructure::clipboard::SystemClipboard;
use infrastructure::config::Config;
use infrastructure::llm::GeminiProvider;

#[derive(Parser)]
#[command(name = "gemini-chat")]
#[command(about = "A minimal terminal chat for the Gemini API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml", global = true)]
    config: String,

    /// API key (overrides config and environment)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Model identifier (overrides config and environment)
    #[arg(long, global = true)]
    model: Option<String>,

    /// Log at info level instead of warn
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat
    Run,
    /// Send one message and print the reply
    Ask {
        /// Message text
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging; stdout belongs to the transcript
    let level = if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    let result = match cli.command {
        Commands::Run => load_config(&cli).and_then(run_chat),
        Commands::Ask { ref text } => {
            let text = text.join(" ");
            load_config(&cli).and_then(|config| ask_once(config, text))
        }
        Commands::Version => {
            println!("gemini-chat v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(),
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<Config, ChatError> {
    let mut config = Config::load_or_default(&cli.config)?;

    if let Some(key) = &cli.api_key {
        config.llm.api_key = Some(key.clone());
    }
    if let Some(model) = &cli.model {
        config.llm.model = model.clone();
    }
    config.validate()?;

    tracing::info!(model = %config.llm.model, "Configuration loaded");
    Ok(config)
}

fn build_service(config: &Config) -> Result<ChatService, ChatError> {
    let provider = GeminiProvider::new(&config.llm)?;
    Ok(ChatService::new(Arc::new(provider)))
}

fn run_chat(config: Config) -> Result<(), ChatError> {
    let service = build_service(&config)?;
    let rt = tokio::runtime::Runtime::new()?;

    rt.block_on(async {
        let mut store = ConversationStore::new();
        let mut console = ConsoleAdapter::new(config.chat.clone(), SystemClipboard::new());
        console.attach(&mut store);
        console.run(&service, &mut store).await
    })
}

fn ask_once(config: Config, text: String) -> Result<(), ChatError> {
    let service = build_service(&config)?;
    let rt = tokio::runtime::Runtime::new()?;

    let reply = rt.block_on(service.ask(text))?;
    println!("{}", reply);
    Ok(())
}

fn init_config() -> Result<(), ChatError> {
    let yaml = Config::default().to_yaml()?;
    println!("{}", yaml);
    println!("\nSave this to config.yaml and adjust as needed.");
    Ok(())
}
