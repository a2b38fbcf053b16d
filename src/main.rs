use std::fs::File;
use std::io;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use quill::Provider;
use quill::api::{self, ApiClient};
use quill::core::config::{CliOverrides, load_config, resolve};
use quill::gateway::{Gateway, WritingBackend};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode, WriteLogger};

#[derive(Parser)]
#[command(name = "quill", about = "Prompt-driven writing assistant")]
struct Args {
    /// LLM provider to use
    #[arg(short, long, value_enum)]
    provider: Option<Provider>,

    /// Model name passed to the provider
    #[arg(short, long)]
    model: Option<String>,

    /// Use a running `quill serve` instance instead of calling the provider directly
    #[arg(long)]
    server: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the writing API over HTTP
    Serve {
        /// Address to bind, e.g. 127.0.0.1:3000
        #[arg(long)]
        listen: Option<String>,
    },
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let serving = matches!(args.command, Some(Command::Serve { .. }));
    if serving {
        let _ = TermLogger::init(
            LevelFilter::Info,
            log_config,
            TerminalMode::Stderr,
            ColorChoice::Auto,
        );
    } else if let Ok(log_file) = File::create("quill.log") {
        // The TUI owns the terminal, so logs go to a file
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = load_config().unwrap_or_else(|e| {
        log::warn!("Ignoring config file: {}", e);
        Default::default()
    });
    let cli = CliOverrides {
        provider: args.provider.map(|p| p.as_str().to_string()),
        model: args.model,
        server: args.server,
        listen: match &args.command {
            Some(Command::Serve { listen }) => listen.clone(),
            None => None,
        },
    };
    let config = resolve(&file_config, &cli);

    log::info!(
        "Quill starting up: provider={} model={}",
        config.provider,
        config.model_name
    );

    if serving {
        let gateway = Gateway::from_config(&config).map_err(io::Error::other)?;
        return api::serve(&config.listen_addr, Arc::new(gateway)).await;
    }

    let backend: Arc<dyn WritingBackend> = match &config.server_url {
        Some(url) => Arc::new(ApiClient::new(url.clone())),
        None => Arc::new(Gateway::from_config(&config).map_err(io::Error::other)?),
    };
    quill::tui::run(backend)
}
