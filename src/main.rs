use clap::Parser;
use tokio::io::BufReader;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cellyeah_tutor::{
    anthropic::AnthropicClient,
    config::{Config, LogFormat},
    repl::Repl,
    topics::Topic,
    TutorSession,
};

/// CellYeah: your friendly biology & medical science tutor.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Topic to start with (slug, number or full name)
    #[arg(long, default_value = "general")]
    topic: Topic,

    /// Ask for structured, exam-ready explanations
    #[arg(long)]
    exam_ready: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Set ANTHROPIC_API_KEY in the environment or a .env file.");
            std::process::exit(1);
        }
    };
    if args.exam_ready {
        config.tutor.exam_ready_prefix = true;
    }

    // Initialize logging
    init_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        model = %config.anthropic.model,
        topic = %args.topic,
        "CellYeah starting..."
    );

    let client = match AnthropicClient::new(&config.anthropic, config.request.clone()) {
        Ok(c) => {
            info!(base_url = %config.anthropic.base_url, "Anthropic client initialized");
            c
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize Anthropic client");
            return Err(e.into());
        }
    };

    let session = TutorSession::new(client, &config.tutor);
    let mut repl = Repl::new(session, args.topic);

    let stdin = BufReader::new(tokio::io::stdin());
    if let Err(e) = repl.run(stdin, tokio::io::stdout()).await {
        error!(error = %e, "REPL error");
        return Err(e.into());
    }

    info!("Session ended");
    Ok(())
}

/// Initialize tracing/logging
fn init_logging(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
