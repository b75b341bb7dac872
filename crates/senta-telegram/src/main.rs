//! Senta Telegram bot binary.
//!
//! Start the bot with:
//! ```bash
//! cargo run -p senta-telegram -- /path/to/config.json
//! ```

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use senta_core::Settings;
use senta_telegram::cli::{self, Invocation};
use senta_telegram::{About, Result, SentaBot};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let about = About::current();

    match cli::parse_args(std::env::args_os()) {
        Invocation::Usage => {
            print!("{}", about.usage_text());
            ExitCode::SUCCESS
        }
        Invocation::Version => {
            print!("{}", about.version_text());
            ExitCode::SUCCESS
        }
        Invocation::UnknownArgument(arg) => {
            println!("Unknown argument: {}", arg);
            println!("More information: {} help", about.bin);
            ExitCode::FAILURE
        }
        Invocation::Invalid(message) => {
            eprint!("{}", message);
            ExitCode::FAILURE
        }
        Invocation::Run { config, verbose } => {
            init_logging(verbose);
            tracing::info!(version = %about.version_string(), "Start server");

            match run(&config).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    tracing::error!(error = %e, config = %config.display(), "Bot terminated");
                    eprintln!("Error: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
    }
}

fn init_logging(verbose: u8) {
    // RUST_LOG wins over --verbose
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli::log_filter(verbose)));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run(config: &Path) -> Result<()> {
    // Optional .env with SENTA_TLG_TOKEN / SENTA_API_TOKEN
    let _ = dotenvy::dotenv();

    let mut settings = Settings::load(config)?;
    settings.apply_env_overrides();
    settings.validate()?;
    tracing::debug!(settings = ?settings, "Effective settings");

    let bot = SentaBot::new(Arc::new(settings));

    let username = bot.get_me().await?;
    tracing::info!(username = %username, "Bot initialized successfully");
    println!("\n[robot] Senta Telegram Bot");
    println!("   Bot: @{}", username);
    println!("\n[phone] Open Telegram and send /start to begin");
    println!("   Press Ctrl+C to stop\n");

    bot.start_polling().await
}
