//! Random Roll - Entry Point
//!
//! The launcher runs this binary once per query with the JSON-RPC request as
//! its only argument and reads one line of JSON from stdout. Logs go to
//! stderr so they never mix with the response.

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use random_roll::core::config::{Settings, SETTINGS_FILE_NAME};
use random_roll::plugin::{PluginHandler, RpcResponse};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Random Roll launcher plugin
#[derive(Parser, Debug)]
#[command(name = "random-roll")]
#[command(version)]
#[command(about = "Launcher plugin for yes/no answers, number rolls and random picks")]
struct Args {
    /// JSON-RPC request passed by the launcher host
    request: Option<String>,

    /// Settings file (defaults to settings.json next to the executable)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Random seed for reproducible rolls
    #[arg(long)]
    seed: Option<u64>,

    /// Enable debug logging on stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let response = match args.request.as_deref() {
        Some(raw) => {
            let settings_path = args.settings.clone().unwrap_or_else(default_settings_path);
            let handler = PluginHandler::new(Settings::load_or_default(&settings_path));
            tracing::debug!(path = ?settings_path, settings = ?handler.settings(), "loaded settings");

            match args.seed {
                Some(seed) => handler.handle_raw(raw, &mut ChaCha8Rng::seed_from_u64(seed)),
                None => handler.handle_raw(raw, &mut rand::thread_rng()),
            }
        }
        None => RpcResponse::error("No JSON-RPC request provided"),
    };

    match response.to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => {
            tracing::error!("Failed to encode response: {}", e);
            println!(r#"{{"error":"Failed to encode response"}}"#);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "random_roll=debug"
    } else {
        "random_roll=warn"
    };
    let filter = EnvFilter::try_from_env("RANDOM_ROLL_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// `settings.json` beside the executable, where the host keeps plugin files
fn default_settings_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(SETTINGS_FILE_NAME)))
        .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE_NAME))
}
