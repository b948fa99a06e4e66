use clap::Parser;
use ohmygpt::core::config;
use ohmygpt::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(
    name = "ohmygpt",
    about = "Terminal client for a streaming text-generation endpoint"
)]
struct Args {
    /// Base URL of the generation endpoint
    #[arg(short, long)]
    endpoint: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to ohmygpt.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("ohmygpt.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let client_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Falling back to default config: {e}");
            config::ClientConfig::default()
        }
    };
    let resolved = config::resolve(&client_config, args.endpoint.as_deref());

    log::info!("OhMyGPT starting up (endpoint: {})", resolved.endpoint);

    tui::run(resolved)
}
