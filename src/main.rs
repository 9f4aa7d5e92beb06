mod backend;
mod core;
#[cfg(test)]
mod test_support;
mod tui;

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use crate::core::config;

#[derive(Parser)]
#[command(name = "bookworm", about = "Children's book-recommendation chat")]
struct Args {
    /// Child profile id to run as (overrides config and BOOKWORM_CHILD)
    #[arg(short, long)]
    child: Option<String>,

    /// Run without collaborators: empty store, replies degrade gracefully
    #[arg(long)]
    offline: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to bookworm.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("bookworm.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("bookworm: {e}");
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidData, e));
        }
    };
    let resolved = config::resolve(&file_config, args.child.as_deref(), args.offline);

    log::info!(
        "Bookworm starting up (chat: {}, store: {}, offline: {})",
        resolved.chat_base_url,
        resolved.store_base_url,
        resolved.offline
    );

    tui::run(resolved)
}
