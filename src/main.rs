use clap::Parser;
use tracing::error;

use tradepost::app::App;
use tradepost::cli::Cli;
use tradepost::config::Config;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = match Config::load_or_default(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    config.init_logging();

    if let Err(e) = App::run(cli, config).await {
        error!(error = %e, "Fatal error");
        std::process::exit(1);
    }
}
