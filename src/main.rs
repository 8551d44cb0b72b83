use clap::Parser;
use tracing::error;

use pageviews::cli::{Cli, Commands};
use pageviews::config::{get_config, init_config_from};
use pageviews::interfaces::cli::run_cli_command;
use pageviews::system::init_logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_config_from(&cli.config);
    let config = get_config();

    // config generate 不需要日志
    let guard = if matches!(cli.command, Commands::Config { .. }) {
        None
    } else {
        match init_logging(&config.logging) {
            Ok(guard) => Some(guard),
            Err(e) => {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
        }
    };

    if let Err(e) = run_cli_command(cli.command, &config).await {
        error!("{}", e);
        eprintln!("{}", e.format_colored());
        // exit 不会运行析构，先刷新日志
        drop(guard);
        std::process::exit(1);
    }
}
