use anyhow::Result;
use clap::Parser;
use stationery_order_cli::{
    cli::{
        app::{log_filter, ShopApp},
        args::Args,
    },
    utils::Config,
};
use tracing_subscriber::EnvFilter;

// Logs go to stderr so they never interleave with the receipt on stdout
fn init_tracing(filter: EnvFilter) {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(log_filter(args.verbose, &Config::default().log_level));
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    init_tracing(log_filter(args.verbose, &config.log_level));
    tracing::info!(
        "Configuration loaded for {} environment",
        config.environment
    );

    ShopApp::new(config, args).run()
}
