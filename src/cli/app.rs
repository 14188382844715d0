use anyhow::{Context, Result};
use std::io::{self, IsTerminal};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::{
    cli::{
        args::Args,
        prompt::{StreamPrompter, TerminalPrompter},
        session::{Session, SessionOptions},
    },
    models::catalog::Catalog,
    utils::Config,
};

/// `--verbose` forces debug; otherwise `RUST_LOG` wins over the configured level.
pub fn log_filter(verbose: bool, level: &str) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    }
}

pub struct ShopApp {
    config: Config,
    args: Args,
}

impl ShopApp {
    pub fn new(config: Config, args: Args) -> Self {
        Self { config, args }
    }

    /// Flags win over the environment.
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            selection_limit: self
                .args
                .limit
                .map(|limit| usize::try_from(limit).unwrap_or(usize::MAX))
                .unwrap_or(self.config.selection_limit),
            receipt_format: self.args.format,
        }
    }

    pub fn run(&self) -> Result<()> {
        if self.args.no_color {
            console::set_colors_enabled(false);
        }

        let catalog = Catalog::with_currency(self.config.currency_label.as_str());
        let options = self.session_options();
        debug!("Session options: {:?}", options);

        let stdout = io::stdout();
        let out = stdout.lock();

        let order = if self.args.script || !io::stdin().is_terminal() {
            info!("Reading answers from stdin stream");
            let stdin = io::stdin();
            Session::new(&catalog, options, StreamPrompter::new(stdin.lock()), out).run()
        } else {
            Session::new(&catalog, options, TerminalPrompter::default(), out).run()
        }
        .context("Order session failed")?;

        info!(
            "Printed receipt for '{}' ({} line(s))",
            order.customer(),
            order.lines().len()
        );
        Ok(())
    }
}
