//! CLI for wp2ssl.

mod commands;
mod console;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use wp2ssl_core::config;

use commands::{run_check, run_migrate, run_show_rules};

/// Top-level CLI for wp2ssl.
#[derive(Debug, Parser)]
#[command(name = "wp2ssl", version)]
#[command(about = "Move a WordPress site from HTTP to HTTPS", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Export and archive the database, rewrite URLs to HTTPS and add redirect rules.
    #[command(visible_alias = "migrate-to-ssl")]
    Migrate {
        /// Export file name to use instead of `<domain>-<timestamp>.sql`.
        name: Option<String>,

        /// Leave `.htaccess` untouched.
        #[arg(long)]
        skip_htaccess: bool,
    },

    /// Run the precondition checks only; changes nothing.
    Check,

    /// Print the rewrite rules that `migrate` prepends to `.htaccess`.
    ShowRules,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init().context("load config")?;
        tracing::debug!("loaded config: {:?}", cfg);
        let cwd = std::env::current_dir().context("read current directory")?;
        let root = cfg.site_root(&cwd);
        tracing::debug!("site root: {}", root.display());

        match cli.command {
            CliCommand::Migrate {
                name,
                skip_htaccess,
            } => run_migrate(&cfg, &root, name, skip_htaccess)?,
            CliCommand::Check => run_check(&cfg, &root)?,
            CliCommand::ShowRules => run_show_rules()?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
