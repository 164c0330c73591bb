//! Command-line surface: argument parsing and command dispatch.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};

use unitconv_core::calculator;
use unitconv_core::db::Database;
use unitconv_core::UnitTable;

use crate::config::AppConfig;
use crate::render;
use crate::service::{ConversionForm, ConverterService};

#[derive(Debug, Parser)]
#[command(name = "unitconv")]
#[command(about = "Convert length, mass, temperature, volume and speed units")]
pub struct Cli {
    /// History database path (overrides config and UNITCONV_DB)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert a value and record it in the history
    Convert {
        /// Value to convert
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Source unit (e.g. "km", "°F", "fl oz")
        from: String,

        /// Target unit
        to: String,

        /// Category (length, mass, temperature, volume, speed); inferred when omitted
        #[arg(short, long)]
        category: Option<String>,

        /// Swap source and target before converting
        #[arg(long)]
        swap: bool,
    },
    /// Add two numbers; operands are read up to the first non-numeric character
    Sum {
        #[arg(allow_hyphen_values = true)]
        a: String,
        #[arg(allow_hyphen_values = true)]
        b: String,
    },
    /// List categories and their units
    Units {
        /// Only this category
        category: Option<String>,
    },
    /// Show the most recent conversions
    History,
    /// Delete the conversion history
    ClearHistory,
}

/// How a command finished when it did not hit an unexpected error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    /// The input was rejected; the message went to the error stream.
    Rejected,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => ExitCode::SUCCESS,
            Status::Rejected => ExitCode::FAILURE,
        }
    }
}

/// Pick the history database: `--db` first, then the configured path
/// (which already carries `UNITCONV_DB`). `None` means the default location.
pub fn resolve_db_path(cli_path: Option<PathBuf>, config: &AppConfig) -> Option<PathBuf> {
    cli_path.or_else(|| config.database_path.clone())
}

fn open_database(cli_path: Option<PathBuf>, config: &AppConfig) -> anyhow::Result<Database> {
    let db = match resolve_db_path(cli_path, config) {
        Some(path) => Database::open(path)?,
        None => Database::open_default()?,
    };
    db.migrate().context("Failed to migrate history database")?;
    Ok(db)
}

/// Run one command, writing results to `out` and rejections to `err`.
pub fn run(
    cli: Cli,
    config: &AppConfig,
    out: &mut impl Write,
    err: &mut impl Write,
) -> anyhow::Result<Status> {
    match cli.command {
        Commands::Convert {
            value,
            from,
            to,
            category,
            swap,
        } => {
            let db = open_database(cli.db, config)?;
            let mut service = ConverterService::new(config.policy(), db);

            let mut form = ConversionForm::new(value, from, to);
            form.category = category;
            if swap {
                form.swap_units();
            }

            match service.submit(&form) {
                Ok(conversion) => writeln!(out, "{}", conversion.display)?,
                Err(e) => {
                    tracing::debug!("Conversion rejected: {}", e);
                    writeln!(err, "{}", e.user_message())?;
                    return Ok(Status::Rejected);
                }
            }
        }
        Commands::Sum { a, b } => {
            writeln!(out, "{}", calculator::format_sum(calculator::sum(&a, &b)))?;
        }
        Commands::Units { category } => {
            let table = UnitTable::standard();
            let category = match category {
                Some(name) => match table.category(&name) {
                    Ok(category) => Some(category),
                    Err(e) => {
                        writeln!(err, "{}", e.user_message())?;
                        return Ok(Status::Rejected);
                    }
                },
                None => None,
            };
            write!(out, "{}", render::render_units(table, category))?;
        }
        Commands::History => {
            let db = open_database(cli.db, config)?;
            let service = ConverterService::new(config.policy(), db);
            write!(out, "{}", render::render_history(service.history()))?;
        }
        Commands::ClearHistory => {
            let db = open_database(cli.db, config)?;
            let mut service = ConverterService::new(config.policy(), db);
            service
                .clear_history()
                .context("Failed to clear conversion history")?;
            writeln!(out, "History cleared")?;
        }
    }

    Ok(Status::Success)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ENV_DATABASE;
    use std::fs;

    fn config_with_db(path: &str) -> AppConfig {
        AppConfig {
            database_path: Some(PathBuf::from(path)),
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_cli_path_wins() {
        let config = config_with_db("/config/history.db");
        assert_eq!(
            resolve_db_path(Some(PathBuf::from("/cli/history.db")), &config),
            Some(PathBuf::from("/cli/history.db"))
        );
    }

    #[test]
    fn test_env_beats_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"database_path": "/config/history.db"}"#).unwrap();

        let from_file = AppConfig::load_from(&path).unwrap();
        assert_eq!(
            resolve_db_path(None, &from_file),
            Some(PathBuf::from("/config/history.db"))
        );

        let with_env = from_file.with_env_overrides(|key: &str| {
            (key == ENV_DATABASE).then(|| "/env/history.db".to_string())
        });
        assert_eq!(
            resolve_db_path(None, &with_env),
            Some(PathBuf::from("/env/history.db"))
        );
        assert_eq!(
            resolve_db_path(Some(PathBuf::from("/cli/history.db")), &with_env),
            Some(PathBuf::from("/cli/history.db"))
        );
    }

    #[test]
    fn test_no_path_means_default_location() {
        assert_eq!(resolve_db_path(None, &AppConfig::default()), None);
    }
}
