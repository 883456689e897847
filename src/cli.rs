use clap::{Parser, Subcommand};
use std::path::PathBuf;
use anyhow::Result;
use tracing::{info, warn};

use crate::core::{report, Engine, SelectionOptions};
use crate::menu;

#[derive(Parser)]
#[command(name = "javascope")]
#[command(about = "Structural metrics and call graphs for Java projects")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default configuration file
    Init {
        /// Target directory (defaults to current directory)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Show structural statistics of a project
    Stats {
        /// Project root containing the source directory
        project: PathBuf,

        /// Share of classes reported as outliers, in percent
        #[arg(long)]
        percent: Option<f64>,

        /// Report classes with more methods than this
        #[arg(long)]
        threshold: Option<usize>,

        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate the call graph description and image of a project
    Graph {
        /// Project root containing the source directory
        project: PathBuf,
    },

    /// Interactive numbered menu
    Menu,
}

impl Cli {
    pub async fn execute(self, mut engine: Engine) -> Result<()> {
        match self.command {
            Commands::Init { path, force } => init(&engine, path, force),
            Commands::Stats { project, percent, threshold, json } => {
                let project = engine.open_project(&project)?;
                let defaults = engine.selection_options();
                let options = SelectionOptions {
                    percent: percent.unwrap_or(defaults.percent),
                    threshold: threshold.unwrap_or(defaults.threshold),
                };

                let stats = engine.statistics(&project, options)?;
                if json {
                    println!("{}", report::statistics_json(project.source_dir(), &stats)?);
                } else {
                    print!("{}", report::format_statistics(&stats));
                }
                Ok(())
            }
            Commands::Graph { project } => {
                let project = engine.open_project(&project)?;
                let artifacts = engine.generate_call_graph(&project).await?;
                print!("{}", report::format_graph_summary(&artifacts));
                Ok(())
            }
            Commands::Menu => {
                let stdin = tokio::io::BufReader::new(tokio::io::stdin());
                let mut stdout = std::io::stdout();
                menu::run_menu(&mut engine, stdin, &mut stdout).await?;
                Ok(())
            }
        }
    }
}

fn init(engine: &Engine, path: Option<PathBuf>, force: bool) -> Result<()> {
    let target_dir = match path {
        Some(p) => p,
        None => std::env::current_dir()?,
    };
    let config_path = target_dir.join("javascope.toml");

    if config_path.exists() && !force {
        warn!("{} already exists, use --force to overwrite", config_path.display());
        return Ok(());
    }

    engine.config().save(&config_path)?;
    info!("Wrote configuration: {}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_stats_flags() {
        let cli = Cli::try_parse_from([
            "javascope", "stats", "demo", "--percent", "25", "--threshold", "3", "--json",
        ])
        .unwrap();

        match cli.command {
            Commands::Stats { project, percent, threshold, json } => {
                assert_eq!(project, PathBuf::from("demo"));
                assert_eq!(percent, Some(25.0));
                assert_eq!(threshold, Some(3));
                assert!(json);
            }
            _ => panic!("expected stats command"),
        }
    }

    #[test]
    fn test_init_does_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let engine = Engine::with_config(crate::config::Config::default()).unwrap();
        let config_path = dir.path().join("javascope.toml");
        std::fs::write(&config_path, "# custom\n").unwrap();

        init(&engine, Some(dir.path().to_path_buf()), false).unwrap();
        assert_eq!(std::fs::read_to_string(&config_path).unwrap(), "# custom\n");

        init(&engine, Some(dir.path().to_path_buf()), true).unwrap();
        assert!(std::fs::read_to_string(&config_path).unwrap().contains("[graph]"));
    }
}
