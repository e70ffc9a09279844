//! testree - CLI entry point
//!
//! Launches the interactive navigator by default; `list`, `run` and `config`
//! cover the non-interactive uses.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use testree::{
    config::{default, xdg, Config, ConfigLoader},
    logging,
    runner::{CommandRunner, TestRunner},
    tree::{parse_listing, render_rows, Tree},
    tui::app::App,
    Status,
};

/// Interactive terminal navigator for pytest suites
#[derive(Parser)]
#[command(name = "testree")]
#[command(version, about = "Interactive terminal navigator for pytest suites")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Where the listing comes from and how the runner is set up.
#[derive(clap::Args, Debug, Default, Clone, PartialEq)]
struct SourceArgs {
    /// Read the collection listing from FILE (`-` for stdin) instead of
    /// running the collector
    #[arg(long, value_name = "FILE")]
    listing: Option<PathBuf>,

    #[command(flatten)]
    runner: RunnerArgs,
}

/// Runner placement shared by every subcommand that spawns it.
#[derive(clap::Args, Debug, Default, Clone, PartialEq)]
struct RunnerArgs {
    /// Directory to run the test runner in (overrides `runner.working_dir`)
    #[arg(long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Configuration file to load instead of the default location
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

/// Available subcommands for the testree CLI
#[derive(Subcommand)]
enum Commands {
    /// Launch the terminal user interface (default)
    Tui {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Print the collected tree as aligned text rows
    List {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Run one target and exit with its verdict
    Run {
        /// Path-scoped target, e.g. `tests/test_math.py::test_add`
        target: String,

        #[command(flatten)]
        runner: RunnerArgs,
    },

    /// Manage configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Actions for the `config` subcommand.
#[derive(Subcommand)]
enum ConfigAction {
    /// Create default configuration file
    Init {
        /// Overwrite existing configuration (creates backup)
        #[arg(long)]
        force: bool,
    },
    /// Show configuration file path
    Path,
    /// Validate configuration file
    Validate {
        /// File to validate instead of the default location
        path: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command.unwrap_or(Commands::Tui {
        source: SourceArgs::default(),
    }) {
        Commands::Tui { source } => run_tui_command(&source),
        Commands::List { source } => run_list_command(&source),
        Commands::Run { target, runner } => run_run_command(&target, &runner),
        Commands::Config { action } => run_config_command(action),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => code,
    }
}

/// Loads the configuration and builds the runner it describes.
fn load_setup(args: &RunnerArgs) -> Result<(Config, CommandRunner), ExitCode> {
    let config = ConfigLoader::load(args.config.as_deref()).map_err(|e| {
        eprintln!("Config error: {e}");
        ExitCode::FAILURE
    })?;
    let mut runner = CommandRunner::from_config(&config.runner);
    if let Some(dir) = &args.dir {
        runner = runner.in_dir(dir);
    }
    Ok((config, runner))
}

fn init_logging(config: &Config, interactive: bool) -> Result<(), ExitCode> {
    logging::init(&config.log, interactive).map_err(|e| {
        eprintln!("Error: cannot open log file {:?}: {e}", config.log.file);
        ExitCode::FAILURE
    })
}

/// Reads the listing from a file, stdin, or a collection run.
fn load_tree(listing: Option<&Path>, runner: &CommandRunner) -> Result<Tree, ExitCode> {
    let text = match listing {
        Some(path) if path == Path::new("-") => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text).map_err(|e| {
                eprintln!("Error: cannot read listing from stdin: {e}");
                ExitCode::FAILURE
            })?;
            text
        }
        Some(path) => std::fs::read_to_string(path).map_err(|e| {
            eprintln!("Error: cannot read listing {}: {e}", path.display());
            ExitCode::FAILURE
        })?,
        None => {
            let collected = runner.collect().map_err(|e| {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            })?;
            collected.output
        }
    };
    let tree = parse_listing(&text);
    tracing::info!(nodes = tree.node_count(), tests = tree.leaf_count(), "listing parsed");
    Ok(tree)
}

fn run_tui_command(source: &SourceArgs) -> Result<(), ExitCode> {
    let (config, runner) = load_setup(&source.runner)?;
    init_logging(&config, true)?;
    let tree = load_tree(source.listing.as_deref(), &runner)?;

    let mut app = App::new(tree, Box::new(runner))
        .with_view_options(config.tui.indent_width, config.tui.symbols)
        .with_tick_rate(config.tui.tick_rate());
    app.run().map_err(|e| {
        eprintln!("TUI error: {e}");
        ExitCode::FAILURE
    })
}

fn run_list_command(source: &SourceArgs) -> Result<(), ExitCode> {
    let (config, runner) = load_setup(&source.runner)?;
    init_logging(&config, false)?;
    let tree = load_tree(source.listing.as_deref(), &runner)?;
    for row in render_rows(&tree, config.tui.indent_width, config.tui.symbols) {
        println!("{row}");
    }
    Ok(())
}

/// Prints the target's output; a failing run maps to a failing exit.
fn run_run_command(target: &str, args: &RunnerArgs) -> Result<(), ExitCode> {
    let (config, runner) = load_setup(args)?;
    init_logging(&config, false)?;

    let result = runner.run(target).map_err(|e| {
        eprintln!("Error: {e}");
        ExitCode::FAILURE
    })?;
    print!("{}", result.output);
    let status = result.status();
    tracing::info!(%target, %status, exit_code = ?result.exit_code, "run finished");
    match status {
        Status::Passed => Ok(()),
        _ => Err(ExitCode::FAILURE),
    }
}

fn run_config_command(action: ConfigAction) -> Result<(), ExitCode> {
    let result = match action {
        ConfigAction::Init { force } => match default::create_default_config(force) {
            Ok(path) => {
                println!("Created configuration at {}", path.display());
                Ok(())
            }
            Err(e) => Err(e),
        },
        ConfigAction::Path => {
            println!("{}", xdg::config_path().display());
            Ok(())
        }
        ConfigAction::Validate { path } => match ConfigLoader::load(path.as_deref()) {
            Ok(config) => {
                println!("Configuration is valid");
                println!("{config:#?}");
                Ok(())
            }
            Err(e) => Err(e),
        },
    };
    result.map_err(|e| {
        eprintln!("Config error: {e}");
        ExitCode::FAILURE
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_defaults_to_tui() {
        let cli = Cli::try_parse_from(["testree"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_list_accepts_listing_and_dir() {
        let cli = Cli::try_parse_from([
            "testree", "list", "--listing", "-", "--dir", "/srv/proj",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::List { source }) => {
                assert_eq!(source.listing, Some(PathBuf::from("-")));
                assert_eq!(source.runner.dir, Some(PathBuf::from("/srv/proj")));
                assert_eq!(source.runner.config, None);
            }
            _ => panic!("unexpected command variant"),
        }
    }

    #[test]
    fn test_run_requires_target() {
        assert!(Cli::try_parse_from(["testree", "run"]).is_err());
        let cli = Cli::try_parse_from([
            "testree",
            "run",
            "tests/test_math.py::test_add",
            "--config",
            "/tmp/testree.toml",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Run { target, runner }) => {
                assert_eq!(target, "tests/test_math.py::test_add");
                assert_eq!(runner.config, Some(PathBuf::from("/tmp/testree.toml")));
            }
            _ => panic!("unexpected command variant"),
        }
    }

    #[test]
    fn test_config_init_force_flag() {
        let cli = Cli::try_parse_from(["testree", "config", "init", "--force"]).unwrap();
        match cli.command {
            Some(Commands::Config {
                action: ConfigAction::Init { force },
            }) => assert!(force),
            _ => panic!("unexpected command variant"),
        }
    }

    #[test]
    fn test_config_validate_optional_path() {
        let cli = Cli::try_parse_from(["testree", "config", "validate"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Validate { path: None }
            })
        ));
    }

    #[test]
    fn test_unknown_subcommand_rejected() {
        assert!(Cli::try_parse_from(["testree", "serve"]).is_err());
    }
}
