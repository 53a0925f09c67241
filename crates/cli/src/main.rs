mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use kbstore_lib::{ContainerPaths, consts::CONTAINER_ENV};
use tracing_subscriber::EnvFilter;

use cmd::{CustardCommand, TabBarCommand, ThemeCommand, cmd_custards, cmd_tabbars, cmd_themes};
use output::print_error;

/// kbstore - inspect and repair a shared keyboard asset container
#[derive(Parser)]
#[command(name = "kbstore")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Container directory shared with the keyboard extension
  #[arg(long, global = true, env = CONTAINER_ENV)]
  container: Option<PathBuf>,

  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Manage keyboard themes
  #[command(subcommand)]
  Themes(ThemeCommand),

  /// Manage custom layouts
  #[command(subcommand)]
  Custards(CustardCommand),

  /// Manage tab bars
  #[command(subcommand)]
  Tabbars(TabBarCommand),
}

fn init_logging(verbose: bool) {
  let default = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  let paths = match cli.container {
    Some(root) => ContainerPaths::new(root),
    None => ContainerPaths::from_env(),
  };
  tracing::debug!(container = %paths.root().display(), "using container");

  let result = match cli.command {
    Commands::Themes(command) => cmd_themes(&paths, command),
    Commands::Custards(command) => cmd_custards(&paths, command),
    Commands::Tabbars(command) => cmd_tabbars(&paths, command),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      print_error(&format!("{:#}", e));
      ExitCode::FAILURE
    }
  }
}
