mod cmd;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use extbuild_lib::cmake::DEFAULT_PROGRAM;
use extbuild_lib::env::EXTBUILD_CMAKE;

use cmd::{BuildArgs, cmd_build, cmd_info, cmd_plan};
use output::{OutputFormat, Status};

/// extbuild - build native extension modules with CMake
#[derive(Parser)]
#[command(name = "extbuild")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Configure and build every extension in the manifest
  Build(BuildArgs),

  /// Show the cmake invocations a build would run
  Plan {
    #[command(flatten)]
    args: BuildArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
  },

  /// Show platform and cmake information
  Info {
    /// CMake executable to inspect
    #[arg(long, env = EXTBUILD_CMAKE, default_value = DEFAULT_PROGRAM)]
    cmake: String,
  },
}

fn main() {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let result = match &cli.command {
    Commands::Build(args) => cmd_build(args),
    Commands::Plan { args, output } => cmd_plan(args, *output),
    Commands::Info { cmake } => {
      cmd_info(cmake);
      Ok(())
    }
  };

  if let Err(err) = result {
    output::status(Status::Failed, &format!("{:#}", err));
    std::process::exit(1);
  }
}
