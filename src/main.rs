mod checks;
mod commands;
mod core;
mod ui;
mod utils;

use clap::{Parser, Subcommand};
use core::error::{StampError, print_error};

/// Stamp release versions into docs and drive the documentation build
#[derive(Parser)]
#[command(name = "docstamp")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  // ============================================================================
  // Setup & Inspection
  // ============================================================================
  /// Initialize docstamp configuration for a project
  Init {
    /// Project (library) name, used in default paths and rules
    name: String,
    /// Overwrite an existing configuration
    #[arg(short, long)]
    force: bool,
  },

  /// Show the release string and derived docs version
  Version {
    /// Output results in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Run health checks and diagnostics
  Doctor {
    /// Run thorough checks (includes tool probes)
    #[arg(long)]
    thorough: bool,
    /// Output results in JSON format
    #[arg(long)]
    json: bool,
  },

  // ============================================================================
  // Stamping & Patching
  // ============================================================================
  /// Rewrite version stamps in tracked documentation files
  Stamp {
    /// Show what would change without writing anything
    #[arg(long)]
    dry_run: bool,
    /// Output per-target results in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Apply post-build text fixups to generated pages
  Patch {
    /// Show what would change without writing anything
    #[arg(long)]
    dry_run: bool,
  },

  // ============================================================================
  // Building
  // ============================================================================
  /// Generate API reference docs from library sources
  Api {
    /// Show the command without running it
    #[arg(long)]
    dry_run: bool,
  },

  /// Run the full pipeline (stamp, clean, build, patch, API docs)
  Build {
    /// Show the plan without executing it
    #[arg(long)]
    dry_run: bool,
    /// Skip the API doc generation step
    #[arg(long)]
    skip_api: bool,
    /// Output the plan in JSON format (useful for CI/automation)
    #[arg(long)]
    json: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  let result = match cli.command {
    // Setup & Inspection
    Commands::Init { name, force } => commands::run_init(name, force),
    Commands::Version { json } => commands::run_version(json),
    Commands::Doctor { thorough, json } => commands::run_doctor(thorough, json),

    // Stamping & Patching
    Commands::Stamp { dry_run, json } => commands::run_stamp(dry_run, json),
    Commands::Patch { dry_run } => commands::run_patch(dry_run),

    // Building
    Commands::Api { dry_run } => commands::run_api(dry_run),
    Commands::Build { dry_run, skip_api, json } => commands::run_build(dry_run, skip_api, json),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: StampError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
