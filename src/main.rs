mod commands;
mod complete;
mod core;
mod release;

use clap::{ArgAction, Parser, Subcommand};
use commands::{CompletionKind, PreviousRevision, ReleaseOptions};
use core::error::{GateError, print_error};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Gate package releases on repository state, then tag them
#[derive(Parser)]
#[command(name = "cargo")]
#[command(bin_name = "cargo")]
#[command(styles = get_styles())]
enum CargoCli {
  Gate(GateCli),
}

#[derive(Parser)]
#[command(name = "gate")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct GateCli {
  /// Repository root (default: current directory)
  #[arg(short = 'C', long = "repo", global = true)]
  repo: Option<PathBuf>,

  /// More diagnostics on stderr (-v debug, -vv trace)
  #[arg(short, long, action = ArgAction::Count, global = true)]
  verbose: u8,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  // ============================================================================
  // Release gating
  // ============================================================================
  /// Check that the repository is in a releasable state
  Validate,

  /// Describe the revision that would be released
  Revision {
    /// Output the revision record as JSON
    #[arg(long)]
    json: bool,
  },

  /// Print the git log since the previous release
  Changelog {
    #[command(flatten)]
    previous: PreviousRevision,
  },

  /// Print `<release>` notes from commits since the previous release
  ReleaseLog {
    #[command(flatten)]
    previous: PreviousRevision,
    /// Output notes as a JSON array
    #[arg(long)]
    json: bool,
  },

  /// Create an annotated release tag and push it upstream
  Tag {
    /// Tag name
    name: String,
    /// Tag message
    #[arg(short, long)]
    message: Option<String>,
  },

  /// Validate, describe, collect notes and tag in one go
  Release {
    /// Tag name
    tag: String,
    /// Tag message
    #[arg(short, long)]
    message: Option<String>,
    #[command(flatten)]
    previous: PreviousRevision,
    /// Write the released revision record (JSON) to this file
    #[arg(long)]
    record: Option<PathBuf>,
    /// Run every check but do not create the tag
    #[arg(long)]
    dry_run: bool,
  },

  // ============================================================================
  // Utilities
  // ============================================================================
  /// Commit tracked changes
  Commit {
    /// Only commit what is already staged
    #[arg(long)]
    no_add: bool,
    /// Commit message
    #[arg(short, long)]
    message: Option<String>,
  },

  /// Print shell completion candidates, one per line
  Complete {
    /// What to complete
    #[arg(value_enum)]
    kind: CompletionKind,
    /// The partial word
    #[arg(default_value = "")]
    prefix: String,
    /// Glob patterns files must match (files only)
    #[arg(long = "pattern")]
    patterns: Vec<String>,
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

/// Diagnostics go to stderr; CARGO_GATE_LOG overrides -v
fn init_tracing(verbose: u8) {
  let default = match verbose {
    0 => "warn",
    1 => "debug",
    _ => "trace",
  };
  let filter = EnvFilter::try_from_env("CARGO_GATE_LOG").unwrap_or_else(|_| EnvFilter::new(default));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .without_time()
    .init();
}

fn main() {
  let CargoCli::Gate(cli) = CargoCli::parse();
  init_tracing(cli.verbose);

  // Completion runs outside any repository
  if let Commands::Complete {
    kind,
    prefix,
    patterns,
  } = &cli.command
  {
    if let Err(err) = commands::run_complete(*kind, prefix, patterns) {
      handle_error(err);
    }
    return;
  }

  let repo_root = match cli.repo {
    Some(path) => path,
    None => match std::env::current_dir() {
      Ok(dir) => dir,
      Err(e) => {
        eprintln!("Error: Failed to get current directory: {}", e);
        std::process::exit(1);
      }
    },
  };

  let ctx = match core::context::GateContext::build(&repo_root) {
    Ok(ctx) => ctx,
    Err(e) => handle_error(e),
  };

  let result = match cli.command {
    Commands::Validate => commands::run_validate(&ctx),
    Commands::Revision { json } => commands::run_revision(&ctx, json),
    Commands::Changelog { previous } => commands::run_changelog(&ctx, &previous),
    Commands::ReleaseLog { previous, json } => commands::run_release_log(&ctx, &previous, json),
    Commands::Tag { name, message } => commands::run_tag(&ctx, &name, message.as_deref()),
    Commands::Release {
      tag,
      message,
      previous,
      record,
      dry_run,
    } => commands::run_release(
      &ctx,
      ReleaseOptions {
        tag: &tag,
        message: message.as_deref(),
        previous: &previous,
        record: record.as_deref(),
        dry_run,
      },
    ),
    Commands::Commit { no_add, message } => commands::run_commit(&ctx, !no_add, message.as_deref()),
    Commands::Complete { .. } => Ok(()),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: GateError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
