//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::Value;

use super::commands::{self, Context, Preference};
use docreview::api::{ExportFormat, parse_review_option};
use docreview::output::OutputMode;

/// docreview - Document review workflow client
#[derive(Parser, Debug)]
#[command(
    name = "docreview",
    version,
    about = "Document review workflow client",
    long_about = "Drive a document through the review backend.\n\n\
                  Upload a document, parse it into a requirement tree, validate the tree,\n\
                  then export the report. Each step needs the ids produced by the one before."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: ~/.docreview/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default config file
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Upload a document and make it the current one
    Upload {
        /// File to upload
        file: PathBuf,
    },

    /// List documents on the server
    Documents,

    /// Show document details (default: current document)
    Document {
        /// Document ID
        id: Option<String>,
    },

    /// Parse the current document into a requirement tree
    Parse,

    /// Fetch a parse result (default: current parse)
    ParseResult {
        /// Parse ID
        id: Option<String>,
    },

    /// Validate the current parse result
    Review {
        /// Extra validation option, repeatable
        #[arg(long = "option", value_name = "KEY=VALUE", value_parser = parse_review_option)]
        options: Vec<(String, Value)>,
    },

    /// Fetch a review result (default: current review)
    ReviewResult {
        /// Review ID
        id: Option<String>,
    },

    /// Export the report for the current review
    Report {
        /// Report format: pdf, docx, html
        #[arg(short, long, default_value = "pdf")]
        format: ExportFormat,

        /// Where to write the report (default: report-<review-id>.<format>)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show stored ids and workflow progress
    Status,

    /// Navigate to a step or path through the step guards
    Goto {
        /// Step name (upload, parse, review, report) or route path
        target: String,
    },

    /// Forget the current document and everything derived from it
    Reset {
        /// Also reset theme and language
        #[arg(long)]
        all: bool,
    },

    /// Persist a preference
    Set {
        /// Preference: theme, language
        key: Preference,

        /// New value
        value: String,
    },

    /// Show version
    Version,
}

/// Run the CLI
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let Some(command) = cli.command else {
        if output_mode == OutputMode::Json {
            println!(
                "{}",
                serde_json::json!({
                    "version": env!("CARGO_PKG_VERSION"),
                    "hint": "Use --help for usage"
                })
            );
        } else {
            println!("docreview v{}", env!("CARGO_PKG_VERSION"));
            println!("\nRun 'docreview --help' for usage");
            println!("Run 'docreview upload <FILE>' to get started");
        }
        return Ok(());
    };

    match command {
        Command::Init { force } => commands::init(cli.config.as_deref(), force, output_mode),
        Command::Version => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION")
                    })
                );
            } else {
                println!("docreview v{}", env!("CARGO_PKG_VERSION"));
            }
            Ok(())
        },
        command => {
            // reset is the way out of a corrupt storage file
            let recover = matches!(command, Command::Reset { .. });
            let mut ctx = Context::load(cli.config.as_deref(), output_mode, recover)?;
            dispatch(&mut ctx, command).await
        },
    }
}

async fn dispatch(ctx: &mut Context, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Upload { file } => commands::upload(ctx, &file).await,
        Command::Documents => commands::documents(ctx).await,
        Command::Document { id } => commands::document(ctx, id.as_deref()).await,
        Command::Parse => commands::parse(ctx).await,
        Command::ParseResult { id } => commands::parse_result(ctx, id.as_deref()).await,
        Command::Review { options } => commands::review(ctx, options.into_iter().collect()).await,
        Command::ReviewResult { id } => commands::review_result(ctx, id.as_deref()).await,
        Command::Report { format, output } => commands::report(ctx, format, output).await,
        Command::Status => {
            commands::status(ctx);
            Ok(())
        },
        Command::Goto { target } => commands::goto(ctx, &target),
        Command::Reset { all } => commands::reset(ctx, all),
        Command::Set { key, value } => commands::set(ctx, key, &value),
        Command::Init { .. } | Command::Version => Ok(()),
    }
}
