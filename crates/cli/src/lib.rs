pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "aftercall",
    about = "Post-call analysis CLI",
    long_about = "Run the post-call pipeline over a call-export JSON file: reconcile dynamic \
                  variables, audit the booking trace, classify the taxonomy tags, and score \
                  completeness.",
    after_help = "Examples:\n  aftercall analyze call.json --pretty\n  aftercall classify call.json --rules extra_rules.toml\n  aftercall audit call.json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Run the full pipeline and emit the derived analysis bundle")]
    Analyze {
        #[arg(help = "Path to a call-export JSON file")]
        file: PathBuf,
        #[arg(long, help = "TOML file with extra tag rules appended after the defaults")]
        rules: Option<PathBuf>,
        #[arg(long, help = "Pretty-print the JSON output")]
        pretty: bool,
    },
    #[command(about = "Reconcile and classify only, emitting the taxonomy tag set")]
    Classify {
        #[arg(help = "Path to a call-export JSON file")]
        file: PathBuf,
        #[arg(long, help = "TOML file with extra tag rules appended after the defaults")]
        rules: Option<PathBuf>,
        #[arg(long, help = "Pretty-print the JSON output")]
        pretty: bool,
    },
    #[command(about = "Audit the booking tool-call trace for slot or urgency drift")]
    Audit {
        #[arg(help = "Path to a call-export JSON file")]
        file: PathBuf,
        #[arg(long, help = "Pretty-print the JSON output")]
        pretty: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Analyze { file, rules, pretty } => {
            commands::analyze::run(&file, rules.as_deref(), pretty)
        }
        Command::Classify { file, rules, pretty } => {
            commands::classify::run(&file, rules.as_deref(), pretty)
        }
        Command::Audit { file, pretty } => commands::audit::run(&file, pretty),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
