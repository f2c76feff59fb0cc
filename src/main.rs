use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use datfix::commands;
use datfix::report;
use datfix::shared::DEFAULT_THRESH;

/// Scan digitized tape transfers for dropouts and repair them from
/// aligned alternate transfers of the same material.
#[derive(Parser, Debug)]
#[command(name = "datfix")]
#[command(about = "Dropout analysis and repair for DAT/analog tape transfers")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Detect dropout runs and score each transfer (nothing is written)
    Scan {
        /// Transfer files to analyze
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Duplicate-run length a run must exceed to count as a dropout
        #[arg(long, default_value_t = DEFAULT_THRESH)]
        thresh: u64,

        /// Also write the report as JSON to this path
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Repair by per-sample median vote across three aligned transfers
    Median {
        first: PathBuf,
        second: PathBuf,
        third: PathBuf,

        /// Repaired output file
        #[arg(short, long, default_value = "out.wav")]
        output: PathBuf,
    },

    /// Repair master dropouts by substituting spans from a donor transfer
    Fill {
        /// Authoritative transfer
        master: PathBuf,

        /// Transfer supplying replacement samples for detected dropouts
        donor: PathBuf,

        /// Duplicate-run length a run must exceed to be patched
        #[arg(long, default_value_t = DEFAULT_THRESH)]
        thresh: u64,

        /// Repaired output file
        #[arg(short, long, default_value = "out.wav")]
        output: PathBuf,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "datfix=info".into()),
        )
        .init();

    let args = Args::parse();
    match args.command {
        Command::Scan { files, thresh, json } => {
            let mut reports = Vec::new();
            for path in &files {
                let rep = commands::scan_file(path, thresh)?;
                if rep.events.is_empty() {
                    println!("A: {} OK", rep.path.display());
                } else {
                    println!("A: {}", rep.path.display());
                    for event in &rep.events {
                        println!("{}", report::event_line(event, rep.sample_rate));
                    }
                    println!("Done");
                }
                println!("{}", report::score_line(&rep.path, &rep.score));
                reports.push(rep);
            }
            if let Some(json_path) = json {
                report::write_json(&json_path, &reports)?;
                info!(file = %json_path.display(), "json report written");
            }
        }
        Command::Median {
            first,
            second,
            third,
            output,
        } => {
            let frames =
                commands::repair_median([first.as_path(), second.as_path(), third.as_path()], &output)?;
            info!(frames, output = %output.display(), "median repair complete");
        }
        Command::Fill {
            master,
            donor,
            thresh,
            output,
        } => {
            let frames = commands::repair_fill(&master, &donor, &output, thresh)?;
            info!(frames, output = %output.display(), "fill repair complete");
        }
    }
    Ok(())
}
