use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

mod analysis;
mod charts;
mod error;
mod loader;
mod logging;
mod models;
mod report;
mod session;
mod table;

use session::{Loaded, Session};

#[derive(Parser)]
#[command(name = "student-performance-analyzer")]
#[command(about = "Class performance statistics from student record CSVs", long_about = None)]
struct Cli {
    /// Directory holding the CSV sources
    #[arg(long, global = true, default_value = "data")]
    data_dir: PathBuf,

    /// Show debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Silence all logging
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the CSV sources in the data directory
    List,
    /// Print the loaded table
    Show {
        /// Source file name; defaults to the first listed source
        file: Option<String>,
    },
    /// Print class average, pass rate and alerts
    Analyze { file: Option<String> },
    /// Export the chart series as JSON
    Charts {
        file: Option<String>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Generate a markdown report
    Report {
        file: Option<String>,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose, cli.quiet);

    let mut session = Session::new(cli.data_dir);

    match cli.command {
        Commands::List => {
            let sources = session.sources()?;
            if sources.is_empty() {
                println!("No CSV files found in {}.", session.data_dir().display());
                return Ok(());
            }
            for (index, name) in sources.iter().enumerate() {
                if index == 0 {
                    println!("{name} (default)");
                } else {
                    println!("{name}");
                }
            }
        }
        Commands::Show { file } => {
            let loaded = load(&mut session, file)?;
            print!("{}", table::render(&loaded.dataset));
        }
        Commands::Analyze { file } => {
            let loaded = load(&mut session, file)?;
            for line in report::summary_lines(&loaded.summary) {
                println!("{line}");
            }
            println!();
            for message in loaded.summary.alert_messages() {
                println!("{message}");
            }
        }
        Commands::Charts { file, out } => {
            let loaded = load(&mut session, file)?;
            let series = charts::chart_series(&loaded.dataset)?;
            let json = charts::to_json(&series)?;
            match out {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("Chart series written to {}.", path.display());
                }
                None => println!("{json}"),
            }
        }
        Commands::Report { file, out } => {
            let loaded = load(&mut session, file)?;
            let subjects = analysis::subject_averages(&loaded.dataset)?;
            let report = report::build_report(
                &loaded.dataset,
                &loaded.summary,
                &subjects,
                chrono::Utc::now(),
            );
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}

fn load(session: &mut Session, file: Option<String>) -> anyhow::Result<&Loaded> {
    let name = match file {
        Some(name) => name,
        None => {
            let sources = session.sources()?;
            match sources.into_iter().next() {
                Some(first) => first,
                None => bail!("no CSV files found in {}", session.data_dir().display()),
            }
        }
    };

    session
        .select(&name)
        .with_context(|| format!("could not load {name}"))?;
    session.current().context("no dataset loaded")
}
