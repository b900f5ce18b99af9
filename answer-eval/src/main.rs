//! Answer scoring CLI

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use answer_eval::{
    analysis::{inspect_file, task_label},
    config::{Config, SummaryFormat},
    reporting::{print_console_report, print_verdicts},
    runner::Aggregator,
};

#[derive(Parser)]
#[command(name = "answer-eval")]
#[command(about = "Score sampled LLM answers against gold labels and summarize accuracy")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Score result files and print the summary table
    Score {
        /// Result files (JSON arrays of records)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Score result files and write the summary artifact
    Aggregate {
        /// Result files (JSON arrays of records)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output path for the summary (default from config: results/summary.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Summary format
        #[arg(short, long, value_enum)]
        format: Option<SummaryFormat>,

        /// Number of files scored concurrently
        #[arg(long, conflicts_with = "sequential")]
        parallel: Option<usize>,

        /// Score files one at a time, in order
        #[arg(long)]
        sequential: bool,
    },

    /// Show how each record in a result file was judged
    Inspect {
        /// Result file to inspect
        file: PathBuf,

        /// Only list records judged incorrect
        #[arg(long)]
        only_incorrect: bool,
    },

    /// Generate sample configuration
    InitConfig {
        /// Output path for configuration file
        #[arg(short, long, default_value = "config/answer-eval.toml")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("answer_eval=debug,info")
    } else {
        EnvFilter::new("answer_eval=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load_or_default(),
    };

    match cli.command {
        Commands::Score { files } => {
            score(&config, files).await?;
        }

        Commands::Aggregate {
            files,
            output,
            format,
            parallel,
            sequential,
        } => {
            let mut config = config;
            if let Some(output) = output {
                config.output.summary_path = output;
            }
            if let Some(format) = format {
                config.output.format = format;
            }
            if let Some(parallel) = parallel {
                config.scoring.parallel_files = parallel;
            }
            if sequential {
                config.scoring.parallel_files = 1;
            }
            aggregate(&config, files).await?;
        }

        Commands::Inspect {
            file,
            only_incorrect,
        } => {
            let verdicts = inspect_file(&file)?;
            print_verdicts(&task_label(&file), &verdicts, only_incorrect);
        }

        Commands::InitConfig { output } => {
            init_config(output)?;
        }
    }

    Ok(())
}

async fn score(config: &Config, files: Vec<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let aggregator = Aggregator::new(config.aggregator_config());
    let table = aggregator.run(&files).await?;
    print_console_report(&table);
    Ok(())
}

async fn aggregate(config: &Config, files: Vec<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let aggregator = Aggregator::new(config.aggregator_config());
    let table = aggregator.run(&files).await?;

    if config.output.print_table {
        print_console_report(&table);
    }

    let path = &config.output.summary_path;
    table.write(path, config.output.format)?;
    println!("\nSummary ({}) written to: {}", config.output.format, path.display());
    Ok(())
}

fn init_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();

    // Ensure parent directory exists
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    config.save_toml(&output)?;
    println!("Configuration written to: {}", output.display());
    Ok(())
}
