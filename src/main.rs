use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod aggregate;
mod benchmark;
mod block;
mod commands;
mod config;
mod error;
mod field;
mod metrics;
mod pipeline;
mod report;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "pbench-report")]
#[command(about = "Derive report tables from persistency benchmark simulator output", long_about = None)]
struct Cli {
    /// JSON file overriding the proactive-flush discount constants.
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Intra/inter conflict shares and write-back rates (5-line blocks).
    Conflicts {
        input: String,
        output: String,

        #[arg(long)]
        json: Option<String>,
    },

    /// Write-back criticality reports (7-line blocks), written into a directory.
    Writebacks {
        input: String,
        output_dir: String,

        #[arg(long)]
        json: Option<String>,
    },

    /// Execution time of each scheme normalized to the unprotected run (7-line blocks).
    ExecTime {
        input_path: String,
        output_path: String,

        #[arg(long)]
        json: Option<String>,
    },

    /// Pairwise CPI deltas (5-line blocks), one file per benchmark.
    Cpi {
        input: String,
        output_dir: String,

        #[arg(long)]
        json: Option<String>,
    },

    /// Average a report across numbered run directories.
    Average {
        input_path: String,
        program_name: String,
        input_file_name: String,
        repeat_count: usize,
        output_path: String,
    },
}

fn run(cli: Cli) -> Result<()> {
    let config = config::Config::load(cli.config.as_deref())?;

    match cli.cmd {
        Commands::Conflicts { input, output, json } => {
            commands::conflicts(&input, &output, json.as_deref())?;
            println!("Wrote {}", output);
        }
        Commands::Writebacks {
            input,
            output_dir,
            json,
        } => {
            commands::writebacks(&config, &input, &output_dir, json.as_deref())?;
            println!("Wrote {}", output_dir);
        }
        Commands::ExecTime {
            input_path,
            output_path,
            json,
        } => {
            commands::exec_time(&input_path, &output_path, json.as_deref())?;
            println!("Wrote {}", output_path);
        }
        Commands::Cpi {
            input,
            output_dir,
            json,
        } => {
            commands::cpi(&input, &output_dir, json.as_deref())?;
            println!("Wrote {}", output_dir);
        }
        Commands::Average {
            input_path,
            program_name,
            input_file_name,
            repeat_count,
            output_path,
        } => {
            commands::average(
                &input_path,
                &program_name,
                &input_file_name,
                repeat_count,
                &output_path,
            )?;
            println!("Wrote {}/{}", output_path, input_file_name);
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            error::exit_code_for(&err)
        }
    }
}
