use clap::{Parser, Subcommand};
use std::error::Error;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use subnet_calc::commands;
use subnet_calc::Config;

/// IP/Subnet calculator with history and size suggestions
#[derive(Parser, Debug)]
#[command(name = "subnet-calc")]
#[command(version)]
#[command(about = "IPv4/IPv6 subnet calculator with history", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate one IP/CIDR, e.g. 192.168.1.0/24
    Calc {
        cidr: String,
        /// Do not store the result in history
        #[arg(long)]
        no_save: bool,
    },
    /// Calculate one IP/CIDR per line from a file, or stdin when omitted or `-`
    Batch {
        file: Option<PathBuf>,
        #[arg(long)]
        no_save: bool,
    },
    /// Show previously calculated ranges, newest first
    History {
        #[arg(short, long)]
        limit: Option<usize>,
        /// Print CSV instead of a table
        #[arg(long)]
        csv: bool,
    },
    /// Delete all stored history
    Clear,
    /// Train the size suggestion model from history
    Train,
    /// Suggest a prefix length for a number of hosts
    Suggest {
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        hosts: u64,
    },
}

fn read_batch_input(file: Option<PathBuf>) -> Result<String, Box<dyn Error>> {
    match file {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(&path)
            .map_err(|e| format!("Error reading {}: {e}", path.display()).into()),
        _ => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    let cli = Cli::parse();
    dotenv::dotenv().ok();
    let config = Config::from_env()?;
    if let Err(e) = log4rs::init_file(&config.log_config, Default::default()) {
        eprintln!(
            "logging disabled, could not load {}: {e}",
            config.log_config.display()
        );
    }
    log::info!("#Start main() {:?}", cli.command);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let ok = match cli.command {
        Command::Calc { cidr, no_save } => commands::run_calc(&config, &cidr, !no_save, &mut out)?,
        Command::Batch { file, no_save } => {
            let text = read_batch_input(file)?;
            commands::run_batch(&config, &text, !no_save, &mut out)?
        }
        Command::History { limit, csv } => commands::run_history(&config, limit, csv, &mut out)?,
        Command::Clear => commands::run_clear(&config, &mut out)?,
        Command::Train => commands::run_train(&config, &mut out)?,
        Command::Suggest { hosts } => commands::run_suggest(&config, hosts, &mut out)?,
    };
    out.flush()?;

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
