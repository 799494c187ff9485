use std::path::PathBuf;
use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use taxilog::config::Config;
use taxilog::controller::run_command;
use taxilog::store::{CsvStore, RecordStore};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
struct Cli {
    /// Trip log file path
    #[clap(default_value = "taxi_data.csv")]
    file: String,

    /// District and payment method configuration (TOML)
    #[clap(short, long)]
    config: Option<String>,

    /// Run a single command and exit, e.g. "DAILY 2024-01-05"
    #[clap(short, long)]
    execute: Option<String>,
}

static COMMAND_HISTORY_FILE: &str = ".taxilog_history";

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli: Cli = Cli::parse();

    let config_path = cli.config.as_ref().map(PathBuf::from).or_else(Config::default_path);
    let config = match config_path {
        Some(path) => Config::load_from_file(&path).with_context(|| format!("Unable to load config {}", path.display()))?,
        None => Config::default(),
    };

    let store = CsvStore::new(&cli.file);
    store.ensure_initialized().with_context(|| format!("Unable to open trip log {}", cli.file))?;

    if let Some(command) = &cli.execute {
        let output = run_command(&store, &config, command)?;
        println!("{output}");
        return Ok(());
    }

    let mut rl = DefaultEditor::new()?;
    if rl.load_history(COMMAND_HISTORY_FILE).is_err() {
        println!("No previous history.");
    }
    let mut command_buffer: Vec<String> = vec![];
    loop {
        let readline = rl.readline("# ");
        match readline {
            Ok(line) => {
                let line = line.trim();
                let is_last = line.ends_with(';');
                if !line.is_empty() {
                    command_buffer.push(line.to_string());
                }
                if is_last {
                    let command = command_buffer.join(" ");
                    let _ = rl.add_history_entry(command.trim());

                    match run_command(&store, &config, &command) {
                        Ok(output) => println!("{output}"),
                        Err(err) => println!("{}", err),
                    }

                    command_buffer.clear();
                }
            },
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break
            },
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break
            },
            Err(err) => {
                println!("Error: {:?}", err);
                break
            }
        }
    }
    rl.save_history(COMMAND_HISTORY_FILE)?;
    Ok(())
}
