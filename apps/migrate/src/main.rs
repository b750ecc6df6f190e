use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vocab_migrate::commands;
use vocab_migrate::config::Config;

/// Move a vocabulary text file into SQLite and back.
#[derive(Parser, Debug)]
#[command(name = "vocab-migrate", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import a text file into a new SQLite database
    Import {
        /// Text file to read (default: VOCAB_DATA_FILE)
        #[arg(long)]
        text: Option<PathBuf>,
        /// Database to create (default: VOCAB_DB_PATH)
        #[arg(long)]
        db: Option<PathBuf>,
        /// Replace an existing database
        #[arg(long)]
        force: bool,
    },
    /// Export a SQLite database to a text file
    Export {
        #[arg(long)]
        db: Option<PathBuf>,
        #[arg(long, default_value = "export.txt")]
        out: PathBuf,
        /// Replace an existing output file
        #[arg(long)]
        force: bool,
    },
    /// Show database totals
    Info {
        #[arg(long)]
        db: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Show statistics for a text file
    Stats {
        #[arg(long)]
        text: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    vocab_migrate::init_tracing();

    match cli.command {
        Command::Import { text, db, force } => {
            let text = text.unwrap_or(config.data_file);
            let db = db.unwrap_or(config.db_path);
            let report = commands::import_text(&text, &db, force)?;

            println!("Imported {} words into {}", report.imported, db.display());
            println!(
                "Skipped {} duplicates, {} malformed lines",
                report.duplicates,
                report.malformed_lines.len()
            );
            for folder in &report.folders {
                println!("  {:<20} : {:>5}", folder.folder, folder.entries);
            }
        }
        Command::Export { db, out, force } => {
            let db = db.unwrap_or(config.db_path);
            let report = commands::export_text(&db, &out, force)?;
            if report.written {
                println!("Exported {} words to {}", report.exported, out.display());
            } else {
                println!("Database is empty, nothing exported");
            }
        }
        Command::Info { db, json } => {
            let info = commands::database_info(&db.unwrap_or(config.db_path))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Words:             {}", info.total_words);
                println!("Folders:           {}", info.folder_count);
                println!("Words with errors: {}", info.words_with_errors);
                println!("Total errors:      {}", info.total_errors);
                for folder in &info.folders {
                    println!("  {:<20} : {:>5}", folder.folder, folder.entries);
                }
            }
        }
        Command::Stats { text, json } => {
            let mut settings = config.library_settings();
            if let Some(text) = text {
                settings.data_file = text;
            }
            let stats = commands::text_statistics(&settings)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Folders: {}", stats.folder_count);
                println!("Words:   {}", stats.entry_count);
                println!("Errors:  {} words, {} total", stats.entries_with_errors, stats.total_errors);
                for folder in &stats.folders {
                    println!("  {:<20} : {:>5}", folder.folder, folder.entries);
                }
            }
        }
    }

    Ok(())
}
