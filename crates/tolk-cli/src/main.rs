use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tolk_core::translation::Language;

mod commands;

#[derive(Parser)]
#[command(name = "tolk")]
#[command(about = "TOLK - Translate text and documents with a local Ollama model", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config.toml (defaults to ~/.config/tolk/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect the language and translate within the configured pair
    Translate {
        /// Text to translate (read from stdin when omitted)
        text: Option<String>,
    },
    /// Translate between any two supported languages
    Multi {
        #[arg(long, value_parser = Language::parse)]
        from: Language,
        #[arg(long, value_parser = Language::parse)]
        to: Language,
        /// Text to translate (read from stdin when omitted)
        text: Option<String>,
    },
    /// Detect the language of a text
    Detect {
        /// Text to inspect (read from stdin when omitted)
        text: Option<String>,
    },
    /// Translate a DOCX or PDF file and write both PDF and DOCX results
    Document {
        /// Input file (.docx or .pdf)
        path: PathBuf,
        /// Source language; without --from/--to the language is detected
        #[arg(long, value_parser = Language::parse, requires = "to")]
        from: Option<Language>,
        /// Target language
        #[arg(long, value_parser = Language::parse, requires = "from")]
        to: Option<Language>,
        /// Directory for translated_document.pdf and translated_document.docx
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// List supported languages
    Languages,
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration (file plus environment overrides)
    Show,
    /// Write a default config.toml if none exists
    Init,
    /// Print the config file location
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = tolk_infrastructure::init_logging("tolk", cli.verbose);

    let storage = commands::config_storage(cli.config.as_deref())?;

    match cli.command {
        Commands::Translate { text } => commands::translate::two_way(&storage, text).await?,
        Commands::Multi { from, to, text } => {
            commands::translate::multi(&storage, from, to, text).await?
        }
        Commands::Detect { text } => commands::translate::detect(&storage, text).await?,
        Commands::Document {
            path,
            from,
            to,
            out_dir,
        } => commands::document::run(&storage, &path, from.zip(to), &out_dir).await?,
        Commands::Languages => commands::languages(),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&storage)?,
            ConfigAction::Init => commands::config::init(&storage)?,
            ConfigAction::Path => commands::config::path(&storage),
        },
    }

    Ok(())
}
