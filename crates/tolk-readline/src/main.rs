use std::borrow::Cow::{self, Borrowed, Owned};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::Editor;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use tolk_application::{DocumentMode, TranslationOutcome, TranslationUseCase};
use tolk_core::session::SessionState;
use tolk_core::translation::LanguagePair;
use tolk_infrastructure::{ConfigStorage, OfficeDocumentCodec, load_upload};
use tolk_interaction::OllamaApiAgent;

mod command;

use command::{COMMANDS, Command};

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|cmd| cmd.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

fn print_help(pair: LanguagePair) {
    println!(
        "{}",
        format!(
            "Type text to translate between {} and {}, or 'quit' to exit.",
            pair.source, pair.target
        )
        .bright_black()
    );
    for line in [
        "  /translate <text>            translate and record in history",
        "  /multi <from> <to> <text>    translate in an explicit direction",
        "  /detect <text>               detect the language",
        "  /doc <path> [<from> <to>]    translate a DOCX/PDF into ./translated_document.*",
        "  /history                     show translation history",
        "  /messages                    show the chat log",
        "  /clear                       clear translation history",
    ] {
        println!("{}", line.bright_black());
    }
}

fn print_outcome(outcome: &TranslationOutcome) {
    match outcome {
        TranslationOutcome::Translated { pair, text } => {
            println!("{}", format!("[{pair}]").bright_magenta());
            for line in text.lines() {
                println!("{}", line.bright_blue());
            }
        }
        TranslationOutcome::Unsupported { message, .. } => println!("{}", message.yellow()),
        TranslationOutcome::EmptyInput { message } => println!("{}", message.bright_black()),
    }
}

fn print_history(session: &SessionState) {
    if session.history.is_empty() {
        println!("{}", "No translations yet.".bright_black());
        return;
    }
    for record in session.history.list() {
        println!("{} {}", "Original:".bold(), record.original_text);
        println!("{} {}", "Translated:".bold(), record.translated_text);
        println!("{}", "---".bright_black());
    }
}

fn print_messages(session: &SessionState) {
    for exchange in &session.messages {
        println!("{} {}", "You:".green().bold(), exchange.user);
        println!("{} {}", "Bot:".bright_blue().bold(), exchange.bot);
    }
}

async fn translate_document(
    usecase: &TranslationUseCase,
    session: &mut SessionState,
    path: &Path,
    pair: Option<LanguagePair>,
) -> Result<()> {
    let upload = load_upload(path)?;
    let mode = pair.map_or(DocumentMode::TwoWay, DocumentMode::Multi);

    let document = usecase
        .translate_document(session, &OfficeDocumentCodec::new(), &upload, mode)
        .await?;
    print_outcome(&document.outcome);

    for rendered in [&document.pdf, &document.docx] {
        fs::write(&rendered.file_name, &rendered.bytes)?;
        println!("{}", format!("Saved {}", rendered.file_name).green());
    }
    Ok(())
}

/// Runs one REPL command. Returns `false` when the loop should stop.
async fn dispatch(
    usecase: &TranslationUseCase,
    session: &mut SessionState,
    command: Command,
) -> Result<bool> {
    match command {
        Command::Quit => return Ok(false),
        Command::Chat(text) => {
            if let Some(exchange) = usecase.chat(session, &text).await? {
                println!("{}", exchange.bot.bright_blue());
            }
        }
        Command::Translate(text) => {
            let outcome = usecase.translate_two_way(session, &text).await?;
            print_outcome(&outcome);
        }
        Command::Multi { pair, text } => {
            let outcome = usecase.translate_multi(session, &text, pair).await?;
            print_outcome(&outcome);
        }
        Command::Detect(text) => {
            let detection = usecase.detect(&text).await?;
            println!("{}", detection.label().bright_blue());
        }
        Command::Document { path, pair } => {
            translate_document(usecase, session, &path, pair).await?;
        }
        Command::History => print_history(session),
        Command::Messages => print_messages(session),
        Command::Clear => {
            usecase.clear_history(session);
            println!("{}", "Translation history cleared!".green());
        }
        Command::Help => print_help(usecase.primary_pair()),
    }
    Ok(true)
}

/// The main entry point for the TOLK chat REPL.
///
/// Plain input goes through the two-language chat flow; slash commands
/// reach the other translation flows. Each request runs to completion
/// before the next prompt.
#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = tolk_infrastructure::init_logging("tolk-chat", false);

    // ===== Backend Initialization =====
    let storage = ConfigStorage::new()?;
    let config = storage.load_with_env()?;
    let agent = Arc::new(OllamaApiAgent::from_settings(&config.model)?);
    let usecase = TranslationUseCase::with_model(
        agent,
        config.translation.instruction_style,
        config.translation.primary_pair(),
    );
    let mut session = SessionState::new();
    tracing::info!("Started chat session {}", session.id);

    // ===== REPL Setup =====
    let helper = CliHelper::new();
    let mut rl = Editor::new()?;
    rl.set_helper(Some(helper));

    println!("{}", "=== TOLK Translation ChatBot ===".bright_magenta().bold());
    print_help(usecase.primary_pair());
    println!();

    // ===== Main REPL Loop =====
    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();

                // Skip empty lines
                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&line);

                let command = match command::parse(trimmed) {
                    Ok(command) => command,
                    Err(usage) => {
                        println!("{}", usage.yellow());
                        continue;
                    }
                };

                match dispatch(&usecase, &mut session, command).await {
                    Ok(true) => {}
                    Ok(false) => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    Err(err) => {
                        tracing::warn!("Request failed: {err:#}");
                        eprintln!("{}", format!("Error: {err:#}").red());
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}
