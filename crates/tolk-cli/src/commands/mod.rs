pub mod config;
pub mod document;
pub mod translate;

use anyhow::{Context, Result};
use std::io::{IsTerminal, Read};
use std::path::Path;
use std::sync::Arc;
use tolk_application::TranslationUseCase;
use tolk_core::translation::Language;
use tolk_infrastructure::ConfigStorage;
use tolk_interaction::OllamaApiAgent;

pub fn config_storage(path: Option<&Path>) -> Result<ConfigStorage> {
    match path {
        Some(path) => Ok(ConfigStorage::with_path(path)),
        None => ConfigStorage::new().context("Failed to resolve the config directory"),
    }
}

/// Loads the configuration and wires the use case around the Ollama agent.
pub fn build_usecase(storage: &ConfigStorage) -> Result<TranslationUseCase> {
    let config = storage
        .load_with_env()
        .with_context(|| format!("Failed to load {}", storage.path().display()))?;

    let agent = OllamaApiAgent::from_settings(&config.model)?;
    tracing::debug!("Using model {} at {}", config.model.model_name, agent.endpoint());

    Ok(TranslationUseCase::with_model(
        Arc::new(agent),
        config.translation.instruction_style,
        config.translation.primary_pair(),
    ))
}

/// Returns the positional text, or everything on stdin when it is omitted.
pub fn read_input(text: Option<String>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }

    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        eprintln!("Reading text from stdin (Ctrl-D to finish)...");
    }
    let mut buffer = String::new();
    stdin
        .read_to_string(&mut buffer)
        .context("Failed to read text from stdin")?;
    Ok(buffer)
}

pub fn languages() {
    for language in Language::all() {
        println!("{:<8} {}", language.code(), language.name());
    }
}
