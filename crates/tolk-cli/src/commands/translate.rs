use anyhow::Result;
use tolk_application::TranslationOutcome;
use tolk_core::session::SessionState;
use tolk_core::translation::{Language, LanguagePair};
use tolk_infrastructure::ConfigStorage;

use super::{build_usecase, read_input};

pub async fn two_way(storage: &ConfigStorage, text: Option<String>) -> Result<()> {
    let usecase = build_usecase(storage)?;
    let text = read_input(text)?;
    let mut session = SessionState::new();

    let outcome = usecase.translate_two_way(&mut session, &text).await?;
    print_outcome(&outcome);
    Ok(())
}

pub async fn multi(
    storage: &ConfigStorage,
    from: Language,
    to: Language,
    text: Option<String>,
) -> Result<()> {
    let usecase = build_usecase(storage)?;
    let text = read_input(text)?;
    let mut session = SessionState::new();

    let outcome = usecase
        .translate_multi(&mut session, &text, LanguagePair::new(from, to))
        .await?;
    print_outcome(&outcome);
    Ok(())
}

pub async fn detect(storage: &ConfigStorage, text: Option<String>) -> Result<()> {
    let usecase = build_usecase(storage)?;
    let text = read_input(text)?;

    let detection = usecase.detect(&text).await?;
    println!("{}", detection.label());
    Ok(())
}

/// Prints the result text on stdout; the direction goes to stderr.
fn print_outcome(outcome: &TranslationOutcome) {
    if let Some(pair) = outcome.pair() {
        eprintln!("[{pair}]");
    }
    println!("{}", outcome.text());
}
