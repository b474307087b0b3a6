//! System instruction construction.
//!
//! Instructions are built fresh for every request and never persisted.

use minijinja::{Environment, context};
use std::fmt;

use super::scenario::{InstructionStyle, TranslationScenario};
use crate::error::Result;

/// Instruction sent with every language detection request.
pub const DETECTION_INSTRUCTION: &str = "You are an expert assistant specializing in language detection. Your task is to identify the language of the input text. Provide only the detected language as output.";

/// Two-rule template used by the two-language page.
///
/// The literal names "German" and "English" are the substitution slots.
pub const TWO_WAY_TEMPLATE: &str = "You are an expert assistant specializing in translation between German and English. Your tasks are as follows:
Language Detection:
Identify the language of the input text. Do not answer the questions if asked in text. Just translate the question text as question itself.
Translation:
If the text is in German, translate it to English.
If the text is in English, translate it to German.
Provide accurate and contextually appropriate translations. Ensure that the translated text maintains the original meaning, type, and tone.
IMPORTANT: Provide only the translated text as output.
";

/// Six-rule template used by the multi-language page.
pub const MULTI_LANGUAGE_TEMPLATE: &str = "You are an expert assistant specializing in translation between various languages. Your tasks are as follows:
Translation:
If the text is in German, translate it to English.
If the text is in English, translate it to German.
If the text is in French, translate it to English.
If the text is in English, translate it to French.
If the text is in Hindi, translate it to English.
If the text is in English, translate it to Hindi.
Provide accurate and contextually appropriate translations. Ensure that the translated text maintains the original meaning, type, and tone.
IMPORTANT: Provide only the translated text as output. Do not include any additional comments or answers.
";

const DIRECTED_TEMPLATE: &str = "You are an expert translator.
Translate the following {{ source }} text to {{ target }}.
Do not answer questions contained in the text. Translate a question as a question.
Provide accurate and contextually appropriate translations. Ensure that the translated text maintains the original meaning, type, and tone.
{% if scenario == \"MultiLanguage\" -%}
IMPORTANT: Provide only the translated text as output. Do not include any additional comments or answers.
{%- else -%}
IMPORTANT: Provide only the translated text as output.
{%- endif %}";

/// A system-role directive for a single model request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemInstruction(String);

impl SystemInstruction {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SystemInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builds the system instruction for a translation request.
///
/// Language names are inserted verbatim; no escaping or validation happens
/// here.
///
/// # Arguments
///
/// * `scenario` - The page the request comes from
/// * `source` - Name of the language the text is written in
/// * `target` - Name of the language to translate into
/// * `style` - `Directed` renders a single-direction instruction; `Legacy`
///   substitutes the names into the rule-list templates
///
/// # Examples
///
/// ```
/// use tolk_core::translation::{build_instruction, InstructionStyle, TranslationScenario};
///
/// let instruction = build_instruction(
///     TranslationScenario::TwoWayFixed,
///     "French",
///     "English",
///     InstructionStyle::Directed,
/// )
/// .unwrap();
/// assert!(instruction.as_str().contains("Translate the following French text to English."));
/// ```
pub fn build_instruction(
    scenario: TranslationScenario,
    source: &str,
    target: &str,
    style: InstructionStyle,
) -> Result<SystemInstruction> {
    match style {
        InstructionStyle::Directed => render_directed(scenario, source, target),
        InstructionStyle::Legacy => Ok(substitute_legacy(scenario, source, target)),
    }
}

fn render_directed(
    scenario: TranslationScenario,
    source: &str,
    target: &str,
) -> Result<SystemInstruction> {
    let env = Environment::new();
    let rendered = env.render_str(
        DIRECTED_TEMPLATE,
        context! {
            source => source,
            target => target,
            scenario => scenario.to_string(),
        },
    )?;
    Ok(SystemInstruction(rendered))
}

/// Replaces every "German" with `source`, then every "English" with `target`.
///
/// The replacements run in sequence over the whole template, so a source
/// named "English" is itself rewritten by the second pass.
fn substitute_legacy(scenario: TranslationScenario, source: &str, target: &str) -> SystemInstruction {
    let template = match scenario {
        TranslationScenario::TwoWayFixed => TWO_WAY_TEMPLATE,
        TranslationScenario::MultiLanguage => MULTI_LANGUAGE_TEMPLATE,
    };

    SystemInstruction(template.replace("German", source).replace("English", target))
}
