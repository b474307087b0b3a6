use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Which translation page issued the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum TranslationScenario {
    /// The two-language page: direction is chosen by detecting the input language.
    TwoWayFixed,
    /// The multi-language page: the caller picks source and target explicitly.
    MultiLanguage,
}

/// How the system instruction is phrased.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum InstructionStyle {
    /// A single, explicit "translate {source} to {target}" instruction.
    #[default]
    Directed,
    /// The rule-list templates with language names substituted textually.
    Legacy,
}
