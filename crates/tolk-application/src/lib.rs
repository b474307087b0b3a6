//! Application layer for TOLK.
//!
//! This crate provides the translation use cases that coordinate the
//! language detector, the translation invoker and the document codec
//! around an explicit [`SessionState`](tolk_core::session::SessionState).

pub mod language_detector;
pub mod translation_invoker;
pub mod translation_usecase;

pub use language_detector::{Detection, LanguageDetection, LanguageDetector};
pub use translation_invoker::{TextTranslation, TranslationInvoker};
pub use translation_usecase::{
    DocumentMode, RequestState, TranslatedDocument, TranslationOutcome, TranslationUseCase,
    resolve_direction,
};
