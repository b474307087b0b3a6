//! Translation use cases.
//!
//! [`TranslationUseCase`] runs the two-language flow (detect, pick a
//! direction, translate), the multi-language flow (explicit direction), the
//! chat flow and document translation. The caller owns the
//! [`SessionState`] and lends it to each call.

use std::sync::Arc;
use strum::Display;
use tolk_core::document::{DocumentCodec, DocumentKind, DocumentUpload, RenderedDocument};
use tolk_core::session::{ChatExchange, SessionState};
use tolk_core::translation::{
    DetectedLanguage, InstructionStyle, LanguagePair, NO_CONTENT_TO_TRANSLATE,
    TranslationScenario, is_blank, unsupported_language_message,
};
use tolk_core::{ChatModel, Result, TolkError};

use crate::language_detector::{Detection, LanguageDetection, LanguageDetector};
use crate::translation_invoker::{TextTranslation, TranslationInvoker};

/// Lifecycle of a single translation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RequestState {
    Idle,
    Detecting,
    Translating,
    Done,
    Unsupported,
}

/// Tracks and logs state transitions of one request.
struct RequestTracker {
    scenario: TranslationScenario,
    state: RequestState,
}

impl RequestTracker {
    fn new(scenario: TranslationScenario) -> Self {
        Self {
            scenario,
            state: RequestState::Idle,
        }
    }

    fn advance(&mut self, next: RequestState) {
        tracing::debug!("[{}] {} -> {}", self.scenario, self.state, next);
        self.state = next;
    }
}

/// The user-visible result of a translation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationOutcome {
    /// The model translated the text.
    Translated { pair: LanguagePair, text: String },
    /// The detected language is outside the configured pair.
    Unsupported {
        detected: DetectedLanguage,
        message: String,
    },
    /// The input was blank; no model was called.
    EmptyInput { message: String },
}

impl TranslationOutcome {
    fn empty_input() -> Self {
        TranslationOutcome::EmptyInput {
            message: NO_CONTENT_TO_TRANSLATE.to_string(),
        }
    }

    /// Text shown to the user and stored in the history.
    pub fn text(&self) -> &str {
        match self {
            TranslationOutcome::Translated { text, .. } => text,
            TranslationOutcome::Unsupported { message, .. } => message,
            TranslationOutcome::EmptyInput { message } => message,
        }
    }

    /// The direction used, if a translation took place.
    pub fn pair(&self) -> Option<LanguagePair> {
        match self {
            TranslationOutcome::Translated { pair, .. } => Some(*pair),
            _ => None,
        }
    }

    pub fn is_translated(&self) -> bool {
        matches!(self, TranslationOutcome::Translated { .. })
    }
}

/// How a document's direction is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentMode {
    /// Detect the language and translate within the configured pair.
    TwoWay,
    /// Translate in an explicitly chosen direction.
    Multi(LanguagePair),
}

/// A translated document, rendered into both download formats.
#[derive(Debug, Clone)]
pub struct TranslatedDocument {
    pub original_text: String,
    pub outcome: TranslationOutcome,
    pub pdf: RenderedDocument,
    pub docx: RenderedDocument,
}

/// Chooses the translation direction for a detected language.
///
/// Returns `pair` when the text is in the source language, the reversed
/// pair when it is in the target language, and `None` otherwise.
pub fn resolve_direction(pair: LanguagePair, detected: &DetectedLanguage) -> Option<LanguagePair> {
    match detected.language() {
        Some(language) if language == pair.source => Some(pair),
        Some(language) if language == pair.target => Some(pair.reversed()),
        _ => None,
    }
}

/// Translation use cases over a detector and a translator.
pub struct TranslationUseCase {
    detector: Arc<dyn LanguageDetection>,
    translator: Arc<dyn TextTranslation>,
    primary_pair: LanguagePair,
}

impl TranslationUseCase {
    pub fn new(
        detector: Arc<dyn LanguageDetection>,
        translator: Arc<dyn TextTranslation>,
        primary_pair: LanguagePair,
    ) -> Self {
        Self {
            detector,
            translator,
            primary_pair,
        }
    }

    /// Wires the model-backed detector and invoker around one chat model.
    pub fn with_model(
        model: Arc<dyn ChatModel>,
        style: InstructionStyle,
        primary_pair: LanguagePair,
    ) -> Self {
        Self::new(
            Arc::new(LanguageDetector::new(model.clone())),
            Arc::new(TranslationInvoker::with_style(model, style)),
            primary_pair,
        )
    }

    pub fn primary_pair(&self) -> LanguagePair {
        self.primary_pair
    }

    /// Detects the language of `text` without translating it.
    pub async fn detect(&self, text: &str) -> Result<Detection> {
        self.detector.detect(text).await
    }

    /// Two-language flow: detect the language, choose the direction within
    /// the configured pair, translate.
    ///
    /// The outcome becomes the session's current text and is appended to its
    /// history. A model fault propagates and records nothing.
    pub async fn translate_two_way(
        &self,
        session: &mut SessionState,
        text: &str,
    ) -> Result<TranslationOutcome> {
        tracing::info!("Two-way translation request ({} chars)", text.chars().count());
        let outcome = self.run_two_way(text).await?;
        session.record_translation(text, outcome.text());
        Ok(outcome)
    }

    /// Multi-language flow: translate in the given direction, no detection.
    ///
    /// `pair.source == pair.target` is passed through to the model.
    pub async fn translate_multi(
        &self,
        session: &mut SessionState,
        text: &str,
        pair: LanguagePair,
    ) -> Result<TranslationOutcome> {
        tracing::info!("{} translation request ({} chars)", pair, text.chars().count());
        let outcome = self.run_multi(text, pair).await?;
        session.record_translation(text, outcome.text());
        Ok(outcome)
    }

    /// Chat flow: runs the two-language flow and appends the exchange to the
    /// session's chat log. Blank input is ignored.
    pub async fn chat(&self, session: &mut SessionState, input: &str) -> Result<Option<ChatExchange>> {
        if is_blank(input) {
            return Ok(None);
        }

        let outcome = self.run_two_way(input).await?;
        let exchange = session.push_message(input, outcome.text());
        Ok(Some(exchange.clone()))
    }

    /// Extracts, translates and re-renders a document.
    ///
    /// # Errors
    ///
    /// - `TolkError::Extraction` when the document cannot be read or holds no
    ///   text; no translation is attempted
    /// - `TolkError::Model` when the model fails
    /// - `TolkError::Render` when an output document cannot be produced
    pub async fn translate_document(
        &self,
        session: &mut SessionState,
        codec: &dyn DocumentCodec,
        upload: &DocumentUpload,
        mode: DocumentMode,
    ) -> Result<TranslatedDocument> {
        let original_text = codec.extract_text(upload)?;
        if is_blank(&original_text) {
            return Err(TolkError::extraction(
                upload.kind,
                format!("{} contains no extractable text", upload.file_name),
            ));
        }

        tracing::info!(
            "Translating document {} ({} chars)",
            upload.file_name,
            original_text.chars().count()
        );

        let outcome = match mode {
            DocumentMode::TwoWay => self.run_two_way(&original_text).await?,
            DocumentMode::Multi(pair) => self.run_multi(&original_text, pair).await?,
        };
        session.record_translation(original_text.as_str(), outcome.text());

        let pdf = RenderedDocument::new(DocumentKind::Pdf, codec.render_pdf(outcome.text())?);
        let docx = RenderedDocument::new(DocumentKind::Docx, codec.render_docx(outcome.text())?);

        Ok(TranslatedDocument {
            original_text,
            outcome,
            pdf,
            docx,
        })
    }

    /// Empties the session's translation history.
    pub fn clear_history(&self, session: &mut SessionState) {
        let cleared = session.history.len();
        session.clear_history();
        tracing::info!("Cleared {} history record(s) for session {}", cleared, session.id);
    }

    /// Blank input short-circuits to the no-content message without asking
    /// the detector, rather than reporting an undetectable language.
    async fn run_two_way(&self, text: &str) -> Result<TranslationOutcome> {
        if is_blank(text) {
            return Ok(TranslationOutcome::empty_input());
        }

        let mut tracker = RequestTracker::new(TranslationScenario::TwoWayFixed);
        tracker.advance(RequestState::Detecting);

        let detected = match self.detector.detect(text).await? {
            Detection::Detected(detected) => detected,
            Detection::NoContent => return Ok(TranslationOutcome::empty_input()),
        };

        match resolve_direction(self.primary_pair, &detected) {
            Some(pair) => {
                tracker.advance(RequestState::Translating);
                let translated = self
                    .translator
                    .translate(text, pair, TranslationScenario::TwoWayFixed)
                    .await?;
                tracker.advance(RequestState::Done);
                Ok(TranslationOutcome::Translated {
                    pair,
                    text: translated,
                })
            }
            None => {
                tracker.advance(RequestState::Unsupported);
                let message = unsupported_language_message(&detected.to_string());
                Ok(TranslationOutcome::Unsupported { detected, message })
            }
        }
    }

    async fn run_multi(&self, text: &str, pair: LanguagePair) -> Result<TranslationOutcome> {
        if is_blank(text) {
            return Ok(TranslationOutcome::empty_input());
        }

        let mut tracker = RequestTracker::new(TranslationScenario::MultiLanguage);
        tracker.advance(RequestState::Translating);
        let translated = self
            .translator
            .translate(text, pair, TranslationScenario::MultiLanguage)
            .await?;
        tracker.advance(RequestState::Done);

        Ok(TranslationOutcome::Translated {
            pair,
            text: translated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tolk_core::translation::Language;

    /// Returns a fixed detector reply and counts calls.
    struct StubDetector {
        reply: String,
        calls: AtomicUsize,
    }

    impl StubDetector {
        fn new(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.to_string(),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl LanguageDetection for StubDetector {
        async fn detect(&self, _text: &str) -> Result<Detection> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Detection::Detected(DetectedLanguage::from_model_output(
                &self.reply,
            )))
        }
    }

    /// Echoes `[source->target] text` and records every direction it was asked for.
    #[derive(Default)]
    struct EchoTranslator {
        calls: Mutex<Vec<(LanguagePair, TranslationScenario)>>,
    }

    #[async_trait]
    impl TextTranslation for EchoTranslator {
        async fn translate(
            &self,
            text: &str,
            pair: LanguagePair,
            scenario: TranslationScenario,
        ) -> Result<String> {
            self.calls.lock().unwrap().push((pair, scenario));
            Ok(format!("[{pair}] {text}"))
        }
    }

    struct FailingTranslator;

    #[async_trait]
    impl TextTranslation for FailingTranslator {
        async fn translate(&self, _: &str, _: LanguagePair, _: TranslationScenario) -> Result<String> {
            Err(TolkError::model_status(500, "model crashed"))
        }
    }

    fn usecase(detector: Arc<StubDetector>, translator: Arc<EchoTranslator>) -> TranslationUseCase {
        TranslationUseCase::new(detector, translator, LanguagePair::default())
    }

    #[test]
    fn test_resolve_direction() {
        let pair = LanguagePair::default();
        assert_eq!(
            resolve_direction(pair, &DetectedLanguage::Known(Language::German)),
            Some(pair)
        );
        assert_eq!(
            resolve_direction(pair, &DetectedLanguage::Known(Language::English)),
            Some(LanguagePair::new(Language::English, Language::German))
        );
        assert_eq!(
            resolve_direction(pair, &DetectedLanguage::Known(Language::French)),
            None
        );
        assert_eq!(
            resolve_direction(pair, &DetectedLanguage::Unknown("Klingon".into())),
            None
        );
    }

    #[tokio::test]
    async fn test_two_way_translates_english_to_german() {
        let detector = StubDetector::new("English");
        let translator = Arc::new(EchoTranslator::default());
        let usecase = usecase(detector, translator.clone());
        let mut session = SessionState::new();

        let outcome = usecase
            .translate_two_way(&mut session, "Good morning")
            .await
            .unwrap();

        assert_eq!(outcome.text(), "[English->German] Good morning");
        assert_eq!(
            outcome.pair(),
            Some(LanguagePair::new(Language::English, Language::German))
        );
        assert_eq!(
            translator.calls.lock().unwrap().as_slice(),
            &[(
                LanguagePair::new(Language::English, Language::German),
                TranslationScenario::TwoWayFixed
            )]
        );
        assert_eq!(session.translated_text, "[English->German] Good morning");
    }

    #[tokio::test]
    async fn test_two_way_unsupported_language_skips_translation() {
        let detector = StubDetector::new("French");
        let translator = Arc::new(EchoTranslator::default());
        let usecase = usecase(detector, translator.clone());
        let mut session = SessionState::new();

        let outcome = usecase
            .translate_two_way(&mut session, "Bonjour")
            .await
            .unwrap();

        assert_eq!(
            outcome,
            TranslationOutcome::Unsupported {
                detected: DetectedLanguage::Known(Language::French),
                message: "Detected language: French - Translation not supported.".to_string(),
            }
        );
        assert!(translator.calls.lock().unwrap().is_empty());
        assert_eq!(session.history.len(), 1);
        assert_eq!(
            session.history.list()[0].translated_text,
            "Detected language: French - Translation not supported."
        );
    }

    #[tokio::test]
    async fn test_two_way_keeps_raw_unknown_reply_in_message() {
        let detector = StubDetector::new("I think this is Dutch");
        let usecase = usecase(detector, Arc::new(EchoTranslator::default()));
        let mut session = SessionState::new();

        let outcome = usecase.translate_two_way(&mut session, "Goedemorgen").await.unwrap();
        assert_eq!(
            outcome.text(),
            "Detected language: I think this is Dutch - Translation not supported."
        );
    }

    #[tokio::test]
    async fn test_two_way_blank_input_makes_no_calls() {
        let detector = StubDetector::new("German");
        let translator = Arc::new(EchoTranslator::default());
        let usecase = usecase(detector.clone(), translator.clone());
        let mut session = SessionState::new();

        let outcome = usecase.translate_two_way(&mut session, " \n ").await.unwrap();

        assert_eq!(
            outcome,
            TranslationOutcome::EmptyInput {
                message: "No content to translate.".to_string()
            }
        );
        assert_eq!(detector.calls.load(Ordering::SeqCst), 0);
        assert!(translator.calls.lock().unwrap().is_empty());
        assert_eq!(session.history.len(), 1);
    }

    #[tokio::test]
    async fn test_model_fault_records_nothing() {
        let usecase = TranslationUseCase::new(
            StubDetector::new("German"),
            Arc::new(FailingTranslator),
            LanguagePair::default(),
        );
        let mut session = SessionState::new();

        let err = usecase
            .translate_two_way(&mut session, "Hallo")
            .await
            .unwrap_err();

        assert!(err.is_model());
        assert!(session.history.is_empty());
        assert!(session.original_text.is_empty());
    }

    #[tokio::test]
    async fn test_multi_uses_explicit_direction_without_detection() {
        let detector = StubDetector::new("German");
        let translator = Arc::new(EchoTranslator::default());
        let usecase = usecase(detector.clone(), translator.clone());
        let mut session = SessionState::new();
        let pair = LanguagePair::new(Language::Hindi, Language::French);

        let outcome = usecase
            .translate_multi(&mut session, "नमस्ते", pair)
            .await
            .unwrap();

        assert_eq!(outcome.text(), "[Hindi->French] नमस्ते");
        assert_eq!(detector.calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            translator.calls.lock().unwrap()[0].1,
            TranslationScenario::MultiLanguage
        );
    }

    #[tokio::test]
    async fn test_multi_allows_same_language() {
        let translator = Arc::new(EchoTranslator::default());
        let usecase = usecase(StubDetector::new("German"), translator.clone());
        let mut session = SessionState::new();
        let pair = LanguagePair::new(Language::German, Language::German);

        let outcome = usecase
            .translate_multi(&mut session, "Hallo", pair)
            .await
            .unwrap();

        assert!(outcome.is_translated());
        assert_eq!(outcome.pair(), Some(pair));
    }

    #[tokio::test]
    async fn test_history_is_append_only_in_call_order() {
        let usecase = usecase(StubDetector::new("German"), Arc::new(EchoTranslator::default()));
        let mut session = SessionState::new();
        let inputs = ["eins", "zwei", "drei", "vier"];

        for input in inputs {
            usecase.translate_two_way(&mut session, input).await.unwrap();
        }

        let originals: Vec<&str> = session
            .history
            .list()
            .iter()
            .map(|record| record.original_text.as_str())
            .collect();
        assert_eq!(originals, inputs);

        usecase.clear_history(&mut session);
        assert!(session.history.is_empty());
    }

    #[tokio::test]
    async fn test_chat_appends_to_message_log_only() {
        let usecase = usecase(StubDetector::new("German"), Arc::new(EchoTranslator::default()));
        let mut session = SessionState::new();

        let exchange = usecase.chat(&mut session, "Hallo").await.unwrap();
        assert_eq!(
            exchange,
            Some(ChatExchange {
                user: "Hallo".to_string(),
                bot: "[German->English] Hallo".to_string(),
            })
        );

        assert_eq!(usecase.chat(&mut session, "   ").await.unwrap(), None);
        assert_eq!(session.messages.len(), 1);
        assert!(session.history.is_empty());
    }

    #[tokio::test]
    async fn test_detect_delegates_to_detector() {
        let detector = StubDetector::new("Hindi");
        let usecase = usecase(detector.clone(), Arc::new(EchoTranslator::default()));

        let detection = usecase.detect("नमस्ते").await.unwrap();
        assert_eq!(detection.label(), "Hindi");
        assert_eq!(detector.calls.load(Ordering::SeqCst), 1);
    }

    struct PlainTextCodec {
        text: String,
    }

    impl DocumentCodec for PlainTextCodec {
        fn extract_text(&self, _upload: &DocumentUpload) -> Result<String> {
            Ok(self.text.clone())
        }

        fn render_pdf(&self, text: &str) -> Result<Vec<u8>> {
            Ok(format!("PDF:{text}").into_bytes())
        }

        fn render_docx(&self, text: &str) -> Result<Vec<u8>> {
            Ok(format!("DOCX:{text}").into_bytes())
        }
    }

    #[tokio::test]
    async fn test_document_renders_both_formats() {
        let usecase = usecase(StubDetector::new("German"), Arc::new(EchoTranslator::default()));
        let mut session = SessionState::new();
        let codec = PlainTextCodec {
            text: "Sehr geehrte Damen und Herren".to_string(),
        };
        let upload = DocumentUpload::new("brief.pdf", DocumentKind::Pdf, Vec::new());

        let document = usecase
            .translate_document(&mut session, &codec, &upload, DocumentMode::TwoWay)
            .await
            .unwrap();

        let expected = "[German->English] Sehr geehrte Damen und Herren";
        assert_eq!(document.outcome.text(), expected);
        assert_eq!(document.pdf.file_name, "translated_document.pdf");
        assert_eq!(document.pdf.bytes, format!("PDF:{expected}").into_bytes());
        assert_eq!(document.docx.file_name, "translated_document.docx");
        assert_eq!(document.docx.bytes, format!("DOCX:{expected}").into_bytes());
        assert_eq!(session.history.len(), 1);
    }

    #[tokio::test]
    async fn test_document_without_text_is_an_extraction_error() {
        let detector = StubDetector::new("German");
        let usecase = usecase(detector.clone(), Arc::new(EchoTranslator::default()));
        let mut session = SessionState::new();
        let codec = PlainTextCodec {
            text: "  \n".to_string(),
        };
        let upload = DocumentUpload::new("scan.pdf", DocumentKind::Pdf, Vec::new());

        let err = usecase
            .translate_document(&mut session, &codec, &upload, DocumentMode::TwoWay)
            .await
            .unwrap_err();

        assert!(err.is_extraction());
        assert_eq!(detector.calls.load(Ordering::SeqCst), 0);
        assert!(session.history.is_empty());
    }
}
