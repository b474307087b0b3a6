//! Infrastructure layer for TOLK.
//!
//! File-system paths, TOML configuration storage, logging setup and the
//! DOCX/PDF document codec.

pub mod config_storage;
pub mod document;
pub mod logging;
pub mod paths;

pub use config_storage::ConfigStorage;
pub use document::{OfficeDocumentCodec, document_kind_for_path, load_upload};
pub use logging::init_logging;
pub use paths::TolkPaths;
