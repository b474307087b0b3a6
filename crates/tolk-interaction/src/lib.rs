//! LLM endpoint clients for TOLK.

pub mod ollama_api_agent;

pub use ollama_api_agent::OllamaApiAgent;
