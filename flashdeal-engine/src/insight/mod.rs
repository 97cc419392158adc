//! AI insight adapter.
//!
//! [`DealAssistant`] turns deal questions into backend requests and folds
//! every failure into a presentable answer. The backend is an injected
//! [`InsightBackend`]; [`GeminiClient`] talks to the hosted service when the
//! `gemini` feature is enabled.

mod assistant;
mod backend;
mod prompt;
mod request;
mod types;
pub mod wire;

#[cfg(feature = "gemini")]
mod gemini;

pub use assistant::{DealAssistant, default_question};
pub use backend::{InsightBackend, ScriptedBackend, UnconfiguredBackend};
pub use prompt::build_deal_prompt;
pub use request::{RequestGate, RequestToken};
pub use types::{AiInsight, GeoPoint, ImageDataUri, InsightError, InsightSource, SourceKind};
pub use wire::{GenerateRequest, GenerateResponse};

#[cfg(feature = "gemini")]
pub use gemini::{DEFAULT_GEMINI_BASE_URL, GeminiClient, GeminiConfig};
