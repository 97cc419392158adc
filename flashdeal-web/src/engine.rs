//! Web-side wiring of the deal engine
//!
//! Re-exports the engine types and provides the browser's loader and the
//! shared assistant handle passed down through component props.

use std::rc::Rc;

// Re-export all types from flashdeal-engine
pub use flashdeal_engine::*;

use flashdeal_engine::insight::{GeminiClient, GeminiConfig};

/// Assistant over a type-erased backend so components can share one instance.
pub type WebAssistant = DealAssistant<Rc<dyn InsightBackend>>;

/// Web-specific loader reading the assets bundled with the engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebDealLoader;

#[derive(Debug, thiserror::Error)]
pub enum WebDataError {
    #[error("deal data error: {0}")]
    Config(#[from] ConfigError),
}

impl DealLoader for WebDealLoader {
    type Error = WebDataError;

    fn load_catalog(&self) -> Result<DealCatalog, Self::Error> {
        Ok(DealCatalog::load_from_static()?)
    }

    fn load_config(&self) -> Result<EngineConfig, Self::Error> {
        Ok(EngineConfig::try_load_from_static()?)
    }
}

/// Compile-time API key, as the page has no server to hold one.
#[must_use]
pub fn build_api_key() -> Option<&'static str> {
    option_env!("GEMINI_API_KEY")
        .or(option_env!("API_KEY"))
        .filter(|key| !key.trim().is_empty())
}

/// Backend for the page: the hosted service when a key was baked in,
/// otherwise a backend that always fails (and so always falls back).
#[must_use]
pub fn make_backend(api_key: Option<&str>) -> Rc<dyn InsightBackend> {
    let Some(key) = api_key else {
        log::warn!("no GEMINI_API_KEY at build time; deal insight will use canned answers");
        return Rc::new(UnconfiguredBackend);
    };
    match GeminiClient::new(&GeminiConfig::default().with_api_key(key)) {
        Ok(client) => Rc::new(client),
        Err(err) => {
            log::error!("could not build Gemini client: {err}");
            Rc::new(UnconfiguredBackend)
        }
    }
}

/// Shared assistant; props compare by identity.
#[derive(Clone)]
pub struct AssistantHandle(pub Rc<WebAssistant>);

impl AssistantHandle {
    #[must_use]
    pub fn new(assistant: WebAssistant) -> Self {
        Self(Rc::new(assistant))
    }

    /// Assistant that answers every request with the fail-soft defaults.
    #[must_use]
    pub fn offline() -> Self {
        let backend: Rc<dyn InsightBackend> = Rc::new(UnconfiguredBackend);
        Self::new(DealAssistant::new(backend))
    }
}

impl PartialEq for AssistantHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::ops::Deref for AssistantHandle {
    type Target = WebAssistant;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loader_reads_bundled_catalog() {
        let engine = DealEngine::new(WebDealLoader);
        let catalog = engine.catalog().unwrap();
        assert_eq!(catalog.product.name, "Smart Blender Pro");
    }

    #[test]
    fn loader_reads_bundled_config_strictly() {
        let config = WebDealLoader.load_config().unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn handles_compare_by_identity() {
        let a = AssistantHandle::offline();
        let b = a.clone();
        assert!(a == b);
        assert!(a != AssistantHandle::offline());
    }

    #[test]
    fn missing_key_builds_offline_backend() {
        let backend = make_backend(None);
        let assistant = DealAssistant::new(backend);
        let product = DealCatalog::load_from_static().unwrap().product;
        let insight = futures::executor::block_on(assistant.ask_about_deal("?", &product, None));
        assert_eq!(insight.text, constants::FALLBACK_INSIGHT_TEXT);
    }
}
