use crate::engine::{
    AssistantHandle, DealAssistant, DealCatalog, DealEngine, DealLoader, EngineConfig, GeoPoint,
    WebDealLoader, build_api_key, make_backend,
};
use yew::prelude::*;

/// Reward points shown in the navbar; the page has no account backend.
pub const DEMO_POINTS: u32 = 1250;

#[derive(Clone)]
pub struct AppState {
    pub catalog: UseStateHandle<Option<DealCatalog>>,
    pub config: UseStateHandle<EngineConfig>,
    pub assistant: UseStateHandle<AssistantHandle>,
    pub location: UseStateHandle<Option<GeoPoint>>,
    pub current_language: UseStateHandle<String>,
    pub points: UseStateHandle<u32>,
}

fn load_catalog() -> Option<DealCatalog> {
    match DealEngine::new(WebDealLoader).catalog() {
        Ok(catalog) => Some(catalog),
        Err(err) => {
            log::error!("failed to load deal catalog: {err}");
            None
        }
    }
}

fn load_config() -> EngineConfig {
    WebDealLoader.load_config().unwrap_or_else(|err| {
        log::warn!("falling back to default engine config: {err}");
        EngineConfig::default()
    })
}

fn build_assistant() -> AssistantHandle {
    let config = load_config();
    let backend = make_backend(build_api_key());
    AssistantHandle::new(DealAssistant::with_config(backend, config.assistant))
}

#[hook]
pub fn use_app_state() -> AppState {
    AppState {
        catalog: use_state(load_catalog),
        config: use_state(load_config),
        assistant: use_state(build_assistant),
        location: use_state(crate::paths::current_location),
        current_language: use_state(crate::i18n::current_lang),
        points: use_state(|| DEMO_POINTS),
    }
}

impl AppState {
    #[must_use]
    pub fn is_located(&self) -> bool {
        self.location.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_assets_load_for_the_page() {
        let catalog = load_catalog().unwrap();
        assert_eq!(catalog.destination, "The Daily Grind");
        assert!(load_config().simulation.validate().is_ok());
    }
}
