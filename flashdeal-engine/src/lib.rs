//! Flash Deal Engine
//!
//! Platform-agnostic core for the flash deal page: the walk-to-unlock
//! progress clock, route interpolation, derived metrics, the time-left
//! countdown and the fail-soft AI insight adapter. No UI or browser
//! dependencies live here.

pub mod clock;
pub mod config;
pub mod constants;
pub mod countdown;
pub mod insight;
pub mod metrics;
pub mod numbers;
pub mod path;
pub mod product;
pub mod session;

// Re-export commonly used types
pub use clock::{ClockPhase, ClockState, ProgressClock, TickOutcome, advance, step};
pub use config::{AssistantConfig, ConfigError, EngineConfig, SimulationConfig};
pub use countdown::{Countdown, format_hms};
pub use insight::{
    AiInsight, DealAssistant, GeoPoint, ImageDataUri, InsightBackend, InsightError,
    InsightSource, RequestGate, RequestToken, SourceKind, UnconfiguredBackend, default_question,
};
pub use metrics::{DerivedMetrics, derive_metrics, derive_metrics_with};
pub use path::{PathPoint, QuadraticBezier, interpolate};
pub use product::{DealCatalog, DealStatus, Product, RelatedDeal, format_price};
pub use session::{DealSession, SessionSnapshot};

/// Trait for abstracting where the catalog and configuration come from.
/// Platform-specific implementations should provide this
pub trait DealLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the deal catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded or parsed.
    fn load_catalog(&self) -> Result<DealCatalog, Self::Error>;

    /// Load the engine configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or parsed.
    fn load_config(&self) -> Result<EngineConfig, Self::Error>;
}

/// Loader backed by the assets compiled into this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledLoader;

impl DealLoader for BundledLoader {
    type Error = ConfigError;

    fn load_catalog(&self) -> Result<DealCatalog, Self::Error> {
        DealCatalog::load_from_static()
    }

    fn load_config(&self) -> Result<EngineConfig, Self::Error> {
        EngineConfig::try_load_from_static()
    }
}

/// Entry point that builds sessions from a loader.
pub struct DealEngine<L: DealLoader> {
    loader: L,
}

impl<L: DealLoader> DealEngine<L> {
    pub const fn new(loader: L) -> Self {
        Self { loader }
    }

    /// Create a session for the loader's featured product.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog or configuration cannot be loaded.
    pub fn create_session(&self) -> Result<DealSession, L::Error> {
        let catalog = self.loader.load_catalog()?;
        let config = self.loader.load_config()?;
        Ok(DealSession::new(catalog.product, config))
    }

    /// Build an assistant over `backend` using the loader's model names.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded.
    pub fn create_assistant<B: InsightBackend>(
        &self,
        backend: B,
    ) -> Result<DealAssistant<B>, L::Error> {
        let config = self.loader.load_config()?;
        Ok(DealAssistant::with_config(backend, config.assistant))
    }

    /// Load the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded.
    pub fn catalog(&self) -> Result<DealCatalog, L::Error> {
        self.loader.load_catalog()
    }
}
