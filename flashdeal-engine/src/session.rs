use serde::{Deserialize, Serialize};

use crate::clock::{ClockPhase, ClockState, ProgressClock, TickOutcome};
use crate::config::EngineConfig;
use crate::countdown::Countdown;
use crate::metrics::{DerivedMetrics, derive_metrics_with};
use crate::path::{PathPoint, interpolate};
use crate::product::{DealCatalog, DealStatus, Product};

/// Everything the view needs to render one frame of the deal page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub progress: f64,
    pub phase: ClockPhase,
    pub distance_remaining: u32,
    pub reward_unlocked: bool,
    pub marker: PathPoint,
    pub time_left_secs: u64,
    pub status: DealStatus,
}

/// High-level session binding the progress clock and the countdown to one product.
#[derive(Debug, Clone)]
pub struct DealSession {
    clock: ProgressClock,
    countdown: Countdown,
    product: Product,
    config: EngineConfig,
}

impl DealSession {
    #[must_use]
    pub fn new(product: Product, config: EngineConfig) -> Self {
        Self {
            clock: ProgressClock::new(&config.simulation),
            countdown: Countdown::new(product.time_left),
            product,
            config,
        }
    }

    /// Session for the bundled catalog with default configuration.
    #[must_use]
    pub fn from_catalog(catalog: &DealCatalog) -> Self {
        Self::new(catalog.product.clone(), EngineConfig::load_from_static())
    }

    /// Resume from a saved clock state, re-clamping progress and phase.
    #[must_use]
    pub fn with_clock_state(mut self, state: ClockState) -> Self {
        self.clock = ProgressClock::from_state(state, &self.config.simulation);
        self
    }

    #[must_use]
    pub const fn product(&self) -> &Product {
        &self.product
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub const fn clock(&self) -> &ProgressClock {
        &self.clock
    }

    #[must_use]
    pub const fn countdown(&self) -> Countdown {
        self.countdown
    }

    #[must_use]
    pub const fn progress(&self) -> f64 {
        self.clock.progress()
    }

    pub fn start_walk(&mut self) -> bool {
        self.clock.start()
    }

    pub fn pause_walk(&mut self) -> bool {
        self.clock.pause()
    }

    pub fn tick_progress(&mut self) -> TickOutcome {
        self.clock.tick()
    }

    pub fn advance_progress(&mut self, dt_ms: u32) -> ClockState {
        self.clock.advance(dt_ms)
    }

    /// One countdown second; returns the seconds left.
    pub fn tick_countdown(&mut self) -> u64 {
        self.countdown.tick();
        self.countdown.remaining_secs
    }

    #[must_use]
    pub fn metrics(&self) -> DerivedMetrics {
        derive_metrics_with(self.clock.progress(), self.config.simulation.base_distance_m)
    }

    #[must_use]
    pub fn marker(&self) -> PathPoint {
        interpolate(self.clock.progress())
    }

    #[must_use]
    pub const fn status(&self) -> DealStatus {
        self.product.status(self.countdown.remaining_secs)
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let metrics = self.metrics();
        SessionSnapshot {
            progress: self.clock.progress(),
            phase: self.clock.phase(),
            distance_remaining: metrics.distance_remaining,
            reward_unlocked: metrics.reward_unlocked,
            marker: self.marker(),
            time_left_secs: self.countdown.remaining_secs,
            status: self.status(),
        }
    }
}
