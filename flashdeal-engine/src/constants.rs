//! Centralized tuning constants for the flash deal simulation.
//!
//! These values define the deterministic math behind the walk-to-unlock
//! animation. Defaults exposed through configuration fall back to them.

// Progress clock -----------------------------------------------------------
pub const PROGRESS_MIN: f64 = 0.0;
pub const PROGRESS_MAX: f64 = 100.0;
pub const TICK_INCREMENT: f64 = 0.5;
pub const TICK_PERIOD_MS: u32 = 50;
pub const INITIAL_PROGRESS: f64 = 80.0;

// Derived metrics ----------------------------------------------------------
pub const BASE_DISTANCE_METERS: f64 = 400.0;

// Countdown ----------------------------------------------------------------
pub const COUNTDOWN_PERIOD_MS: u32 = 1_000;

// Assistant ----------------------------------------------------------------
pub const TEXT_MODEL: &str = "gemini-2.5-flash";
pub const IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const FALLBACK_INSIGHT_TEXT: &str =
    "This deal is selling fast! I'd recommend grabbing it while you can.";
pub const QUESTION_GENERAL: &str = "Is this a good deal compared to other smart blenders?";
pub const QUESTION_LOCAL: &str =
    "Are there any stores nearby where I can find similar blenders, and is this online price better?";
pub const REWARD_IMAGE_PROMPT: &str = "A sleek, modern smart blender with a digital display on a minimalist kitchen counter, soft sage green wall background, professional product photography, cinematic lighting, 8k resolution, high detailed.";
pub const ANSWER_WORD_LIMIT: u32 = 60;

// Logging targets ----------------------------------------------------------
pub(crate) const LOG_TARGET_CLOCK: &str = "flashdeal::clock";
pub(crate) const LOG_TARGET_INSIGHT: &str = "flashdeal::insight";
