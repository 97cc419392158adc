pub mod reports;
pub mod scenarios;
pub mod tester;
pub mod trace;

pub use scenarios::{ScenarioCtx, all_scenario_keys, get_scenario, list_scenarios};
pub use tester::*;
pub use trace::walk_trace;
