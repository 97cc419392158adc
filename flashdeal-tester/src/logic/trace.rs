use serde::Serialize;

use flashdeal_engine::{ClockPhase, DealSession, TickOutcome};

/// Hard stop for configs whose increment never reaches the bound.
const MAX_TRACE_TICKS: usize = 100_000;

/// One row of the per-tick walk trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalkTraceRow {
    pub tick: usize,
    pub progress: f64,
    pub phase: ClockPhase,
    pub distance_remaining: u32,
    pub reward_unlocked: bool,
    pub marker_x: f64,
    pub marker_y: f64,
}

impl WalkTraceRow {
    fn capture(tick: usize, session: &DealSession) -> Self {
        let snapshot = session.snapshot();
        Self {
            tick,
            progress: snapshot.progress,
            phase: snapshot.phase,
            distance_remaining: snapshot.distance_remaining,
            reward_unlocked: snapshot.reward_unlocked,
            marker_x: snapshot.marker.x,
            marker_y: snapshot.marker.y,
        }
    }
}

/// Start the walk and record the state before the first tick and after each one.
pub fn walk_trace(mut session: DealSession) -> Vec<WalkTraceRow> {
    let mut rows = vec![WalkTraceRow::capture(0, &session)];
    if !session.start_walk() {
        return rows;
    }
    for tick in 1..=MAX_TRACE_TICKS {
        let outcome = session.tick_progress();
        rows.push(WalkTraceRow::capture(tick, &session));
        if outcome != TickOutcome::Advanced {
            break;
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use flashdeal_engine::{DealCatalog, EngineConfig};

    #[test]
    fn trace_runs_from_initial_progress_to_unlock() {
        let product = DealCatalog::load_from_static().unwrap().product;
        let rows = walk_trace(DealSession::new(product, EngineConfig::default()));
        assert_eq!(rows.len(), 41);
        assert_eq!(rows[0].distance_remaining, 80);
        assert_eq!(rows[0].phase, ClockPhase::Idle);
        let last = rows.last().unwrap();
        assert!(last.reward_unlocked);
        assert_eq!(last.phase, ClockPhase::Complete);
        assert!((last.marker_x - 55.0).abs() < 1e-9);
    }
}
