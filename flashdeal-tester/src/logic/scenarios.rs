use anyhow::{Result, bail, ensure};
use futures::executor::block_on;

use flashdeal_engine::constants::FALLBACK_INSIGHT_TEXT;
use flashdeal_engine::insight::ScriptedBackend;
use flashdeal_engine::insight::wire::{
    GenerateResponse, GroundingChunk, MapsChunk, Part, WebChunk,
};
use flashdeal_engine::{
    ClockPhase, ClockState, Countdown, DealAssistant, DealCatalog, DealSession, EngineConfig,
    GeoPoint, InsightError, ProgressClock, QuadraticBezier, RequestGate, SourceKind, TickOutcome,
    derive_metrics_with, interpolate, step,
};

/// Inputs shared by every scenario run.
#[derive(Debug, Clone)]
pub struct ScenarioCtx {
    pub catalog: DealCatalog,
    pub config: EngineConfig,
}

impl ScenarioCtx {
    pub fn session(&self) -> DealSession {
        DealSession::new(self.catalog.product.clone(), self.config.clone())
    }
}

pub type Check = fn(&ScenarioCtx) -> Result<()>;

#[derive(Clone, Copy)]
pub struct TestScenario {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub check: Check,
}

const CATALOG: &[TestScenario] = &[
    TestScenario {
        key: "walk-to-unlock",
        name: "Walk To Unlock",
        description: "Walk from the initial progress until the reward unlocks",
        check: walk_to_unlock,
    },
    TestScenario {
        key: "start-idempotence",
        name: "Start Idempotence",
        description: "Starting a running or finished walk changes nothing",
        check: start_idempotence,
    },
    TestScenario {
        key: "termination-boundary",
        name: "Termination Boundary",
        description: "The last tick lands exactly on 100 and stops the clock",
        check: termination_boundary,
    },
    TestScenario {
        key: "countdown-floor",
        name: "Countdown Floor",
        description: "Time left decrements once per tick and stops at zero",
        check: countdown_floor,
    },
    TestScenario {
        key: "path-endpoints",
        name: "Path Endpoints",
        description: "Marker sits on the route endpoints at 0 and 100",
        check: path_endpoints,
    },
    TestScenario {
        key: "metrics-monotonic",
        name: "Metrics Monotonic",
        description: "Distance never grows as progress rises; unlock only at 100",
        check: metrics_monotonic,
    },
    TestScenario {
        key: "assistant-fail-soft",
        name: "Assistant Fail Soft",
        description: "Every backend failure yields the fallback answer",
        check: assistant_fail_soft,
    },
    TestScenario {
        key: "assistant-sources",
        name: "Assistant Sources",
        description: "Grounding chunks become ordered sources; empty text gets canned copy",
        check: assistant_sources,
    },
    TestScenario {
        key: "image-absent",
        name: "Image Absent",
        description: "Replies without inline data keep the current image",
        check: image_absent,
    },
    TestScenario {
        key: "stale-response",
        name: "Stale Response",
        description: "Only the latest outstanding request may apply its reply",
        check: stale_response,
    },
];

pub fn list_scenarios() -> impl Iterator<Item = (&'static str, &'static str)> {
    CATALOG.iter().map(|s| (s.key, s.description))
}

pub fn all_scenario_keys() -> Vec<String> {
    CATALOG.iter().map(|s| s.key.to_string()).collect()
}

pub fn get_scenario(key: &str) -> Option<TestScenario> {
    CATALOG.iter().copied().find(|s| s.key == key)
}

fn walk_to_unlock(ctx: &ScenarioCtx) -> Result<()> {
    let sim = &ctx.config.simulation;
    let mut session = ctx.session();
    let already_done = sim.clamped_initial_progress() >= 100.0;
    ensure!(
        session.start_walk() != already_done,
        "start from {} had the wrong effect",
        sim.clamped_initial_progress()
    );

    let remaining = (100.0 - sim.clamped_initial_progress()) / sim.increment;
    let budget = remaining.ceil() as usize + 1;
    let mut ticks = 0_usize;
    while !already_done {
        ticks += 1;
        match session.tick_progress() {
            TickOutcome::Completed => break,
            TickOutcome::Advanced => {}
            TickOutcome::Idle => bail!("clock went idle after {ticks} ticks"),
        }
        ensure!(ticks <= budget, "walk exceeded {budget} ticks");
    }

    let snapshot = session.snapshot();
    ensure!(snapshot.reward_unlocked, "reward still locked at {}", snapshot.progress);
    ensure!(snapshot.distance_remaining == 0, "distance left: {}", snapshot.distance_remaining);
    ensure!(snapshot.phase == ClockPhase::Complete, "phase {:?}", snapshot.phase);
    ensure!(
        snapshot.marker == QuadraticBezier::ROUTE.destination(),
        "marker {:?} is off the destination",
        snapshot.marker
    );
    Ok(())
}

fn start_idempotence(ctx: &ScenarioCtx) -> Result<()> {
    let sim = &ctx.config.simulation;
    let mut clock = ProgressClock::new(sim);
    ensure!(clock.start(), "first start was ignored");
    let running = clock.state();
    ensure!(!clock.start(), "second start reported a change");
    ensure!(clock.state() == running, "second start changed the state");

    let mut done = ProgressClock::from_state(ClockState::at(100.0), sim);
    let finished = done.state();
    ensure!(!done.start(), "start on a finished walk reported a change");
    ensure!(done.state() == finished, "start on a finished walk changed the state");
    Ok(())
}

fn termination_boundary(ctx: &ScenarioCtx) -> Result<()> {
    let increment = ctx.config.simulation.increment;
    let near_end = ClockState {
        progress: 100.0 - increment * 0.8,
        phase: ClockPhase::Running,
        carry_ms: 0,
    };
    let (next, outcome) = step(near_end, increment);
    ensure!(outcome == TickOutcome::Completed, "outcome {outcome:?}");
    ensure!(
        (next.progress - 100.0).abs() < f64::EPSILON,
        "overshoot to {}",
        next.progress
    );
    ensure!(!next.is_running(), "clock still running after completion");

    let (after, outcome) = step(next, increment);
    ensure!(outcome == TickOutcome::Idle, "tick after completion: {outcome:?}");
    ensure!(after == next, "tick after completion changed the state");
    Ok(())
}

fn countdown_floor(ctx: &ScenarioCtx) -> Result<()> {
    let mut countdown = Countdown::new(2);
    for _ in 0..3 {
        countdown.tick();
    }
    ensure!(countdown.remaining_secs == 0, "left {}", countdown.remaining_secs);
    ensure!(countdown.is_expired(), "countdown not expired at zero");
    ensure!(countdown.format_hms() == "00:00:00", "shown as {}", countdown.format_hms());

    let mut session = ctx.session();
    let start = session.countdown().remaining_secs;
    let left = session.tick_countdown();
    ensure!(left == start.saturating_sub(1), "tick went from {start} to {left}");
    Ok(())
}

fn path_endpoints(_ctx: &ScenarioCtx) -> Result<()> {
    let route = QuadraticBezier::ROUTE;
    ensure!(interpolate(0.0) == route.start(), "start {:?}", interpolate(0.0));
    ensure!(interpolate(100.0) == route.destination(), "end {:?}", interpolate(100.0));
    ensure!(interpolate(-20.0) == route.start(), "negative progress left the start");
    ensure!(interpolate(180.0) == route.destination(), "overflow left the destination");
    ensure!(route.svg_path() == "M 25 38 Q 35 35 55 18", "path {}", route.svg_path());
    Ok(())
}

fn metrics_monotonic(ctx: &ScenarioCtx) -> Result<()> {
    let base = ctx.config.simulation.base_distance_m;
    let mut last = u32::MAX;
    for step_idx in 0..=1_000_u32 {
        let progress = f64::from(step_idx) / 10.0;
        let metrics = derive_metrics_with(progress, base);
        ensure!(
            metrics.distance_remaining <= last,
            "distance grew at {progress}: {} > {last}",
            metrics.distance_remaining
        );
        ensure!(
            metrics.reward_unlocked == (progress >= 100.0),
            "unlock flag wrong at {progress}"
        );
        last = metrics.distance_remaining;
    }
    Ok(())
}

fn assistant_fail_soft(ctx: &ScenarioCtx) -> Result<()> {
    let failures = [
        InsightError::MissingApiKey,
        InsightError::Transport("connection reset".to_string()),
        InsightError::Timeout("30s".to_string()),
        InsightError::Auth("bad key".to_string()),
        InsightError::Status {
            status: 503,
            body: "overloaded".to_string(),
        },
        InsightError::InvalidResponse("not json".to_string()),
    ];
    for failure in failures {
        let label = failure.to_string();
        let assistant = DealAssistant::new(ScriptedBackend::replying(Err(failure)));
        let insight = block_on(assistant.ask_about_deal("?", &ctx.catalog.product, None));
        ensure!(insight.text == FALLBACK_INSIGHT_TEXT, "{label}: got {:?}", insight.text);
        ensure!(insight.sources.is_none(), "{label}: sources on failure");
    }
    Ok(())
}

fn assistant_sources(ctx: &ScenarioCtx) -> Result<()> {
    let reply = GenerateResponse::from_parts(Vec::new()).with_chunks(vec![
        GroundingChunk::Maps {
            maps: MapsChunk {
                uri: Some("https://maps.example/raw".to_string()),
                google_maps_uri: Some("https://maps.example/place".to_string()),
                title: Some("Kitchen Corner".to_string()),
                place_id: None,
            },
        },
        GroundingChunk::Web {
            web: WebChunk {
                uri: Some("https://web.example/review".to_string()),
                title: None,
            },
        },
    ]);
    let assistant = DealAssistant::new(ScriptedBackend::replying(Ok(reply)));
    let location = Some(GeoPoint::new(40.4168, -3.7038));
    let insight = block_on(assistant.ask_about_deal("Nearby?", &ctx.catalog.product, location));

    let discount = format!("{}%", ctx.catalog.product.discount_percentage);
    ensure!(insight.text.contains(&discount), "canned text lacks discount: {}", insight.text);
    let sources = insight.sources.unwrap_or_default();
    ensure!(sources.len() == 2, "expected 2 sources, got {}", sources.len());
    ensure!(sources[0].kind == SourceKind::Place, "first source {:?}", sources[0].kind);
    ensure!(sources[0].uri == "https://maps.example/place", "maps uri {}", sources[0].uri);
    ensure!(sources[1].title == sources[1].uri, "untitled web source kept title {}", sources[1].title);

    let requests = assistant.backend().requests();
    ensure!(
        requests.first().is_some_and(|r| r.location.is_some()),
        "located question was sent without a location"
    );
    Ok(())
}

fn image_absent(_ctx: &ScenarioCtx) -> Result<()> {
    let text_only = DealAssistant::new(ScriptedBackend::replying(Ok(
        GenerateResponse::from_text("no picture today"),
    )));
    ensure!(block_on(text_only.generate_image("blender")).is_none(), "text reply made an image");

    let failing = DealAssistant::new(ScriptedBackend::replying(Err(InsightError::Timeout(
        "slow".to_string(),
    ))));
    ensure!(block_on(failing.generate_image("blender")).is_none(), "failure made an image");

    let inline = DealAssistant::new(ScriptedBackend::replying(Ok(GenerateResponse::from_parts(
        vec![Part::text("here you go"), Part::inline("image/png", "iVBORw0KGgo=")],
    ))));
    let image = block_on(inline.generate_image("blender"));
    let uri = image.map(|img| img.to_uri()).unwrap_or_default();
    ensure!(uri == "data:image/png;base64,iVBORw0KGgo=", "image uri {uri}");
    Ok(())
}

fn stale_response(_ctx: &ScenarioCtx) -> Result<()> {
    let mut gate = RequestGate::new();
    let first = gate
        .begin()
        .ok_or_else(|| anyhow::anyhow!("idle gate refused a request"))?;
    ensure!(gate.begin().is_none(), "busy gate accepted a duplicate request");
    gate.cancel();
    let second = gate
        .begin()
        .ok_or_else(|| anyhow::anyhow!("gate stayed busy after cancel"))?;

    ensure!(!gate.complete(first), "stale reply was accepted");
    ensure!(gate.is_busy(), "stale reply cleared the busy flag");
    ensure!(gate.complete(second), "latest reply was rejected");
    ensure!(!gate.is_busy(), "gate still busy after the latest reply");
    Ok(())
}
