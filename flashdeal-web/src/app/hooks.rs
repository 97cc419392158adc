//! Hooks owning the page's timers and assistant requests.
//!
//! Each timer lives inside an effect whose cleanup drops it, so unmounting
//! or a dependency change always releases the previous interval before a
//! fresh one is armed.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Interval;
use yew::prelude::*;

use crate::engine::{
    AiInsight, AssistantHandle, ClockState, Countdown, GeoPoint, Product, RequestGate,
    SimulationConfig, step,
};

#[derive(Clone, PartialEq)]
pub struct ProgressClockHandle {
    pub state: ClockState,
    pub start: Callback<()>,
    pub pause: Callback<()>,
}

/// Walk progress driven by a fixed-period interval while running.
///
/// The interval is torn down and re-armed whenever the clock state changes,
/// so the tick closure always sees the latest committed progress.
#[hook]
pub fn use_progress_clock(config: &SimulationConfig) -> ProgressClockHandle {
    let initial = ClockState::at(config.clamped_initial_progress());
    let state = use_state_eq(move || initial);

    {
        let handle = state.clone();
        let period = config.tick_period_ms;
        let increment = config.increment;
        use_effect_with(*state, move |current| {
            let current = *current;
            let interval = current.is_running().then(|| {
                Interval::new(period, move || {
                    let (next, _) = step(current, increment);
                    handle.set(next);
                })
            });
            move || drop(interval)
        });
    }

    let start = {
        let state = state.clone();
        Callback::from(move |()| state.set(state.started()))
    };
    let pause = {
        let state = state.clone();
        Callback::from(move |()| state.set(state.paused()))
    };

    ProgressClockHandle {
        state: *state,
        start,
        pause,
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
struct CountdownCell(Countdown);

impl Reducible for CountdownCell {
    type Action = ();

    fn reduce(self: Rc<Self>, (): Self::Action) -> Rc<Self> {
        Rc::new(Self(self.0.ticked()))
    }
}

/// Seconds left on the deal, decremented once per `period_ms` and floored at zero.
#[hook]
pub fn use_countdown(initial_secs: u64, period_ms: u32) -> Countdown {
    let cell = use_reducer_eq(move || CountdownCell(Countdown::new(initial_secs)));
    {
        let dispatcher = cell.dispatcher();
        use_effect_with(period_ms, move |period| {
            let interval = Interval::new(*period, move || dispatcher.dispatch(()));
            move || drop(interval)
        });
    }
    cell.0
}

#[derive(Clone, PartialEq)]
pub struct InsightHandle {
    pub insight: Option<AiInsight>,
    pub loading: bool,
    pub ask: Callback<()>,
}

/// Deal question with a busy guard; a reply that is no longer the latest
/// outstanding request is dropped.
#[hook]
pub fn use_insight(
    assistant: &AssistantHandle,
    product: &Product,
    location: Option<GeoPoint>,
) -> InsightHandle {
    let insight = use_state(|| None::<AiInsight>);
    let loading = use_state_eq(|| false);
    let gate = use_mut_ref(RequestGate::new);

    {
        let gate = gate.clone();
        use_effect_with((), move |()| move || gate.borrow_mut().cancel());
    }

    let ask = {
        let insight = insight.clone();
        let loading = loading.clone();
        let assistant = assistant.clone();
        let product = product.clone();
        Callback::from(move |()| {
            let Some(token) = gate.borrow_mut().begin() else {
                return;
            };
            loading.set(true);
            let insight = insight.clone();
            let loading = loading.clone();
            let assistant = assistant.clone();
            let product = product.clone();
            let gate = Rc::clone(&gate);
            wasm_bindgen_futures::spawn_local(async move {
                let question = crate::engine::default_question(location);
                let answer = assistant.ask_about_deal(question, &product, location).await;
                if gate.borrow_mut().complete(token) {
                    insight.set(Some(answer));
                    loading.set(false);
                }
            });
        })
    };

    InsightHandle {
        insight: (*insight).clone(),
        loading: *loading,
        ask,
    }
}

#[derive(Clone, PartialEq)]
pub struct RewardImageHandle {
    pub src: AttrValue,
    pub generating: bool,
    pub failed: bool,
    pub regenerate: Callback<()>,
    pub on_error: Callback<()>,
}

/// Reward artwork that can be regenerated; an absent result keeps the
/// current image and a load failure switches to the placeholder state.
#[hook]
pub fn use_reward_image(
    assistant: &AssistantHandle,
    initial_src: AttrValue,
    prompt: &'static str,
) -> RewardImageHandle {
    let src = use_state_eq(move || initial_src);
    let generating = use_state_eq(|| false);
    let failed = use_state_eq(|| false);
    let gate: Rc<RefCell<RequestGate>> = use_mut_ref(RequestGate::new);

    {
        let gate = gate.clone();
        use_effect_with((), move |()| move || gate.borrow_mut().cancel());
    }

    let regenerate = {
        let src = src.clone();
        let generating = generating.clone();
        let failed = failed.clone();
        let assistant = assistant.clone();
        Callback::from(move |()| {
            let Some(token) = gate.borrow_mut().begin() else {
                return;
            };
            generating.set(true);
            failed.set(false);
            let src = src.clone();
            let generating = generating.clone();
            let assistant = assistant.clone();
            let gate = Rc::clone(&gate);
            wasm_bindgen_futures::spawn_local(async move {
                let image = assistant.generate_image(prompt).await;
                if gate.borrow_mut().complete(token) {
                    if let Some(image) = image {
                        src.set(AttrValue::from(image.to_uri()));
                    }
                    generating.set(false);
                }
            });
        })
    };

    let on_error = {
        let failed = failed.clone();
        Callback::from(move |()| failed.set(true))
    };

    RewardImageHandle {
        src: (*src).clone(),
        generating: *generating,
        failed: *failed,
        regenerate,
        on_error,
    }
}
