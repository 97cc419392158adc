use std::collections::BTreeMap;

use crate::app::hooks::{use_progress_clock, use_reward_image};
use crate::components::live_map::LiveMap;
use crate::engine::constants::REWARD_IMAGE_PROMPT;
use crate::engine::{
    AssistantHandle, ClockState, Product, SimulationConfig, derive_metrics_with, format_price,
};
use crate::i18n::{fmt_currency, t, tr};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub product: Product,
    pub assistant: AssistantHandle,
    pub simulation: SimulationConfig,
    pub destination: AttrValue,
    #[prop_or_default]
    pub located: bool,
}

/// What the walk button does in a given clock state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkAction {
    Start,
    Pause,
    Locked,
}

#[must_use]
pub fn walk_action(state: ClockState) -> WalkAction {
    if state.is_complete() {
        WalkAction::Locked
    } else if state.is_running() {
        WalkAction::Pause
    } else {
        WalkAction::Start
    }
}

/// Label key for the walk button in each clock state.
#[must_use]
pub fn walk_button_key(state: ClockState) -> &'static str {
    match walk_action(state) {
        WalkAction::Start => "reward.grab",
        WalkAction::Pause => "reward.pause",
        WalkAction::Locked => "reward.unlocked",
    }
}

#[function_component(RewardDetail)]
pub fn reward_detail(p: &Props) -> Html {
    let clock = use_progress_clock(&p.simulation);
    let image = use_reward_image(
        &p.assistant,
        AttrValue::from(p.product.image_url.clone()),
        REWARD_IMAGE_PROMPT,
    );

    let metrics = derive_metrics_with(clock.state.progress, p.simulation.base_distance_m);
    let action = walk_action(clock.state);

    let on_walk = {
        let start = clock.start.clone();
        let pause = clock.pause.clone();
        Callback::from(move |_: MouseEvent| match action {
            WalkAction::Start => start.emit(()),
            WalkAction::Pause => pause.emit(()),
            WalkAction::Locked => {}
        })
    };
    let on_regenerate = {
        let regenerate = image.regenerate.clone();
        Callback::from(move |_: MouseEvent| regenerate.emit(()))
    };
    let on_image_error = {
        let on_error = image.on_error.clone();
        Callback::from(move |_: Event| on_error.emit(()))
    };

    let discount = p.product.discount_percentage.to_string();
    let savings = format_price(p.product.savings());
    let meters = metrics.distance_remaining.to_string();
    let discount_args = BTreeMap::from([("pct", discount.as_str())]);
    let save_args = BTreeMap::from([("amount", savings.as_str())]);
    let distance_args = BTreeMap::from([("meters", meters.as_str())]);
    let enjoy_key = if p.located {
        "reward.step_enjoy_body_local"
    } else {
        "reward.step_enjoy_body"
    };

    html! {
        <section class="reward">
            <div class="reward__media">
                if image.failed {
                    <div class="reward__image reward__image--missing" role="img" aria-label={p.product.name.clone()}>
                        { t("reward.image_unavailable") }
                    </div>
                } else {
                    <img class="reward__image" src={image.src.clone()} alt={p.product.name.clone()} onerror={on_image_error} />
                }
                <button class="reward__regenerate" onclick={on_regenerate} disabled={image.generating} aria-busy={image.generating.to_string()}>
                    { t("reward.regenerate") }
                </button>
            </div>
            <div class="reward__offer">
                <span class="reward__discount">{ tr("reward.discount", Some(&discount_args)) }</span>
                <span class="reward__price">{ fmt_currency(p.product.sale_price) }</span>
                <span class="reward__save">{ tr("reward.save", Some(&save_args)) }</span>
            </div>
            <LiveMap progress={clock.state.progress} destination={p.destination.clone()} />
            <p class="reward__distance" aria-live="polite">
                if metrics.reward_unlocked {
                    { t("reward.arrived") }
                } else {
                    { tr("reward.distance", Some(&distance_args)) }
                }
            </p>
            <div class="reward__actions">
                <button
                    class={classes!("btn", "btn--primary", metrics.reward_unlocked.then_some("btn--success"))}
                    onclick={on_walk}
                    disabled={action == WalkAction::Locked}
                    aria-pressed={(action == WalkAction::Pause).to_string()}
                >
                    { t(walk_button_key(clock.state)) }
                </button>
                <button class="btn btn--ghost">{ t("reward.save_later") }</button>
            </div>
            <section class="reward__redemption">
                <h3>{ t("reward.redemption") }</h3>
                <ol>
                    <li>
                        <strong>{ t("reward.step_buy_title") }</strong>
                        <span>{ t("reward.step_buy_body") }</span>
                    </li>
                    <li>
                        <strong>{ t("reward.step_enjoy_title") }</strong>
                        <span>{ t(enjoy_key) }</span>
                    </li>
                </ol>
            </section>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ClockPhase, ProgressClock};

    #[test]
    fn walk_button_follows_clock_phase() {
        let cfg = SimulationConfig::default();
        let mut clock = ProgressClock::new(&cfg);
        assert_eq!(walk_button_key(clock.state()), "reward.grab");
        clock.start();
        assert_eq!(walk_button_key(clock.state()), "reward.pause");
        let done = ClockState {
            progress: 100.0,
            phase: ClockPhase::Complete,
            carry_ms: 0,
        };
        assert_eq!(walk_button_key(done), "reward.unlocked");
    }

    #[test]
    fn walk_button_toggles_between_start_and_pause() {
        let cfg = SimulationConfig::default();
        let idle = ClockState::at(cfg.clamped_initial_progress());
        assert_eq!(walk_action(idle), WalkAction::Start);

        let running = idle.started();
        assert_eq!(walk_action(running), WalkAction::Pause);

        let paused = running.paused();
        assert_eq!(walk_action(paused), WalkAction::Start);
        assert!((paused.progress - running.progress).abs() < f64::EPSILON);

        assert_eq!(walk_action(ClockState::at(100.0)), WalkAction::Locked);
        assert_eq!(walk_action(ClockState::at(100.0).paused()), WalkAction::Locked);
    }
}
