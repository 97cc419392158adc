use crate::engine::{PathPoint, QuadraticBezier, derive_metrics, interpolate};
use crate::i18n::t;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub progress: f64,
    pub destination: AttrValue,
}

/// CSS placement for an overlay pinned to a point of the 100x100 map.
fn pin_style(point: PathPoint) -> String {
    format!("left: {:.2}%; top: {:.2}%;", point.x, point.y)
}

#[function_component(LiveMap)]
pub fn live_map(p: &Props) -> Html {
    let route = QuadraticBezier::ROUTE;
    let start = route.start();
    let end = route.destination();
    let marker = interpolate(p.progress);
    let arrived = derive_metrics(p.progress).reward_unlocked;
    let target_label = if arrived { t("map.arrived") } else { t("map.target") };

    html! {
        <div class="live-map" aria-label={p.destination.clone()}>
            <svg class="live-map__route" viewBox="0 0 100 100" preserveAspectRatio="none" aria-hidden="true">
                <path d={route.svg_path()} fill="none" stroke="currentColor" stroke-width="0.8" stroke-dasharray="2 1.5" />
                <circle cx={start.x.to_string()} cy={start.y.to_string()} r="1.2" class="live-map__start" />
            </svg>
            <span class="live-map__live">{ t("map.live") }</span>
            <div class={classes!("live-map__destination", arrived.then_some("live-map__destination--arrived"))} style={pin_style(end)}>
                <span class="live-map__store">{ p.destination.clone() }</span>
                <span class="live-map__target">{ target_label }</span>
            </div>
            <div class="live-map__marker" style={pin_style(marker)} data-progress={format!("{:.1}", p.progress)}>
                <span class="live-map__you">{ t("map.you") }</span>
            </div>
            <div class="live-map__controls">
                <button aria-label={t("map.compass")}>{ "\u{1F9ED}" }</button>
                <button aria-label={t("map.layers")}>{ "\u{1F5FA}" }</button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_style_uses_percent_offsets() {
        assert_eq!(pin_style(PathPoint::new(55.0, 18.0)), "left: 55.00%; top: 18.00%;");
    }
}
