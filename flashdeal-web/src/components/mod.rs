pub mod deal_highlights;
pub mod footer;
pub mod insight_panel;
pub mod live_map;
pub mod navbar;
pub mod product_hero;
pub mod related_deals;
pub mod reward_detail;
