//! Product data for the featured deal and its related offers.
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::numbers::{round_f64_to_u32, u32_to_f64};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub original_price: f64,
    pub sale_price: f64,
    pub discount_percentage: u32,
    pub total_items: u32,
    pub claimed_items: u32,
    pub viewers: u32,
    /// Seconds until the deal closes.
    pub time_left: u64,
    pub image_url: String,
    #[serde(default)]
    pub features: Vec<String>,
}

impl Product {
    /// Share of stock already claimed, as a whole percentage capped at 100.
    #[must_use]
    pub fn percentage_claimed(&self) -> u32 {
        if self.total_items == 0 {
            return 0;
        }
        let ratio = u32_to_f64(self.claimed_items) / u32_to_f64(self.total_items);
        round_f64_to_u32(ratio * 100.0).min(100)
    }

    #[must_use]
    pub const fn items_left(&self) -> u32 {
        self.total_items.saturating_sub(self.claimed_items)
    }

    #[must_use]
    pub fn savings(&self) -> f64 {
        (self.original_price - self.sale_price).max(0.0)
    }

    #[must_use]
    pub const fn status(&self, time_left: u64) -> DealStatus {
        if self.items_left() == 0 {
            DealStatus::SoldOut
        } else if time_left == 0 {
            DealStatus::Expired
        } else {
            DealStatus::Active
        }
    }
}

/// Whole amounts render without decimals, anything else with cents.
#[must_use]
pub fn format_price(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{amount:.0}")
    } else {
        format!("{amount:.2}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DealStatus {
    Active,
    Expired,
    SoldOut,
}

impl DealStatus {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Active => "deal.status.active",
            Self::Expired => "deal.status.expired",
            Self::SoldOut => "deal.status.sold_out",
        }
    }

    #[must_use]
    pub const fn is_claimable(self) -> bool {
        matches!(self, Self::Active)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedDeal {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub image_url: String,
}

/// Everything the page shows about the current deal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealCatalog {
    pub product: Product,
    #[serde(default)]
    pub related: Vec<RelatedDeal>,
    #[serde(default)]
    pub terms: Vec<String>,
    /// Headline features shown above the feature list.
    #[serde(default)]
    pub highlights: Vec<String>,
    /// Name of the store the walk leads to.
    #[serde(default = "DealCatalog::default_destination")]
    pub destination: String,
}

impl DealCatalog {
    fn default_destination() -> String {
        String::from("Store")
    }

    /// Parse a catalog document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the product has no stock.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let catalog: Self = serde_json::from_str(json)?;
        if catalog.product.total_items == 0 {
            return Err(ConfigError::Invalid(format!(
                "product {} has no stock",
                catalog.product.id
            )));
        }
        Ok(catalog)
    }

    /// Load the catalog bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled asset fails to parse.
    pub fn load_from_static() -> Result<Self, ConfigError> {
        Self::from_json(include_str!("../data/deal.json"))
    }
}
