use smallvec::SmallVec;

use crate::constants::ANSWER_WORD_LIMIT;
use crate::product::{Product, format_price};

const PERSONA: &str = "You are a helpful shopping assistant for \"FlashDeals\".";
const LOCAL_GUIDANCE: &str = "The user is located at the provided coordinates. If they ask about local availability, comparisons, or stores, use Google Maps to find relevant places nearby. Provide a local perspective.";
const STORE_GUIDANCE: &str = "If you find specific stores via Google Maps, mention them by name.";

/// Prompt sent for a deal question.
#[must_use]
pub fn build_deal_prompt(question: &str, product: &Product, located: bool) -> String {
    let mut lines: SmallVec<[String; 12]> = SmallVec::new();
    lines.push(PERSONA.to_string());
    lines.push("Context about the current product:".to_string());
    lines.push(format!("Name: {}", product.name));
    lines.push(format!(
        "Original Price: ${}",
        format_price(product.original_price)
    ));
    lines.push(format!("Sale Price: ${}", format_price(product.sale_price)));
    lines.push(format!("Features: {}", product.features.join(", ")));
    lines.push(String::new());
    lines.push(format!("User Question: {}", question.trim()));
    if located {
        lines.push(LOCAL_GUIDANCE.to_string());
    }
    lines.push(String::new());
    lines.push(format!(
        "Answer briefly (under {ANSWER_WORD_LIMIT} words) and enthusiastically."
    ));
    lines.push(STORE_GUIDANCE.to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::DealCatalog;

    fn product() -> Product {
        DealCatalog::load_from_static().unwrap().product
    }

    #[test]
    fn prompt_carries_product_context() {
        let prompt = build_deal_prompt("  Worth it? ", &product(), false);
        assert!(prompt.starts_with(PERSONA));
        assert!(prompt.contains("Name: Smart Blender Pro"));
        assert!(prompt.contains("Original Price: $200"));
        assert!(prompt.contains("Sale Price: $100"));
        assert!(prompt.contains("Features: High-speed blending, Durable construction"));
        assert!(prompt.contains("User Question: Worth it?\n"));
        assert!(prompt.contains("under 60 words"));
        assert!(!prompt.contains("local perspective"));
    }

    #[test]
    fn located_prompt_asks_for_local_perspective() {
        let prompt = build_deal_prompt("Nearby?", &product(), true);
        assert!(prompt.contains(LOCAL_GUIDANCE));
    }
}
