//! Fail-soft deal assistant over an injected backend.
use crate::config::AssistantConfig;
use crate::constants::{FALLBACK_INSIGHT_TEXT, LOG_TARGET_INSIGHT, QUESTION_GENERAL, QUESTION_LOCAL};
use crate::product::Product;

use super::backend::InsightBackend;
use super::prompt::build_deal_prompt;
use super::types::{AiInsight, GeoPoint, ImageDataUri};
use super::wire::GenerateRequest;

/// Answers questions about the current deal and renders reward art.
///
/// Neither operation returns an error: failures are logged and replaced
/// with a presentable default so the page never enters an error state.
pub struct DealAssistant<B> {
    backend: B,
    config: AssistantConfig,
}

impl<B: InsightBackend> DealAssistant<B> {
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, AssistantConfig::default())
    }

    pub fn with_config(backend: B, config: AssistantConfig) -> Self {
        Self { backend, config }
    }

    pub const fn backend(&self) -> &B {
        &self.backend
    }

    pub const fn config(&self) -> &AssistantConfig {
        &self.config
    }

    pub async fn ask_about_deal(
        &self,
        question: &str,
        product: &Product,
        location: Option<GeoPoint>,
    ) -> AiInsight {
        let prompt = build_deal_prompt(question, product, location.is_some());
        let request = GenerateRequest::new(&self.config.text_model, prompt).located(location);

        match self.backend.generate_content(request).await {
            Ok(response) => {
                let sources = response.sources();
                let text = response.text().unwrap_or_else(|| {
                    log::debug!(target: LOG_TARGET_INSIGHT, "empty answer, using canned text");
                    empty_answer_text(product)
                });
                AiInsight::with_sources(text.trim(), sources)
            }
            Err(err) => {
                log::warn!(target: LOG_TARGET_INSIGHT, "deal question failed: {err}");
                AiInsight::text_only(FALLBACK_INSIGHT_TEXT)
            }
        }
    }

    /// First inline image of the reply, or `None` (keep the current image).
    ///
    /// The inline part must form a well-formed base64 `data:` URI; anything
    /// else is dropped rather than handed to the page as an image source.
    pub async fn generate_image(&self, prompt: &str) -> Option<ImageDataUri> {
        let request = GenerateRequest::new(&self.config.image_model, prompt);
        match self.backend.generate_content(request).await {
            Ok(response) => {
                let Some(inline) = response.first_inline_data() else {
                    log::warn!(target: LOG_TARGET_INSIGHT, "image reply had no inline data");
                    return None;
                };
                let uri = ImageDataUri::new(&inline.mime_type, &inline.data).to_uri();
                let image = ImageDataUri::parse(&uri);
                if image.is_none() {
                    log::warn!(
                        target: LOG_TARGET_INSIGHT,
                        "image reply had malformed inline data ({:?}, {} chars)",
                        inline.mime_type,
                        inline.data.len()
                    );
                }
                image
            }
            Err(err) => {
                log::warn!(target: LOG_TARGET_INSIGHT, "image generation failed: {err}");
                None
            }
        }
    }
}

/// Canned question the page asks, local flavor when a location is known.
#[must_use]
pub const fn default_question(location: Option<GeoPoint>) -> &'static str {
    if location.is_some() {
        QUESTION_LOCAL
    } else {
        QUESTION_GENERAL
    }
}

fn empty_answer_text(product: &Product) -> String {
    format!(
        "I'm having trouble analyzing this deal right now, but at {}% off, it looks great!",
        product.discount_percentage
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insight::backend::{ScriptedBackend, UnconfiguredBackend};
    use crate::insight::types::{InsightError, SourceKind};
    use crate::insight::wire::{GenerateResponse, GroundingChunk, MapsChunk, Part, WebChunk};
    use crate::product::DealCatalog;
    use futures::executor::block_on;

    fn product() -> Product {
        DealCatalog::load_from_static().unwrap().product
    }

    #[test]
    fn transport_failure_yields_fallback_without_sources() {
        let assistant = DealAssistant::new(ScriptedBackend::replying(Err(
            InsightError::Transport("connection reset".to_string()),
        )));
        let insight = block_on(assistant.ask_about_deal("Good deal?", &product(), None));
        assert_eq!(insight.text, FALLBACK_INSIGHT_TEXT);
        assert!(insight.sources.is_none());
    }

    #[test]
    fn missing_key_is_fail_soft() {
        let assistant = DealAssistant::new(UnconfiguredBackend);
        let insight = block_on(assistant.ask_about_deal("?", &product(), None));
        assert!(!insight.text.is_empty());
        assert!(block_on(assistant.generate_image("blender")).is_none());
    }

    #[test]
    fn located_answer_keeps_place_and_web_order() {
        let reply = GenerateResponse::from_text("Try The Daily Grind!").with_chunks(vec![
            GroundingChunk::Maps {
                maps: MapsChunk {
                    title: Some("The Daily Grind".to_string()),
                    google_maps_uri: Some("https://maps.google.com/?cid=1".to_string()),
                    ..MapsChunk::default()
                },
            },
            GroundingChunk::Web {
                web: WebChunk {
                    uri: Some("https://reviews.example/blender".to_string()),
                    title: Some("Blender review".to_string()),
                },
            },
        ]);
        let backend = ScriptedBackend::replying(Ok(reply));
        let assistant = DealAssistant::new(backend);
        let here = GeoPoint::new(37.77, -122.42);
        let insight = block_on(assistant.ask_about_deal(
            default_question(Some(here)),
            &product(),
            Some(here),
        ));

        let sources = insight.sources.unwrap();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].kind, SourceKind::Place);
        assert_eq!(sources[0].title, "The Daily Grind");
        assert_eq!(sources[1].kind, SourceKind::Web);

        let sent = assistant.backend().requests();
        assert_eq!(sent[0].location, Some(here));
        assert_eq!(sent[0].model, crate::constants::TEXT_MODEL);
        assert!(sent[0].prompt.contains(QUESTION_LOCAL));
    }

    #[test]
    fn empty_text_gets_discount_aware_default() {
        let assistant =
            DealAssistant::new(ScriptedBackend::replying(Ok(GenerateResponse::default())));
        let insight = block_on(assistant.ask_about_deal("?", &product(), None));
        assert!(insight.text.contains("50% off"));
        assert!(insight.sources.is_none());
    }

    #[test]
    fn image_without_inline_part_is_absent() {
        let assistant = DealAssistant::new(ScriptedBackend::replying(Ok(
            GenerateResponse::from_text("I cannot draw that"),
        )));
        assert_eq!(block_on(assistant.generate_image("blender")), None);
    }

    #[test]
    fn image_uses_image_model_and_first_inline_part() {
        let reply = GenerateResponse::from_parts(vec![
            Part::text("here"),
            Part::inline("image/png", "iVBORw0KGgo="),
            Part::inline("image/jpeg", "ignored"),
        ]);
        let assistant = DealAssistant::new(ScriptedBackend::replying(Ok(reply)));
        let image = block_on(assistant.generate_image("blender")).unwrap();
        assert_eq!(image.to_uri(), "data:image/png;base64,iVBORw0KGgo=");
        let sent = assistant.backend().requests();
        assert_eq!(sent[0].model, crate::constants::IMAGE_MODEL);
        assert!(sent[0].location.is_none());
    }

    #[test]
    fn malformed_inline_image_is_absent() {
        for (mime, data) in [
            ("image/png", "not base64!!"),
            ("image/png", ""),
            ("image png", "iVBORw0KGgo="),
        ] {
            let reply = GenerateResponse::from_parts(vec![Part::inline(mime, data)]);
            let assistant = DealAssistant::new(ScriptedBackend::replying(Ok(reply)));
            assert_eq!(block_on(assistant.generate_image("blender")), None, "{mime} {data}");
        }
    }

    #[test]
    fn default_question_depends_on_location() {
        assert_eq!(default_question(None), QUESTION_GENERAL);
        assert_eq!(default_question(Some(GeoPoint::new(0.0, 0.0))), QUESTION_LOCAL);
    }
}
