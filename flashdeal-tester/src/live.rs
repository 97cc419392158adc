//! Live checks against the hosted insight service.
//!
//! These talk to the backend directly instead of going through the
//! fail-soft assistant, so transport and auth problems show up as failures.

use colored::Colorize;
use std::time::Instant;

use flashdeal_engine::insight::{
    GeminiClient, GeminiConfig, GenerateRequest, InsightBackend, InsightError, build_deal_prompt,
};
use flashdeal_engine::{GeoPoint, default_question};

use crate::logic::{ScenarioCtx, ScenarioResult};

#[derive(Debug, Clone, Default)]
pub struct LiveOptions {
    pub question: Option<String>,
    pub location: Option<GeoPoint>,
    pub image_prompt: Option<String>,
    pub verbose: bool,
}

/// Client configured from the environment with the models from `ctx`.
///
/// # Errors
///
/// Returns [`InsightError::MissingApiKey`] when no key is set.
pub fn live_client(ctx: &ScenarioCtx) -> Result<GeminiClient, InsightError> {
    let mut config = GeminiConfig::from_env();
    config.text_model.clone_from(&ctx.config.assistant.text_model);
    config.image_model.clone_from(&ctx.config.assistant.image_model);
    GeminiClient::new(&config)
}

pub async fn run_live_checks<B: InsightBackend>(
    backend: &B,
    ctx: &ScenarioCtx,
    opts: &LiveOptions,
) -> Vec<ScenarioResult> {
    let mut results = vec![ask_question(backend, ctx, opts).await];
    if let Some(prompt) = opts.image_prompt.as_deref() {
        results.push(generate_image(backend, ctx, prompt).await);
    }
    results
}

async fn ask_question<B: InsightBackend>(
    backend: &B,
    ctx: &ScenarioCtx,
    opts: &LiveOptions,
) -> ScenarioResult {
    let question = opts
        .question
        .clone()
        .unwrap_or_else(|| default_question(opts.location).to_string());
    let prompt = build_deal_prompt(&question, &ctx.catalog.product, opts.location.is_some());
    let request =
        GenerateRequest::new(&ctx.config.assistant.text_model, prompt).located(opts.location);

    let started = Instant::now();
    let outcome = match backend.generate_content(request).await {
        Ok(response) => {
            let sources = response.sources();
            match response.text() {
                Some(text) => {
                    println!("💬 {}", text.trim().bright_white());
                    for source in &sources {
                        println!("   🔗 {} <{}>", source.title, source.uri.dimmed());
                    }
                    Ok(())
                }
                None => Err(format!("reply had no text ({} sources)", sources.len())),
            }
        }
        Err(err) => Err(err.to_string()),
    };
    if opts.verbose {
        log::info!("live question took {:?}", started.elapsed());
    }
    ScenarioResult::single("Live Insight", outcome, started.elapsed())
}

async fn generate_image<B: InsightBackend>(
    backend: &B,
    ctx: &ScenarioCtx,
    prompt: &str,
) -> ScenarioResult {
    let request = GenerateRequest::new(&ctx.config.assistant.image_model, prompt);
    let started = Instant::now();
    let outcome = match backend.generate_content(request).await {
        Ok(response) => match response.first_inline_data() {
            Some(inline) if !inline.data.is_empty() => {
                println!(
                    "🖼  {} image, {} base64 chars",
                    inline.mime_type.bright_white(),
                    inline.data.len()
                );
                Ok(())
            }
            _ => Err("reply had no inline image".to_string()),
        },
        Err(err) => Err(err.to_string()),
    };
    ScenarioResult::single("Live Image", outcome, started.elapsed())
}
