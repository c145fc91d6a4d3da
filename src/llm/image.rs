use std::time::Duration;

use once_cell::sync::Lazy;
use pulldown_cmark::{Event, Parser, Tag};
use regex::Regex;
use serde_json::{json, Value};
use tracing::{debug, warn};
use url::Url;

use crate::config::{Config, ImageApiMode, MEME_SYSTEM_PROMPT};
use crate::error::GenerationError;
use crate::generator::meme::build_meme_prompt;
use crate::generator::Style;
use crate::llm::chat::{extract_message_content, summarize_error_body, truncate_for_log};
use crate::utils::http::get_http_client;
use crate::utils::timing::log_llm_timing;

const PLACEHOLDER_SEEDS: [&str; 3] = ["angry", "smug", "sarcastic"];
const PLACEHOLDER_COLORS: [&str; 3] = ["3b82f6", "ef4444", "10b981"];
const SSE_DONE_SENTINEL: &str = "[DONE]";

static IMAGE_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)https?://[^\s<>"{}|\\^`\[\]]+\.(?:jpg|jpeg|png|gif|webp)"#)
        .expect("valid image url regex")
});

// Deterministic stand-in used whenever live generation fails for a slot.
pub fn placeholder_meme_url(index: usize) -> String {
    let seed = PLACEHOLDER_SEEDS.get(index).copied().unwrap_or("default");
    let color = PLACEHOLDER_COLORS.get(index).copied().unwrap_or("6b7280");
    format!("https://api.dicebear.com/7.x/shapes/svg?seed={seed}&backgroundColor={color}&size=300")
}

fn is_http_url(candidate: &str) -> bool {
    Url::parse(candidate)
        .map(|url| url.scheme() == "http" || url.scheme() == "https")
        .unwrap_or(false)
}

fn markdown_image_url(content: &str) -> Option<String> {
    for event in Parser::new(content) {
        if let Event::Start(Tag::Image(_, dest, _)) = event {
            if is_http_url(&dest) {
                return Some(dest.to_string());
            }
        }
    }
    None
}

// A Markdown image link wins over a bare URL when both are present.
pub fn extract_image_url(content: &str) -> Result<String, GenerationError> {
    if let Some(url) = markdown_image_url(content) {
        return Ok(url);
    }
    IMAGE_URL_RE
        .find(content)
        .map(|found| found.as_str().to_string())
        .ok_or(GenerationError::ParseFailure)
}

fn first_data_url(value: &Value) -> Option<String> {
    value
        .get("data")?
        .get(0)?
        .get("url")?
        .as_str()
        .map(str::to_string)
}

// The images endpoint answers either with a plain JSON document or with
// SSE-style "data: {...}" lines ending in a [DONE] sentinel.
pub(crate) fn parse_images_body(body: &str) -> Result<String, GenerationError> {
    if let Ok(value) = serde_json::from_str::<Value>(body.trim()) {
        if let Some(url) = first_data_url(&value) {
            return Ok(url);
        }
    }

    for line in body.lines() {
        let Some(data) = line.trim().strip_prefix("data:") else {
            continue;
        };
        let data = data.trim();
        if data == SSE_DONE_SENTINEL {
            break;
        }
        if let Ok(value) = serde_json::from_str::<Value>(data) {
            if let Some(url) = first_data_url(&value) {
                return Ok(url);
            }
        }
    }

    Err(GenerationError::ParseFailure)
}

pub async fn generate_single_meme(
    config: &Config,
    response_text: &str,
    style: Style,
    index: usize,
) -> String {
    match try_generate_meme(config, response_text, style, index).await {
        Ok(url) => url,
        Err(err) => {
            warn!("Meme {} generation failed, using placeholder: {err}", index + 1);
            placeholder_meme_url(index)
        }
    }
}

pub(crate) async fn try_generate_meme(
    config: &Config,
    response_text: &str,
    style: Style,
    index: usize,
) -> Result<String, GenerationError> {
    let prompt = build_meme_prompt(response_text, style);
    let operation = format!("meme:{}", index + 1);

    log_llm_timing("image", &config.image_model, &operation, None, || async {
        match config.image_api_mode {
            ImageApiMode::Chat => meme_via_chat(config, &prompt).await,
            ImageApiMode::Images => meme_via_images(config, &prompt).await,
        }
    })
    .await
}

async fn meme_via_chat(config: &Config, prompt: &str) -> Result<String, GenerationError> {
    let payload = json!({
        "model": config.image_model,
        "stream": false,
        "messages": [
            { "role": "system", "content": MEME_SYSTEM_PROMPT },
            { "role": "user", "content": prompt },
        ],
    });

    let response = get_http_client()
        .post(format!(
            "{}/chat/completions",
            config.api_base_url.trim_end_matches('/')
        ))
        .header("Authorization", format!("Bearer {}", config.image_api_key))
        .timeout(Duration::from_secs(config.request_timeout_seconds))
        .json(&payload)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let (message, body_summary) = summarize_error_body(&body);
        warn!("Meme chat request failed: status={status}, body={body_summary}");
        return Err(GenerationError::ApiRequestFailed {
            status,
            detail: message.unwrap_or(body_summary),
        });
    }

    let value = response.json::<Value>().await?;
    let content = extract_message_content(&value);
    if content.is_empty() {
        return Err(GenerationError::EmptyCompletion);
    }

    debug!(
        "Meme chat response content: {}",
        truncate_for_log(&content, 500)
    );
    extract_image_url(&content)
}

async fn meme_via_images(config: &Config, prompt: &str) -> Result<String, GenerationError> {
    let payload = json!({
        "model": config.image_model,
        "prompt": prompt,
        "n": 1,
        "size": config.image_size,
        "quality": config.image_quality,
        "response_format": "url",
    });

    let response = get_http_client()
        .post(format!(
            "{}/images/generations",
            config.api_base_url.trim_end_matches('/')
        ))
        .header("Authorization", format!("Bearer {}", config.image_api_key))
        .timeout(Duration::from_secs(config.request_timeout_seconds))
        .json(&payload)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let (message, body_summary) = summarize_error_body(&body);
        warn!("Meme images request failed: status={status}, body={body_summary}");
        return Err(GenerationError::ApiRequestFailed {
            status,
            detail: message.unwrap_or(body_summary),
        });
    }

    let body = response.text().await?;
    parse_images_body(&body)
}
