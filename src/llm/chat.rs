use std::time::Duration;

use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::GenerationError;
use crate::utils::http::get_http_client;
use crate::utils::timing::log_llm_timing;

const ERROR_BODY_LIMIT: usize = 2000;

pub(crate) fn truncate_for_log(value: &str, limit: usize) -> String {
    if value.chars().count() <= limit {
        return value.to_string();
    }
    let truncated: String = value.chars().take(limit).collect();
    format!("{truncated}... (truncated)")
}

pub(crate) fn summarize_error_body(body: &str) -> (Option<String>, String) {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return (None, "empty response body".to_string());
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        let message = value
            .pointer("/error/message")
            .and_then(|v| v.as_str())
            .map(|v| v.to_string())
            .or_else(|| {
                value
                    .get("message")
                    .and_then(|v| v.as_str())
                    .map(|v| v.to_string())
            });
        return (message, truncate_for_log(&value.to_string(), ERROR_BODY_LIMIT));
    }

    (None, truncate_for_log(trimmed, ERROR_BODY_LIMIT))
}

pub(crate) fn extract_message_content(value: &Value) -> String {
    value
        .get("choices")
        .and_then(|v| v.get(0))
        .and_then(|v| v.get("message"))
        .and_then(|v| v.get("content"))
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .trim()
        .to_string()
}

pub async fn call_chat_completion(
    config: &Config,
    system_prompt: &str,
    user_prompt: &str,
) -> Result<String, GenerationError> {
    let payload = json!({
        "model": config.text_model,
        "stream": false,
        "messages": [
            { "role": "system", "content": system_prompt },
            { "role": "user", "content": user_prompt },
        ],
        "temperature": config.text_temperature,
        "max_tokens": config.text_max_tokens,
    });

    log_llm_timing("chat", &config.text_model, "comeback", None, || async {
        debug!(
            "Chat completion request: model={}, system_chars={}, user_chars={}",
            config.text_model,
            system_prompt.chars().count(),
            user_prompt.chars().count()
        );

        let response = get_http_client()
            .post(format!(
                "{}/chat/completions",
                config.api_base_url.trim_end_matches('/')
            ))
            .header("Authorization", format!("Bearer {}", config.text_api_key))
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let (message, body_summary) = summarize_error_body(&body);
            warn!("Chat completion failed: status={status}, body={body_summary}");
            return Err(GenerationError::ApiRequestFailed {
                status,
                detail: message.unwrap_or(body_summary),
            });
        }

        let value = response.json::<Value>().await?;
        let content = extract_message_content(&value);
        if content.is_empty() {
            warn!(
                "Chat completion returned no usable content: {}",
                truncate_for_log(&value.to_string(), ERROR_BODY_LIMIT)
            );
            return Err(GenerationError::EmptyCompletion);
        }

        Ok(content)
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarizes_structured_error_bodies() {
        let (message, summary) =
            summarize_error_body(r#"{"error":{"message":"quota exceeded"}}"#);
        assert_eq!(message.as_deref(), Some("quota exceeded"));
        assert!(summary.contains("quota exceeded"));
    }

    #[test]
    fn summarizes_flat_and_empty_bodies() {
        let (message, summary) = summarize_error_body(r#"{"message":"nope"}"#);
        assert_eq!(message.as_deref(), Some("nope"));

        let (message, summary_empty) = summarize_error_body("   ");
        assert!(message.is_none());
        assert_eq!(summary_empty, "empty response body");
        assert_ne!(summary, summary_empty);
    }

    #[test]
    fn extracts_first_choice_content() {
        let value: Value = serde_json::from_str(
            r#"{"choices":[{"message":{"content":"  回应内容  "}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_message_content(&value), "回应内容");

        let empty: Value = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert_eq!(extract_message_content(&empty), "");
    }

    #[test]
    fn truncates_long_values_for_logging() {
        let long = "啊".repeat(50);
        let truncated = truncate_for_log(&long, 10);
        assert!(truncated.ends_with("... (truncated)"));
        assert!(truncated.chars().count() < long.chars().count());
    }
}
