use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::generator::{Language, Style};

// Field names serialize in camelCase so the JSON documents match the
// layout the web front-end already stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComebackRecord {
    pub id: String,
    pub original_text: String,
    pub responses: Vec<String>,
    pub meme_urls: Vec<String>,
    pub style: Style,
    pub intensity: u8,
    pub language: Language,
    pub timestamp: i64,
}

impl ComebackRecord {
    pub fn new(
        original_text: String,
        responses: Vec<String>,
        meme_urls: Vec<String>,
        style: Style,
        intensity: u8,
        language: Language,
    ) -> Self {
        ComebackRecord {
            id: Uuid::new_v4().to_string(),
            original_text,
            responses,
            meme_urls,
            style,
            intensity,
            language,
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub default_style: Style,
    pub default_intensity: u8,
    pub default_language: Language,
    pub dark_mode: bool,
    pub animations: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            default_style: Style::Literary,
            default_intensity: 5,
            default_language: Language::Chinese,
            dark_mode: true,
            animations: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsUpdate {
    pub default_style: Option<Style>,
    pub default_intensity: Option<u8>,
    pub default_language: Option<Language>,
    pub dark_mode: Option<bool>,
    pub animations: Option<bool>,
}

impl AppSettings {
    pub fn apply(&mut self, update: SettingsUpdate) {
        if let Some(style) = update.default_style {
            self.default_style = style;
        }
        if let Some(intensity) = update.default_intensity {
            self.default_intensity = intensity;
        }
        if let Some(language) = update.default_language {
            self.default_language = language;
        }
        if let Some(dark_mode) = update.dark_mode {
            self.dark_mode = dark_mode;
        }
        if let Some(animations) = update.animations {
            self.animations = animations;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStats {
    pub total_generated: u64,
    pub favorite_style: Style,
    pub win_rate: f64,
    pub last_used: i64,
}

impl Default for UsageStats {
    fn default() -> Self {
        UsageStats {
            total_generated: 0,
            favorite_style: Style::Literary,
            win_rate: 0.0,
            last_used: Utc::now().timestamp_millis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_with_camel_case_and_chinese_labels() {
        let record = ComebackRecord::new(
            "你是不是傻".to_string(),
            vec!["一".to_string(), "二".to_string(), "三".to_string()],
            vec![],
            Style::Northeastern,
            9,
            Language::Chinese,
        );
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"originalText\""));
        assert!(json.contains("\"memeUrls\""));
        assert!(json.contains("东北杠精风"));
        assert!(json.contains("中文"));
    }

    #[test]
    fn settings_update_merges_partially() {
        let mut settings = AppSettings::default();
        settings.apply(SettingsUpdate {
            default_intensity: Some(8),
            dark_mode: Some(false),
            ..SettingsUpdate::default()
        });
        assert_eq!(settings.default_intensity, 8);
        assert!(!settings.dark_mode);
        // untouched fields keep their defaults
        assert_eq!(settings.default_style, Style::Literary);
        assert!(settings.animations);
    }
}
