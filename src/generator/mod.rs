pub mod fallback;
pub mod meme;
pub mod orchestrator;
pub mod parser;
pub mod prompt;
pub mod suggest;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

pub const MIN_INTENSITY: u8 = 1;
pub const MAX_INTENSITY: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Style {
    #[serde(rename = "文艺风")]
    Literary,
    #[serde(rename = "律师风")]
    Lawyer,
    #[serde(rename = "东北杠精风")]
    Northeastern,
    #[serde(rename = "哲学家风")]
    Philosopher,
    #[serde(rename = "冷嘲热讽风")]
    Sarcastic,
    #[serde(rename = "老板式发言")]
    Boss,
    #[serde(rename = "敷衍风")]
    Perfunctory,
}

impl Style {
    pub const ALL: [Style; 7] = [
        Style::Literary,
        Style::Lawyer,
        Style::Northeastern,
        Style::Philosopher,
        Style::Sarcastic,
        Style::Boss,
        Style::Perfunctory,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Style::Literary => "文艺风",
            Style::Lawyer => "律师风",
            Style::Northeastern => "东北杠精风",
            Style::Philosopher => "哲学家风",
            Style::Sarcastic => "冷嘲热讽风",
            Style::Boss => "老板式发言",
            Style::Perfunctory => "敷衍风",
        }
    }

    pub fn from_label(label: &str) -> Option<Style> {
        Style::ALL
            .into_iter()
            .find(|style| style.label() == label.trim())
    }

    // Unrecognized labels land in the sarcastic bucket.
    pub fn from_label_or_default(label: &str) -> Style {
        Style::from_label(label).unwrap_or(Style::Sarcastic)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "中文")]
    Chinese,
    #[serde(rename = "英文")]
    English,
    #[serde(rename = "自动识别")]
    Auto,
}

impl Language {
    pub fn label(&self) -> &'static str {
        match self {
            Language::Chinese => "中文",
            Language::English => "英文",
            Language::Auto => "自动识别",
        }
    }

    pub fn from_label(label: &str) -> Option<Language> {
        match label.trim() {
            "中文" => Some(Language::Chinese),
            "英文" => Some(Language::English),
            "自动识别" => Some(Language::Auto),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub original_text: String,
    pub style: Style,
    pub intensity: u8,
    pub language: Language,
    pub enable_image_generation: bool,
}

impl GenerationRequest {
    pub fn new(
        original_text: &str,
        style: Style,
        intensity: u8,
        language: Language,
        enable_image_generation: bool,
    ) -> Result<Self> {
        let original_text = original_text.trim().to_string();
        if original_text.is_empty() {
            bail!("original text must not be empty");
        }
        Ok(GenerationRequest {
            original_text,
            style,
            intensity: intensity.clamp(MIN_INTENSITY, MAX_INTENSITY),
            language,
            enable_image_generation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_labels_round_trip() {
        for style in Style::ALL {
            assert_eq!(Style::from_label(style.label()), Some(style));
        }
    }

    #[test]
    fn unknown_style_defaults_to_sarcastic() {
        assert_eq!(Style::from_label_or_default("键盘侠风"), Style::Sarcastic);
    }

    #[test]
    fn request_clamps_intensity_and_trims_text() {
        let request =
            GenerationRequest::new("  你是不是傻  ", Style::Boss, 42, Language::Chinese, false)
                .unwrap();
        assert_eq!(request.original_text, "你是不是傻");
        assert_eq!(request.intensity, MAX_INTENSITY);

        let request =
            GenerationRequest::new("你好", Style::Boss, 0, Language::Chinese, false).unwrap();
        assert_eq!(request.intensity, MIN_INTENSITY);
    }

    #[test]
    fn request_rejects_blank_text() {
        assert!(GenerationRequest::new("   ", Style::Boss, 5, Language::Chinese, false).is_err());
    }
}
