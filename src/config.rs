use std::env;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tracing::warn;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageApiMode {
    Chat,
    Images,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub database_url: String,
    pub api_base_url: String,
    pub text_api_key: String,
    pub image_api_key: String,
    pub text_model: String,
    pub image_model: String,
    pub text_temperature: f32,
    pub text_max_tokens: i32,
    pub request_timeout_seconds: u64,
    pub image_request_delay_ms: u64,
    pub image_api_mode: ImageApiMode,
    pub image_size: String,
    pub image_quality: String,
}

fn env_string(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_f32(name: &str, default: f32) -> f32 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<f32>().ok())
        .unwrap_or(default)
}

fn env_i32(name: &str, default: i32) -> i32 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<i32>().ok())
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(default)
}

fn normalize_image_api_mode(value: String) -> ImageApiMode {
    match value.trim().to_lowercase().as_str() {
        "" | "chat" => ImageApiMode::Chat,
        "images" | "generations" => ImageApiMode::Images,
        other => {
            warn!("Unknown IMAGE_API_MODE value '{other}'; defaulting to chat");
            ImageApiMode::Chat
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let config = Config {
            log_level: env_string("LOG_LEVEL", "info").to_lowercase(),
            database_url: env_string("DATABASE_URL", "sqlite://comeback.db?mode=rwc"),
            api_base_url: env_string("API_BASE_URL", "https://vip.apiyi.com/v1"),
            text_api_key: env_string("TEXT_API_KEY", ""),
            image_api_key: env_string("IMAGE_API_KEY", ""),
            text_model: env_string("TEXT_MODEL", "deepseek-v3-250324"),
            image_model: env_string("IMAGE_MODEL", "gpt-4o-image"),
            text_temperature: env_f32("TEXT_TEMPERATURE", 0.8),
            text_max_tokens: env_i32("TEXT_MAX_TOKENS", 1000),
            request_timeout_seconds: env_u64("REQUEST_TIMEOUT_SECONDS", 60),
            image_request_delay_ms: env_u64("IMAGE_REQUEST_DELAY_MS", 500),
            image_api_mode: normalize_image_api_mode(env_string("IMAGE_API_MODE", "chat")),
            image_size: env_string("IMAGE_SIZE", "1024x1024"),
            image_quality: env_string("IMAGE_QUALITY", "standard"),
        };

        Url::parse(&config.api_base_url)
            .with_context(|| format!("Invalid API_BASE_URL: {}", config.api_base_url))?;

        if config.text_api_key.trim().is_empty() {
            warn!("TEXT_API_KEY is empty; comebacks will come from the canned template bank");
        }
        if config.image_api_key.trim().is_empty() {
            warn!("IMAGE_API_KEY is empty; memes will come from placeholder images");
        }

        Ok(config)
    }
}

pub const COMEBACK_SYSTEM_PROMPT: &str = r#"你是一个专业的回怼助手。根据用户选择的风格和愤怒程度生成高质量的回应。

风格说明：
- 文艺风：优雅、有诗意、引用经典，但要根据愤怒程度调整用词的尖锐度
- 律师风：逻辑严密、有理有据、专业术语，愤怒时更加咄咄逼人
- 东北杠精风：幽默风趣、接地气、东北方言，愤怒时更加直接粗暴
- 哲学家风：深度思考、引用哲学观点、思辨性强，愤怒时更加尖锐讽刺
- 冷嘲热讽风：讽刺幽默、不留情面、机智犀利，愤怒时更加毒舌
- 老板式发言：权威感、商业思维、指导性强，愤怒时更加霸道
- 敷衍风：应付式回应、不太在意、轻松随意，愤怒时变得不耐烦

当前愤怒程度：{intensity}/10 - {intensity_desc}
语言：{language}

重要：必须严格按照愤怒程度调整语气！
- 1-2级：温和客气，用词礼貌
- 3-4级：略显不满，但仍克制
- 5-6级：明显愤怒，语气加重，开始使用更强烈的词汇
- 7-8级：相当愤怒，言辞犀利，不留情面
- 9-10级：极度愤怒，火力全开，用词激烈，毫不客气

请生成3个不同的回应，每个回应都必须体现出{intensity}/10的愤怒程度。回应要简洁有力，每个回应不超过200字。"#;

pub const COMEBACK_USER_PROMPT: &str = r#"对方说："{original_text}"

请按照{style}的风格，严格以{intensity}/10的愤怒程度（{intensity_desc}），生成3个不同的回怼回应。

要求：
- 直接给出回怼句子，不要任何格式标记
- 每个回应独立成段
- 简洁有力，符合{style}特色
- 必须体现出{intensity}/10的愤怒程度，语气要与愤怒等级匹配
- 愤怒程度越高，用词越激烈，语气越不客气"#;

pub const MEME_SYSTEM_PROMPT: &str =
    "You are a helpful assistant that generates meme images based on text descriptions.";

pub const MEME_PROMPT_TEMPLATE: &str = r#"Generate a classic WeChat meme in the style of "Panda Head" memes.

Text to include: "{response_text}"

Content analysis: {description}
Visual style: {visual}
Expression: {expression}

Style requirements:
1. Simple cartoon character with round face and expressive features (like classic panda head memes)
2. Clean design with black and white as main colors
3. Bold, readable Chinese text positioned appropriately
4. Character expression should match the content: {expression}
5. 1:1 square aspect ratio, suitable for WeChat stickers
6. Minimalist background to highlight the character and text
7. Similar to classic internet meme templates
8. {special}

Create a meme that perfectly matches the tone and content of the text."#;
