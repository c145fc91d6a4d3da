pub mod config;
pub mod error;
pub mod generator;
pub mod llm;
pub mod state;
pub mod storage;
pub mod utils;

pub use config::{Config, ImageApiMode};
pub use error::GenerationError;
pub use generator::orchestrator::{
    create_comeback_response, generate_comebacks, spawn_generation, GenerationEvent,
    GenerationStage, DISABLED_MEME_URLS,
};
pub use generator::suggest::{suggest_style, StyleSuggestion};
pub use generator::{GenerationRequest, Language, Style};
pub use llm::{generate_single_meme, placeholder_meme_url};
pub use state::AppState;
pub use storage::models::{AppSettings, ComebackRecord, SettingsUpdate, UsageStats};
pub use storage::store::LocalStore;
pub use utils::logging::{init_logging, LoggingGuards};
