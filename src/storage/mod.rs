pub mod models;
pub mod store;

pub use models::{AppSettings, ComebackRecord, SettingsUpdate, UsageStats};
pub use store::LocalStore;
