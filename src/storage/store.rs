use anyhow::Result;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{info, warn};

use crate::generator::Style;
use crate::storage::models::{AppSettings, ComebackRecord, SettingsUpdate, UsageStats};

const HISTORY_KEY: &str = "comeback-history";
const SETTINGS_KEY: &str = "app-settings";
const USAGE_STATS_KEY: &str = "usage-stats";

pub const HISTORY_LIMIT: usize = 50;

// JSON documents under fixed keys, mirroring the front-end's localStorage
// layout. Single-user client: one connection is all the concurrency the
// store ever sees.
#[derive(Clone)]
pub struct LocalStore {
    pool: SqlitePool,
}

impl LocalStore {
    pub async fn init(database_url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS local_store (\
                key TEXT PRIMARY KEY,\
                value TEXT NOT NULL\
            );",
        )
        .execute(&pool)
        .await?;

        info!("Local store ready");

        Ok(LocalStore { pool })
    }

    async fn get_value<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT value FROM local_store WHERE key = ?")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some((raw,)) => match serde_json::from_str(&raw) {
                Ok(value) => Ok(Some(value)),
                Err(err) => {
                    warn!("Discarding corrupt value for key '{key}': {err}");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    async fn set_value<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        sqlx::query(
            "INSERT INTO local_store (key, value) VALUES (?, ?) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(serde_json::to_string(value)?)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn get_history(&self) -> Result<Vec<ComebackRecord>> {
        Ok(self.get_value(HISTORY_KEY).await?.unwrap_or_default())
    }

    // Newest first, capped at HISTORY_LIMIT; the append and the stats
    // update commit together.
    pub async fn add_to_history(&self, record: &ComebackRecord) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let mut history: Vec<ComebackRecord> = read_json(&mut tx, HISTORY_KEY)
            .await?
            .unwrap_or_default();
        history.insert(0, record.clone());
        history.truncate(HISTORY_LIMIT);

        let mut stats: UsageStats = read_json(&mut tx, USAGE_STATS_KEY)
            .await?
            .unwrap_or_default();
        stats.total_generated += 1;
        if let Some(favorite) = favorite_style(&history) {
            stats.favorite_style = favorite;
        }
        stats.last_used = Utc::now().timestamp_millis();

        write_json(&mut tx, HISTORY_KEY, &history).await?;
        write_json(&mut tx, USAGE_STATS_KEY, &stats).await?;
        tx.commit().await?;
        Ok(())
    }

    pub async fn clear_history(&self) -> Result<()> {
        self.set_value(HISTORY_KEY, &Vec::<ComebackRecord>::new())
            .await
    }

    pub async fn get_settings(&self) -> Result<AppSettings> {
        Ok(self.get_value(SETTINGS_KEY).await?.unwrap_or_default())
    }

    pub async fn update_settings(&self, update: SettingsUpdate) -> Result<AppSettings> {
        let mut settings = self.get_settings().await?;
        settings.apply(update);
        self.set_value(SETTINGS_KEY, &settings).await?;
        Ok(settings)
    }

    pub async fn get_usage_stats(&self) -> Result<UsageStats> {
        Ok(self.get_value(USAGE_STATS_KEY).await?.unwrap_or_default())
    }

    // Folds one won/lost battle into the running win rate against the
    // total number of generations.
    pub async fn record_battle_outcome(&self, won: bool) -> Result<UsageStats> {
        let mut stats = self.get_usage_stats().await?;
        let total_battles = stats.total_generated as f64;
        let current_wins = stats.win_rate * total_battles;
        let new_wins = if won { current_wins + 1.0 } else { current_wins };
        stats.win_rate = if total_battles > 0.0 {
            new_wins / total_battles
        } else {
            0.0
        };
        self.set_value(USAGE_STATS_KEY, &stats).await?;
        Ok(stats)
    }
}

async fn read_json<T: DeserializeOwned>(
    tx: &mut Transaction<'_, Sqlite>,
    key: &str,
) -> Result<Option<T>> {
    let row: Option<(String,)> = sqlx::query_as("SELECT value FROM local_store WHERE key = ?")
        .bind(key)
        .fetch_optional(&mut **tx)
        .await?;

    match row {
        Some((raw,)) => match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                warn!("Discarding corrupt value for key '{key}': {err}");
                Ok(None)
            }
        },
        None => Ok(None),
    }
}

async fn write_json<T: Serialize>(
    tx: &mut Transaction<'_, Sqlite>,
    key: &str,
    value: &T,
) -> Result<()> {
    sqlx::query(
        "INSERT INTO local_store (key, value) VALUES (?, ?) \
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
    )
    .bind(key)
    .bind(serde_json::to_string(value)?)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

// Highest count wins; earlier first appearance breaks ties.
fn favorite_style(history: &[ComebackRecord]) -> Option<Style> {
    let mut counts: Vec<(Style, usize)> = Vec::new();
    for record in history {
        match counts.iter_mut().find(|(style, _)| *style == record.style) {
            Some((_, count)) => *count += 1,
            None => counts.push((record.style, 1)),
        }
    }

    let mut best: Option<(Style, usize)> = None;
    for (style, count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((style, count)),
        }
    }
    best.map(|(style, _)| style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::Language;

    fn record_with(style: Style, text: &str) -> ComebackRecord {
        ComebackRecord::new(
            text.to_string(),
            vec!["一条".to_string(), "两条".to_string(), "三条".to_string()],
            vec![],
            style,
            5,
            Language::Chinese,
        )
    }

    async fn memory_store() -> LocalStore {
        LocalStore::init("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn history_is_capped_at_fifty_newest_first() {
        let store = memory_store().await;
        for n in 1..=(HISTORY_LIMIT + 1) {
            let record = record_with(Style::Sarcastic, &format!("第{n}条"));
            store.add_to_history(&record).await.unwrap();
        }

        let history = store.get_history().await.unwrap();
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history[0].original_text, "第51条");
        // the very first record fell off the end
        assert!(history
            .iter()
            .all(|record| record.original_text != "第1条"));

        let stats = store.get_usage_stats().await.unwrap();
        assert_eq!(stats.total_generated, (HISTORY_LIMIT + 1) as u64);
    }

    #[tokio::test]
    async fn favorite_style_tracks_the_most_used_one() {
        let store = memory_store().await;
        store
            .add_to_history(&record_with(Style::Boss, "一"))
            .await
            .unwrap();
        store
            .add_to_history(&record_with(Style::Lawyer, "二"))
            .await
            .unwrap();
        store
            .add_to_history(&record_with(Style::Lawyer, "三"))
            .await
            .unwrap();

        let stats = store.get_usage_stats().await.unwrap();
        assert_eq!(stats.favorite_style, Style::Lawyer);
        assert_eq!(stats.total_generated, 3);
    }

    #[tokio::test]
    async fn settings_are_default_seeded_and_merge_updates() {
        let store = memory_store().await;
        let settings = store.get_settings().await.unwrap();
        assert_eq!(settings, AppSettings::default());

        let updated = store
            .update_settings(SettingsUpdate {
                default_style: Some(Style::Northeastern),
                animations: Some(false),
                ..SettingsUpdate::default()
            })
            .await
            .unwrap();
        assert_eq!(updated.default_style, Style::Northeastern);
        assert!(!updated.animations);
        assert_eq!(updated.default_intensity, 5);

        let reloaded = store.get_settings().await.unwrap();
        assert_eq!(reloaded, updated);
    }

    #[tokio::test]
    async fn win_rate_folds_against_total_generated() {
        let store = memory_store().await;
        for n in 0..4 {
            store
                .add_to_history(&record_with(Style::Sarcastic, &format!("第{n}条")))
                .await
                .unwrap();
        }

        let stats = store.record_battle_outcome(true).await.unwrap();
        assert!((stats.win_rate - 0.25).abs() < f64::EPSILON);

        let stats = store.record_battle_outcome(false).await.unwrap();
        assert!((stats.win_rate - 0.25).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn clear_history_empties_the_list() {
        let store = memory_store().await;
        store
            .add_to_history(&record_with(Style::Boss, "一"))
            .await
            .unwrap();
        store.clear_history().await.unwrap();
        assert!(store.get_history().await.unwrap().is_empty());
    }
}
