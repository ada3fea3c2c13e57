//! App settings, persisted as a single JSON row.

use rusqlite::params;
use serde::{Deserialize, Serialize};

use affirm_shared::constants::{DEFAULT_REMINDER_HOUR, DEFAULT_REMINDER_MINUTE};
use affirm_shared::Category;

use crate::database::Database;
use crate::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub onboarding_complete: bool,
    pub reminder_enabled: bool,
    pub reminder_hour: u8,
    pub reminder_minute: u8,
    /// 0 = system, 1 = light, 2 = dark.
    pub appearance_mode: u8,
    /// Categories shown in the card deck. Empty means all.
    pub selected_categories: Vec<Category>,
    /// Highest streak milestone already celebrated, so each fires once.
    pub last_celebrated_streak: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            onboarding_complete: false,
            reminder_enabled: false,
            reminder_hour: DEFAULT_REMINDER_HOUR,
            reminder_minute: DEFAULT_REMINDER_MINUTE,
            appearance_mode: 0,
            selected_categories: Vec::new(),
            last_celebrated_streak: 0,
        }
    }
}

impl Database {
    /// Load settings, falling back to defaults when the row is missing.
    pub fn get_settings(&self) -> Result<AppSettings> {
        let result: std::result::Result<String, _> =
            self.conn()
                .query_row("SELECT json FROM app_settings WHERE id = 1", [], |row| {
                    row.get(0)
                });

        match result {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(AppSettings::default()),
            Err(other) => Err(other.into()),
        }
    }

    /// Persist settings, replacing the existing row.
    pub fn save_settings(&self, settings: &AppSettings) -> Result<()> {
        let json = serde_json::to_string(settings)?;
        self.conn().execute(
            "INSERT OR REPLACE INTO app_settings (id, json) VALUES (1, ?1)",
            params![json],
        )?;

        tracing::debug!("settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> (Database, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_at(&dir.path().join("test.db")).unwrap();
        (db, dir)
    }

    #[test]
    fn defaults_when_missing() {
        let (db, _dir) = test_db();
        let settings = db.get_settings().unwrap();
        assert_eq!(settings, AppSettings::default());
        assert_eq!(settings.reminder_hour, DEFAULT_REMINDER_HOUR);
    }

    #[test]
    fn save_round_trip() {
        let (db, _dir) = test_db();
        let settings = AppSettings {
            onboarding_complete: true,
            reminder_enabled: true,
            reminder_hour: 7,
            reminder_minute: 30,
            appearance_mode: 2,
            selected_categories: vec![Category::Morning, Category::Gratitude],
            last_celebrated_streak: 7,
        };

        db.save_settings(&settings).unwrap();
        assert_eq!(db.get_settings().unwrap(), settings);
    }
}
