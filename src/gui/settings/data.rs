use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    dataset::DEFAULT_DATASET_URL,
    quiz::DEFAULT_COUNTDOWN_SECS,
};

pub const COUNTDOWN_CHOICES: [u32; 6] = [10, 15, 20, 30, 45, 60];
pub const MAX_COUNTDOWN_SECS: u32 = 3600;

/// Where saved verbs are mirrored. Without both a database URL and a user id the app runs
/// "signed out" and keeps bookmarks for the session only.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSettings {
    pub database_url: Option<String>,
    pub user_id: Option<String>,
    pub auth_token: Option<String>,
}

impl RemoteSettings {
    /// `(database_url, user_id)` when both are filled in.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let url = self.database_url.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let user = self.user_id.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        Some((url, user))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsData {
    pub countdown_secs: u32,
    pub dataset_url: String,
    pub dark_mode: bool,
    pub remote: RemoteSettings,
}

impl Default for SettingsData {
    fn default() -> Self {
        Self {
            countdown_secs: DEFAULT_COUNTDOWN_SECS,
            dataset_url: DEFAULT_DATASET_URL.to_string(),
            dark_mode: true,
            remote: RemoteSettings::default(),
        }
    }
}

impl SettingsData {
    /// Fix values a hand-edited settings file may have broken.
    pub fn sanitized(mut self) -> Self {
        self.countdown_secs = self.countdown_secs.clamp(1, MAX_COUNTDOWN_SECS);
        if self.dataset_url.trim().is_empty() {
            self.dataset_url = DEFAULT_DATASET_URL.to_string();
        }
        self
    }
}
