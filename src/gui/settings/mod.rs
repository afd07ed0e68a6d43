pub mod data;
pub mod modal;

pub use data::{
    RemoteSettings,
    SettingsData,
    COUNTDOWN_CHOICES,
};
pub use modal::SettingsModal;
