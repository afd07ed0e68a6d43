pub mod actions;
pub mod app;
pub mod carousel;
pub mod listing_modal;
pub mod message_overlay;
pub mod notice_modal;
pub mod quiz_panel;
pub mod settings;
pub mod theme;
pub mod top_bar;

pub use app::VerbDrillApp;
