use crate::gui::{
    listing_modal::ListingModal,
    notice_modal::NoticeModal,
    settings::SettingsModal,
};

pub struct Modals {
    pub notice: NoticeModal,
    pub settings: SettingsModal,
    pub listing: ListingModal,
}

impl Default for Modals {
    fn default() -> Self {
        Self {
            notice: NoticeModal::new(),
            settings: SettingsModal::new(),
            listing: ListingModal::new(),
        }
    }
}
