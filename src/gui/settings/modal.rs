use eframe::egui;

use super::data::{
    RemoteSettings,
    SettingsData,
    MAX_COUNTDOWN_SECS,
};

/// Text-box state for the optional remote fields; empty means "not set".
#[derive(Default, Clone)]
struct RemoteInputs {
    database_url: String,
    user_id: String,
    auth_token: String,
}

impl RemoteInputs {
    fn from_settings(remote: &RemoteSettings) -> Self {
        Self {
            database_url: remote.database_url.clone().unwrap_or_default(),
            user_id: remote.user_id.clone().unwrap_or_default(),
            auth_token: remote.auth_token.clone().unwrap_or_default(),
        }
    }

    fn to_settings(&self) -> RemoteSettings {
        let field = |s: &str| Some(s.trim().to_string()).filter(|s| !s.is_empty());
        RemoteSettings {
            database_url: field(&self.database_url),
            user_id: field(&self.user_id),
            auth_token: field(&self.auth_token),
        }
    }
}

pub struct SettingsModal {
    open: bool,
    original: SettingsData,
    draft: SettingsData,
    remote: RemoteInputs,
}

impl SettingsModal {
    pub fn new() -> Self {
        Self {
            open: false,
            original: SettingsData::default(),
            draft: SettingsData::default(),
            remote: RemoteInputs::default(),
        }
    }

    pub fn open_settings(&mut self, current_settings: SettingsData) {
        self.remote = RemoteInputs::from_settings(&current_settings.remote);
        self.original = current_settings.clone();
        self.draft = current_settings;
        self.open = true;
    }

    fn edited(&self) -> SettingsData {
        let mut settings = self.draft.clone();
        settings.remote = self.remote.to_settings();
        settings.sanitized()
    }

    fn is_dirty(&self) -> bool {
        self.edited() != self.original
    }

    /// Returns the new settings when the user saves.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<SettingsData> {
        if !self.open {
            return None;
        }

        let mut result: Option<SettingsData> = None;

        let modal = egui::Modal::new(egui::Id::new("settings_modal")).show(ctx, |ui| {
            ui.set_width(480.0);
            ui.heading("Settings");
            ui.add_space(10.0);

            self.ui_quiz_section(ui);
            ui.add_space(10.0);
            self.ui_remote_section(ui);
            ui.add_space(10.0);
            ui.separator();

            let is_dirty = self.is_dirty();

            ui.horizontal(|ui| {
                if is_dirty {
                    ui.colored_label(egui::Color32::YELLOW, "⚠");
                    ui.label("Settings have been modified");
                } else {
                    ui.colored_label(egui::Color32::TRANSPARENT, "⚠");
                    ui.label("");
                }
            });

            ui.add_space(5.0);

            ui.horizontal(|ui| {
                let save_clicked =
                    ui.add_enabled(is_dirty, egui::Button::new("Save Settings")).clicked();
                let cancel_clicked =
                    ui.add_enabled(is_dirty, egui::Button::new("Cancel")).clicked();

                let mut reset_clicked = false;
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    reset_clicked = ui.button("Restore Default").clicked();
                });

                if save_clicked {
                    let settings = self.edited();
                    self.original = settings.clone();
                    result = Some(settings);
                    ui.close();
                } else if cancel_clicked {
                    self.draft = self.original.clone();
                    self.remote = RemoteInputs::from_settings(&self.original.remote);
                } else if reset_clicked {
                    self.draft = SettingsData::default();
                    self.remote = RemoteInputs::default();
                }
            });
        });

        if modal.should_close() {
            self.open = false;
        }

        result
    }

    fn ui_quiz_section(&mut self, ui: &mut egui::Ui) {
        ui.strong("Quiz");
        egui::Grid::new("settings_quiz_grid").num_columns(2).spacing([12.0, 6.0]).show(ui, |ui| {
            ui.label("Verb sheet (CSV URL):");
            ui.add(egui::TextEdit::singleline(&mut self.draft.dataset_url).desired_width(300.0));
            ui.end_row();

            ui.label("Default time per verb:");
            ui.add(
                egui::DragValue::new(&mut self.draft.countdown_secs)
                    .speed(1.0)
                    .range(1..=MAX_COUNTDOWN_SECS)
                    .suffix(" s"),
            );
            ui.end_row();
        });
    }

    fn ui_remote_section(&mut self, ui: &mut egui::Ui) {
        ui.strong("Saved verbs sync");
        ui.small("Leave empty to keep saved verbs for this session only.");
        egui::Grid::new("settings_remote_grid").num_columns(2).spacing([12.0, 6.0]).show(
            ui,
            |ui| {
                ui.label("Database URL:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.remote.database_url)
                        .hint_text("https://<project>.firebaseio.com")
                        .desired_width(300.0),
                );
                ui.end_row();

                ui.label("User ID:");
                ui.horizontal(|ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut self.remote.user_id).desired_width(220.0),
                    );
                    if ui.button("Generate ID").clicked() {
                        self.remote.user_id = uuid::Uuid::new_v4().to_string();
                    }
                });
                ui.end_row();

                ui.label("Auth token:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.remote.auth_token)
                        .password(true)
                        .desired_width(300.0),
                );
                ui.end_row();
            },
        );
    }
}

impl Default for SettingsModal {
    fn default() -> Self {
        Self::new()
    }
}
