use eframe::egui::{
    self,
    containers,
};

use super::{
    actions::{
        ActionQueue,
        UiAction,
    },
    theme::Theme,
};

/// State of the saved-verbs mirror as shown in the menu bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteStatus {
    SignedOut,
    Connected,
    Failing,
}

pub struct TopBar;

impl TopBar {
    pub fn show(
        ctx: &egui::Context,
        theme: &Theme,
        remote: RemoteStatus,
        saved_count: usize,
        actions: &mut ActionQueue,
    ) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            containers::menu::Bar::new().ui(ui, |ui| {
                egui::widgets::global_theme_preference_switch(ui);
                ui.menu_button("File", |ui| {
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Saved verbs", |ui| {
                    let signed_in = remote != RemoteStatus::SignedOut;
                    if ui.add_enabled(signed_in, egui::Button::new("Show list")).clicked() {
                        actions.push(UiAction::ShowListing);
                    }
                    if ui.add_enabled(signed_in, egui::Button::new("Export page…")).clicked() {
                        actions.push(UiAction::ExportListing);
                    }
                });

                if ui.button("Settings").clicked() {
                    actions.push(UiAction::OpenSettings);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    Self::show_status_indicator(ui, theme, remote);
                    ui.add_space(6.0);
                    ui.small(format!("{saved_count} saved"));
                });
            });
        });
    }

    fn show_status_indicator(ui: &mut egui::Ui, theme: &Theme, remote: RemoteStatus) {
        let (color, tooltip) = match remote {
            RemoteStatus::Connected => (theme.green(ui.ctx()), "Saved verbs are synced"),
            RemoteStatus::Failing => (theme.red(ui.ctx()), "Could not reach the database"),
            RemoteStatus::SignedOut => {
                (theme.comment(ui.ctx()), "Not signed in. Saved verbs last for this session only")
            }
        };

        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 2.0;
            ui.small(egui::RichText::new("●").color(color)).on_hover_text(tooltip);
            ui.small("Sync").on_hover_text(tooltip);
        });
    }
}
