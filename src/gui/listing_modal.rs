use eframe::egui;
use egui_extras::{
    Column,
    TableBuilder,
};

use super::theme::Theme;
use crate::{
    bookmarks::export::{
        listing_lines,
        LISTING_HEADING,
    },
    core::Verb,
};

/// Window with the numbered list of verbs fetched from the remote store.
pub struct ListingModal {
    open: bool,
    loading: bool,
    verbs: Vec<Verb>,
}

impl ListingModal {
    pub fn new() -> Self {
        Self { open: false, loading: false, verbs: Vec::new() }
    }

    /// Open in a loading state while the fetch is in flight.
    pub fn open_loading(&mut self) {
        self.open = true;
        self.loading = true;
        self.verbs.clear();
    }

    pub fn set_verbs(&mut self, verbs: Vec<Verb>) {
        self.loading = false;
        self.verbs = verbs;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.loading = false;
    }

    /// Returns true when the user asks to export what is shown.
    pub fn show(&mut self, ctx: &egui::Context, theme: &Theme) -> bool {
        if !self.open {
            return false;
        }

        let mut export_clicked = false;

        let modal = egui::Modal::new(egui::Id::new("listing_modal")).show(ctx, |ui| {
            ui.set_width(460.0);
            ui.heading(theme.heading(ui.ctx(), LISTING_HEADING));
            ui.add_space(8.0);

            if self.loading {
                ui.horizontal(|ui| {
                    ui.add(egui::Spinner::new());
                    ui.label("Fetching saved verbs…");
                });
            } else {
                let lines = listing_lines(&self.verbs);
                let row_height = egui::TextStyle::Body
                    .resolve(ui.style())
                    .size
                    .max(ui.spacing().interact_size.y);

                TableBuilder::new(ui)
                    .striped(true)
                    .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                    .column(Column::remainder())
                    .max_scroll_height(320.0)
                    .body(|body| {
                        body.rows(row_height, lines.len(), |mut row| {
                            let line = &lines[row.index()];
                            row.col(|ui| {
                                ui.label(line);
                            });
                        });
                    });
            }

            ui.add_space(10.0);
            ui.separator();

            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!self.loading && !self.verbs.is_empty(), egui::Button::new("Export page"))
                    .clicked()
                {
                    export_clicked = true;
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Close").clicked() {
                        ui.close();
                    }
                });
            });
        });

        if modal.should_close() {
            self.close();
        }

        export_clicked
    }
}

impl Default for ListingModal {
    fn default() -> Self {
        Self::new()
    }
}
