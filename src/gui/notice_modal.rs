use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoticeKind {
    #[default]
    Info,
    Error,
}

#[derive(Default, Clone)]
pub struct NoticeData {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
    pub details: Option<String>,
}

/// One-button modal for informational messages and remote failures the user asked about.
pub struct NoticeModal {
    open: bool,
    data: NoticeData,
}

impl NoticeModal {
    pub fn new() -> Self {
        Self { open: false, data: NoticeData::default() }
    }

    pub fn show_info(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.data = NoticeData {
            kind: NoticeKind::Info,
            title: title.into(),
            message: message.into(),
            details: None,
        };
        self.open = true;
    }

    pub fn show_error(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        details: Option<impl Into<String>>,
    ) {
        self.data = NoticeData {
            kind: NoticeKind::Error,
            title: title.into(),
            message: message.into(),
            details: details.map(|d| d.into()),
        };
        self.open = true;
    }

    /// Returns true on the frame the modal is dismissed.
    pub fn show(&mut self, ctx: &egui::Context) -> bool {
        if !self.open {
            return false;
        }

        let modal = egui::Modal::new(egui::Id::new("notice_modal")).show(ctx, |ui| {
            ui.set_width(420.0);

            let (icon, color) = match self.data.kind {
                NoticeKind::Info => ("ℹ", ui.visuals().hyperlink_color),
                NoticeKind::Error => ("⚠", ui.visuals().error_fg_color),
            };

            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(icon).size(24.0).color(color));
                ui.label(egui::RichText::new(&self.data.title).size(18.0).strong());
            });

            ui.add_space(10.0);
            ui.label(egui::RichText::new(&self.data.message).size(14.0));

            if let Some(details) = &self.data.details {
                ui.add_space(10.0);
                ui.collapsing("Technical Details", |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut details.as_str())
                            .desired_width(f32::INFINITY)
                            .desired_rows(4)
                            .code_editor(),
                    );
                });
            }

            ui.add_space(15.0);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("OK").clicked() {
                    ui.close();
                }
            });
        });

        if modal.should_close() {
            self.open = false;
            self.data = NoticeData::default();
            return true;
        }

        false
    }
}

impl Default for NoticeModal {
    fn default() -> Self {
        Self::new()
    }
}
