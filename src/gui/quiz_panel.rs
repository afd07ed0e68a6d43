use eframe::egui;

use super::{
    actions::{
        ActionQueue,
        UiAction,
    },
    settings::COUNTDOWN_CHOICES,
    theme::Theme,
};
use crate::{
    core::FormSlot,
    quiz::{
        LevelFilter,
        Phase,
        QuizEngine,
        SlotView,
    },
};

pub fn level_filter_row(ui: &mut egui::Ui, filter: &LevelFilter, actions: &mut ActionQueue) {
    ui.horizontal_wrapped(|ui| {
        ui.label("CEFR levels:");

        let mut all = filter.all_selected();
        if ui.checkbox(&mut all, "All").changed() {
            actions.push(UiAction::SetAllLevels(all));
        }

        ui.separator();

        for level in filter.known() {
            let mut selected = filter.is_selected(level);
            if ui.checkbox(&mut selected, level.as_str()).changed() {
                actions.push(UiAction::SetLevel { level: level.clone(), selected });
            }
        }
    });
}

pub fn countdown_row(ui: &mut egui::Ui, engine: &QuizEngine, actions: &mut ActionQueue, theme: &Theme) {
    ui.horizontal(|ui| {
        ui.label("Time per verb:");
        let current = engine.countdown_secs();
        egui::ComboBox::from_id_salt("countdown_secs")
            .selected_text(format!("{current}s"))
            .show_ui(ui, |ui| {
                let mut choices = COUNTDOWN_CHOICES.to_vec();
                if !choices.contains(&current) {
                    choices.push(current);
                    choices.sort_unstable();
                }
                for secs in choices {
                    if ui.selectable_label(secs == current, format!("{secs}s")).clicked()
                        && secs != current
                    {
                        actions.push(UiAction::SetCountdown(secs));
                    }
                }
            });

        ui.add_space(12.0);

        let remaining = engine.remaining_secs();
        let text = egui::RichText::new(format!("Remaining time: {remaining}s"));
        let text = if engine.phase() == Phase::Awaiting && remaining <= 5 {
            text.color(theme.red(ui.ctx())).strong()
        } else {
            text
        };
        ui.label(text);
    });
}

/// The three form slots, the outcome line and the quiz buttons.
pub fn question_panel(
    ui: &mut egui::Ui,
    engine: &mut QuizEngine,
    theme: &Theme,
    actions: &mut ActionQueue,
) {
    let Some(question) = engine.question().cloned() else {
        ui.add_space(20.0);
        ui.vertical_centered(|ui| {
            ui.label(egui::RichText::new(engine.feedback().unwrap_or_default()).size(16.0));
        });
        ui.add_space(20.0);
        buttons(ui, engine, actions);
        return;
    };

    if let Some(categories) = &question.verb.categories {
        ui.small(egui::RichText::new(categories).color(theme.comment(ui.ctx())));
    }

    let mut submit_requested = false;

    egui::Grid::new("quiz_slots").num_columns(2).spacing([16.0, 10.0]).show(ui, |ui| {
        for slot in FormSlot::ALL {
            ui.label(slot.label());
            match engine.slot_view(slot) {
                Some(SlotView::Prompt(text)) => {
                    ui.label(theme.prompt(ui.ctx(), &text).size(18.0));
                }
                Some(SlotView::Revealed(text)) => {
                    let color = theme.revealed(ui.ctx());
                    ui.label(egui::RichText::new(text).size(18.0).color(color));
                }
                Some(SlotView::Input { placeholder, editable: true }) => {
                    if let Some(answer) = engine.answer_mut(slot) {
                        let response = ui.add(
                            egui::TextEdit::singleline(answer)
                                .hint_text(placeholder)
                                .desired_width(220.0),
                        );
                        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                            submit_requested = true;
                        }
                    }
                }
                Some(SlotView::Input { placeholder, editable: false }) => {
                    let mut typed = engine.answer(slot).to_string();
                    ui.add_enabled(
                        false,
                        egui::TextEdit::singleline(&mut typed)
                            .hint_text(placeholder)
                            .desired_width(220.0),
                    );
                }
                None => {
                    ui.label("");
                }
            }
            ui.end_row();
        }
    });

    if submit_requested {
        actions.push(UiAction::CheckAnswer);
    }

    ui.add_space(8.0);
    if let Phase::Graded(outcome) = engine.phase() {
        ui.label(
            egui::RichText::new(outcome.message())
                .size(18.0)
                .strong()
                .color(theme.outcome(ui.ctx(), outcome)),
        );
    } else {
        ui.label(" ");
    }
    ui.add_space(8.0);

    buttons(ui, engine, actions);
}

fn buttons(ui: &mut egui::Ui, engine: &QuizEngine, actions: &mut ActionQueue) {
    ui.horizontal(|ui| {
        if ui.button("Next").clicked() {
            actions.push(UiAction::NextQuestion);
        }
        if ui.add_enabled(engine.phase() == Phase::Awaiting, egui::Button::new("Check")).clicked()
        {
            actions.push(UiAction::CheckAnswer);
        }
        if ui.add_enabled(engine.question().is_some(), egui::Button::new("Save verb")).clicked() {
            actions.push(UiAction::SaveCurrentVerb);
        }
    });
}
