use eframe::egui::{
    self,
    emath::easing,
};

use super::{
    actions::{
        ActionQueue,
        UiAction,
    },
    theme::Theme,
};
use crate::core::Verb;

pub const FALLBACK_STEP: f32 = 160.0;
pub const CARD_WIDTH: f32 = 150.0;
pub const CARD_GAP: f32 = 12.0;
const SCROLL_SECONDS: f64 = 0.3;

/// Distance between two card origins. Without a rendered card there is nothing to measure.
pub fn step(first_card_width: Option<f32>, gap: f32) -> f32 {
    match first_card_width {
        Some(width) if width > 0.0 => width + gap,
        _ => FALLBACK_STEP,
    }
}

/// Circular index over the scroll positions of the saved-verb strip.
///
/// With `len` cards of which `visible` fit in the viewport there are `len - visible + 1`
/// distinct positions. Moving past either end jumps to the other end and takes one step
/// in, as if the strip had kept scrolling.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Carousel {
    index: usize,
    len: usize,
    visible: usize,
}

impl Carousel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn positions(&self) -> usize {
        let visible = self.visible.max(1);
        if self.len <= visible {
            1
        } else {
            self.len - visible + 1
        }
    }

    /// Update the card count and how many fit on screen, keeping the index in range.
    pub fn set_layout(&mut self, len: usize, visible: usize) {
        self.len = len;
        self.visible = visible.max(1);
        self.index = self.index.min(self.positions() - 1);
    }

    /// Returns true when the move wrapped around from the trailing edge.
    pub fn next(&mut self) -> bool {
        let positions = self.positions();
        if self.index + 1 < positions {
            self.index += 1;
            false
        } else {
            self.index = 1.min(positions - 1);
            true
        }
    }

    /// Returns true when the move wrapped around from the start.
    pub fn prev(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            false
        } else {
            self.index = self.positions().saturating_sub(2);
            true
        }
    }

    /// Horizontal scroll offset for the current index.
    pub fn target_offset(&self, step: f32, max_offset: f32) -> f32 {
        (self.index as f32 * step).clamp(0.0, max_offset.max(0.0))
    }
}

/// Whole cards that fit in `viewport_width`, counting the gap after each card.
pub fn visible_cards(viewport_width: f32, step: f32) -> usize {
    if step <= 0.0 {
        return 1;
    }
    (((viewport_width + CARD_GAP) / step).floor() as usize).max(1)
}

#[derive(Debug, Clone, Copy)]
struct ScrollAnimation {
    from: f32,
    to: f32,
    started_at: f64,
}

impl ScrollAnimation {
    fn sample(&self, now: f64) -> (f32, bool) {
        let t = ((now - self.started_at) / SCROLL_SECONDS).clamp(0.0, 1.0) as f32;
        let offset = self.from + (self.to - self.from) * easing::cubic_out(t);
        (offset, t >= 1.0)
    }
}

/// Drawing state for the strip: the index plus what the last frame measured.
#[derive(Default)]
pub struct CarouselView {
    carousel: Carousel,
    first_card_width: Option<f32>,
    offset: f32,
    max_offset: f32,
    animation: Option<ScrollAnimation>,
}

impl CarouselView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, now: f64) {
        if self.carousel.next() {
            self.offset = 0.0;
        }
        self.animate_to_index(now);
    }

    pub fn prev(&mut self, now: f64) {
        if self.carousel.prev() {
            self.offset = self.max_offset;
        }
        self.animate_to_index(now);
    }

    fn animate_to_index(&mut self, now: f64) {
        let to = self.carousel.target_offset(step(self.first_card_width, CARD_GAP), self.max_offset);
        self.animation = Some(ScrollAnimation { from: self.offset, to, started_at: now });
    }

    pub fn show(&mut self, ui: &mut egui::Ui, verbs: &[Verb], theme: &Theme, actions: &mut ActionQueue) {
        let step = step(self.first_card_width, CARD_GAP);
        self.carousel.set_layout(verbs.len(), visible_cards(ui.available_width() - 80.0, step));

        ui.horizontal(|ui| {
            let nav_enabled = self.carousel.positions() > 1;
            if ui.add_enabled(nav_enabled, egui::Button::new("◀")).clicked() {
                actions.push(UiAction::CarouselPrev);
            }

            let strip_width = (ui.available_width() - 40.0).max(CARD_WIDTH);
            let mut scroll = egui::ScrollArea::horizontal()
                .id_salt("saved_verbs_strip")
                .max_width(strip_width)
                .auto_shrink([false, true]);

            if let Some(animation) = self.animation {
                let (offset, done) = animation.sample(ui.input(|i| i.time));
                scroll = scroll.horizontal_scroll_offset(offset);
                if done {
                    self.animation = None;
                } else {
                    ui.ctx().request_repaint();
                }
            }

            let output = scroll.show(ui, |ui| {
                ui.spacing_mut().item_spacing.x = CARD_GAP;
                ui.horizontal(|ui| {
                    for (i, verb) in verbs.iter().enumerate() {
                        let rect = Self::card(ui, verb, theme, actions);
                        if i == 0 {
                            self.first_card_width = Some(rect.width());
                        }
                    }
                });
            });

            if verbs.is_empty() {
                self.first_card_width = None;
            }
            self.offset = output.state.offset.x;
            self.max_offset = (output.content_size.x - output.inner_rect.width()).max(0.0);

            if ui.add_enabled(nav_enabled, egui::Button::new("▶")).clicked() {
                actions.push(UiAction::CarouselNext);
            }
        });
    }

    fn card(ui: &mut egui::Ui, verb: &Verb, theme: &Theme, actions: &mut ActionQueue) -> egui::Rect {
        egui::Frame::group(ui.style())
            .fill(theme.card_fill(ui.ctx()))
            .corner_radius(6.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.set_width(CARD_WIDTH - 16.0);
                ui.vertical(|ui| {
                    ui.label(theme.prompt(ui.ctx(), &verb.base));
                    ui.label(&verb.past);
                    ui.label(&verb.participle);
                    if !verb.cefr_tokens.is_empty() {
                        ui.small(
                            egui::RichText::new(verb.cefr_tokens.join(" "))
                                .color(theme.comment(ui.ctx())),
                        );
                    }
                    if ui.button("Learn").on_hover_text("Practice this verb").clicked() {
                        actions.push(UiAction::Practice(verb.base.clone()));
                    }
                });
            })
            .response
            .rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carousel(len: usize, visible: usize) -> Carousel {
        let mut carousel = Carousel::new();
        carousel.set_layout(len, visible);
        carousel
    }

    #[test]
    fn test_step_uses_fallback_without_cards() {
        assert_eq!(step(None, CARD_GAP), FALLBACK_STEP);
        assert_eq!(step(Some(0.0), CARD_GAP), FALLBACK_STEP);
        assert_eq!(step(Some(150.0), 12.0), 162.0);
    }

    #[test]
    fn test_positions() {
        assert_eq!(carousel(0, 3).positions(), 1);
        assert_eq!(carousel(2, 3).positions(), 1);
        assert_eq!(carousel(3, 3).positions(), 1);
        assert_eq!(carousel(7, 3).positions(), 5);
        assert_eq!(carousel(4, 0).positions(), 4);
    }

    #[test]
    fn test_next_wraps_one_step_past_start() {
        let mut c = carousel(5, 3);
        assert!(!c.next());
        assert!(!c.next());
        assert_eq!(c.index(), 2);

        assert!(c.next());
        assert_eq!(c.index(), 1);
        assert_eq!(c.target_offset(160.0, 320.0), 160.0);
    }

    #[test]
    fn test_prev_wraps_one_step_before_end() {
        let mut c = carousel(6, 3);
        assert!(c.prev());
        assert_eq!(c.index(), 2);
        assert_eq!(c.target_offset(160.0, 480.0), 320.0);

        assert!(!c.prev());
        assert_eq!(c.index(), 1);
    }

    #[test]
    fn test_two_positions_wrap_in_place() {
        let mut c = carousel(4, 3);
        c.next();
        assert!(c.next());
        assert_eq!(c.index(), 1);

        let mut c = carousel(4, 3);
        assert!(c.prev());
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn test_single_position_stays_put() {
        let mut c = carousel(2, 4);
        c.next();
        assert_eq!(c.index(), 0);
        c.prev();
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn test_view_wrap_starts_from_the_far_end() {
        let mut view = CarouselView::new();
        view.first_card_width = Some(150.0);
        view.carousel.set_layout(5, 3);
        view.max_offset = 324.0;
        view.offset = 324.0;
        view.carousel.index = 2;

        view.next(10.0);
        let animation = view.animation.unwrap();
        assert_eq!(animation.from, 0.0);
        assert_eq!(animation.to, 162.0);

        view.carousel.index = 0;
        view.offset = 0.0;
        view.prev(20.0);
        let animation = view.animation.unwrap();
        assert_eq!(animation.from, 324.0);
        assert_eq!(animation.to, 162.0);
    }

    #[test]
    fn test_layout_change_clamps_index() {
        let mut c = carousel(10, 2);
        for _ in 0..8 {
            c.next();
        }
        assert_eq!(c.index(), 8);

        c.set_layout(4, 2);
        assert_eq!(c.index(), 2);
        c.set_layout(0, 2);
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn test_target_offset_is_clamped() {
        let mut c = carousel(6, 1);
        for _ in 0..5 {
            c.next();
        }
        assert_eq!(c.target_offset(100.0, 420.0), 420.0);
        assert_eq!(c.target_offset(100.0, -5.0), 0.0);
    }

    #[test]
    fn test_visible_cards() {
        assert_eq!(visible_cards(0.0, 162.0), 1);
        assert_eq!(visible_cards(474.0, 162.0), 3);
        assert_eq!(visible_cards(500.0, 0.0), 1);
    }

    #[test]
    fn test_animation_reaches_target() {
        let animation = ScrollAnimation { from: 0.0, to: 320.0, started_at: 10.0 };
        let (start, done) = animation.sample(10.0);
        assert_eq!(start, 0.0);
        assert!(!done);

        let (end, done) = animation.sample(10.0 + SCROLL_SECONDS);
        assert_eq!(end, 320.0);
        assert!(done);
    }
}
