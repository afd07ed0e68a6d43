// A simple ui action queue so panels only need shared references to app state
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    // Quiz
    NextQuestion,
    CheckAnswer,
    SaveCurrentVerb,
    SetCountdown(u32),

    // Level filter
    SetLevel { level: String, selected: bool },
    SetAllLevels(bool),

    // Saved verbs
    Practice(String),
    CarouselNext,
    CarouselPrev,
    ShowListing,
    ExportListing,

    // Modals
    OpenSettings,
}

pub struct ActionQueue {
    actions: Vec<UiAction>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self { actions: Vec::new() }
    }

    pub fn push(&mut self, action: UiAction) {
        self.actions.push(action);
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, UiAction> {
        self.actions.drain(..)
    }
}

impl Default for ActionQueue {
    fn default() -> Self {
        Self::new()
    }
}
