use std::collections::HashSet;

use serde::{
    Deserialize,
    Serialize,
};

/// Trim and lowercase a verb form the same way for stored data and typed answers.
pub fn normalize_form(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// One of the three principal parts of a verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormSlot {
    Infinitive,
    PastSimple,
    PastParticiple,
}

impl FormSlot {
    pub const ALL: [FormSlot; 3] =
        [FormSlot::Infinitive, FormSlot::PastSimple, FormSlot::PastParticiple];

    pub fn index(self) -> usize {
        match self {
            FormSlot::Infinitive => 0,
            FormSlot::PastSimple => 1,
            FormSlot::PastParticiple => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Column header in the sheet, also used as the input placeholder.
    pub fn label(self) -> &'static str {
        match self {
            FormSlot::Infinitive => "Infinitive",
            FormSlot::PastSimple => "Past simple",
            FormSlot::PastParticiple => "Past participle",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verb {
    pub base: String,
    pub past: String,
    pub participle: String,
    #[serde(default)]
    pub cefr_tokens: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<String>,
}

impl Verb {
    pub fn new(base: &str, past: &str, participle: &str, levels: &[&str]) -> Self {
        Self {
            base: normalize_form(base),
            past: normalize_form(past),
            participle: normalize_form(participle),
            cefr_tokens: levels.iter().map(|l| l.trim().to_uppercase()).collect(),
            categories: None,
        }
    }

    pub fn form(&self, slot: FormSlot) -> &str {
        match slot {
            FormSlot::Infinitive => &self.base,
            FormSlot::PastSimple => &self.past,
            FormSlot::PastParticiple => &self.participle,
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.base.is_empty() && !self.past.is_empty() && !self.participle.is_empty()
    }

    pub fn has_any_level(&self, levels: &HashSet<String>) -> bool {
        self.cefr_tokens.iter().any(|token| levels.contains(token))
    }

    /// `base – past – participle`, as shown in listings.
    pub fn summary(&self) -> String {
        format!("{} – {} – {}", self.base, self.past, self.participle)
    }
}
