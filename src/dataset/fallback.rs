use crate::core::Verb;

/// Built-in corpus used whenever the sheet cannot be loaded.
pub fn fallback_verbs() -> Vec<Verb> {
    vec![
        Verb::new("write", "wrote", "written", &["B1"]),
        Verb::new("hit", "hit", "hit", &["A2"]),
        Verb::new("remember", "remembered", "remembered", &["A2"]),
    ]
}
