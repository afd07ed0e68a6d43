pub mod errors;
pub mod http;
pub mod models;
pub mod tasks;

pub use errors::{
    LoadError,
    VerbDrillError,
};
pub use models::{
    normalize_form,
    FormSlot,
    Verb,
};
