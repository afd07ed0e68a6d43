pub mod bookmarks;
pub mod core;
pub mod dataset;
pub mod gui;
pub mod persistence;
pub mod quiz;
