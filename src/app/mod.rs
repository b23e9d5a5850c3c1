pub mod action;
pub mod command;
pub mod features;
pub mod input;
pub mod keymap;
pub mod r#loop;
pub mod recovery;
pub mod reducer;
pub mod state;
pub mod ui;
