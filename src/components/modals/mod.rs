pub mod command_input;
pub mod help;
pub mod helpers;
