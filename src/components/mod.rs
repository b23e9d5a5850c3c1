pub mod command_log;
pub mod control_panel;
pub mod error_banner;
pub mod footer;
pub mod header;
pub mod modals;
