pub mod backend;
pub mod error;
pub mod models;
