pub mod api;
pub mod command;
