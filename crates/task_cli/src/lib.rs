pub mod cli;
pub mod commands;
pub mod confirm;
pub mod render;
