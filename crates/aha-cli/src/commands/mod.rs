pub mod add;
pub mod common;
pub mod completions;
pub mod config;
pub mod delete;
pub mod details;
pub mod export;
pub mod import;
pub mod list;
pub mod reset;
pub mod search;
pub mod settings;
pub mod show;
