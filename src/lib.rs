pub mod api;
pub mod app;
pub mod banner;
pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod dom;
pub mod enhance;
pub mod forms;
pub mod list;
pub mod modal;
pub mod models;
pub mod output;
pub mod storage;
pub mod validation;

#[cfg(test)]
mod tests;
