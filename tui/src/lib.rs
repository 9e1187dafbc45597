//! Terminal front end: reads keys, drives a [`Game`](minesweeper_engine::Game)
//! and redraws it after every command.

pub mod app;
pub mod config;
pub mod input;
pub mod logging;
pub mod render;
pub mod session;
pub mod signals;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
