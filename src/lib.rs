// src/lib.rs
pub mod app;
pub mod config;
pub mod debounce;
pub mod errors;
pub mod event;
pub mod logging;
pub mod navigation;
pub mod podcast;
pub mod podcast_repository;
pub mod screens;
pub mod strings;
pub mod text;
pub mod theme;
pub mod view_model;
pub mod widgets;

#[cfg(test)]
mod test_support;
