// src/event.rs
use crate::podcast::Podcast;

/// What a screen asks the app shell to do in response to input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// An accepted tap on a list card. Carries the podcast by value.
    ShowDetails(Podcast),
    Back,
    Quit,
}
