// src/strings.rs
pub const PODCASTS: &str = "Podcasts";
pub const BACK: &str = "Back";
pub const FAVOURITE: &str = "Favourite";
pub const FAVOURITED: &str = "Favourited";

pub const LOADING: &str = "Loading podcasts";
pub const NO_PODCASTS: &str = "No podcasts available";
pub const LOAD_FAILED: &str = "Failed to load podcasts";
pub const NO_ARTWORK: &str = "No artwork";
pub const NO_DESCRIPTION: &str = "No description available.";

pub const LIST_HINT: &str = "[↑/↓] Navigate | [Enter/Click] Details | [R] Refresh | [Q] Quit";
pub const DETAILS_HINT: &str = "[Esc/B] Back | [F/Space] Favourite | [↑/↓/PgUp/PgDn] Scroll | [Q] Quit";
pub const RETRY_HINT: &str = "Press R to retry";
