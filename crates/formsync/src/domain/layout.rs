//! Page layout: which element ids the bridge drives.

use serde::{Deserialize, Serialize};

pub const DEFAULT_SUBMIT_ID: &str = "mode_submit";
pub const DEFAULT_RESPONSE_ID: &str = "server_response";
pub const DEFAULT_PLAYERS_LABEL_ID: &str = "catch_colors_players_label";
pub const DEFAULT_PLAYERS_SELECT_ID: &str = "catch_colors_players_select";

/// Mode value that reveals the players controls.
pub const DEFAULT_SENTINEL: &str = "catch_colors_multiplayer";

/// Element ids making up the page contract.
///
/// `players` is absent on the basic panel, which has no auxiliary controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    pub submit_id: String,
    pub response_id: String,
    pub players: Option<PlayersGroup>,
}

/// The auxiliary label/selector pair shown only for the sentinel mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayersGroup {
    pub label_id: String,
    pub select_id: String,
    pub sentinel: String,
}

impl Default for PlayersGroup {
    fn default() -> Self {
        Self {
            label_id: DEFAULT_PLAYERS_LABEL_ID.to_string(),
            select_id: DEFAULT_PLAYERS_SELECT_ID.to_string(),
            sentinel: DEFAULT_SENTINEL.to_string(),
        }
    }
}

impl PageLayout {
    /// Panel with the players controls.
    pub fn rich() -> Self {
        Self {
            submit_id: DEFAULT_SUBMIT_ID.to_string(),
            response_id: DEFAULT_RESPONSE_ID.to_string(),
            players: Some(PlayersGroup::default()),
        }
    }

    /// Panel without auxiliary controls.
    pub fn basic() -> Self {
        Self {
            players: None,
            ..Self::rich()
        }
    }

    /// Every element id the page must provide.
    pub fn element_ids(&self) -> Vec<&str> {
        let mut ids = vec![self.submit_id.as_str(), self.response_id.as_str()];
        if let Some(players) = &self.players {
            ids.push(players.label_id.as_str());
            ids.push(players.select_id.as_str());
        }
        ids
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::rich()
    }
}

/// CSS `display` values the bridge writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Display {
    None,
    InlineBlock,
}

impl Display {
    pub fn as_css(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::InlineBlock => "inline-block",
        }
    }
}

/// CSS `visibility` values the bridge writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

impl Visibility {
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Visible => "visible",
            Self::Hidden => "hidden",
        }
    }
}
