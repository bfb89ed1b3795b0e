//! Query-string parameters shared by the JSON API and the dashboard.

use serde::Deserialize;

use avdash_domain::roster::{RosterQuery, View};

/// `?tab=…&q=…`: the active tab and the search box.
#[derive(Debug, Default, Deserialize)]
pub struct RosterParams {
    #[serde(default)]
    pub tab: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
}

impl RosterParams {
    #[must_use]
    pub fn view(&self) -> View {
        self.tab.as_deref().map_or(View::All, View::from_key)
    }

    /// Search text exactly as typed.
    #[must_use]
    pub fn search(&self) -> &str {
        self.q.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn to_query(&self) -> RosterQuery {
        RosterQuery::new(self.view(), self.search())
    }
}
