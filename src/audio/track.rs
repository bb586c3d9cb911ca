use serde::{Deserialize, Serialize};

/// Snapshot of a track as the host reports it. The filter only ever reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    #[serde(default)]
    pub artists: Vec<String>,
}

impl Track {
    pub fn new(title: impl Into<String>, artists: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            title: title.into(),
            artists: artists.into_iter().map(Into::into).collect(),
        }
    }

    /// Artist list as one string, joined with ", " in the order the host gave us.
    /// Artist rules are matched against this form.
    pub fn joined_artists(&self) -> String {
        self.artists.join(", ")
    }

    pub fn display_artist(&self) -> String {
        if self.artists.is_empty() {
            "Unknown Artist".to_string()
        } else {
            self.joined_artists()
        }
    }
}
