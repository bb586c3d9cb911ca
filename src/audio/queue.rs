use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::track::Track;

/// In-memory play queue - what a host player keeps as "the playlist".
/// Used by the replay host; the filter itself never owns one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayQueue {
    tracks: Vec<Track>,
    current: Option<usize>,
}

impl PlayQueue {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks, current: None }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|idx| self.tracks.get(idx))
    }

    /// Start playing the track at `index`. Returns false if it doesn't exist.
    pub fn play(&mut self, index: usize) -> bool {
        if index < self.tracks.len() {
            self.current = Some(index);
            true
        } else {
            warn!("Play request for position {} but queue has {} tracks", index, self.tracks.len());
            false
        }
    }

    /// Move to the next track. Falling off the end stops playback.
    pub fn advance(&mut self) -> Option<&Track> {
        let next = self.current.map_or(0, |idx| idx + 1);
        if next < self.tracks.len() {
            self.current = Some(next);
        } else {
            info!("Reached end of queue, stopping playback");
            self.current = None;
        }
        self.current_track()
    }

    /// Remove the track at `index`, shifting later tracks down by one.
    pub fn remove(&mut self, index: usize) -> Option<Track> {
        if index >= self.tracks.len() {
            warn!("Remove request for position {} but queue has {} tracks", index, self.tracks.len());
            return None;
        }

        let removed = self.tracks.remove(index);
        self.current = match self.current {
            Some(cur) if cur == index => (index < self.tracks.len()).then_some(index),
            Some(cur) if cur > index => Some(cur - 1),
            other => other,
        };
        info!("Removed '{}' by {} from position {}", removed.title, removed.display_artist(), index);
        Some(removed)
    }

    /// Move a track to a different position in the queue
    pub fn move_track(&mut self, from_index: usize, to_index: usize) -> bool {
        if from_index < self.tracks.len() && to_index < self.tracks.len() {
            let track = self.tracks.remove(from_index);
            self.tracks.insert(to_index, track);
            // Follow the playing track to its new slot
            self.current = match self.current {
                Some(cur) if cur == from_index => Some(to_index),
                Some(cur) if from_index < cur && cur <= to_index => Some(cur - 1),
                Some(cur) if to_index <= cur && cur < from_index => Some(cur + 1),
                other => other,
            };
            info!("Moved track from position {} to {}", from_index, to_index);
            true
        } else {
            false
        }
    }
}
