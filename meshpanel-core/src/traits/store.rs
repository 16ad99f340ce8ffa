//! Preferences store

use crate::config::NodePrefs;

/// Owner of the persisted node preferences
pub trait PrefsStore {
    fn prefs(&self) -> &NodePrefs;

    fn prefs_mut(&mut self) -> &mut NodePrefs;

    /// Persist the current preferences
    fn save(&mut self);
}
