//! Vesselmarks — bookmark registry and resolution engine for a spaceflight
//! simulation.
//!
//! Maintains user-curated bookmarks pointing at vessels or specific command
//! module parts, keeps them in a stable user-defined order, persists them
//! inside the host's hierarchical save structure, and periodically
//! re-resolves each bookmark against the live simulation. The host's UI and
//! event layer drive this crate through [`managers::registry_store::BookmarkStore`].

pub mod managers;
pub mod persistence;
pub mod services;
pub mod types;
