//! Registry store: the collaborator-facing bookmark surface.
//!
//! Owns one [`BookmarkRegistry`] per kind (created lazily on first
//! mutation) and the change-notification observer list shared by all
//! kinds. Every failure is absorbed here into a boolean result plus a log
//! line with kind and id context; callers never see a raised error.

use std::collections::HashMap;

use log::{debug, warn};

use crate::managers::bookmark_registry::BookmarkRegistry;
use crate::persistence::codec;
use crate::persistence::save_node::SaveNode;
use crate::types::bookmark::{Bookmark, BookmarkKind};
use crate::types::errors::RegistryError;
use crate::types::simulation::SimSnapshot;

/// Bookmark operations consumed by the host's UI/event layer.
///
/// State-affecting operations fire one payload-free change notification
/// after the store is fully consistent; listeners re-pull [`all`](Self::all).
pub trait BookmarkStore {
    fn add(&mut self, bookmark: Bookmark, sim: &SimSnapshot) -> bool;
    fn remove(&mut self, kind: BookmarkKind, id: u32) -> bool;
    fn move_up(&mut self, kind: BookmarkKind, id: u32) -> bool;
    fn move_down(&mut self, kind: BookmarkKind, id: u32) -> bool;
    fn set_comment(&mut self, kind: BookmarkKind, id: u32, comment: &str) -> bool;
    fn has(&self, kind: BookmarkKind, id: u32) -> bool;
    fn get(&self, kind: BookmarkKind, id: u32) -> Option<&Bookmark>;
    /// Read-only snapshot across kinds, each kind in display order.
    fn all(&self) -> Vec<&Bookmark>;
    fn refresh_one(&mut self, kind: BookmarkKind, id: u32, sim: &SimSnapshot) -> bool;
    fn refresh_all(&mut self, sim: &SimSnapshot);
    fn load(&mut self, root: &SaveNode, sim: &SimSnapshot);
    fn save(&self, root: &mut SaveNode);
}

pub struct RegistryStore {
    registries: HashMap<BookmarkKind, BookmarkRegistry>,
    listeners: Vec<Box<dyn Fn()>>,
}

impl RegistryStore {
    pub fn new() -> Self {
        Self {
            registries: HashMap::new(),
            listeners: Vec::new(),
        }
    }

    /// Registers a change listener. Listeners are invoked synchronously,
    /// strictly after the store's collections and order numbering are
    /// consistent, and carry no payload.
    pub fn subscribe(&mut self, listener: impl Fn() + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// The registry for a kind, if one has been created. Lookup alone
    /// never creates a registry.
    pub fn registry(&self, kind: BookmarkKind) -> Option<&BookmarkRegistry> {
        self.registries.get(&kind)
    }

    fn registry_mut(&mut self, kind: BookmarkKind) -> &mut BookmarkRegistry {
        self.registries
            .entry(kind)
            .or_insert_with(|| BookmarkRegistry::new(kind))
    }

    fn notify(&self) {
        for listener in &self.listeners {
            listener();
        }
    }

    /// Boundary no-ops are expected during normal use and log quietly;
    /// everything else is a real rejection.
    fn log_rejection(operation: &str, kind: BookmarkKind, err: &RegistryError) {
        match err {
            RegistryError::AtBoundary(_) => {
                debug!("{} rejected for {} bookmark: {}", operation, kind, err)
            }
            _ => warn!("{} rejected for {} bookmark: {}", operation, kind, err),
        }
    }
}

impl Default for RegistryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BookmarkStore for RegistryStore {
    fn add(&mut self, bookmark: Bookmark, sim: &SimSnapshot) -> bool {
        let kind = bookmark.kind();
        match self.registry_mut(kind).add(bookmark, sim) {
            Ok(()) => {
                self.notify();
                true
            }
            Err(err) => {
                Self::log_rejection("add", kind, &err);
                false
            }
        }
    }

    fn remove(&mut self, kind: BookmarkKind, id: u32) -> bool {
        match self.registry_mut(kind).remove(id) {
            Ok(()) => {
                self.notify();
                true
            }
            Err(err) => {
                Self::log_rejection("remove", kind, &err);
                false
            }
        }
    }

    fn move_up(&mut self, kind: BookmarkKind, id: u32) -> bool {
        match self.registry_mut(kind).move_up(id) {
            Ok(()) => {
                self.notify();
                true
            }
            Err(err) => {
                Self::log_rejection("move_up", kind, &err);
                false
            }
        }
    }

    fn move_down(&mut self, kind: BookmarkKind, id: u32) -> bool {
        match self.registry_mut(kind).move_down(id) {
            Ok(()) => {
                self.notify();
                true
            }
            Err(err) => {
                Self::log_rejection("move_down", kind, &err);
                false
            }
        }
    }

    fn set_comment(&mut self, kind: BookmarkKind, id: u32, comment: &str) -> bool {
        match self.registry_mut(kind).set_comment(id, comment) {
            Ok(()) => {
                self.notify();
                true
            }
            Err(err) => {
                Self::log_rejection("set_comment", kind, &err);
                false
            }
        }
    }

    fn has(&self, kind: BookmarkKind, id: u32) -> bool {
        self.registries
            .get(&kind)
            .map(|r| r.has(id))
            .unwrap_or(false)
    }

    fn get(&self, kind: BookmarkKind, id: u32) -> Option<&Bookmark> {
        self.registries.get(&kind).and_then(|r| r.get(id))
    }

    fn all(&self) -> Vec<&Bookmark> {
        let mut snapshot = Vec::new();
        for kind in BookmarkKind::ALL {
            if let Some(registry) = self.registries.get(&kind) {
                snapshot.extend(registry.iter());
            }
        }
        snapshot
    }

    fn refresh_one(&mut self, kind: BookmarkKind, id: u32, sim: &SimSnapshot) -> bool {
        match self.registries.get_mut(&kind).map(|r| r.refresh_one(id, sim)) {
            Some(Ok(resolved)) => {
                self.notify();
                resolved
            }
            Some(Err(err)) => {
                Self::log_rejection("refresh_one", kind, &err);
                false
            }
            None => {
                debug!("refresh_one for {} bookmark {}: no registry", kind, id);
                false
            }
        }
    }

    /// Re-resolves every bookmark of every kind. Soft failures keep their
    /// entries; one notification fires at the end.
    fn refresh_all(&mut self, sim: &SimSnapshot) {
        for registry in self.registries.values_mut() {
            let unresolved = registry.refresh_all(sim);
            if unresolved > 0 {
                debug!(
                    "{} of {} {} bookmarks unresolved after refresh",
                    unresolved,
                    registry.len(),
                    registry.kind()
                );
            }
        }
        self.notify();
    }

    /// Replaces the store contents with the bookmarks persisted under
    /// `root`, preserving per-kind persisted order, then fires a single
    /// aggregate notification.
    fn load(&mut self, root: &SaveNode, sim: &SimSnapshot) {
        self.registries.clear();
        let decoded = codec::decode_all(root, sim.universal_time);
        let (command_modules, vessels): (Vec<Bookmark>, Vec<Bookmark>) = decoded
            .into_iter()
            .partition(|b| b.kind() == BookmarkKind::CommandModule);

        self.registry_mut(BookmarkKind::CommandModule)
            .load(command_modules, sim);
        self.registry_mut(BookmarkKind::Vessel).load(vessels, sim);
        self.notify();
    }

    /// Encodes every bookmark under `root`, kind by kind in display order,
    /// replacing any previously written container.
    fn save(&self, root: &mut SaveNode) {
        codec::encode_all(root, self.all());
    }
}
