//! Per-kind bookmark registry.
//!
//! One registry instance holds every bookmark of a single kind in a
//! user-defined order. The ordered collection and an id-set are kept in
//! lockstep; after any completed mutation the `order` fields of the
//! entries form the contiguous range `0..N-1` in display order.

use std::collections::HashSet;

use log::{debug, warn};

use crate::services::refresh_resolver;
use crate::types::bookmark::{Bookmark, BookmarkKind};
use crate::types::errors::RegistryError;
use crate::types::simulation::SimSnapshot;

pub struct BookmarkRegistry {
    kind: BookmarkKind,
    /// Display-ordered entries; `entries[i].order == i` between mutations.
    entries: Vec<Bookmark>,
    /// Membership index kept in lockstep with `entries`.
    ids: HashSet<u32>,
}

impl BookmarkRegistry {
    pub fn new(kind: BookmarkKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
            ids: HashSet::new(),
        }
    }

    pub fn kind(&self) -> BookmarkKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// O(1) membership check against the id-set.
    pub fn has(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    pub fn get(&self, id: u32) -> Option<&Bookmark> {
        self.entries.iter().find(|b| b.id == id)
    }

    /// Entries in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, Bookmark> {
        self.entries.iter()
    }

    fn index_of(&self, id: u32) -> Option<usize> {
        self.entries.iter().position(|b| b.id == id)
    }

    fn check_kind(&self, bookmark: &Bookmark) -> Result<(), RegistryError> {
        if bookmark.kind() == self.kind {
            Ok(())
        } else {
            Err(RegistryError::KindMismatch {
                expected: self.kind,
                actual: bookmark.kind(),
            })
        }
    }

    /// Reassigns `order := index` over the whole collection. Every mutating
    /// operation ends here (or appends, which is equivalent), so contiguous
    /// ordering holds whenever a public call returns.
    fn renumber(&mut self) {
        for (index, bookmark) in self.entries.iter_mut().enumerate() {
            bookmark.order = index as u32;
        }
    }

    /// Adds a freshly created bookmark at the end of the order.
    ///
    /// The bookmark is resolved against the simulation before insertion; a
    /// bookmark whose owning vessel cannot be located at creation time is
    /// invalid input and is rejected without mutating the registry. (A
    /// vessel disappearing later is tolerated by refresh instead.)
    pub fn add(&mut self, mut bookmark: Bookmark, sim: &SimSnapshot) -> Result<(), RegistryError> {
        self.check_kind(&bookmark)?;
        if self.ids.contains(&bookmark.id) {
            return Err(RegistryError::DuplicateId(bookmark.id));
        }
        bookmark.order = self.entries.len() as u32;
        if !refresh_resolver::refresh(&mut bookmark, sim) {
            return Err(RegistryError::Unresolvable(bookmark.id));
        }
        self.ids.insert(bookmark.id);
        self.entries.push(bookmark);
        self.renumber();
        Ok(())
    }

    /// Adds a bookmark reconstructed from persisted storage.
    ///
    /// Unlike [`add`](Self::add), a soft resolution failure does not reject
    /// the entry: right after a save is loaded the owning vessel may not be
    /// streamed in yet, so the entry is kept with its persisted cached
    /// display fields and an unresolved `vessel_id`.
    pub fn restore(&mut self, mut bookmark: Bookmark, sim: &SimSnapshot) -> Result<(), RegistryError> {
        self.check_kind(&bookmark)?;
        if self.ids.contains(&bookmark.id) {
            return Err(RegistryError::DuplicateId(bookmark.id));
        }
        bookmark.order = self.entries.len() as u32;
        if !refresh_resolver::refresh(&mut bookmark, sim) {
            debug!(
                "Restored {} bookmark {} unresolved; keeping cached display fields",
                self.kind, bookmark.id
            );
        }
        self.ids.insert(bookmark.id);
        self.entries.push(bookmark);
        self.renumber();
        Ok(())
    }

    /// Removes a bookmark and renumbers the remaining entries.
    pub fn remove(&mut self, id: u32) -> Result<(), RegistryError> {
        let index = self.index_of(id).ok_or(RegistryError::NotFound(id))?;
        self.entries.remove(index);
        self.ids.remove(&id);
        self.renumber();
        Ok(())
    }

    /// Moves a bookmark one position toward the front of the order.
    /// Moving the first entry is a rejected no-op.
    pub fn move_up(&mut self, id: u32) -> Result<(), RegistryError> {
        let index = self.index_of(id).ok_or(RegistryError::NotFound(id))?;
        if index == 0 {
            return Err(RegistryError::AtBoundary(id));
        }
        self.entries.swap(index - 1, index);
        self.renumber();
        Ok(())
    }

    /// Moves a bookmark one position toward the back of the order.
    /// Moving the last entry is a rejected no-op.
    pub fn move_down(&mut self, id: u32) -> Result<(), RegistryError> {
        let index = self.index_of(id).ok_or(RegistryError::NotFound(id))?;
        if index + 1 == self.entries.len() {
            return Err(RegistryError::AtBoundary(id));
        }
        self.entries.swap(index, index + 1);
        self.renumber();
        Ok(())
    }

    /// Replaces the user comment on a bookmark.
    pub fn set_comment(&mut self, id: u32, comment: &str) -> Result<(), RegistryError> {
        let index = self.index_of(id).ok_or(RegistryError::NotFound(id))?;
        self.entries[index].comment = comment.to_string();
        Ok(())
    }

    /// Re-resolves a single bookmark. Returns whether its owning vessel was
    /// located; a soft failure keeps the entry and its cached fields.
    pub fn refresh_one(&mut self, id: u32, sim: &SimSnapshot) -> Result<bool, RegistryError> {
        let index = self.index_of(id).ok_or(RegistryError::NotFound(id))?;
        Ok(refresh_resolver::refresh(&mut self.entries[index], sim))
    }

    /// Re-resolves every entry in place. Per-entry failures are logged by
    /// the resolver and skipped; refresh never removes entries and never
    /// aborts early. Returns the number of entries left unresolved.
    pub fn refresh_all(&mut self, sim: &SimSnapshot) -> usize {
        let mut unresolved = 0;
        for bookmark in &mut self.entries {
            if !refresh_resolver::refresh(bookmark, sim) {
                unresolved += 1;
            }
        }
        unresolved
    }

    /// Bulk-inserts decoded bookmarks of this registry's kind, presorted by
    /// persisted order so relative order survives even if bookmarks of
    /// different kinds historically shared order numbers. Entries that fail
    /// to insert (duplicate ids in a corrupted save) are logged and
    /// skipped. Returns the number of entries inserted.
    pub fn load(&mut self, decoded: Vec<Bookmark>, sim: &SimSnapshot) -> usize {
        let mut mine: Vec<Bookmark> = decoded
            .into_iter()
            .filter(|b| b.kind() == self.kind)
            .collect();
        mine.sort_by_key(|b| b.order);

        let mut inserted = 0;
        for bookmark in mine {
            let id = bookmark.id;
            match self.restore(bookmark, sim) {
                Ok(()) => inserted += 1,
                Err(err) => warn!("Skipping {} bookmark {} on load: {}", self.kind, id, err),
            }
        }
        inserted
    }
}
