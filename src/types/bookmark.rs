use serde::{Deserialize, Serialize};

use crate::types::simulation::{PartSnapshot, VesselSnapshot};

/// Discriminant distinguishing a whole-vessel bookmark from a
/// sub-component bookmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookmarkKind {
    CommandModule,
    Vessel,
}

impl BookmarkKind {
    /// Wire string used in the persisted node tree.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookmarkKind::CommandModule => "CommandModule",
            BookmarkKind::Vessel => "Vessel",
        }
    }

    /// Parses a persisted kind string. Unknown values yield `None`.
    pub fn parse(s: &str) -> Option<BookmarkKind> {
        match s {
            "CommandModule" => Some(BookmarkKind::CommandModule),
            "Vessel" => Some(BookmarkKind::Vessel),
            _ => None,
        }
    }

    /// Both kinds, in the fixed order used for cross-kind enumeration.
    pub const ALL: [BookmarkKind; 2] = [BookmarkKind::CommandModule, BookmarkKind::Vessel];
}

impl std::fmt::Display for BookmarkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a bookmark points at. The variant determines the bookmark's kind,
/// so a kind/payload mismatch is unrepresentable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BookmarkTarget {
    /// The bookmark id is the vessel's persistent id.
    Vessel,
    /// The bookmark id is the flight id of a command module part; the
    /// owning vessel is re-located on every refresh.
    CommandModule {
        component_flight_id: u32,
        component_name: String,
        component_type: String,
    },
}

/// Display fields recomputed on refresh and persisted for continuity while
/// the owning vessel is not loaded. `vessel_id == 0` means unresolved; the
/// other fields then hold their last-known-good values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VesselCache {
    pub display_title: String,
    pub display_vessel_type: String,
    pub vessel_id: u32,
    pub vessel_name: String,
    pub vessel_type: String,
    pub vessel_body_name: String,
    pub vessel_situation: String,
    pub vessel_situation_label: String,
    pub has_alarm: bool,
}

/// A persisted pointer to a simulation entity, plus user comment and
/// display order among bookmarks of the same kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    /// Identity value; vessel persistent id or component flight id
    /// depending on the target variant. Immutable after construction.
    pub id: u32,
    /// User-editable free text.
    pub comment: String,
    /// Zero-based contiguous rank within the owning registry. Mutated only
    /// by the registry's ordering operations.
    pub order: u32,
    /// Simulation clock value at creation.
    pub creation_time: f64,
    pub target: BookmarkTarget,
    pub cache: VesselCache,
}

impl Bookmark {
    /// The kind implied by the target variant.
    pub fn kind(&self) -> BookmarkKind {
        match self.target {
            BookmarkTarget::Vessel => BookmarkKind::Vessel,
            BookmarkTarget::CommandModule { .. } => BookmarkKind::CommandModule,
        }
    }

    /// Whether the owning vessel was located on the last refresh.
    pub fn is_resolved(&self) -> bool {
        self.cache.vessel_id != 0
    }

    /// Creates a bookmark for a whole vessel. Cache fields are filled by
    /// the first refresh, which the registry runs on insertion.
    pub fn for_vessel(vessel: &VesselSnapshot, now: f64) -> Self {
        Self {
            id: vessel.persistent_id,
            comment: String::new(),
            order: 0,
            creation_time: now,
            target: BookmarkTarget::Vessel,
            cache: VesselCache::default(),
        }
    }

    /// Creates a bookmark for a command module part. The owning vessel is
    /// not recorded in the target; refresh re-locates it, so the bookmark
    /// follows the part through docking and undocking.
    pub fn for_command_module(part: &PartSnapshot, now: f64) -> Self {
        Self {
            id: part.flight_id,
            comment: String::new(),
            order: 0,
            creation_time: now,
            target: BookmarkTarget::CommandModule {
                component_flight_id: part.flight_id,
                component_name: part.name.clone(),
                component_type: part.part_type.clone(),
            },
            cache: VesselCache::default(),
        }
    }

    /// Reconstructs a bookmark from persisted parts. Used by the codec.
    pub fn from_parts(
        id: u32,
        comment: String,
        order: u32,
        creation_time: f64,
        target: BookmarkTarget,
        cache: VesselCache,
    ) -> Self {
        Self {
            id,
            comment,
            order,
            creation_time,
            target,
            cache,
        }
    }
}
