//! Bookmark refresh resolution.
//!
//! Stateless re-resolution of a bookmark against the current simulation
//! snapshot. Locating the owning vessel recomputes every cached display
//! field; failing to locate it is a soft failure that keeps the last
//! cached values so the bookmark stays useful (greyed out) until the
//! vessel streams back in.

use log::warn;

use crate::types::bookmark::{Bookmark, BookmarkTarget};
use crate::types::simulation::{SimSnapshot, VesselSnapshot};

/// Re-resolves a bookmark in place.
///
/// Returns `true` if the owning vessel was located, `false` otherwise.
/// On failure only `vessel_id` is zeroed; every other cached field retains
/// its last-known-good value.
pub fn refresh(bookmark: &mut Bookmark, sim: &SimSnapshot) -> bool {
    let component_flight_id = match &bookmark.target {
        BookmarkTarget::Vessel => None,
        BookmarkTarget::CommandModule {
            component_flight_id, ..
        } => Some(*component_flight_id),
    };

    match component_flight_id {
        None => refresh_vessel(bookmark, sim),
        Some(flight_id) => refresh_command_module(bookmark, flight_id, sim),
    }
}

/// Whole-vessel bookmark: the bookmark id is the vessel persistent id.
fn refresh_vessel(bookmark: &mut Bookmark, sim: &SimSnapshot) -> bool {
    match sim.find_vessel(bookmark.id) {
        Some(vessel) => {
            apply_vessel_cache(bookmark, vessel, sim);
            bookmark.cache.display_title = vessel.name.clone();
            true
        }
        None => {
            warn!(
                "Vessel bookmark {} unresolved: vessel not among loaded or unloaded vessels",
                bookmark.id
            );
            bookmark.cache.vessel_id = 0;
            false
        }
    }
}

/// Command module bookmark: search loaded then unloaded vessels for the
/// part, then read the owning vessel. The owning vessel can change over
/// the bookmark's lifetime (docking, undocking), which is why it is never
/// stored as identity.
fn refresh_command_module(bookmark: &mut Bookmark, flight_id: u32, sim: &SimSnapshot) -> bool {
    match sim.find_part(flight_id) {
        Some((vessel, part)) => {
            let part_name = part.name.clone();
            let part_type = part.part_type.clone();
            apply_vessel_cache(bookmark, vessel, sim);
            if let BookmarkTarget::CommandModule {
                component_name,
                component_type,
                ..
            } = &mut bookmark.target
            {
                *component_name = part_name.clone();
                *component_type = part_type;
            }
            bookmark.cache.display_title = part_name;
            true
        }
        None => {
            warn!(
                "Command module bookmark {} unresolved: part {} not found on any vessel",
                bookmark.id, flight_id
            );
            bookmark.cache.vessel_id = 0;
            false
        }
    }
}

/// Recomputes the vessel-derived cache fields from a located vessel.
fn apply_vessel_cache(bookmark: &mut Bookmark, vessel: &VesselSnapshot, sim: &SimSnapshot) {
    let cache = &mut bookmark.cache;
    cache.vessel_id = vessel.persistent_id;
    cache.vessel_name = vessel.name.clone();
    cache.vessel_type = vessel.vessel_type.clone();
    cache.display_vessel_type = vessel.vessel_type.clone();
    cache.vessel_body_name = vessel.body_name.clone();
    cache.vessel_situation = vessel.situation.as_str().to_string();
    cache.vessel_situation_label = vessel.situation.label(&vessel.body_name);
    cache.has_alarm = sim.vessel_has_alarm(vessel.persistent_id);
}
