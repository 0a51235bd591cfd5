//! Bookmark persistence codec.
//!
//! Converts bookmarks to and from [`SaveNode`] subtrees. Mandatory identity
//! fields (`id`, `kind`) are strict; everything else defaults when absent so
//! older or partially written saves still load. Encoding writes every field
//! unconditionally so an encode/decode cycle reproduces the bookmark
//! exactly, cached display fields included.

use std::str::FromStr;

use log::{debug, warn};

use crate::persistence::save_node::SaveNode;
use crate::types::bookmark::{Bookmark, BookmarkKind, BookmarkTarget, VesselCache};
use crate::types::errors::DecodeError;

/// Container node holding every bookmark item node, both kinds mixed.
pub const CONTAINER_NODE: &str = "VESSEL_BOOKMARKS";
/// Item node name, one per bookmark.
pub const BOOKMARK_NODE: &str = "BOOKMARK";

mod field {
    pub const ID: &str = "id";
    pub const KIND: &str = "kind";
    pub const COMMENT: &str = "comment";
    pub const ORDER: &str = "order";
    pub const CREATION_TIME: &str = "creationTime";
    pub const DISPLAY_TITLE: &str = "displayTitle";
    pub const DISPLAY_VESSEL_TYPE: &str = "displayVesselType";
    pub const VESSEL_ID: &str = "vesselId";
    pub const VESSEL_NAME: &str = "vesselName";
    pub const VESSEL_TYPE: &str = "vesselType";
    pub const VESSEL_BODY_NAME: &str = "vesselBodyName";
    pub const VESSEL_SITUATION: &str = "vesselSituation";
    pub const VESSEL_SITUATION_LABEL: &str = "vesselSituationLabel";
    pub const HAS_ALARM: &str = "hasAlarm";
    pub const COMPONENT_FLIGHT_ID: &str = "componentFlightId";
    pub const COMPONENT_NAME: &str = "componentName";
    pub const COMPONENT_TYPE: &str = "componentType";
}

/// Reads a mandatory parsed field; absence or a parse failure is an error.
fn required<T: FromStr>(node: &SaveNode, name: &'static str) -> Result<T, DecodeError> {
    let raw = node.value(name).ok_or(DecodeError::MissingField(name))?;
    raw.parse().map_err(|_| DecodeError::InvalidValue {
        field: name,
        value: raw.to_string(),
    })
}

/// Reads an optional parsed field; absence or a parse failure yields the default.
fn parsed_or<T: FromStr>(node: &SaveNode, name: &str, default: T) -> T {
    node.value(name)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default)
}

/// Reads an optional string field, defaulting to empty.
fn string_or_empty(node: &SaveNode, name: &str) -> String {
    node.value(name).unwrap_or("").to_string()
}

/// Reads an optional boolean persisted as "True"/"False".
fn bool_or_false(node: &SaveNode, name: &str) -> bool {
    node.value(name)
        .map(|raw| raw.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// Decodes one bookmark item node.
///
/// `default_creation_time` stands in for an absent `creationTime`, and is
/// expected to be the current simulation clock value.
pub fn decode_bookmark(node: &SaveNode, default_creation_time: f64) -> Result<Bookmark, DecodeError> {
    let id: u32 = required(node, field::ID)?;
    let kind_raw = node.value(field::KIND).ok_or(DecodeError::MissingField(field::KIND))?;
    let kind = BookmarkKind::parse(kind_raw)
        .ok_or_else(|| DecodeError::UnknownKind(kind_raw.to_string()))?;

    let target = match kind {
        BookmarkKind::Vessel => BookmarkTarget::Vessel,
        BookmarkKind::CommandModule => BookmarkTarget::CommandModule {
            // The component flight id mirrors the bookmark id; older saves
            // omit the explicit field.
            component_flight_id: parsed_or(node, field::COMPONENT_FLIGHT_ID, id),
            component_name: string_or_empty(node, field::COMPONENT_NAME),
            component_type: string_or_empty(node, field::COMPONENT_TYPE),
        },
    };

    let cache = VesselCache {
        display_title: string_or_empty(node, field::DISPLAY_TITLE),
        display_vessel_type: string_or_empty(node, field::DISPLAY_VESSEL_TYPE),
        vessel_id: parsed_or(node, field::VESSEL_ID, 0),
        vessel_name: string_or_empty(node, field::VESSEL_NAME),
        vessel_type: string_or_empty(node, field::VESSEL_TYPE),
        vessel_body_name: string_or_empty(node, field::VESSEL_BODY_NAME),
        vessel_situation: string_or_empty(node, field::VESSEL_SITUATION),
        vessel_situation_label: string_or_empty(node, field::VESSEL_SITUATION_LABEL),
        has_alarm: bool_or_false(node, field::HAS_ALARM),
    };

    Ok(Bookmark::from_parts(
        id,
        string_or_empty(node, field::COMMENT),
        parsed_or(node, field::ORDER, 0),
        parsed_or(node, field::CREATION_TIME, default_creation_time),
        target,
        cache,
    ))
}

/// Encodes one bookmark as an item node. Every field is written, even when
/// empty or default, so round-tripping is lossless.
pub fn encode_bookmark(bookmark: &Bookmark) -> SaveNode {
    let mut node = SaveNode::new(BOOKMARK_NODE);
    node.set_value(field::ID, bookmark.id.to_string());
    node.set_value(field::KIND, bookmark.kind().as_str());
    node.set_value(field::COMMENT, bookmark.comment.clone());
    node.set_value(field::ORDER, bookmark.order.to_string());
    node.set_value(field::CREATION_TIME, bookmark.creation_time.to_string());

    let cache = &bookmark.cache;
    node.set_value(field::DISPLAY_TITLE, cache.display_title.clone());
    node.set_value(field::DISPLAY_VESSEL_TYPE, cache.display_vessel_type.clone());
    node.set_value(field::VESSEL_ID, cache.vessel_id.to_string());
    node.set_value(field::VESSEL_NAME, cache.vessel_name.clone());
    node.set_value(field::VESSEL_TYPE, cache.vessel_type.clone());
    node.set_value(field::VESSEL_BODY_NAME, cache.vessel_body_name.clone());
    node.set_value(field::VESSEL_SITUATION, cache.vessel_situation.clone());
    node.set_value(field::VESSEL_SITUATION_LABEL, cache.vessel_situation_label.clone());
    node.set_value(field::HAS_ALARM, bool_str(cache.has_alarm));

    if let BookmarkTarget::CommandModule {
        component_flight_id,
        component_name,
        component_type,
    } = &bookmark.target
    {
        node.set_value(field::COMPONENT_FLIGHT_ID, component_flight_id.to_string());
        node.set_value(field::COMPONENT_NAME, component_name.clone());
        node.set_value(field::COMPONENT_TYPE, component_type.clone());
    }

    node
}

/// Decodes every bookmark under the container node. A missing container
/// means a fresh save with no bookmarks yet; individually malformed item
/// nodes are logged and skipped.
pub fn decode_all(root: &SaveNode, default_creation_time: f64) -> Vec<Bookmark> {
    let container = match root.child(CONTAINER_NODE) {
        Some(container) => container,
        None => {
            debug!("No {} node in save; starting empty", CONTAINER_NODE);
            return Vec::new();
        }
    };

    let mut bookmarks = Vec::new();
    for item in container.children_named(BOOKMARK_NODE) {
        match decode_bookmark(item, default_creation_time) {
            Ok(bookmark) => bookmarks.push(bookmark),
            Err(err) => warn!("Skipping persisted bookmark: {}", err),
        }
    }
    bookmarks
}

/// Replaces the container node under `root` with a freshly encoded one.
/// Bookmarks are written in iteration order; the caller presents them
/// sorted if storage order matters.
pub fn encode_all<'a>(root: &mut SaveNode, bookmarks: impl IntoIterator<Item = &'a Bookmark>) {
    root.remove_children(CONTAINER_NODE);
    let container = root.add_child(SaveNode::new(CONTAINER_NODE));
    for bookmark in bookmarks {
        container.add_child(encode_bookmark(bookmark));
    }
}
