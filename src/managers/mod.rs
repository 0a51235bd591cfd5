// Vesselmarks state managers
// The per-kind bookmark registry and the cross-kind store facade.

pub mod bookmark_registry;
pub mod registry_store;
