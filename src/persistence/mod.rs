// Vesselmarks persistence layer
// The save-node tree, the bookmark codec over it, and the save-text adapter.

pub mod codec;
pub mod save_node;
pub mod text;
