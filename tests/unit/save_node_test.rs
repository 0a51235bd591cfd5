//! Unit tests for the SaveNode hierarchical structure.

use vesselmarks::persistence::save_node::SaveNode;

#[test]
fn test_value_returns_first_match() {
    let mut node = SaveNode::new("ROOT");
    node.push_value("key", "first");
    node.push_value("key", "second");

    assert_eq!(node.value("key"), Some("first"));
    assert_eq!(node.value("missing"), None);
}

#[test]
fn test_set_value_replaces_first_occurrence() {
    let mut node = SaveNode::new("ROOT");
    node.push_value("key", "old");
    node.push_value("other", "kept");

    node.set_value("key", "new");

    assert_eq!(node.value("key"), Some("new"));
    assert_eq!(node.value("other"), Some("kept"));
    assert_eq!(node.values().len(), 2);
}

#[test]
fn test_set_value_appends_when_absent() {
    let mut node = SaveNode::new("ROOT");
    node.set_value("key", "value");

    assert_eq!(node.value("key"), Some("value"));
    assert_eq!(node.values().len(), 1);
}

#[test]
fn test_children_named_filters_by_name() {
    let mut root = SaveNode::new("ROOT");
    root.add_child(SaveNode::new("ITEM"));
    root.add_child(SaveNode::new("OTHER"));
    root.add_child(SaveNode::new("ITEM"));

    assert_eq!(root.children_named("ITEM").count(), 2);
    assert_eq!(root.children_named("OTHER").count(), 1);
    assert_eq!(root.children_named("NONE").count(), 0);
    assert_eq!(root.child("OTHER").map(|c| c.name()), Some("OTHER"));
}

#[test]
fn test_remove_children_removes_all_with_name() {
    let mut root = SaveNode::new("ROOT");
    root.add_child(SaveNode::new("ITEM"));
    root.add_child(SaveNode::new("OTHER"));
    root.add_child(SaveNode::new("ITEM"));

    let removed = root.remove_children("ITEM");

    assert_eq!(removed, 2);
    assert_eq!(root.children().len(), 1);
    assert!(root.child("ITEM").is_none());
}

#[test]
fn test_add_child_returns_mutable_reference() {
    let mut root = SaveNode::new("ROOT");
    let child = root.add_child(SaveNode::new("CHILD"));
    child.set_value("inner", "x");

    assert_eq!(root.child("CHILD").and_then(|c| c.value("inner")), Some("x"));
}
