//! Edge case tests for heading-dom
//!
//! Rare structural scenarios: moves, shadow trees, observers across scopes.

use heading_dom::{DomError, DomTree, MutationObserverInit, MutationType, NodeId, ShadowRootMode};

fn subtree_observer(tree: &mut DomTree, target: NodeId) -> heading_dom::ObserverId {
    let observer = tree.create_observer();
    tree.observe(
        observer,
        target,
        MutationObserverInit {
            child_list: true,
            attributes: true,
            subtree: true,
            attribute_filter: None,
        },
    )
    .unwrap();
    observer
}

// ============================================================================
// STRUCTURE
// ============================================================================

#[test]
fn test_move_within_same_parent_records_removal_then_insertion() {
    let mut tree = DomTree::new();
    let a = tree.create_element("div");
    let b = tree.create_element("div");
    tree.append_child(tree.root(), a).unwrap();
    tree.append_child(tree.root(), b).unwrap();

    let observer = subtree_observer(&mut tree, NodeId::ROOT);
    tree.append_child(tree.root(), a).unwrap();

    let records = tree.take_records(observer);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].removed_nodes, vec![a]);
    assert_eq!(records[1].added_nodes, vec![a]);
    assert_eq!(records[1].previous_sibling, Some(b));
    assert_eq!(tree.children(tree.root()).collect::<Vec<_>>(), vec![b, a]);
}

#[test]
fn test_insert_before_self_is_noop_move() {
    let mut tree = DomTree::new();
    let a = tree.create_element("div");
    let b = tree.create_element("div");
    tree.append_child(tree.root(), a).unwrap();
    tree.append_child(tree.root(), b).unwrap();

    tree.insert_before(tree.root(), a, Some(a)).unwrap();
    assert_eq!(tree.children(tree.root()).collect::<Vec<_>>(), vec![a, b]);
}

#[test]
fn test_reference_must_be_child() {
    let mut tree = DomTree::new();
    let a = tree.create_element("div");
    let stray = tree.create_element("div");
    tree.append_child(tree.root(), a).unwrap();

    let child = tree.create_element("p");
    assert_eq!(
        tree.insert_before(a, child, Some(stray)),
        Err(DomError::NotAChild { parent: a, child: stray })
    );
}

#[test]
fn test_cannot_insert_host_into_own_shadow_tree() {
    let mut tree = DomTree::new();
    let host = tree.create_element("div");
    tree.append_child(tree.root(), host).unwrap();
    let shadow = tree.attach_shadow(host, ShadowRootMode::Open).unwrap();

    assert!(matches!(
        tree.append_child(shadow, host),
        Err(DomError::HierarchyRequest { .. })
    ));
}

#[test]
fn test_invalid_node_ids() {
    let mut tree = DomTree::new();
    let fake = {
        let mut other = DomTree::new();
        for _ in 0..10 {
            other.create_element("div");
        }
        other.create_element("div")
    };
    assert_eq!(tree.append_child(tree.root(), fake), Err(DomError::InvalidNode(fake)));
    assert_eq!(tree.get_attribute(fake, "id"), None);
}

#[test]
fn test_observer_from_another_tree() {
    let mut tree = DomTree::new();
    let foreign = {
        let mut other = DomTree::new();
        other.create_observer();
        other.create_observer()
    };

    assert_eq!(
        tree.observe(foreign, NodeId::ROOT, MutationObserverInit::default()),
        Err(DomError::UnknownObserver(foreign))
    );
    assert!(tree.take_records(foreign).is_empty());
    assert_eq!(tree.pending_records(foreign), 0);
    tree.discard_records_from(foreign, 0);
    tree.disconnect(foreign);
}

// ============================================================================
// OBSERVERS AND SCOPES
// ============================================================================

#[test]
fn test_document_observer_does_not_see_shadow_mutations() {
    let mut tree = DomTree::new();
    let host = tree.create_element("my-widget");
    tree.append_child(tree.root(), host).unwrap();
    let shadow = tree.attach_shadow(host, ShadowRootMode::Closed).unwrap();

    let doc_observer = subtree_observer(&mut tree, NodeId::ROOT);
    let shadow_observer = subtree_observer(&mut tree, shadow);

    let h2 = tree.create_element("h2");
    tree.append_child(shadow, h2).unwrap();
    tree.set_attribute(h2, "aria-level", "4").unwrap();

    assert!(tree.take_records(doc_observer).is_empty());
    let records = tree.take_records(shadow_observer);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].mutation_type, MutationType::ChildList);
    assert_eq!(records[1].mutation_type, MutationType::Attributes);
}

#[test]
fn test_one_record_per_observer_with_overlapping_registrations() {
    let mut tree = DomTree::new();
    let section = tree.create_element("section");
    tree.append_child(tree.root(), section).unwrap();

    let observer = subtree_observer(&mut tree, NodeId::ROOT);
    tree.observe(
        observer,
        section,
        MutationObserverInit {
            attributes: true,
            ..Default::default()
        },
    )
    .unwrap();

    tree.set_attribute(section, "headingoffset", "1").unwrap();
    assert_eq!(tree.take_records(observer).len(), 1);
}

#[test]
fn test_attribute_record_old_value() {
    let mut tree = DomTree::new();
    let h3 = tree.create_element("h3");
    tree.append_child(tree.root(), h3).unwrap();
    tree.set_attribute(h3, "aria-level", "5").unwrap();

    let observer = subtree_observer(&mut tree, NodeId::ROOT);
    tree.set_attribute(h3, "aria-level", "6").unwrap();
    tree.remove_attribute(h3, "aria-level").unwrap();

    let records = tree.take_records(observer);
    assert_eq!(records[0].old_value.as_deref(), Some("5"));
    assert_eq!(records[1].old_value.as_deref(), Some("6"));
}

#[test]
fn test_detached_subtree_mutations_are_not_observed() {
    let mut tree = DomTree::new();
    let observer = subtree_observer(&mut tree, NodeId::ROOT);

    let div = tree.create_element("div");
    let h1 = tree.create_element("h1");
    tree.append_child(div, h1).unwrap();
    tree.set_attribute(h1, "aria-level", "2").unwrap();
    assert!(tree.take_records(observer).is_empty());
}
