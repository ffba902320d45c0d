//! Offset Resolution
//!
//! Walks the composed-tree ancestor chain of a heading and sums the
//! `headingoffset` values found, stopping at the first boundary.

use crate::heading::HEADING_RESET;
use crate::reflect::heading_offset;
use heading_dom::{DomTree, NodeId};

/// Whether `element` stops offset accumulation.
///
/// Explicit boundaries carry `headingreset`. A `<dialog>` is an implicit
/// boundary while it has `open` and is the topmost entry of the top layer;
/// a dialog that was closed, or covered by a nested modal, is not.
pub fn is_offset_boundary(tree: &DomTree, element: NodeId) -> bool {
    if tree.has_attribute(element, HEADING_RESET) {
        return true;
    }
    tree.tag_name(element) == Some("dialog")
        && tree.has_attribute(element, "open")
        && tree.topmost_modal() == Some(element)
}

/// Next ancestor in the composed tree: the assigned slot, else the parent
/// element, else the host of the enclosing shadow root.
pub fn composed_parent(tree: &DomTree, node: NodeId) -> Option<NodeId> {
    tree.assigned_slot(node)
        .or_else(|| tree.parent_element(node))
        .or_else(|| tree.shadow_host(tree.root_node(node)))
}

/// Accumulated offset for `heading`, in `0..=max_offset`
pub fn resolve_offset(tree: &DomTree, heading: NodeId, max_offset: u8) -> u8 {
    let own = heading_offset(tree, heading);
    if is_offset_boundary(tree, heading) {
        return own.min(max_offset);
    }

    let mut offset = u32::from(own);
    let mut current = heading;
    while let Some(ancestor) = composed_parent(tree, current) {
        offset += u32::from(heading_offset(tree, ancestor));

        if is_offset_boundary(tree, ancestor) {
            break;
        }
        if offset >= u32::from(max_offset) {
            return max_offset;
        }
        current = ancestor;
    }

    offset.min(u32::from(max_offset)) as u8
}
