//! Heading elements and the attributes involved in level computation

use heading_dom::{DomTree, NodeId};

/// Offset-bearing attribute
pub const HEADING_OFFSET: &str = "headingoffset";

/// Explicit boundary attribute
pub const HEADING_RESET: &str = "headingreset";

/// Derived level attribute
pub const ARIA_LEVEL: &str = "aria-level";

/// Highest representable heading level
pub const MAX_LEVEL: u8 = 9;

/// Level implied by the tag name of an `h1`–`h6` element
pub fn intrinsic_level(tree: &DomTree, id: NodeId) -> Option<u8> {
    match tree.tag_name(id)?.as_bytes() {
        [b'h', digit @ b'1'..=b'6'] => Some(digit - b'0'),
        _ => None,
    }
}

/// Whether `id` is an `h1`–`h6` element
pub fn is_heading(tree: &DomTree, id: NodeId) -> bool {
    intrinsic_level(tree, id).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intrinsic_level() {
        let mut tree = DomTree::new();
        let h1 = tree.create_element("h1");
        let h6 = tree.create_element("H6");
        let h7 = tree.create_element("h7");
        let header = tree.create_element("header");
        let text = tree.create_text("h2");

        assert_eq!(intrinsic_level(&tree, h1), Some(1));
        assert_eq!(intrinsic_level(&tree, h6), Some(6));
        assert_eq!(intrinsic_level(&tree, h7), None);
        assert_eq!(intrinsic_level(&tree, header), None);
        assert_eq!(intrinsic_level(&tree, text), None);
        assert!(is_heading(&tree, h1));
    }
}
