//! Attribute reflection for `headingoffset` and `headingreset`
//!
//! Free functions over `DomTree`, also available as methods through the
//! [`HeadingAttributes`] extension trait.

use crate::heading::{HEADING_OFFSET, HEADING_RESET, MAX_LEVEL};
use heading_dom::{DomError, DomTree, NodeId};

/// Parse a `headingoffset` value. Non-numeric and negative values are 0,
/// values above 9 are 9, fractions are truncated.
pub fn parse_offset(value: &str) -> u8 {
    let value = value.trim();
    if value.is_empty() {
        return 0;
    }
    match value.parse::<f64>() {
        Ok(n) if n > 0.0 => n.min(f64::from(MAX_LEVEL)) as u8,
        _ => 0,
    }
}

fn is_numeric(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.parse::<f64>().is_ok_and(|n| !n.is_nan())
}

/// Reflected `headingOffset`
pub fn heading_offset(tree: &DomTree, element: NodeId) -> u8 {
    tree.get_attribute(element, HEADING_OFFSET).map_or(0, parse_offset)
}

/// Set `headingOffset`; `None` removes the attribute
pub fn set_heading_offset(tree: &mut DomTree, element: NodeId, value: Option<i64>) -> Result<(), DomError> {
    match value {
        Some(n) => tree.set_attribute(element, HEADING_OFFSET, &n.to_string()),
        None => tree.remove_attribute(element, HEADING_OFFSET).map(|_| ()),
    }
}

/// Set `headingOffset` from a string: `""` removes the attribute, numeric
/// strings are written verbatim and anything else is ignored.
pub fn set_heading_offset_str(tree: &mut DomTree, element: NodeId, value: &str) -> Result<(), DomError> {
    if value.is_empty() {
        tree.remove_attribute(element, HEADING_OFFSET)?;
    } else if is_numeric(value) {
        tree.set_attribute(element, HEADING_OFFSET, value)?;
    }
    Ok(())
}

/// Reflected `headingReset`
pub fn heading_reset(tree: &DomTree, element: NodeId) -> bool {
    tree.has_attribute(element, HEADING_RESET)
}

/// Set `headingReset`
pub fn set_heading_reset(tree: &mut DomTree, element: NodeId, value: bool) -> Result<(), DomError> {
    if value {
        tree.set_attribute(element, HEADING_RESET, "")
    } else {
        tree.remove_attribute(element, HEADING_RESET).map(|_| ())
    }
}

/// `headingOffset` / `headingReset` accessors on the tree
pub trait HeadingAttributes {
    fn heading_offset(&self, element: NodeId) -> u8;

    fn set_heading_offset(&mut self, element: NodeId, value: Option<i64>) -> Result<(), DomError>;

    fn set_heading_offset_str(&mut self, element: NodeId, value: &str) -> Result<(), DomError>;

    fn heading_reset(&self, element: NodeId) -> bool;

    fn set_heading_reset(&mut self, element: NodeId, value: bool) -> Result<(), DomError>;
}

impl HeadingAttributes for DomTree {
    fn heading_offset(&self, element: NodeId) -> u8 {
        heading_offset(self, element)
    }

    fn set_heading_offset(&mut self, element: NodeId, value: Option<i64>) -> Result<(), DomError> {
        set_heading_offset(self, element, value)
    }

    fn set_heading_offset_str(&mut self, element: NodeId, value: &str) -> Result<(), DomError> {
        set_heading_offset_str(self, element, value)
    }

    fn heading_reset(&self, element: NodeId) -> bool {
        heading_reset(self, element)
    }

    fn set_heading_reset(&mut self, element: NodeId, value: bool) -> Result<(), DomError> {
        set_heading_reset(self, element, value)
    }
}
