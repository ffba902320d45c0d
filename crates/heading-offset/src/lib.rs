//! Heading Offset
//!
//! Computes the effective level of `h1`–`h6` elements from the
//! `headingoffset` and `headingreset` attributes of their composed-tree
//! ancestors, and keeps `aria-level` in sync as the tree mutates.
//!
//! Features:
//! - Offset resolution across shadow roots and slot assignment
//! - Explicit (`headingreset`) and implicit (topmost modal dialog) boundaries
//! - `aria-level` synchronization that yields to author-set values
//! - Typed reflection of `headingoffset` / `headingreset`

pub mod config;
pub mod heading;
pub mod reflect;
pub mod resolve;
pub mod sync;

pub use config::SyncConfig;
pub use heading::{intrinsic_level, is_heading, ARIA_LEVEL, HEADING_OFFSET, HEADING_RESET, MAX_LEVEL};
pub use reflect::HeadingAttributes;
pub use resolve::{composed_parent, is_offset_boundary, resolve_offset};
pub use sync::{composed_headings, HeadingSync};

use heading_dom::{DomError, NodeId};

/// Heading offset error
#[derive(Debug, thiserror::Error)]
pub enum HeadingError {
    #[error("DOM operation failed: {0}")]
    Dom(#[from] DomError),

    #[error("Node {0:?} is not a document or shadow root")]
    NotATreeScope(NodeId),
}
