//! Heading HTML Parser
//!
//! HTML5 parsing built on html5ever, producing `heading-dom` trees.
//! Declarative shadow roots (`<template shadowrootmode>`) are attached to
//! their parent element.

mod parser;

pub use parser::HtmlParser;

use heading_dom::{DomError, DomTree, NodeId};

/// Parse an HTML document
pub fn parse(html: &str) -> Result<DomTree, ParseError> {
    HtmlParser::new().parse(html)
}

/// Parse body content into detached nodes owned by `tree`
pub fn parse_fragment(tree: &mut DomTree, html: &str) -> Result<Vec<NodeId>, ParseError> {
    HtmlParser::new().parse_fragment(tree, html)
}

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Failed to read HTML input: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to build DOM: {0}")]
    Dom(#[from] DomError),
}
