//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts it to the arena tree.

use crate::ParseError;
use heading_dom::{DomTree, NodeId, ShadowRootMode};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

/// HTML5 parser
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse an HTML string into a new tree
    pub fn parse(&self, html: &str) -> Result<DomTree, ParseError> {
        let dom = Self::read(html)?;
        let mut tree = DomTree::new();
        let root = tree.root();
        self.convert_children(&dom.document, &mut tree, root)?;

        tracing::debug!("Parsed {} nodes", tree.len());
        Ok(tree)
    }

    /// Parse body content into detached nodes of an existing tree
    pub fn parse_fragment(&self, tree: &mut DomTree, html: &str) -> Result<Vec<NodeId>, ParseError> {
        let dom = Self::read(html)?;
        let Some(body) = Self::find_body(&dom.document) else {
            return Ok(Vec::new());
        };

        let mut nodes = Vec::new();
        for child in body.children.borrow().iter() {
            if let Some(id) = self.convert_node(child, tree)? {
                nodes.push(id);
            }
        }
        Ok(nodes)
    }

    fn read(html: &str) -> Result<RcDom, ParseError> {
        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())?;
        Ok(dom)
    }

    fn find_body(handle: &Handle) -> Option<Handle> {
        for child in handle.children.borrow().iter() {
            if let RcNodeData::Element { name, .. } = &child.data {
                if name.local.as_ref() == "body" {
                    return Some(child.clone());
                }
            }
            if let Some(body) = Self::find_body(child) {
                return Some(body);
            }
        }
        None
    }

    /// Convert the children of `handle` and append them to `parent`,
    /// turning declarative shadow templates into shadow roots.
    fn convert_children(&self, handle: &Handle, tree: &mut DomTree, parent: NodeId) -> Result<(), ParseError> {
        for child in handle.children.borrow().iter() {
            if self.attach_declarative_shadow(child, tree, parent)? {
                continue;
            }
            if let Some(id) = self.convert_node(child, tree)? {
                tree.append_child(parent, id)?;
            }
        }
        Ok(())
    }

    /// If `template` declares a shadow root for `host`, attach it and fill
    /// it with the template contents. Returns whether it did.
    fn attach_declarative_shadow(
        &self,
        template: &Handle,
        tree: &mut DomTree,
        host: NodeId,
    ) -> Result<bool, ParseError> {
        let RcNodeData::Element { name, attrs, template_contents, .. } = &template.data else {
            return Ok(false);
        };
        if name.local.as_ref() != "template" || !tree.is_element(host) || tree.shadow_root(host).is_some() {
            return Ok(false);
        }

        let mode = attrs
            .borrow()
            .iter()
            .find(|a| a.name.local.as_ref() == "shadowrootmode")
            .and_then(|a| ShadowRootMode::parse(&a.value));
        let Some(mode) = mode else {
            return Ok(false);
        };

        let Ok(shadow) = tree.attach_shadow(host, mode) else {
            return Ok(false);
        };
        if let Some(contents) = template_contents.borrow().as_ref() {
            self.convert_children(contents, tree, shadow)?;
        }
        Ok(true)
    }

    /// Convert an RcDom node (and its subtree) into a detached arena node
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree) -> Result<Option<NodeId>, ParseError> {
        match &handle.data {
            RcNodeData::Text { contents } => {
                let text = contents.borrow().to_string();
                if text.trim().is_empty() {
                    return Ok(None);
                }
                Ok(Some(tree.create_text(&text)))
            }
            RcNodeData::Comment { contents } => Ok(Some(tree.create_comment(contents))),
            RcNodeData::Element { name, attrs, .. } => {
                let id = tree.create_element(&name.local);
                for attr in attrs.borrow().iter() {
                    tree.set_attribute(id, &attr.name.local, &attr.value)?;
                }
                // Contents of ordinary templates stay inert
                if name.local.as_ref() != "template" {
                    self.convert_children(handle, tree, id)?;
                }
                Ok(Some(id))
            }
            RcNodeData::Document | RcNodeData::Doctype { .. } | RcNodeData::ProcessingInstruction { .. } => Ok(None),
        }
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}
