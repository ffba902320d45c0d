//! Shadow DOM
//!
//! Shadow roots and named slot assignment.

use crate::{DomError, DomTree, NodeId};

/// Shadow root mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadowRootMode {
    #[default]
    Open,
    Closed,
}

impl ShadowRootMode {
    /// Parse a `shadowrootmode` attribute value
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("open") {
            Some(Self::Open)
        } else if value.eq_ignore_ascii_case("closed") {
            Some(Self::Closed)
        } else {
            None
        }
    }
}

/// Data stored on a shadow root node
#[derive(Debug, Clone)]
pub struct ShadowRootData {
    pub host: NodeId,
    pub mode: ShadowRootMode,
}

/// Elements allowed to host a shadow root besides custom elements
const SHADOW_HOSTS: &[&str] = &[
    "article", "aside", "blockquote", "body", "div", "footer", "h1", "h2", "h3", "h4", "h5",
    "h6", "header", "main", "nav", "p", "section", "span",
];

fn is_valid_custom_element_name(name: &str) -> bool {
    name.contains('-') && name.starts_with(|c: char| c.is_ascii_lowercase())
}

impl DomTree {
    /// Attach a shadow root to `host`. The new root is queued for
    /// [`take_attached_shadow_roots`](Self::take_attached_shadow_roots).
    pub fn attach_shadow(&mut self, host: NodeId, mode: ShadowRootMode) -> Result<NodeId, DomError> {
        let elem = self
            .node(host)?
            .as_element()
            .ok_or(DomError::NotAnElement(host))?;
        if !SHADOW_HOSTS.contains(&elem.local_name.as_str())
            && !is_valid_custom_element_name(&elem.local_name)
        {
            return Err(DomError::NotShadowHost(elem.local_name.clone()));
        }
        if elem.shadow_root.is_valid() {
            return Err(DomError::ShadowRootExists(host));
        }

        let root = self.create_shadow_root(ShadowRootData { host, mode });
        if let Some(elem) = self.nodes[host.index()].as_element_mut() {
            elem.shadow_root = root;
        }
        self.attached_shadow_roots.push(root);
        tracing::trace!("Attached {:?} shadow root {:?} to {:?}", mode, root, host);
        Ok(root)
    }

    /// Shadow root hosted by `host`, regardless of mode
    pub fn shadow_root(&self, host: NodeId) -> Option<NodeId> {
        self.element(host)?.shadow_root.valid()
    }

    /// Host of a shadow root
    pub fn shadow_host(&self, root: NodeId) -> Option<NodeId> {
        self.get(root)?.as_shadow_root().map(|s| s.host)
    }

    /// Whether `id` is a shadow root
    pub fn is_shadow_root(&self, id: NodeId) -> bool {
        self.shadow_host(id).is_some()
    }

    /// Shadow roots attached since the previous call
    pub fn take_attached_shadow_roots(&mut self) -> Vec<NodeId> {
        std::mem::take(&mut self.attached_shadow_roots)
    }

    /// Slot `node` is assigned to: the first `<slot>` in its parent's
    /// shadow tree whose `name` matches the node's `slot` attribute (the
    /// default slot when either is absent). Closed shadow roots assign
    /// slots too.
    pub fn assigned_slot(&self, node: NodeId) -> Option<NodeId> {
        let n = self.get(node)?;
        let wanted = match n.as_element() {
            Some(elem) => elem.get_attr("slot").unwrap_or(""),
            None if n.as_text().is_some() => "",
            None => return None,
        };
        let host = self.parent_element(node)?;
        let shadow = self.shadow_root(host)?;
        self.find_slot(shadow, wanted)
    }

    fn find_slot(&self, shadow: NodeId, name: &str) -> Option<NodeId> {
        self.descendants(shadow).find(|&id| {
            self.element(id)
                .is_some_and(|e| e.is("slot") && e.get_attr("name").unwrap_or("") == name)
        })
    }

    /// Elements currently assigned to `slot`, in tree order
    pub fn assigned_elements(&self, slot: NodeId) -> Vec<NodeId> {
        let Some(host) = self.shadow_host(self.root_node(slot)) else {
            return Vec::new();
        };
        self.children(host)
            .filter(|&child| self.is_element(child) && self.assigned_slot(child) == Some(slot))
            .collect()
    }
}
