//! DOM Tree (arena-based allocation)

use crate::node::{ElementData, Node, NodeData};
use crate::observer::{MutationRecord, ObserverState};
use crate::{DomError, NodeId};

/// Arena-based DOM tree for a single document and its shadow trees
#[derive(Debug)]
pub struct DomTree {
    pub(crate) nodes: Vec<Node>,
    pub(crate) observers: Vec<ObserverState>,
    /// Modal dialogs, bottom to top
    pub(crate) top_layer: Vec<NodeId>,
    /// Shadow roots attached since the last `take_attached_shadow_roots`
    pub(crate) attached_shadow_roots: Vec<NodeId>,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
            observers: Vec::new(),
            top_layer: Vec::new(),
            attached_shadow_roots: Vec::new(),
        }
    }

    /// The document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the arena (detached nodes included)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the document node is created with the tree
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn node(&self, id: NodeId) -> Result<&Node, DomError> {
        self.get(id).ok_or(DomError::InvalidNode(id))
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, local_name: &str) -> NodeId {
        self.push(Node::element(local_name))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::comment(content))
    }

    pub(crate) fn create_shadow_root(&mut self, data: crate::ShadowRootData) -> NodeId {
        self.push(Node::shadow_root(data))
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Element data for `id`, if it is an element
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id)?.as_element()
    }

    /// Whether `id` is an element
    pub fn is_element(&self, id: NodeId) -> bool {
        self.element(id).is_some()
    }

    /// Lowercased local name of an element
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.local_name.as_str())
    }

    /// Parent node (element, document or shadow root)
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent.valid()
    }

    /// Parent node if it is an element
    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        self.parent(id).filter(|&p| self.is_element(p))
    }

    /// Iterate over the direct children of a node
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let next = self.get(id).map_or(NodeId::NONE, |n| n.first_child);
        Children { tree: self, next }
    }

    /// Pre-order iteration over the descendants of `root` (excluding
    /// `root`). Shadow trees are not entered.
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        let next = self.get(root).map_or(NodeId::NONE, |n| n.first_child);
        Descendants {
            tree: self,
            root,
            next,
        }
    }

    /// Root of the node tree containing `id`: the document, a shadow root,
    /// or the topmost node of a detached subtree.
    pub fn root_node(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// Whether the node's shadow-including root is the document
    pub fn is_connected(&self, id: NodeId) -> bool {
        let mut root = self.root_node(id);
        loop {
            if root == NodeId::ROOT {
                return true;
            }
            match self.shadow_host(root) {
                Some(host) => root = self.root_node(host),
                None => return false,
            }
        }
    }

    /// Whether `ancestor` is `node` or one of its host-including ancestors
    pub fn is_host_including_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id).or_else(|| self.shadow_host(id));
        }
        false
    }

    /// First element in `scope` (tree order, shadow trees excluded) whose
    /// `id` attribute equals `id`
    pub fn element_by_id(&self, scope: NodeId, id: &str) -> Option<NodeId> {
        self.descendants(scope)
            .find(|&n| self.element(n).and_then(|e| e.get_attr("id")) == Some(id))
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    /// Get an attribute value (name is ASCII case-insensitive)
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.get_attr(&name.to_ascii_lowercase())
    }

    /// Check attribute presence
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.get_attribute(id, name).is_some()
    }

    /// Set an attribute, queueing an `attributes` record
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        let name = name.to_ascii_lowercase();
        let old_value = self
            .get_mut(id)
            .ok_or(DomError::InvalidNode(id))?
            .as_element_mut()
            .ok_or(DomError::NotAnElement(id))?
            .set_attr(&name, value);
        self.queue_record(MutationRecord::attribute(id, name, old_value));
        Ok(())
    }

    /// Remove an attribute. Returns whether it was present; removing an
    /// absent attribute queues nothing.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<bool, DomError> {
        let name = name.to_ascii_lowercase();
        let removed = self
            .get_mut(id)
            .ok_or(DomError::InvalidNode(id))?
            .as_element_mut()
            .ok_or(DomError::NotAnElement(id))?
            .remove_attr(&name);
        match removed {
            Some(old_value) => {
                self.queue_record(MutationRecord::attribute(id, name, Some(old_value)));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // ------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------

    /// Append `child` as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` before `reference` (or at the end when `None`).
    /// A child that already has a parent is moved.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), DomError> {
        self.check_insertion(parent, child, reference)?;

        let mut reference = reference;
        if reference == Some(child) {
            reference = self.node(child)?.next_sibling.valid();
        }

        if let Some(old_parent) = self.parent(child) {
            self.remove_child(old_parent, child)?;
        }

        let prev = match reference {
            Some(r) => self.nodes[r.index()].prev_sibling,
            None => self.nodes[parent.index()].last_child,
        };
        let next = reference.unwrap_or(NodeId::NONE);

        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = prev;
            node.next_sibling = next;
        }
        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = child;
        } else {
            self.nodes[parent.index()].last_child = child;
        }

        self.queue_record(MutationRecord::child_list(
            parent,
            vec![child],
            Vec::new(),
            prev.valid(),
            next.valid(),
        ));
        Ok(())
    }

    fn check_insertion(
        &self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), DomError> {
        let parent_node = self.node(parent)?;
        let child_node = self.node(child)?;
        let hierarchy = DomError::HierarchyRequest { parent, child };

        if !(parent_node.is_element() || parent_node.is_scope_root()) || child_node.is_scope_root() {
            return Err(hierarchy);
        }
        if self.is_host_including_inclusive_ancestor(child, parent) {
            return Err(hierarchy);
        }
        if let Some(r) = reference {
            if self.node(r)?.parent != parent {
                return Err(DomError::NotAChild { parent, child: r });
            }
        }
        Ok(())
    }

    /// Detach `child` from `parent`
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.node(parent)?;
        let (prev, next) = {
            let node = self.node(child)?;
            if node.parent != parent {
                return Err(DomError::NotAChild { parent, child });
            }
            (node.prev_sibling, node.next_sibling)
        };

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }
        {
            let node = &mut self.nodes[child.index()];
            node.parent = NodeId::NONE;
            node.prev_sibling = NodeId::NONE;
            node.next_sibling = NodeId::NONE;
        }

        self.queue_record(MutationRecord::child_list(
            parent,
            Vec::new(),
            vec![child],
            prev.valid(),
            next.valid(),
        ));
        self.prune_top_layer();
        Ok(())
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a node's children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next.valid()?;
        self.next = self.tree.nodes[current.index()].next_sibling;
        Some(current)
    }
}

/// Pre-order iterator over a subtree, bounded by its root
pub struct Descendants<'a> {
    tree: &'a DomTree,
    root: NodeId,
    next: NodeId,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next.valid()?;
        let nodes = &self.tree.nodes;

        self.next = nodes[current.index()].first_child;
        if !self.next.is_valid() {
            let mut climb = current;
            while climb != self.root {
                let sibling = nodes[climb.index()].next_sibling;
                if sibling.is_valid() {
                    self.next = sibling;
                    break;
                }
                climb = nodes[climb.index()].parent;
                if !climb.is_valid() {
                    break;
                }
            }
        }
        Some(current)
    }
}
