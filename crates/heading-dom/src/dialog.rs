//! Dialog API
//!
//! `<dialog>` open state and the document's top layer.

use crate::{DomError, DomTree, NodeId};

impl DomTree {
    fn check_dialog(&self, dialog: NodeId) -> Result<(), DomError> {
        let elem = self
            .node(dialog)?
            .as_element()
            .ok_or(DomError::NotAnElement(dialog))?;
        if !elem.is("dialog") {
            return Err(DomError::InvalidState("not a dialog element"));
        }
        Ok(())
    }

    /// Open a dialog non-modally
    pub fn show(&mut self, dialog: NodeId) -> Result<(), DomError> {
        self.check_dialog(dialog)?;
        if self.has_attribute(dialog, "open") {
            if self.is_modal(dialog) {
                return Err(DomError::InvalidState("dialog is already open as modal"));
            }
            return Ok(());
        }
        self.set_attribute(dialog, "open", "")
    }

    /// Open a dialog as a modal and place it on top of the top layer
    pub fn show_modal(&mut self, dialog: NodeId) -> Result<(), DomError> {
        self.check_dialog(dialog)?;
        if self.has_attribute(dialog, "open") {
            if self.is_modal(dialog) {
                return Ok(());
            }
            return Err(DomError::InvalidState("dialog is already open non-modally"));
        }
        if !self.is_connected(dialog) {
            return Err(DomError::InvalidState("dialog is not connected"));
        }
        self.set_attribute(dialog, "open", "")?;
        self.top_layer.push(dialog);
        tracing::trace!("Dialog {:?} entered the top layer", dialog);
        Ok(())
    }

    /// Close a dialog, removing it from the top layer
    pub fn close(&mut self, dialog: NodeId) -> Result<(), DomError> {
        self.check_dialog(dialog)?;
        self.top_layer.retain(|&d| d != dialog);
        self.remove_attribute(dialog, "open")?;
        Ok(())
    }

    /// Whether the dialog is in the top layer
    pub fn is_modal(&self, dialog: NodeId) -> bool {
        self.top_layer.contains(&dialog)
    }

    /// Modal dialogs, bottom to top
    pub fn top_layer(&self) -> &[NodeId] {
        &self.top_layer
    }

    /// Topmost modal dialog
    pub fn topmost_modal(&self) -> Option<NodeId> {
        self.top_layer.last().copied()
    }

    /// Disconnected dialogs leave the top layer
    pub(crate) fn prune_top_layer(&mut self) {
        if self.top_layer.is_empty() {
            return;
        }
        let top_layer = std::mem::take(&mut self.top_layer);
        self.top_layer = top_layer
            .into_iter()
            .filter(|&d| self.is_connected(d))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dialog_tree() -> (DomTree, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let outer = tree.create_element("dialog");
        let inner = tree.create_element("dialog");
        tree.append_child(tree.root(), outer).unwrap();
        tree.append_child(outer, inner).unwrap();
        (tree, outer, inner)
    }

    #[test]
    fn test_modal_stack() {
        let (mut tree, outer, inner) = dialog_tree();
        tree.show_modal(outer).unwrap();
        assert_eq!(tree.topmost_modal(), Some(outer));

        tree.show_modal(inner).unwrap();
        assert_eq!(tree.top_layer(), &[outer, inner]);
        assert_eq!(tree.topmost_modal(), Some(inner));

        tree.close(inner).unwrap();
        assert_eq!(tree.topmost_modal(), Some(outer));
        assert!(!tree.has_attribute(inner, "open"));
    }

    #[test]
    fn test_show_then_show_modal_fails() {
        let (mut tree, outer, _) = dialog_tree();
        tree.show(outer).unwrap();
        assert!(tree.has_attribute(outer, "open"));
        assert!(tree.show_modal(outer).is_err());
        assert_eq!(tree.topmost_modal(), None);
    }

    #[test]
    fn test_detached_dialog_leaves_top_layer() {
        let (mut tree, outer, _) = dialog_tree();
        tree.show_modal(outer).unwrap();
        tree.remove_child(tree.root(), outer).unwrap();
        assert_eq!(tree.topmost_modal(), None);

        let div = tree.create_element("div");
        assert!(tree.show_modal(div).is_err());
        assert!(tree.show_modal(outer).is_err());
    }
}
