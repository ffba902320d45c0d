//! `aria-level` Synchronization
//!
//! [`HeadingSync`] observes the document and every shadow tree, and keeps
//! the `aria-level` attribute of each heading equal to its intrinsic level
//! plus the resolved offset. Values written by authors are left alone until
//! the author removes them.
//!
//! Two observers are registered per tree scope:
//! - the level observer watches `aria-level` to detect external writes and
//!   removals;
//! - the structure observer watches insertions and `headingoffset` /
//!   `headingreset` (and dialog `open`) changes.
//!
//! Records produced by the synchronizer's own `aria-level` writes are
//! discarded from the level observer's queue as soon as the write is made,
//! so they are never mistaken for external changes.

use std::collections::{HashMap, HashSet};

use heading_dom::{DomTree, MutationObserverInit, MutationRecord, MutationType, NodeId, ObserverId};

use crate::config::SyncConfig;
use crate::heading::{intrinsic_level, ARIA_LEVEL, HEADING_OFFSET, HEADING_RESET};
use crate::resolve::resolve_offset;
use crate::HeadingError;

/// Keeps `aria-level` synchronized with `headingoffset` / `headingreset`
#[derive(Debug)]
pub struct HeadingSync {
    config: SyncConfig,
    level_observer: ObserverId,
    structure_observer: ObserverId,
    /// Headings whose current `aria-level` was written here, with the level
    /// written
    managed: HashMap<NodeId, u8>,
    observed_scopes: HashSet<NodeId>,
}

impl HeadingSync {
    /// Create a synchronizer with default configuration. No scope is
    /// observed until [`observe`](Self::observe) is called.
    pub fn new(tree: &mut DomTree) -> Self {
        Self::with_config(tree, SyncConfig::default())
    }

    /// Create a synchronizer with custom configuration
    pub fn with_config(tree: &mut DomTree, config: SyncConfig) -> Self {
        Self {
            config,
            level_observer: tree.create_observer(),
            structure_observer: tree.create_observer(),
            managed: HashMap::new(),
            observed_scopes: HashSet::new(),
        }
    }

    /// Create a synchronizer and observe the document along with every
    /// shadow tree reachable from it
    pub fn install(tree: &mut DomTree) -> Result<Self, HeadingError> {
        Self::install_with_config(tree, SyncConfig::default())
    }

    /// [`install`](Self::install) with custom configuration
    pub fn install_with_config(tree: &mut DomTree, config: SyncConfig) -> Result<Self, HeadingError> {
        let mut sync = Self::with_config(tree, config);
        let document = tree.root();
        sync.observe(tree, document)?;
        Ok(sync)
    }

    /// Configuration in use
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Whether `scope` is observed
    pub fn is_observing(&self, scope: NodeId) -> bool {
        self.observed_scopes.contains(&scope)
    }

    /// Whether the heading's current `aria-level` was written here
    pub fn is_managed(&self, heading: NodeId) -> bool {
        self.managed.contains_key(&heading)
    }

    /// Start observing a document or shadow root. Recomputes every heading
    /// in the scope and observes the shadow trees nested in it. Observing a
    /// scope twice is a no-op.
    pub fn observe(&mut self, tree: &mut DomTree, scope: NodeId) -> Result<(), HeadingError> {
        if !tree.get(scope).is_some_and(|n| n.is_scope_root()) {
            return Err(HeadingError::NotATreeScope(scope));
        }
        if !self.observed_scopes.insert(scope) {
            return Ok(());
        }
        tracing::debug!("Observing tree scope {:?}", scope);

        tree.observe(self.level_observer, scope, MutationObserverInit {
            attributes: true,
            subtree: true,
            attribute_filter: Some(vec![ARIA_LEVEL.to_string()]),
            ..Default::default()
        })?;
        tree.observe(self.structure_observer, scope, MutationObserverInit {
            child_list: true,
            attributes: true,
            subtree: true,
            attribute_filter: Some(self.structure_filter()),
        })?;

        let headings: Vec<NodeId> = tree
            .descendants(scope)
            .filter(|&id| intrinsic_level(tree, id).is_some())
            .collect();
        for heading in headings {
            self.recompute(tree, heading)?;
        }

        for shadow in shadow_roots_within(tree, scope) {
            self.observe(tree, shadow)?;
        }
        Ok(())
    }

    fn structure_filter(&self) -> Vec<String> {
        let mut filter = vec![HEADING_OFFSET.to_string(), HEADING_RESET.to_string()];
        if self.config.track_dialogs {
            filter.push("open".to_string());
        }
        filter
    }

    /// Bring one heading's `aria-level` up to date.
    ///
    /// Author-set values are left untouched. A present value that differs
    /// from the one written here was set by someone else, even if no record
    /// reported it, and ends management. A level equal to the intrinsic
    /// level is never stored.
    pub fn recompute(&mut self, tree: &mut DomTree, heading: NodeId) -> Result<(), HeadingError> {
        let Some(level) = intrinsic_level(tree, heading) else {
            return Ok(());
        };
        let current = tree.get_attribute(heading, ARIA_LEVEL).map(str::to_owned);
        if let Some(value) = current.as_deref() {
            match self.managed.get(&heading) {
                Some(written) if written.to_string() == value => {}
                Some(_) => {
                    self.managed.remove(&heading);
                    tracing::debug!("aria-level on {:?} changed while unobserved, ceding control", heading);
                    return Ok(());
                }
                None => return Ok(()),
            }
        }

        let max_offset = self.config.effective_max_level().saturating_sub(level);
        let derived = level + resolve_offset(tree, heading, max_offset);
        tracing::trace!("Heading {:?}: h{} -> level {}", heading, level, derived);

        let mark = tree.pending_records(self.level_observer);
        if derived == level {
            self.managed.remove(&heading);
            tree.remove_attribute(heading, ARIA_LEVEL)?;
        } else {
            let value = derived.to_string();
            if current.as_deref() != Some(value.as_str()) {
                tree.set_attribute(heading, ARIA_LEVEL, &value)?;
            }
            self.managed.insert(heading, derived);
        }
        tree.discard_records_from(self.level_observer, mark);
        Ok(())
    }

    /// Deliver pending mutation records, the host's checkpoint. Shadow
    /// roots attached since the last flush are observed first, then the
    /// level observer's records are handled, then the structure
    /// observer's, until nothing is left.
    pub fn flush(&mut self, tree: &mut DomTree) -> Result<(), HeadingError> {
        loop {
            let attached = tree.take_attached_shadow_roots();
            for &shadow in &attached {
                self.observe(tree, shadow)?;
            }

            let level_records = tree.take_records(self.level_observer);
            let level_empty = level_records.is_empty();
            self.on_level_records(tree, level_records)?;

            let structure_records = tree.take_records(self.structure_observer);
            let structure_empty = structure_records.is_empty();
            self.on_structure_records(tree, structure_records)?;

            if attached.is_empty() && level_empty && structure_empty {
                return Ok(());
            }
        }
    }

    fn on_level_records(&mut self, tree: &mut DomTree, records: Vec<MutationRecord>) -> Result<(), HeadingError> {
        for record in records {
            let heading = record.target;
            if intrinsic_level(tree, heading).is_none() {
                continue;
            }
            if tree.has_attribute(heading, ARIA_LEVEL) {
                if self.managed.remove(&heading).is_some() {
                    tracing::debug!("aria-level on {:?} set externally, ceding control", heading);
                }
            } else {
                self.recompute(tree, heading)?;
            }
        }
        Ok(())
    }

    fn on_structure_records(&mut self, tree: &mut DomTree, records: Vec<MutationRecord>) -> Result<(), HeadingError> {
        for record in records {
            match record.mutation_type {
                MutationType::ChildList => {
                    for node in record.added_nodes {
                        self.on_inserted(tree, node)?;
                    }
                    // A removed modal leaves the top layer and may uncover another
                    if !record.removed_nodes.is_empty() && self.config.track_dialogs {
                        let dialogs = tree.top_layer().to_vec();
                        for heading in composed_headings(tree, &dialogs) {
                            self.recompute(tree, heading)?;
                        }
                    }
                }
                MutationType::Attributes => {
                    self.on_attribute_changed(tree, record.target, record.attribute_name.as_deref())?;
                }
            }
        }
        Ok(())
    }

    /// Recompute headings in an inserted subtree and observe the shadow
    /// trees it brings along, whether attached by script or declared with
    /// `<template shadowrootmode>`.
    fn on_inserted(&mut self, tree: &mut DomTree, node: NodeId) -> Result<(), HeadingError> {
        if !tree.is_element(node) {
            return Ok(());
        }
        for heading in composed_headings(tree, &[node]) {
            self.recompute(tree, heading)?;
        }
        let mut shadows: Vec<NodeId> = tree.shadow_root(node).into_iter().collect();
        shadows.extend(shadow_roots_within(tree, node));
        for shadow in shadows {
            self.observe(tree, shadow)?;
        }
        Ok(())
    }

    /// An offset, reset or dialog `open` attribute changed on `target`.
    /// Opening or closing a dialog changes which dialog is topmost, so
    /// every dialog in the top layer is revisited as well.
    fn on_attribute_changed(
        &mut self,
        tree: &mut DomTree,
        target: NodeId,
        name: Option<&str>,
    ) -> Result<(), HeadingError> {
        let mut containers = vec![target];
        if name == Some("open") {
            containers.extend_from_slice(tree.top_layer());
        }
        for heading in composed_headings(tree, &containers) {
            self.recompute(tree, heading)?;
        }
        Ok(())
    }
}

/// Headings at or under `containers` in the composed tree: light
/// descendants, shadow trees, and elements assigned to slots. Each heading
/// appears once, in pre-order (shadow tree, then slotted elements, then
/// children).
pub fn composed_headings(tree: &DomTree, containers: &[NodeId]) -> Vec<NodeId> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    let mut stack: Vec<NodeId> = containers.iter().rev().copied().collect();

    while let Some(node) = stack.pop() {
        if !seen.insert(node) {
            continue;
        }
        if intrinsic_level(tree, node).is_some() {
            out.push(node);
        }

        // Pushed in reverse so they pop in visiting order
        let children: Vec<NodeId> = tree.children(node).collect();
        stack.extend(children.into_iter().rev());
        if tree.element(node).is_some_and(|e| e.is("slot")) {
            stack.extend(tree.assigned_elements(node).into_iter().rev());
        }
        if let Some(shadow) = tree.shadow_root(node) {
            stack.push(shadow);
        }
    }
    out
}

/// Shadow roots hosted by descendants of `node` within its own tree
fn shadow_roots_within(tree: &DomTree, node: NodeId) -> Vec<NodeId> {
    tree.descendants(node)
        .filter_map(|id| tree.shadow_root(id))
        .collect()
}
