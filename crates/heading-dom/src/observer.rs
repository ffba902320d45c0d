//! Mutation Observers
//!
//! Records are queued synchronously when the tree mutates and sit in each
//! observer's queue until the host takes them at its checkpoint.

use crate::{DomError, DomTree, NodeId};

/// Observer handle (index into the tree's observer list)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub(crate) u32);

/// Mutation observer options
#[derive(Debug, Clone, Default)]
pub struct MutationObserverInit {
    pub child_list: bool,
    pub attributes: bool,
    pub subtree: bool,
    /// Lowercase attribute names; `None` means every attribute
    pub attribute_filter: Option<Vec<String>>,
}

impl MutationObserverInit {
    fn accepts(&self, record: &MutationRecord) -> bool {
        match record.mutation_type {
            MutationType::ChildList => self.child_list,
            MutationType::Attributes => {
                self.attributes
                    && match (&self.attribute_filter, &record.attribute_name) {
                        (Some(filter), Some(name)) => filter.iter().any(|f| f == name),
                        _ => true,
                    }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationType {
    Attributes,
    ChildList,
}

/// Mutation record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRecord {
    pub mutation_type: MutationType,
    pub target: NodeId,
    pub added_nodes: Vec<NodeId>,
    pub removed_nodes: Vec<NodeId>,
    pub previous_sibling: Option<NodeId>,
    pub next_sibling: Option<NodeId>,
    pub attribute_name: Option<String>,
    pub old_value: Option<String>,
}

impl MutationRecord {
    pub(crate) fn attribute(target: NodeId, name: String, old_value: Option<String>) -> Self {
        Self {
            mutation_type: MutationType::Attributes,
            target,
            added_nodes: Vec::new(),
            removed_nodes: Vec::new(),
            previous_sibling: None,
            next_sibling: None,
            attribute_name: Some(name),
            old_value,
        }
    }

    pub(crate) fn child_list(
        target: NodeId,
        added_nodes: Vec<NodeId>,
        removed_nodes: Vec<NodeId>,
        previous_sibling: Option<NodeId>,
        next_sibling: Option<NodeId>,
    ) -> Self {
        Self {
            mutation_type: MutationType::ChildList,
            target,
            added_nodes,
            removed_nodes,
            previous_sibling,
            next_sibling,
            attribute_name: None,
            old_value: None,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct ObserverState {
    registrations: Vec<(NodeId, MutationObserverInit)>,
    records: Vec<MutationRecord>,
}

impl DomTree {
    /// Create a mutation observer with no registrations
    pub fn create_observer(&mut self) -> ObserverId {
        let id = ObserverId(self.observers.len() as u32);
        self.observers.push(ObserverState::default());
        id
    }

    fn observer_mut(&mut self, observer: ObserverId) -> Option<&mut ObserverState> {
        self.observers.get_mut(observer.0 as usize)
    }

    /// Register `observer` on `target`. Observing the same target again
    /// replaces its options.
    pub fn observe(
        &mut self,
        observer: ObserverId,
        target: NodeId,
        options: MutationObserverInit,
    ) -> Result<(), DomError> {
        self.node(target)?;
        let state = self
            .observer_mut(observer)
            .ok_or(DomError::UnknownObserver(observer))?;
        match state.registrations.iter_mut().find(|(t, _)| *t == target) {
            Some(existing) => existing.1 = options,
            None => state.registrations.push((target, options)),
        }
        Ok(())
    }

    /// Drop all registrations and pending records. Unknown observers are
    /// ignored.
    pub fn disconnect(&mut self, observer: ObserverId) {
        if let Some(state) = self.observer_mut(observer) {
            state.registrations.clear();
            state.records.clear();
        }
    }

    /// Take pending records; empty for an observer this tree did not create
    pub fn take_records(&mut self, observer: ObserverId) -> Vec<MutationRecord> {
        self.observer_mut(observer)
            .map(|state| std::mem::take(&mut state.records))
            .unwrap_or_default()
    }

    /// Number of pending records; usable as a mark for
    /// [`discard_records_from`](Self::discard_records_from)
    pub fn pending_records(&self, observer: ObserverId) -> usize {
        self.observers
            .get(observer.0 as usize)
            .map_or(0, |state| state.records.len())
    }

    /// Drop every record queued after `mark`
    pub fn discard_records_from(&mut self, observer: ObserverId, mark: usize) {
        if let Some(state) = self.observer_mut(observer) {
            state.records.truncate(mark);
        }
    }

    /// Queue a record for every observer with a matching registration on
    /// the target or, with `subtree`, on one of its ancestors. Each observer
    /// receives the record at most once.
    pub(crate) fn queue_record(&mut self, record: MutationRecord) {
        if self.observers.is_empty() {
            return;
        }

        let mut chain = vec![record.target];
        let mut current = record.target;
        while let Some(parent) = self.parent(current) {
            chain.push(parent);
            current = parent;
        }

        for state in &mut self.observers {
            let interested = state.registrations.iter().any(|(target, options)| {
                let reaches = *target == record.target || (options.subtree && chain.contains(target));
                reaches && options.accepts(&record)
            });
            if interested {
                state.records.push(record.clone());
            }
        }
    }
}
