use std::collections::HashMap;

use crate::trace::statement::SymbolicRef;
use crate::value::handle::{Handle, ResourceKind};

/// Stable symbolic names for opaque handles seen during one capture session.
///
/// Each kind keeps an ordered list of handles. A handle's index in its list is assigned on first
/// sight and never changes; lookups go through the handle's identity, never its contents. The
/// lists hold clones of every handle, which keeps each identity alive and therefore unique for the
/// lifetime of the registry.
#[derive(Debug, Default)]
pub struct IdentityRegistry {
    kinds: Vec<ResourceKind>,
    lists: HashMap<ResourceKind, Vec<Handle>>,
    index: HashMap<(ResourceKind, usize), usize>,
}

impl IdentityRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Symbolic reference for `handle`, assigning the next index of its kind on first sight.
    pub fn resolve(&mut self, handle: &Handle) -> SymbolicRef {
        if let Some(sym) = self.lookup(handle) {
            return sym;
        }

        let kind = handle.kind();
        let list = self.lists.entry(kind).or_insert_with(|| {
            self.kinds.push(kind);
            Vec::new()
        });
        let index = list.len();
        list.push(handle.clone());
        self.index.insert((kind, handle.identity()), index);

        SymbolicRef { kind, index }
    }

    /// Symbolic reference for `handle` if it was seen before.
    pub fn lookup(&self, handle: &Handle) -> Option<SymbolicRef> {
        let kind = handle.kind();
        self.index
            .get(&(kind, handle.identity()))
            .map(|&index| SymbolicRef { kind, index })
    }

    /// Kinds seen so far, in first-seen order.
    pub fn kinds(&self) -> &[ResourceKind] {
        &self.kinds
    }

    /// Handles of `kind` in index order.
    pub fn handles(&self, kind: ResourceKind) -> &[Handle] {
        self.lists.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of tracked handles.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether no handle was seen yet.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trace/registry.rs"]
mod tests;
