//! Per-workspace scratch context boundary
//!
//! External subsystems stash transient key/value state per workspace
//! (draft filters, half-built queries, view scroll positions). The
//! manager does not read any of it; its only obligation is to purge a
//! workspace's entries when that workspace closes, and everything on
//! reset.

use std::collections::HashMap;
use workspace_types::WorkspaceHandle;

/// Scratch storage purged by the workspace manager
pub trait ContextStore {
    /// Drops all state associated with one workspace
    fn purge_workspace(&mut self, handle: WorkspaceHandle);

    /// Drops all state for all workspaces
    fn purge_all(&mut self);
}

/// Typed side-table of per-workspace scratch values
///
/// In-memory implementation of `ContextStore`, keyed by workspace handle.
#[derive(Debug, Default)]
pub struct ScratchTable {
    entries: HashMap<WorkspaceHandle, HashMap<String, String>>,
}

impl ScratchTable {
    /// Creates an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a value under a workspace's key
    pub fn set(
        &mut self,
        handle: WorkspaceHandle,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.entries
            .entry(handle)
            .or_default()
            .insert(key.into(), value.into());
    }

    /// Reads a value from a workspace's scratch state
    pub fn get(&self, handle: WorkspaceHandle, key: &str) -> Option<&str> {
        self.entries.get(&handle)?.get(key).map(String::as_str)
    }

    /// Number of workspaces with any scratch state
    pub fn workspace_count(&self) -> usize {
        self.entries.len()
    }
}

impl ContextStore for ScratchTable {
    fn purge_workspace(&mut self, handle: WorkspaceHandle) {
        self.entries.remove(&handle);
    }

    fn purge_all(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut table = ScratchTable::new();
        let handle = WorkspaceHandle::from_raw(1);

        table.set(handle, "filter", "open-leads");
        assert_eq!(table.get(handle, "filter"), Some("open-leads"));
        assert_eq!(table.get(handle, "missing"), None);
        assert_eq!(table.get(WorkspaceHandle::from_raw(2), "filter"), None);
    }

    #[test]
    fn test_purge_workspace_is_scoped() {
        let mut table = ScratchTable::new();
        let a = WorkspaceHandle::from_raw(1);
        let b = WorkspaceHandle::from_raw(2);

        table.set(a, "k", "va");
        table.set(b, "k", "vb");

        table.purge_workspace(a);
        assert_eq!(table.get(a, "k"), None);
        assert_eq!(table.get(b, "k"), Some("vb"));
    }

    #[test]
    fn test_purge_all() {
        let mut table = ScratchTable::new();
        table.set(WorkspaceHandle::from_raw(1), "k", "v");
        table.set(WorkspaceHandle::from_raw(2), "k", "v");

        table.purge_all();
        assert_eq!(table.workspace_count(), 0);
    }
}
