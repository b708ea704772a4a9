//! Workspace registry: records, recency history, and focus bookkeeping

use std::collections::HashMap;
use workspace_types::{ControllerInfo, WorkspaceHandle, WorkspaceRecord};

/// Keyed collection of open workspaces plus the recency history
///
/// Owned exclusively by the manager; every mutation happens inside one of
/// its operations. Lookup is O(1) by handle, scans are O(n) over a small n
/// (capacity is in the single digits).
#[derive(Debug, Default)]
pub struct WorkspaceRegistry {
    /// Open workspace records, keyed by handle
    records: HashMap<WorkspaceHandle, WorkspaceRecord>,
    /// Recency history, most-recently-touched last, no duplicates
    recency: Vec<WorkspaceHandle>,
    /// Currently focused workspace (`NONE` when nothing is focused)
    current: WorkspaceHandle,
    /// Permanent home workspace (`NONE` until first assigned)
    start: WorkspaceHandle,
}

impl WorkspaceRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record for a freshly allocated handle
    pub fn insert(&mut self, handle: WorkspaceHandle, controller: &ControllerInfo) {
        self.records
            .insert(handle, WorkspaceRecord::new(handle, controller));
    }

    /// Removes a record, returning it if the handle was open
    pub fn remove(&mut self, handle: WorkspaceHandle) -> Option<WorkspaceRecord> {
        self.forget(handle);
        if self.current == handle {
            self.current = WorkspaceHandle::NONE;
        }
        self.records.remove(&handle)
    }

    /// Checks whether a handle is currently open
    pub fn contains(&self, handle: WorkspaceHandle) -> bool {
        self.records.contains_key(&handle)
    }

    /// Returns the record for a handle, if open
    pub fn record(&self, handle: WorkspaceHandle) -> Option<&WorkspaceRecord> {
        self.records.get(&handle)
    }

    /// Returns a mutable record for a handle, if open
    pub fn record_mut(&mut self, handle: WorkspaceHandle) -> Option<&mut WorkspaceRecord> {
        self.records.get_mut(&handle)
    }

    /// Number of open workspaces
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Checks whether no workspace is open
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Currently focused handle (`NONE` when nothing is focused)
    pub fn current(&self) -> WorkspaceHandle {
        self.current
    }

    /// Sets the focused handle
    pub fn set_current(&mut self, handle: WorkspaceHandle) {
        self.current = handle;
    }

    /// Start workspace handle (`NONE` until assigned)
    pub fn start(&self) -> WorkspaceHandle {
        self.start
    }

    /// Designates the start workspace
    ///
    /// Once set, only `reset` clears it; ordinary closes never touch it.
    pub fn set_start(&mut self, handle: WorkspaceHandle) {
        self.start = handle;
    }

    /// Touches a handle in the recency history
    ///
    /// Moves the handle to the most-recent end, appending if absent. A
    /// handle appears at most once.
    pub fn touch(&mut self, handle: WorkspaceHandle) {
        self.forget(handle);
        self.recency.push(handle);
    }

    /// Removes a handle from the recency history
    pub fn forget(&mut self, handle: WorkspaceHandle) {
        self.recency.retain(|&h| h != handle);
    }

    /// Recency history, most-recently-touched last
    pub fn recency(&self) -> &[WorkspaceHandle] {
        &self.recency
    }

    /// Most recently used workspace other than start and current
    ///
    /// Scans the history from the most-recent end backwards. Seeds the
    /// fallback origin for newly opened workspaces: closing a freshly
    /// spawned workspace should return the user to whatever they were
    /// doing before.
    pub fn last_used(&self) -> WorkspaceHandle {
        self.recency
            .iter()
            .rev()
            .copied()
            .find(|&h| h != self.start && h != self.current)
            .unwrap_or(WorkspaceHandle::NONE)
    }

    /// Number of open workspaces that count against capacity
    pub fn evictable_count(&self) -> usize {
        self.records
            .values()
            .filter(|r| r.evictable(self.start))
            .count()
    }

    /// Eviction candidate: the oldest evictable workspace
    ///
    /// Handles are monotonic, so the smallest handle is the oldest by
    /// creation order. `NONE` when nothing is eligible.
    pub fn eviction_candidate(&self) -> WorkspaceHandle {
        self.records
            .values()
            .filter(|r| r.evictable(self.start))
            .map(|r| r.handle)
            .min()
            .unwrap_or(WorkspaceHandle::NONE)
    }

    /// First workspace holding the editing lock, or `NONE`
    pub fn editing_workspace(&self) -> WorkspaceHandle {
        self.records
            .values()
            .filter(|r| r.editing)
            .map(|r| r.handle)
            .min()
            .unwrap_or(WorkspaceHandle::NONE)
    }

    /// Checks whether any workspace holds the editing lock
    pub fn has_editing_workspace(&self) -> bool {
        self.records.values().any(|r| r.editing)
    }

    /// Workspaces to show in the switcher
    ///
    /// All open workspaces except start, unless start is the only one
    /// open, in which case it is included. Ascending handle order.
    pub fn working_list(&self) -> Vec<&WorkspaceRecord> {
        let mut list: Vec<&WorkspaceRecord> = self
            .records
            .values()
            .filter(|r| r.handle != self.start)
            .collect();
        if list.is_empty() {
            if let Some(start) = self.records.get(&self.start) {
                list.push(start);
            }
        }
        list.sort_by_key(|r| r.handle);
        list
    }

    /// Clears all registry state, including the start designation
    pub fn reset(&mut self) {
        self.records.clear();
        self.recency.clear();
        self.current = WorkspaceHandle::NONE;
        self.start = WorkspaceHandle::NONE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(raw: u64) -> WorkspaceHandle {
        WorkspaceHandle::from_raw(raw)
    }

    fn registry_with(handles: &[u64]) -> WorkspaceRegistry {
        let mut registry = WorkspaceRegistry::new();
        for &raw in handles {
            registry.insert(handle(raw), &ControllerInfo::new());
            registry.touch(handle(raw));
        }
        registry
    }

    #[test]
    fn test_empty_registry() {
        let registry = WorkspaceRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.current(), WorkspaceHandle::NONE);
        assert_eq!(registry.start(), WorkspaceHandle::NONE);
        assert_eq!(registry.last_used(), WorkspaceHandle::NONE);
        assert_eq!(registry.eviction_candidate(), WorkspaceHandle::NONE);
    }

    #[test]
    fn test_insert_and_remove() {
        let mut registry = registry_with(&[1, 2]);
        assert_eq!(registry.len(), 2);
        assert!(registry.contains(handle(1)));

        let removed = registry.remove(handle(1)).unwrap();
        assert_eq!(removed.handle, handle(1));
        assert!(!registry.contains(handle(1)));
        assert!(!registry.recency().contains(&handle(1)));
        assert!(registry.remove(handle(1)).is_none());
    }

    #[test]
    fn test_remove_current_clears_focus() {
        let mut registry = registry_with(&[1]);
        registry.set_current(handle(1));

        registry.remove(handle(1));
        assert_eq!(registry.current(), WorkspaceHandle::NONE);
    }

    #[test]
    fn test_touch_moves_to_end_without_duplicates() {
        let mut registry = registry_with(&[1, 2, 3]);
        assert_eq!(registry.recency(), &[handle(1), handle(2), handle(3)]);

        registry.touch(handle(1));
        assert_eq!(registry.recency(), &[handle(2), handle(3), handle(1)]);
    }

    #[test]
    fn test_last_used_skips_start_and_current() {
        let mut registry = registry_with(&[1, 2, 3]);
        registry.set_start(handle(1));
        registry.set_current(handle(3));

        assert_eq!(registry.last_used(), handle(2));

        registry.set_current(handle(2));
        registry.touch(handle(2));
        assert_eq!(registry.last_used(), handle(3));
    }

    #[test]
    fn test_eviction_candidate_is_smallest_handle() {
        let mut registry = registry_with(&[5, 7, 9]);
        assert_eq!(registry.eviction_candidate(), handle(5));

        registry.record_mut(handle(5)).unwrap().editing = true;
        assert_eq!(registry.eviction_candidate(), handle(7));
    }

    #[test]
    fn test_evictable_count_exempts_start_and_editing() {
        let mut registry = registry_with(&[1, 2, 3]);
        registry.set_start(handle(1));
        assert_eq!(registry.evictable_count(), 2);

        registry.record_mut(handle(2)).unwrap().editing = true;
        assert_eq!(registry.evictable_count(), 1);
    }

    #[test]
    fn test_editing_queries() {
        let mut registry = registry_with(&[1, 2]);
        assert!(!registry.has_editing_workspace());
        assert_eq!(registry.editing_workspace(), WorkspaceHandle::NONE);

        registry.record_mut(handle(2)).unwrap().editing = true;
        assert!(registry.has_editing_workspace());
        assert_eq!(registry.editing_workspace(), handle(2));
    }

    #[test]
    fn test_working_list_excludes_start() {
        let mut registry = registry_with(&[1, 2, 3]);
        registry.set_start(handle(1));

        let list = registry.working_list();
        let handles: Vec<WorkspaceHandle> = list.iter().map(|r| r.handle).collect();
        assert_eq!(handles, vec![handle(2), handle(3)]);
    }

    #[test]
    fn test_working_list_includes_lone_start() {
        let mut registry = registry_with(&[1]);
        registry.set_start(handle(1));

        let list = registry.working_list();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].handle, handle(1));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut registry = registry_with(&[1, 2]);
        registry.set_start(handle(1));
        registry.set_current(handle(2));

        registry.reset();
        assert!(registry.is_empty());
        assert!(registry.recency().is_empty());
        assert_eq!(registry.current(), WorkspaceHandle::NONE);
        assert_eq!(registry.start(), WorkspaceHandle::NONE);
    }
}
