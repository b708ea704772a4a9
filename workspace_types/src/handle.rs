//! Workspace handles and their allocator

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for one open workspace
///
/// Handles are monotonically increasing integers, unique for the lifetime
/// of the process. They are never reused, even after the workspace they
/// identified has been closed. Handle ordering therefore doubles as
/// creation ordering, which the eviction policy relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WorkspaceHandle(u64);

impl WorkspaceHandle {
    /// Sentinel meaning "no workspace"
    pub const NONE: WorkspaceHandle = WorkspaceHandle(0);

    /// Creates a handle from a raw value
    ///
    /// Only the allocator and tests should need this; callers receive
    /// handles from the manager.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer value
    pub fn raw(&self) -> u64 {
        self.0
    }

    /// Checks whether this is the `NONE` sentinel
    pub fn is_none(&self) -> bool {
        self.0 == 0
    }

    /// Checks whether this refers to an actual workspace
    pub fn is_some(&self) -> bool {
        self.0 != 0
    }
}

impl Default for WorkspaceHandle {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for WorkspaceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "ws:none")
        } else {
            write!(f, "ws:{}", self.0)
        }
    }
}

/// Monotonic allocator for workspace handles
///
/// Starts at 1 (0 is the `NONE` sentinel) and only ever counts up. The
/// allocator deliberately survives a manager reset so that handles issued
/// before the reset can never collide with handles issued after it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandleAllocator {
    next: u64,
}

impl HandleAllocator {
    /// Creates a new allocator
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Allocates the next handle
    pub fn allocate(&mut self) -> WorkspaceHandle {
        let handle = WorkspaceHandle(self.next);
        self.next += 1;
        handle
    }

    /// Checks whether a handle has ever been issued by this allocator
    ///
    /// Distinguishes "never opened" from "opened and since closed": a
    /// closed handle was issued, an unknown one was not. `NONE` is never
    /// issued.
    pub fn issued(&self, handle: WorkspaceHandle) -> bool {
        handle.is_some() && handle.0 < self.next
    }
}

impl Default for HandleAllocator {
    fn default() -> Self {
        Self::new()
    }
}
