//! Per-workspace state records

use crate::handle::WorkspaceHandle;
use serde::{Deserialize, Serialize};

/// Snapshot of the controller properties observed at workspace creation
///
/// The controller itself is opaque to this core. Only two of its
/// properties matter here, and both are captured once when the workspace
/// is opened; the manager never polls the controller afterwards. The
/// `editing` flag is kept in sync by the caller through
/// `WorkspaceManager::set_editing`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerInfo {
    /// Whether the workspace should be closed when focus leaves it
    pub auto_destruct_on_leave: bool,
    /// Whether the workspace starts out in editing mode
    pub is_editing: bool,
}

impl ControllerInfo {
    /// Creates controller info with both flags cleared
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the auto-destruct-on-leave flag
    pub fn with_auto_destruct(mut self, auto_destruct: bool) -> Self {
        self.auto_destruct_on_leave = auto_destruct;
        self
    }

    /// Sets the initial editing flag
    pub fn with_editing(mut self, editing: bool) -> Self {
        self.is_editing = editing;
        self
    }
}

/// Transient state for one open workspace
///
/// A record exists in the registry exactly while its handle is open.
/// Records hold state only; every transition over them is driven by the
/// manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceRecord {
    /// Handle identifying this workspace (immutable after creation)
    pub handle: WorkspaceHandle,
    /// Display title, if one has been assigned
    pub title: Option<String>,
    /// Display subtitle, if one has been assigned
    pub subtitle: Option<String>,
    /// Editing lock: while set, this workspace is exempt from eviction
    pub editing: bool,
    /// Whether this workspace closes itself when focus leaves it
    pub auto_destruct_on_leave: bool,
    /// Fallback origin: the workspace to return to when this one closes
    /// without an explicit successor (`NONE` if it had no predecessor)
    pub origin: WorkspaceHandle,
}

impl WorkspaceRecord {
    /// Creates a record for a freshly allocated handle
    pub fn new(handle: WorkspaceHandle, controller: &ControllerInfo) -> Self {
        Self {
            handle,
            title: None,
            subtitle: None,
            editing: controller.is_editing,
            auto_destruct_on_leave: controller.auto_destruct_on_leave,
            origin: WorkspaceHandle::NONE,
        }
    }

    /// Checks whether this workspace counts against capacity and may be
    /// evicted
    ///
    /// The start workspace and workspaces holding the editing lock are
    /// exempt.
    pub fn evictable(&self, start: WorkspaceHandle) -> bool {
        self.handle != start && !self.editing
    }
}
