//! Workspace lifecycle events

use crate::handle::WorkspaceHandle;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle event announced around every workspace transition
///
/// Events come in Will/Did pairs wrapped around each transition. The
/// sequence number is stamped by the bus at publish time; within one
/// manager instance it totally orders all events.
///
/// The contract observers rely on: a focus switch fires
/// `WillLeave(old), WillEnter(new), DidEnter(new), DidLeave(old)`. The
/// Did pair fires enter-before-leave, so observers can treat the new
/// workspace as authoritative before any teardown tied to the old one
/// runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkspaceEvent {
    /// A workspace is about to be added
    WillAdd {
        handle: WorkspaceHandle,
        sequence: u64,
    },
    /// A workspace has been added and is now current
    DidAdd {
        handle: WorkspaceHandle,
        sequence: u64,
    },
    /// Focus is about to leave this workspace
    WillLeave {
        handle: WorkspaceHandle,
        sequence: u64,
    },
    /// Focus is about to enter this workspace
    WillEnter {
        handle: WorkspaceHandle,
        sequence: u64,
    },
    /// Focus now rests on this workspace
    DidEnter {
        handle: WorkspaceHandle,
        sequence: u64,
    },
    /// Focus has left this workspace
    DidLeave {
        handle: WorkspaceHandle,
        sequence: u64,
    },
    /// A workspace is about to close
    WillClose {
        handle: WorkspaceHandle,
        sequence: u64,
    },
    /// A workspace has closed
    DidClose {
        handle: WorkspaceHandle,
        sequence: u64,
    },
}

impl WorkspaceEvent {
    /// Returns the handle this event refers to
    pub fn handle(&self) -> WorkspaceHandle {
        match self {
            WorkspaceEvent::WillAdd { handle, .. }
            | WorkspaceEvent::DidAdd { handle, .. }
            | WorkspaceEvent::WillLeave { handle, .. }
            | WorkspaceEvent::WillEnter { handle, .. }
            | WorkspaceEvent::DidEnter { handle, .. }
            | WorkspaceEvent::DidLeave { handle, .. }
            | WorkspaceEvent::WillClose { handle, .. }
            | WorkspaceEvent::DidClose { handle, .. } => *handle,
        }
    }

    /// Returns the bus-stamped sequence number
    pub fn sequence(&self) -> u64 {
        match self {
            WorkspaceEvent::WillAdd { sequence, .. }
            | WorkspaceEvent::DidAdd { sequence, .. }
            | WorkspaceEvent::WillLeave { sequence, .. }
            | WorkspaceEvent::WillEnter { sequence, .. }
            | WorkspaceEvent::DidEnter { sequence, .. }
            | WorkspaceEvent::DidLeave { sequence, .. }
            | WorkspaceEvent::WillClose { sequence, .. }
            | WorkspaceEvent::DidClose { sequence, .. } => *sequence,
        }
    }
}

impl fmt::Display for WorkspaceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkspaceEvent::WillAdd { .. } => "WillAdd",
            WorkspaceEvent::DidAdd { .. } => "DidAdd",
            WorkspaceEvent::WillLeave { .. } => "WillLeave",
            WorkspaceEvent::WillEnter { .. } => "WillEnter",
            WorkspaceEvent::DidEnter { .. } => "DidEnter",
            WorkspaceEvent::DidLeave { .. } => "DidLeave",
            WorkspaceEvent::WillClose { .. } => "WillClose",
            WorkspaceEvent::DidClose { .. } => "DidClose",
        };
        write!(f, "{}({})", name, self.handle())
    }
}
