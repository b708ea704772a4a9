//! Fake shell implementation for testing
//!
//! Provides a deterministic, in-memory shell that records every delegate
//! call. The call log is shared through a cloneable handle so tests keep
//! visibility after the fake has been boxed into the manager.

use super::ShellDelegate;
use std::cell::RefCell;
use std::rc::Rc;
use workspace_types::WorkspaceHandle;

/// One recorded delegate call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCall {
    /// `mount_workspace` was called
    Mount(WorkspaceHandle),
    /// `unmount_workspace` was called
    Unmount(WorkspaceHandle),
    /// `switch_focus` was called
    SwitchFocus {
        from: WorkspaceHandle,
        to: WorkspaceHandle,
    },
    /// `set_switcher_visible` was called
    SetSwitcherVisible(bool),
}

/// Cloneable handle onto a fake shell's call log
#[derive(Clone, Default)]
pub struct ShellLog {
    calls: Rc<RefCell<Vec<ShellCall>>>,
}

impl ShellLog {
    /// Returns a snapshot of all recorded calls, oldest first
    pub fn calls(&self) -> Vec<ShellCall> {
        self.calls.borrow().clone()
    }

    /// Number of recorded calls
    pub fn len(&self) -> usize {
        self.calls.borrow().len()
    }

    /// Checks whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.calls.borrow().is_empty()
    }

    /// Clears the recorded calls
    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: ShellCall) {
        self.calls.borrow_mut().push(call);
    }
}

/// Fake shell for testing
///
/// Records every call in order and otherwise does nothing.
#[derive(Default)]
pub struct FakeShell {
    log: ShellLog,
}

impl FakeShell {
    /// Creates a fake shell with an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a handle onto this shell's call log
    pub fn log(&self) -> ShellLog {
        self.log.clone()
    }
}

impl ShellDelegate for FakeShell {
    fn mount_workspace(&mut self, handle: WorkspaceHandle) {
        self.log.record(ShellCall::Mount(handle));
    }

    fn unmount_workspace(&mut self, handle: WorkspaceHandle) {
        self.log.record(ShellCall::Unmount(handle));
    }

    fn switch_focus(&mut self, from: WorkspaceHandle, to: WorkspaceHandle) {
        self.log.record(ShellCall::SwitchFocus { from, to });
    }

    fn set_switcher_visible(&mut self, visible: bool) {
        self.log.record(ShellCall::SetSwitcherVisible(visible));
    }
}
