//! Shell delegate boundary
//!
//! The manager never renders anything itself. Mounting, unmounting, and
//! focus transitions are delegated to the rendering shell through this
//! trait; the manager only decides *when* each call happens and in what
//! order relative to the lifecycle events.

pub mod fake;

pub use fake::{FakeShell, ShellCall, ShellLog};

use workspace_types::WorkspaceHandle;

/// Rendering shell consumed by the workspace manager
///
/// Calls are synchronous from the manager's point of view; a shell that
/// animates transitions is expected to have already scheduled its own
/// asynchronous work by the time it returns.
pub trait ShellDelegate {
    /// Builds and mounts the UI for a freshly added workspace
    fn mount_workspace(&mut self, handle: WorkspaceHandle);

    /// Tears down the UI for a workspace that is closing
    fn unmount_workspace(&mut self, handle: WorkspaceHandle);

    /// Performs the visible focus transition
    ///
    /// Both handles are passed so the shell can run a single combined
    /// transition. `from` is `NONE` when focus comes from nowhere.
    fn switch_focus(&mut self, from: WorkspaceHandle, to: WorkspaceHandle);

    /// Shows or hides the workspace switcher affordance
    fn set_switcher_visible(&mut self, visible: bool);
}
