//! # Workspace Navigation Manager Service
//!
//! This crate implements the multi-workspace navigation manager: a small,
//! bounded set of concurrently open workspaces (think browser tabs), with
//! a capacity policy, an editing lock that exempts a workspace from
//! eviction, and an ordered recency history used for fallback navigation.
//!
//! ## Philosophy
//!
//! - **The manager orchestrates, the shell renders**: all UI work goes
//!   through the injected `ShellDelegate`
//! - **Lifecycle is observable**: every transition is wrapped in Will/Did
//!   events on the `LifecycleBus`
//! - **Explicit instance, no ambient state**: the manager is constructed
//!   and owned by its caller, never a global
//! - **Edits outrank capacity**: eviction never touches a workspace
//!   holding the editing lock, even if that overshoots the capacity
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A window manager or renderer
//! - A persistence layer (workspaces do not survive the process)
//! - Thread-safe: callers serialize all operations (the `&mut self`
//!   surface enforces this at compile time)

pub mod bus;
pub mod context;
pub mod registry;
pub mod shell;

pub use bus::{LifecycleBus, LifecycleObserver, ObserverId};
pub use context::{ContextStore, ScratchTable};
pub use registry::WorkspaceRegistry;
pub use shell::{FakeShell, ShellCall, ShellDelegate, ShellLog};
pub use workspace_types::{
    ControllerInfo, HandleAllocator, WorkspaceEvent, WorkspaceHandle, WorkspaceRecord,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Workspace navigation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavError {
    #[error("Unknown workspace: {0}")]
    UnknownWorkspace(WorkspaceHandle),

    #[error("Operation not permitted on the start workspace: {0}")]
    StartWorkspace(WorkspaceHandle),

    #[error("No current workspace")]
    NoCurrentWorkspace,
}

/// Workspace manager configuration
///
/// Capacity bounds the number of simultaneously open workspaces that are
/// neither the start workspace nor holding the editing lock. Defaults
/// to 2, sized for memory-constrained mobile shells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// Maximum number of open non-start, non-editing workspaces
    pub capacity: usize,
}

impl ManagerConfig {
    /// Creates the default configuration
    pub fn new() -> Self {
        Self { capacity: 2 }
    }

    /// Sets the workspace capacity
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Multi-workspace navigation manager
///
/// Orchestrates creation, focus switching, closing, eviction, and
/// editing-lock enforcement over the registry, emitting lifecycle events
/// around every transition and delegating all rendering to the shell.
///
/// Workspaces form a bounded LRU-like cache: eviction happens proactively
/// before an insert would exceed capacity, and always targets the oldest
/// eligible workspace (smallest handle, since handles are monotonic).
pub struct WorkspaceManager {
    registry: WorkspaceRegistry,
    allocator: HandleAllocator,
    bus: LifecycleBus,
    shell: Box<dyn ShellDelegate>,
    context: Box<dyn ContextStore>,
    config: ManagerConfig,
}

impl WorkspaceManager {
    /// Creates a manager with the default configuration
    pub fn new(shell: Box<dyn ShellDelegate>, context: Box<dyn ContextStore>) -> Self {
        Self {
            registry: WorkspaceRegistry::new(),
            allocator: HandleAllocator::new(),
            bus: LifecycleBus::new(),
            shell,
            context,
            config: ManagerConfig::default(),
        }
    }

    /// Overrides the configuration
    pub fn with_config(mut self, config: ManagerConfig) -> Self {
        self.config = config;
        self
    }

    /// Establishes the permanent home workspace
    ///
    /// Allocates a handle, designates it as start, and makes it current.
    /// If a start workspace already exists this is a no-op returning the
    /// existing handle.
    pub fn add_root(&mut self) -> WorkspaceHandle {
        if self.registry.start().is_some() {
            return self.registry.start();
        }

        let handle = self.allocator.allocate();
        self.registry.insert(handle, &ControllerInfo::new());
        self.registry.set_start(handle);

        self.bus
            .publish(|sequence| WorkspaceEvent::WillAdd { handle, sequence });
        self.shell.mount_workspace(handle);
        self.registry.set_current(handle);
        self.registry.touch(handle);
        self.bus
            .publish(|sequence| WorkspaceEvent::DidAdd { handle, sequence });

        self.update_switcher();
        handle
    }

    /// Opens a brand-new workspace for a controller
    ///
    /// Applies the capacity policy first: if the count of open non-start,
    /// non-editing workspaces has reached capacity, the oldest of them is
    /// closed before the new one is created. When every open workspace is
    /// exempt (start or editing) nothing is evicted and the soft capacity
    /// is intentionally exceeded.
    ///
    /// If the outgoing workspace is flagged auto-destruct-on-leave it is
    /// closed after the new workspace is mounted, so the shell never has
    /// zero mounted workspaces mid-transition.
    pub fn open_for_controller(&mut self, controller: &ControllerInfo) -> WorkspaceHandle {
        let previous = self.registry.current();
        let close_previous = self.leaving_destroys(previous);

        if self.registry.evictable_count() >= self.config.capacity {
            let victim = self.registry.eviction_candidate();
            if victim.is_some() {
                self.close_open(victim);
            }
        }

        let handle = self.allocator.allocate();
        self.registry.insert(handle, controller);

        self.bus
            .publish(|sequence| WorkspaceEvent::WillAdd { handle, sequence });
        self.shell.mount_workspace(handle);
        self.registry.set_current(handle);
        self.registry.touch(handle);

        // Seeded after the new workspace became current, so the scan
        // lands on the workspace the user just left.
        let origin = self.registry.last_used();
        if let Some(record) = self.registry.record_mut(handle) {
            record.origin = origin;
        }

        self.bus
            .publish(|sequence| WorkspaceEvent::DidAdd { handle, sequence });

        self.update_switcher();

        if close_previous {
            // May already be gone if eviction picked it; close absorbs that.
            let _ = self.close(previous);
        }

        handle
    }

    /// Moves focus to an already-open workspace
    ///
    /// Events fire in the order `WillLeave(old)`, `WillEnter(new)`,
    /// `DidEnter(new)`, `DidLeave(old)`: on the Did side the new workspace
    /// becomes authoritative before teardown tied to the old one runs.
    /// Switching to the current workspace is a no-op. Handles that are not
    /// open are rejected; callers must `open_for_controller` first.
    pub fn switch_to(&mut self, handle: WorkspaceHandle) -> Result<(), NavError> {
        if !self.registry.contains(handle) {
            return Err(NavError::UnknownWorkspace(handle));
        }
        let old = self.registry.current();
        if handle == old {
            return Ok(());
        }
        let close_previous = self.leaving_destroys(old);

        if old.is_some() {
            self.bus
                .publish(|sequence| WorkspaceEvent::WillLeave { handle: old, sequence });
        }

        self.registry.touch(handle);
        self.bus
            .publish(|sequence| WorkspaceEvent::WillEnter { handle, sequence });
        self.registry.set_current(handle);
        self.shell.switch_focus(old, handle);
        self.bus
            .publish(|sequence| WorkspaceEvent::DidEnter { handle, sequence });
        if old.is_some() {
            self.bus
                .publish(|sequence| WorkspaceEvent::DidLeave { handle: old, sequence });
        }

        if close_previous {
            self.close(old)?;
        }
        Ok(())
    }

    /// Moves focus to the start workspace, creating it if necessary
    ///
    /// A no-op (no events, no shell calls) when the start workspace is
    /// already current.
    pub fn switch_to_start(&mut self) -> Result<WorkspaceHandle, NavError> {
        if self.registry.start().is_none() {
            return Ok(self.add_root());
        }
        let start = self.registry.start();
        if self.registry.current() != start {
            self.switch_to(start)?;
        }
        Ok(start)
    }

    /// Closes a workspace
    ///
    /// Closing the currently focused workspace does not switch focus; it
    /// only drops the focus to nothing. Callers wanting "close and fall
    /// back" use [`WorkspaceManager::close_current_with_fallback`].
    ///
    /// Closing an already-closed handle is a no-op. A handle that was
    /// never issued is an error, as is the start workspace, which only
    /// [`WorkspaceManager::release`] removes.
    pub fn close(&mut self, handle: WorkspaceHandle) -> Result<(), NavError> {
        if !self.allocator.issued(handle) {
            return Err(NavError::UnknownWorkspace(handle));
        }
        if handle == self.registry.start() {
            return Err(NavError::StartWorkspace(handle));
        }
        if !self.registry.contains(handle) {
            // Issued but already closed: double-close is a no-op.
            return Ok(());
        }
        self.close_open(handle);
        Ok(())
    }

    /// Closes the current workspace and falls back to its origin
    ///
    /// The fallback target is the workspace that was active when the
    /// current one was created, if it is still open; otherwise the start
    /// workspace (created on demand). Returns the new current handle.
    pub fn close_current_with_fallback(&mut self) -> Result<WorkspaceHandle, NavError> {
        let previous = self.registry.current();
        if previous.is_none() {
            return Err(NavError::NoCurrentWorkspace);
        }
        if previous == self.registry.start() {
            return Err(NavError::StartWorkspace(previous));
        }

        let origin = self
            .registry
            .record(previous)
            .map(|r| r.origin)
            .unwrap_or(WorkspaceHandle::NONE);

        let target = if origin.is_some() && self.registry.contains(origin) {
            self.switch_to(origin)?;
            origin
        } else {
            self.switch_to_start()?
        };

        // The switch may already have closed an auto-destruct workspace.
        self.close(previous)?;
        Ok(target)
    }

    /// Sets or clears the editing lock on a workspace
    ///
    /// While set, the workspace neither counts against capacity nor gets
    /// evicted. The caller owns this flag: it is pushed here on entering
    /// and leaving edit mode, never inferred from the controller.
    pub fn set_editing(&mut self, handle: WorkspaceHandle, editing: bool) -> Result<(), NavError> {
        let record = self
            .registry
            .record_mut(handle)
            .ok_or(NavError::UnknownWorkspace(handle))?;
        record.editing = editing;
        Ok(())
    }

    /// Sets a workspace's display title
    pub fn set_title(
        &mut self,
        handle: WorkspaceHandle,
        title: impl Into<String>,
    ) -> Result<(), NavError> {
        let record = self
            .registry
            .record_mut(handle)
            .ok_or(NavError::UnknownWorkspace(handle))?;
        record.title = Some(title.into());
        Ok(())
    }

    /// Sets a workspace's display subtitle
    pub fn set_subtitle(
        &mut self,
        handle: WorkspaceHandle,
        subtitle: impl Into<String>,
    ) -> Result<(), NavError> {
        let record = self
            .registry
            .record_mut(handle)
            .ok_or(NavError::UnknownWorkspace(handle))?;
        record.subtitle = Some(subtitle.into());
        Ok(())
    }

    /// Checks whether any workspace holds the editing lock
    ///
    /// Consulted before destructive global operations such as a full data
    /// resync.
    pub fn has_editing_workspace(&self) -> bool {
        self.registry.has_editing_workspace()
    }

    /// First workspace holding the editing lock, or `NONE`
    pub fn editing_workspace(&self) -> WorkspaceHandle {
        self.registry.editing_workspace()
    }

    /// Workspaces to render in the switcher UI
    ///
    /// All open workspaces except start, unless start is the only one
    /// open, in which case it is included.
    pub fn working_workspaces(&self) -> Vec<&WorkspaceRecord> {
        self.registry.working_list()
    }

    /// Most recently used workspace other than start and current
    pub fn last_used_workspace(&self) -> WorkspaceHandle {
        self.registry.last_used()
    }

    /// Currently focused workspace (`NONE` when nothing is focused)
    pub fn current(&self) -> WorkspaceHandle {
        self.registry.current()
    }

    /// Start workspace handle (`NONE` until `add_root`)
    pub fn start(&self) -> WorkspaceHandle {
        self.registry.start()
    }

    /// Checks whether a handle is currently open
    pub fn is_open(&self, handle: WorkspaceHandle) -> bool {
        self.registry.contains(handle)
    }

    /// Returns the record for an open workspace
    pub fn record(&self, handle: WorkspaceHandle) -> Option<&WorkspaceRecord> {
        self.registry.record(handle)
    }

    /// Number of open workspaces
    pub fn open_count(&self) -> usize {
        self.registry.len()
    }

    /// Configured capacity
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Subscribes a lifecycle observer
    pub fn subscribe(&mut self, observer: Box<dyn LifecycleObserver>) -> ObserverId {
        self.bus.subscribe(observer)
    }

    /// Removes a lifecycle subscription
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Published lifecycle events, oldest first
    pub fn events(&self) -> &[WorkspaceEvent] {
        self.bus.history()
    }

    /// Clears the event history (for testing)
    #[cfg(test)]
    pub fn clear_events(&mut self) {
        self.bus.clear_history();
    }

    /// Resets all workspace state
    ///
    /// Used on logout: every record, the recency history, the focus, and
    /// the start designation are dropped, and all scratch context is
    /// purged. Observers stay subscribed. The handle allocator is *not*
    /// reset, so handles are never reused within the process. Must only
    /// be called between transitions.
    pub fn release(&mut self) {
        self.registry.reset();
        self.context.purge_all();
        self.bus.clear_history();
    }

    /// Checks whether leaving `handle` should close it
    fn leaving_destroys(&self, handle: WorkspaceHandle) -> bool {
        handle.is_some()
            && handle != self.registry.start()
            && self
                .registry
                .record(handle)
                .map(|r| r.auto_destruct_on_leave)
                .unwrap_or(false)
    }

    /// Full close sequence for a handle known to be open and not start
    fn close_open(&mut self, handle: WorkspaceHandle) {
        self.bus
            .publish(|sequence| WorkspaceEvent::WillClose { handle, sequence });
        self.shell.unmount_workspace(handle);
        self.registry.remove(handle);
        self.context.purge_workspace(handle);
        self.bus
            .publish(|sequence| WorkspaceEvent::DidClose { handle, sequence });
        self.update_switcher();
    }

    fn update_switcher(&mut self) {
        self.shell.set_switcher_visible(self.registry.len() > 1);
    }
}
