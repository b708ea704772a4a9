//! # Workspace Types
//!
//! Shared value types for the multi-workspace navigation system.
//!
//! ## Philosophy
//!
//! - **Handles are opaque**: callers never construct or interpret handle values
//! - **Records are state, not behavior**: all orchestration lives in the manager
//! - **Events are data**: lifecycle transitions are serializable values
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A UI model (no views, no layout)
//! - A persistence format (workspace state does not survive the process)

pub mod event;
pub mod handle;
pub mod record;

pub use event::WorkspaceEvent;
pub use handle::{HandleAllocator, WorkspaceHandle};
pub use record::{ControllerInfo, WorkspaceRecord};
