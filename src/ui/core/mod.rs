//! Core UI functionality for claimdesk.
//!
//! This module contains the building blocks every screen uses: the action
//! type that carries state transitions, the component trait, the shared
//! context, terminal event polling and background task management.
//!
//! # Architecture
//!
//! 1. **Components** implement the [`Component`] trait for consistent rendering
//! 2. **Actions** describe state transitions and user intent
//! 3. **Context** provides the backend, token store, config and logger
//! 4. **Events** are polled through the [`EventHandler`]
//! 5. **Backend calls** run as tokio tasks owned by the [`TaskManager`] and
//!    report back as actions over an unbounded channel
//!
//! [`operations`] holds the async work those tasks perform.

pub mod actions;
pub mod component;
pub mod context;
pub mod event_handler;
pub mod load_state;
pub mod operations;
pub mod task_manager;

pub use actions::{Action, DialogType, PageData};
pub use component::Component;
pub use context::AppContext;
pub use event_handler::{EventHandler, EventType};
pub use load_state::LoadState;
pub use operations::{Outcome, Submission};
pub use task_manager::{TaskId, TaskKind, TaskManager};
