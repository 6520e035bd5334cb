//! The Tyche console: dispatch, handlers, and output.
//!
//! This crate turns parsed console lines into effects. It owns:
//!
//! - [`Dispatcher`] — routes a line through the matcher and an exhaustive
//!   [`CommandKind`] table to its handler.
//! - [`LogSink`] / [`CommandHistory`] — the console's append-only output and
//!   the most-recent-first line history.
//! - [`HubContext`] — the collaborator seams handlers call into
//!   ([`LiveChannel`], [`MediaControl`], [`TimerBackend`]).
//! - [`render_command_list`] / [`render_man_page`] — markup-aware help text.
//! - [`TaskSpawner`] — explicit fire-and-forget tails for handlers whose
//!   results arrive asynchronously.
//!
//! Failures never escape as errors: `execute` returns `false` for unknown
//! input and every diagnostic lands in the sink as one entry.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tyche_console::{Dispatcher, HubContext, LiveChannel, MediaControl, TimerBackend, TimerEntry};
//!
//! struct Offline;
//! impl LiveChannel for Offline {
//!     fn connect(&self) {}
//!     fn disconnect(&self) {}
//! }
//! impl MediaControl for Offline {
//!     fn set_volume(&self, _: f64) {}
//!     fn play(&self) {}
//!     fn pause(&self) {}
//!     fn next(&self) {}
//!     fn previous(&self) {}
//! }
//! impl TimerBackend for Offline {
//!     fn list_timers(&self) -> Vec<TimerEntry> {
//!         Vec::new()
//!     }
//! }
//!
//! let ctx = HubContext::new(Arc::new(Offline), Arc::new(Offline), Arc::new(Offline));
//! let dispatcher = Dispatcher::new(ctx);
//!
//! assert!(dispatcher.submit("calc carbs --per-100g 40 --amount 150"));
//! let entries = dispatcher.sink().entries();
//! assert_eq!(entries.last().unwrap().message, "60");
//! ```

mod actions;
mod builtin;
mod context;
mod dispatch;
mod log;
mod man;
mod tasks;

pub use actions::{LiveChannel, MediaControl, TimerBackend, TimerEntry};
pub use builtin::builtin_registry;
pub use context::HubContext;
pub use dispatch::{CommandKind, Diagnostic, Dispatcher};
pub use log::{CommandHistory, ConsoleLine, LogSink, Origin, Severity};
pub use man::{render_command_list, render_man_page, strip_entities};
pub use tasks::TaskSpawner;
