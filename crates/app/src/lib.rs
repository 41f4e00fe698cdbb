//! Application state for the catalog browser: hash-fragment routing, the
//! command reducer over filter/page/navigation state, render snapshots, and
//! the persisted theme preference.
//!
//! The view layer only dispatches [`Command`]s and renders the resulting
//! [`RenderModel`]; no decision logic lives outside the reducer.

mod command;
mod route;
mod state;
mod theme;

pub use command::*;
pub use route::*;
pub use state::*;
pub use theme::*;
