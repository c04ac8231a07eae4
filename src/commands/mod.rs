//! CLI command handlers.
//!
//! Each handler calls one service operation and prints its result. Read
//! commands always succeed; action commands report failures to the caller.

mod actions;
pub mod config;
mod inspect;
pub mod services;

pub use actions::{add, edit, exec, export, init, reinit, run, stop};
pub use inspect::{features, info, packages, tasks};
