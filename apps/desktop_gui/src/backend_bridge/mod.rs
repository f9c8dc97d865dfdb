//! UI-to-backend command queue and the worker that drains it.

pub mod commands;
pub mod runtime;
