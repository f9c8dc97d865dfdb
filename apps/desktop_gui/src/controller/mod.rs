//! Controller layer: UI events, error modeling, and command orchestration.
//! Form state itself lives in `client_core::form`.

pub mod events;
pub mod orchestration;
