//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the controller's orchestration rules: health
//! interlock, event ingress, the task state machine, and status
//! publishing.  All interaction with the outside world happens through
//! **port traits** defined in [`ports`], keeping this layer fully
//! testable without a transport.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
