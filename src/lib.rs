//! Align chassis task-execution controller.
//!
//! Exposes the pure-logic modules for integration testing and the host
//! adapters used by the `align-chassis` binary.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod events;
pub mod fsm;
pub mod ingress;
pub mod safety;
pub mod telemetry;
pub mod wire;
