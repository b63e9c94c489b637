//! Common test utilities for the Eti/Domo client
//!
//! Provides in-memory transports so sessions can be exercised without a
//! controller on the network.

#![allow(dead_code)]

mod fake_controller;
mod fixtures;
mod scripted_transport;

pub use fake_controller::*;
pub use fixtures::*;
pub use scripted_transport::*;
