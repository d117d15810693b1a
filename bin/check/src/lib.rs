//! Headless harness for the meetgate access gate.
//!
//! Reads recorded sign-in tokens, replays them through a real
//! [`AccessGate`](meetgate_access::AccessGate) and reports every sign-in
//! state change as a JSON line.

pub mod config;
pub mod console;
pub mod error;
pub mod output;
pub mod replay;
pub mod run;
