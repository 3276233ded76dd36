//! hubscout
//!
//! GitHub user search client core: a gateway over the search and profile
//! endpoints, pure state machines for the search session and the detail
//! overlay, and a URL codec plus synchronization controller that keep a
//! displayed location in lockstep with session state.
//!
//! Pure Core / Impure Shell: every state transition lives in a plain
//! struct with synchronous methods; the async shells only sequence
//! gateway calls and enforce the latest-issued-wins staleness rule.

pub mod config;
pub mod gateway;
pub mod location;
pub mod logging;
pub mod model;
pub mod state;
pub mod surface;

#[cfg(test)]
mod test_harness;
