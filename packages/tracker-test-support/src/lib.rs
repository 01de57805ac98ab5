//! Tracker test support utilities
//!
//! Shared helpers for the tracker's integration tests. Currently this is the
//! unified logging initialization used by every test binary.

pub mod logging;
