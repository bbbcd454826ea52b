#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Terminal user-profile intake form.
//!
//! A profile is entered on a validated form, persisted to a local JSON
//! collection, and reported to an optional callback. Countries for the
//! location selector come from one fire-and-forget fetch at startup.

pub mod model;
pub mod reference;
pub mod storage;
pub mod tui;
