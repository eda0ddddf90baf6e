//! Encuestas Dashboard - survey call-log analytics
//!
//! Loads a call-log CSV export once and derives the interaction summary, party
//! preference rankings and cross-tabs, and the government approval distribution,
//! optionally scoped to a single date.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod stats;
