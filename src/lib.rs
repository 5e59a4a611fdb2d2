//! Reel View Tracker library.
//!
//! Walks a creator's public media feed through the Graph API business
//! discovery endpoint and sums reel views posted after a chosen stopping reel.

pub mod config;
pub mod constants;
pub mod graph;
pub mod report;
pub mod scanner;
pub mod throttle;
