//! UI module root: exposes drawing functions for individual panels.

pub mod activity;
pub mod distribution;
pub mod feed;
pub mod header;
pub mod stats;
pub mod theme;
pub mod util;
