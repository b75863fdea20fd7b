//! Hippo maze game library crate.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

#[cfg(feature = "sdl")]
#[cfg_attr(coverage_nightly, coverage(off))]
pub mod app;
#[cfg_attr(coverage_nightly, coverage(off))]
pub mod error;
#[cfg_attr(coverage_nightly, coverage(off))]
pub mod events;
#[cfg_attr(coverage_nightly, coverage(off))]
pub mod formatter;
#[cfg_attr(coverage_nightly, coverage(off))]
pub mod platform;

pub mod asset;
pub mod config;
pub mod constants;
pub mod game;
pub mod map;
pub mod systems;
