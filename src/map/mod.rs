//! This module defines the game map: layouts, brick tiling and level loading.

pub mod builder;
pub mod layout;
pub mod loader;
