//! The Entity-Component-System (ECS) module.
//!
//! Components, resources and the systems that drive a scene.

pub mod animation;
pub mod collision;
pub mod components;
pub mod enemy;
pub mod input;
pub mod physics;
pub mod player;
#[cfg(feature = "sdl")]
pub mod render;
pub mod scene;
pub mod state;
