//! Editor core for a small 3D scene: placed meshes with material and light
//! properties, two-axis mouse tools, tag-pass picking, ground placement and a
//! flat binary save format.
//!
//! Windowing, shader wiring, asset decoding and draw submission live outside
//! this crate behind [`render::SceneRenderer`], [`render::TagTarget`] and
//! [`assets::AssetLoader`].

pub mod app;
pub mod assets;
pub mod cli;
pub mod config;
pub mod render;
pub mod scene;
