//! Read-only presentation data for renderers
//!
//! Nothing in here mutates the simulation. Hosts build a `Scene` after each
//! frame's ticks and draw it however they like.

pub mod scene;
pub mod sprites;

pub use scene::{DrawItem, Hud, Scene};
pub use sprites::{NoSprites, SpriteCache, SpriteError, SpriteKey, SpriteSource, Visual};
