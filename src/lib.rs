/// Side-scrolling shooter core: scenery and enemies that scroll, retire and
/// respawn; a player state machine; a homing UFO. Rendering, input polling
/// and audio live in the binary.

pub mod arena;
pub mod assets;
pub mod bullet;
pub mod config;
pub mod enemy;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod player;
pub mod scroll;
pub mod stats;
pub mod ufo;
pub mod world;

pub use error::AssetError;
pub use world::{GameEvent, World};
