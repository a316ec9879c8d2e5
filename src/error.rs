use thiserror::Error;

/// Failures surfaced by the platform asset layer.
///
/// Both variants are fatal: a world cannot be built without every visual it
/// may later need, so construction aborts instead of continuing with a
/// missing sprite.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssetError {
    #[error("cannot load image: {0}")]
    MissingVisual(String),
    #[error("cannot load sound: {0}")]
    MissingSound(String),
}
