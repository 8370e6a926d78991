//! Audio sources for the headless runner

pub mod clip;
pub mod player;
pub mod spectrum;

pub use clip::Clip;
pub use player::ClipPlayer;
