//! Engine-agnostic building blocks for the bubble game: explicit-timestamp
//! cadences, landmark input types, tuning profiles and the hand-position
//! tracker.

pub mod input;
pub mod profile;
pub mod time;
pub mod tracker;

pub use input::{BodyPoint, Handedness, InputSample, Landmark, ScreenSize};
pub use profile::TuningProfile;
pub use time::Cadence;
pub use tracker::{PositionTracker, TrackerConfig, TrackerStatus};
