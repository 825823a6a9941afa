pub mod constants;
pub mod coordinates;
pub mod progress;

pub use constants::*;
pub use coordinates::{parse_hemisphere_coordinate, HemisphereMode};
pub use progress::ProgressReporter;
