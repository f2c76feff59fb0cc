mod leader;
mod run_detector;
mod scorer;

pub use leader::leader_length;
pub use run_detector::{DropoutEvent, RunDetector};
pub use scorer::{DupScorer, Score};
