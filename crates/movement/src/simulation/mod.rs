mod targets;
mod tick;

pub use targets::{Target, TargetRegistry};
pub use tick::{FixedTimestep, Stage};
