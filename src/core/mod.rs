pub mod dimensions;
pub mod matcher;
pub mod scoring;

pub use dimensions::{business_dimensions, personal_dimensions, DimensionInfo};
pub use matcher::{MatchPolicy, Matcher};
