pub mod export;
pub mod factors;
pub mod geometry;
pub mod sizing;
