pub mod exercises;
pub mod progress;
pub mod similarity;
pub mod verses;
