mod classifier;

pub use classifier::{PolicyClassifier, ToolClass};
