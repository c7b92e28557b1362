//! Analysis engine for determining bump kinds from commits

pub mod bump_classifier;

pub use bump_classifier::BumpClassifier;
