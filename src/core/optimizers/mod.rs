pub mod clipping;
pub mod controller;
pub mod rmsprop;

pub use clipping::{ClipReport, WeightClipper};
pub use controller::AdversarialOptimizer;
pub use rmsprop::{ParamsRmsProp, RmsProp};

#[cfg(test)]
mod __tests__;
