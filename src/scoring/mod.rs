//! Scoring and grading
//!
//! - `evaluator` turns a category's checks into a normalized score with
//!   issue/warning/success lists
//! - `grade` maps scores to letter grades through configurable band tables

mod evaluator;
mod grade;

pub(crate) use evaluator::top_quartile_threshold;
pub use evaluator::{overall_summary, CategoryEvaluator};
pub use grade::{Band, BandTable, GradeScale};
