pub mod chart;
pub mod results;

pub use results::{BenchmarkResults, Input, Method};
