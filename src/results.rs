use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Benchmark workloads, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Input {
    A,
    B,
    C,
    D,
}

impl Input {
    pub fn all() -> &'static [Input] {
        &[Input::A, Input::B, Input::C, Input::D]
    }

    /// Key used in the benchmark results document
    pub fn key(&self) -> &'static str {
        match self {
            Input::A => "input_a",
            Input::B => "input_b",
            Input::C => "input_c",
            Input::D => "input_d",
        }
    }

    /// Short label for axis ticks
    pub fn label(&self) -> &'static str {
        match self {
            Input::A => "A",
            Input::B => "B",
            Input::C => "C",
            Input::D => "D",
        }
    }
}

/// Matmul backends under benchmark, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Eigen,
    MatrixMultiply,
    Cblas,
}

impl Method {
    pub fn all() -> &'static [Method] {
        &[Method::Eigen, Method::MatrixMultiply, Method::Cblas]
    }

    /// Key used in the results document and in chart legends
    pub fn name(&self) -> &'static str {
        match self {
            Method::Eigen => "eigen",
            Method::MatrixMultiply => "matrixmultiply",
            Method::Cblas => "cblas",
        }
    }
}

/// Timings loaded from `data.json`: thread count -> input -> method -> seconds.
///
/// The document is taken as-is at load time; missing keys are only reported
/// when a chart asks for them.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct BenchmarkResults(HashMap<String, HashMap<String, HashMap<String, f64>>>);

impl BenchmarkResults {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let results = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(results)
    }

    /// Runtime in seconds for one (thread count, input, method) cell
    pub fn duration(&self, thread_key: &str, input: Input, method: Method) -> Result<f64> {
        let by_input = self
            .0
            .get(thread_key)
            .with_context(|| format!("No results for thread count {}", thread_key))?;
        let by_method = by_input.get(input.key()).with_context(|| {
            format!(
                "No results for {} at thread count {}",
                input.key(),
                thread_key
            )
        })?;
        by_method.get(method.name()).copied().with_context(|| {
            format!(
                "No {} timing for {} at thread count {}",
                method.name(),
                input.key(),
                thread_key
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample() -> BenchmarkResults {
        let doc = serde_json::json!({
            "1": {
                "input_a": {"eigen": 1.5, "matrixmultiply": 2.25, "cblas": 0.75},
                "input_b": {"eigen": 3.0, "matrixmultiply": 4.5, "cblas": 1.5},
            }
        });
        serde_json::from_value(doc).unwrap()
    }

    #[test]
    fn test_load_valid_document() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"1": {{"input_a": {{"eigen": 0.5, "matrixmultiply": 1.0, "cblas": 0.25}}}}}}"#
        )
        .unwrap();

        let results = BenchmarkResults::load(file.path()).unwrap();
        let value = results.duration("1", Input::A, Method::Cblas).unwrap();
        assert_eq!(value, 0.25);
    }

    #[test]
    fn test_load_missing_file() {
        let err = BenchmarkResults::load(Path::new("/nonexistent/data.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json at all").unwrap();

        let err = BenchmarkResults::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_duration_lookup() {
        let results = sample();
        assert_eq!(
            results
                .duration("1", Input::B, Method::MatrixMultiply)
                .unwrap(),
            4.5
        );
    }

    #[test]
    fn test_missing_thread_count() {
        let results = sample();
        let err = results.duration("16", Input::A, Method::Eigen).unwrap_err();
        assert!(err.to_string().contains("thread count 16"));
    }

    #[test]
    fn test_missing_input() {
        let results = sample();
        let err = results.duration("1", Input::C, Method::Eigen).unwrap_err();
        assert!(err.to_string().contains("input_c"));
    }

    #[test]
    fn test_missing_method() {
        let doc = serde_json::json!({
            "1": {"input_a": {"eigen": 1.0, "matrixmultiply": 2.0}}
        });
        let results: BenchmarkResults = serde_json::from_value(doc).unwrap();
        let err = results.duration("1", Input::A, Method::Cblas).unwrap_err();
        assert!(err.to_string().contains("cblas"));
    }

    #[test]
    fn test_input_keys_and_labels() {
        assert_eq!(Input::all().len(), 4);
        for input in Input::all() {
            assert_eq!(input.key().replace("input_", "").to_uppercase(), input.label());
        }
    }
}
