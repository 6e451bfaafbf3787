//! YAML Writer
//!
//! Writes the computed metrics as a YAML document.

use std::fs;
use std::path::{Path, PathBuf};

use crate::analysis::Analysis;
use crate::error::{NetworkError, NetworkResult};
use crate::io::Writer;

/// File name of the YAML metrics inside the output directory
pub const METRICS_YAML_FILE: &str = "metrics.yaml";

/// Writer for the metrics as YAML
pub struct YamlWriter;

impl YamlWriter {
    /// Create a new YAML writer
    pub fn new() -> Self {
        Self
    }
}

impl Default for YamlWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer for YamlWriter {
    fn write(
        &self,
        analysis: &Analysis,
        output: &Path,
        _written: &[PathBuf],
    ) -> NetworkResult<PathBuf> {
        let yaml = serde_yaml::to_string(&analysis.metrics)
            .map_err(|e| NetworkError::Write(e.to_string()))?;
        let path = output.join(METRICS_YAML_FILE);
        fs::write(&path, yaml)?;
        Ok(path)
    }

    fn format_id(&self) -> &str {
        "yaml"
    }
}
