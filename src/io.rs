//! Writer trait and format dispatch
//!
//! Every file the tool produces (plots, reports, data exports) comes from a
//! [`Writer`] registered in a [`FormatRegistry`] under a format id.

use std::fs;
use std::path::{Path, PathBuf};

use crate::analysis::Analysis;
use crate::error::{NetworkError, NetworkResult};
use crate::graph_writer::GraphWriter;
use crate::html_writer::HtmlWriter;
use crate::plot::{Plot2dWriter, Plot3dWriter};
use crate::yaml_writer::YamlWriter;

/// A writer renders an analysed network into one output file
///
/// Writers are responsible for:
/// - Choosing the file name inside the output directory
/// - Rendering the analysis into their format
///
/// `written` lists the files produced earlier in the same run, so a writer
/// can link them without trusting whatever else sits in the directory.
pub trait Writer {
    /// Write into the `output` directory, returning the path of the created file
    fn write(
        &self,
        analysis: &Analysis,
        output: &Path,
        written: &[PathBuf],
    ) -> NetworkResult<PathBuf>;

    /// Identifier for this output format (e.g., "svg-2d", "html", "json")
    fn format_id(&self) -> &str;
}

/// Registry of available writers
///
/// Registration order is execution order: the HTML report links the plot
/// files, so plot writers are registered before it.
pub struct FormatRegistry {
    writers: Vec<Box<dyn Writer>>,
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            writers: Vec::new(),
        }
    }

    /// Create a registry with all default writers registered
    ///
    /// Currently registers: `Plot2dWriter` (svg-2d), `Plot3dWriter` (svg-3d),
    /// `GraphWriter` (json), `YamlWriter` (yaml), `HtmlWriter` (html)
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_writer(Box::new(Plot2dWriter::new()));
        registry.register_writer(Box::new(Plot3dWriter::new()));
        registry.register_writer(Box::new(GraphWriter::new()));
        registry.register_writer(Box::new(YamlWriter::new()));
        registry.register_writer(Box::new(HtmlWriter::new()));
        registry
    }

    /// Register a writer
    pub fn register_writer(&mut self, writer: Box<dyn Writer>) {
        self.writers.push(writer);
    }

    /// Find a writer by format ID
    pub fn writer_for_format(&self, format_id: &str) -> Option<&dyn Writer> {
        self.writers
            .iter()
            .find(|w| w.format_id().eq_ignore_ascii_case(format_id))
            .map(|w| w.as_ref())
    }

    /// Format IDs of all registered writers, in registration order
    pub fn format_ids(&self) -> Vec<&str> {
        self.writers.iter().map(|w| w.format_id()).collect()
    }

    /// Resolve the requested format IDs to writers in registration order
    ///
    /// Fails on the first unknown ID; duplicates are ignored.
    pub fn resolve<S: AsRef<str>>(&self, format_ids: &[S]) -> NetworkResult<Vec<&dyn Writer>> {
        let requested: Vec<&str> = format_ids.iter().map(|id| id.as_ref()).collect();

        if let Some(unknown) = requested
            .iter()
            .find(|id| self.writer_for_format(id).is_none())
        {
            return Err(NetworkError::UnsupportedFormat(unknown.to_string()));
        }

        Ok(self
            .writers
            .iter()
            .filter(|w| {
                requested
                    .iter()
                    .any(|id| w.format_id().eq_ignore_ascii_case(id))
            })
            .map(|w| w.as_ref())
            .collect())
    }

    /// Run the requested writers into `output`, creating it if needed
    pub fn write_all<S: AsRef<str>>(
        &self,
        analysis: &Analysis,
        output: &Path,
        format_ids: &[S],
    ) -> NetworkResult<Vec<PathBuf>> {
        let writers = self.resolve(format_ids)?;
        fs::create_dir_all(output)?;

        let mut written = Vec::with_capacity(writers.len());
        for writer in writers {
            let path = writer.write(analysis, output, &written)?;
            tracing::info!(format = writer.format_id(), path = %path.display(), "wrote output");
            written.push(path);
        }
        Ok(written)
    }
}
