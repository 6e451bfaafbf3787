//! netscope - generate a random network, draw it in 2D and 3D, and measure it.
//!
//! The pipeline is generate → lay out → measure; results are printed to the
//! console and written out through the writers of a [`io::FormatRegistry`].

pub mod analysis;
pub mod community;
pub mod error;
pub mod graph_writer;
pub mod html_writer;
pub mod io;
pub mod layout;
pub mod metrics;
pub mod network;
pub mod plot;
pub mod report;
pub mod server;
pub mod yaml_writer;

pub use analysis::{Analysis, RunConfig};
pub use error::{NetworkError, NetworkResult};
