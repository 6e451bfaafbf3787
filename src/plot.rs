//! 2D and 3D network plots
//!
//! Renders a laid-out network to SVG with `plotters`: edges first (behind
//! nodes), then nodes with their integer labels. The 3D plot projects the
//! layout inside a labelled axis box.

use std::path::{Path, PathBuf};

use plotters::prelude::*;

use crate::analysis::Analysis;
use crate::error::{NetworkError, NetworkResult};
use crate::io::Writer;
use crate::layout::Layout;
use crate::network::Network;

/// Canvas size in pixels
pub const PLOT_SIZE: (u32, u32) = (1000, 1000);

/// File name of the 2D plot inside the output directory
pub const PLOT_2D_FILE: &str = "network_2d.svg";

/// File name of the 3D plot inside the output directory
pub const PLOT_3D_FILE: &str = "network_3d.svg";

/// Node fill: sky blue (#87CEEB)
const NODE_COLOR: RGBColor = RGBColor(135, 206, 235);

/// Edge stroke: gray (#808080)
const EDGE_COLOR: RGBColor = RGBColor(128, 128, 128);

/// Layout coordinates lie in [-1, 1]; leave room for node markers
const AXIS_LIMIT: f64 = 1.15;

fn plot_error(err: impl std::fmt::Display) -> NetworkError {
    NetworkError::Plot(err.to_string())
}

/// Draw `network` at the positions of `layout` as a 2D SVG
pub fn plot_network_2d(network: &Network, layout: &Layout<2>, path: &Path) -> NetworkResult<()> {
    let root = SVGBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("2D Network Visualization", ("sans-serif", 28))
        .margin(20)
        .build_cartesian_2d(-AXIS_LIMIT..AXIS_LIMIT, -AXIS_LIMIT..AXIS_LIMIT)
        .map_err(plot_error)?;

    chart
        .draw_series(network.edges().map(|(u, v)| {
            let [x1, y1] = layout.position(u);
            let [x2, y2] = layout.position(v);
            PathElement::new(vec![(x1, y1), (x2, y2)], EDGE_COLOR.stroke_width(1))
        }))
        .map_err(plot_error)?;

    chart
        .draw_series(layout.iter().enumerate().map(|(node, &[x, y])| {
            EmptyElement::at((x, y))
                + Circle::new((0, 0), 12, NODE_COLOR.filled())
                + Text::new(
                    node.to_string(),
                    (-6, -5),
                    ("sans-serif", 10).into_font().color(&BLACK),
                )
        }))
        .map_err(plot_error)?;

    root.present().map_err(plot_error)?;
    Ok(())
}

/// Draw `network` at the positions of `layout` as a projected 3D SVG
pub fn plot_network_3d(network: &Network, layout: &Layout<3>, path: &Path) -> NetworkResult<()> {
    let root = SVGBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("3D Network Visualization", ("sans-serif", 28))
        .margin(20)
        .build_cartesian_3d(
            -AXIS_LIMIT..AXIS_LIMIT,
            -AXIS_LIMIT..AXIS_LIMIT,
            -AXIS_LIMIT..AXIS_LIMIT,
        )
        .map_err(plot_error)?;

    chart.with_projection(|mut pb| {
        pb.yaw = 0.6;
        pb.pitch = 0.3;
        pb.scale = 0.85;
        pb.into_matrix()
    });

    chart
        .configure_axes()
        .light_grid_style(BLACK.mix(0.1))
        .max_light_lines(3)
        .draw()
        .map_err(plot_error)?;

    chart
        .draw_series(network.edges().map(|(u, v)| {
            let [x1, y1, z1] = layout.position(u);
            let [x2, y2, z2] = layout.position(v);
            PathElement::new(vec![(x1, y1, z1), (x2, y2, z2)], EDGE_COLOR.stroke_width(1))
        }))
        .map_err(plot_error)?;

    chart
        .draw_series(layout.iter().enumerate().map(|(node, &[x, y, z])| {
            EmptyElement::at((x, y, z))
                + Circle::new((0, 0), 6, NODE_COLOR.filled())
                + Text::new(
                    node.to_string(),
                    (7, -7),
                    ("sans-serif", 10).into_font().color(&BLACK),
                )
        }))
        .map_err(plot_error)?;

    root.present().map_err(plot_error)?;
    Ok(())
}

/// Writer for the 2D plot
pub struct Plot2dWriter;

impl Plot2dWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Plot2dWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer for Plot2dWriter {
    fn write(
        &self,
        analysis: &Analysis,
        output: &Path,
        _written: &[PathBuf],
    ) -> NetworkResult<PathBuf> {
        let path = output.join(PLOT_2D_FILE);
        plot_network_2d(&analysis.network, &analysis.layout_2d, &path)?;
        Ok(path)
    }

    fn format_id(&self) -> &str {
        "svg-2d"
    }
}

/// Writer for the 3D plot
pub struct Plot3dWriter;

impl Plot3dWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Plot3dWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer for Plot3dWriter {
    fn write(
        &self,
        analysis: &Analysis,
        output: &Path,
        _written: &[PathBuf],
    ) -> NetworkResult<PathBuf> {
        let path = output.join(PLOT_3D_FILE);
        plot_network_3d(&analysis.network, &analysis.layout_3d, &path)?;
        Ok(path)
    }

    fn format_id(&self) -> &str {
        "svg-3d"
    }
}
