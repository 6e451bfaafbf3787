use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use netscope::io::FormatRegistry;
use netscope::{Analysis, RunConfig, report, server};

/// Generate a random network, plot it in 2D and 3D, and print its metrics.
#[derive(Parser)]
#[command(name = "netscope")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Args, Debug, Clone)]
struct RunArgs {
    /// Number of nodes in the random network
    #[arg(short, long, global = true, default_value_t = 100)]
    nodes: usize,

    /// Number of edges in the random network
    #[arg(short, long, global = true, default_value_t = 200)]
    edges: usize,

    /// Seed for reproducible networks and layouts
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Output directory for plots and reports
    #[arg(short, long, global = true, default_value = "output")]
    output: PathBuf,

    /// Output formats to write (svg-2d, svg-3d, json, yaml, html)
    #[arg(
        short,
        long = "format",
        global = true,
        value_delimiter = ',',
        default_values = ["svg-2d", "svg-3d", "html"]
    )]
    formats: Vec<String>,

    /// Only print to the console; write no files
    #[arg(long, global = true)]
    no_plot: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate, plot and measure a network (default behavior)
    Run,
    /// Run, then serve the report until Ctrl+C
    Serve {
        /// Port to run the server on
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
}

impl RunArgs {
    fn writes_report(&self) -> bool {
        !self.no_plot && self.formats.iter().any(|f| f.eq_ignore_ascii_case("html"))
    }
}

fn run(args: &RunArgs) -> anyhow::Result<()> {
    let analysis = Analysis::run(&RunConfig {
        num_nodes: args.nodes,
        num_edges: args.edges,
        seed: args.seed,
    })?;

    print!("{}", report::adjacency_section(&analysis.adjacency));

    if !args.no_plot {
        let written =
            FormatRegistry::with_defaults().write_all(&analysis, &args.output, &args.formats)?;
        for path in written {
            println!("Wrote {}", path.display());
        }
    }

    print!("{}", report::metrics_section(&analysis.metrics));
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        None | Some(Commands::Run) => run(&cli.run)?,
        Some(Commands::Serve { port }) => {
            anyhow::ensure!(
                cli.run.writes_report(),
                "serve needs the html report; include html in --format and drop --no-plot"
            );
            run(&cli.run)?;
            server::serve(&cli.run.output, port).await?;
        }
    }

    Ok(())
}
