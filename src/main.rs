use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use ifc_graph::error::ParseError;
use ifc_graph::export::{export_csv, export_json, export_lines};
use ifc_graph::graph::{JsonLineSource, ModelSource, Session};
use ifc_graph::model::GraphNode;
use ifc_graph::parser::OpenOptions;
use ifc_graph::ui::App;

#[derive(Parser, Debug)]
#[command(name = "ifc-graph")]
#[command(about = "IFC Graph - walk an IFC model one entity at a time")]
#[command(version)]
struct Args {
    /// Path to IFC file (or JSON line dump with --from-lines)
    #[arg(required = true)]
    file: PathBuf,

    /// Print the node of this line as JSON and exit
    #[arg(long, value_name = "ID")]
    node: Option<u64>,

    /// Export root node and type index to JSON
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Export the type index to CSV
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Dump every line to a JSON line file
    #[arg(long, value_name = "FILE")]
    lines: Option<PathBuf>,

    /// Read the input as a JSON line dump instead of IFC text
    #[arg(long)]
    from_lines: bool,

    /// Keep the model's coordinates instead of moving it to the origin
    #[arg(long)]
    keep_coordinates: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let bytes = std::fs::read(&args.file).map_err(|source| ParseError::FileRead {
        path: args.file.clone(),
        source,
    })?;

    if args.from_lines {
        if args.keep_coordinates {
            warn!("--keep-coordinates has no effect on a line dump");
        }
        let source = JsonLineSource::from_slice(&bytes)
            .wrap_err_with(|| format!("reading line dump {}", args.file.display()))?;
        let (session, root) = Session::load(source)?;
        run(&args, session, root)
    } else {
        let options = OpenOptions {
            coordinate_to_origin: !args.keep_coordinates,
        };
        let (session, root) = Session::open_with(&bytes, options)
            .wrap_err_with(|| format!("opening {}", args.file.display()))?;
        run(&args, session, root)
    }
}

fn run<S: ModelSource>(args: &Args, session: Session<S>, root: GraphNode) -> Result<()> {
    if let Some(id) = args.node {
        let node = session.add_node(id)?;
        println!("{}", serde_json::to_string_pretty(&node)?);
        return Ok(());
    }

    if let Some(json_path) = &args.json {
        export_json(&root, session.type_index(), json_path)?;
        println!("Exported to JSON: {}", json_path.display());
    }

    if let Some(csv_path) = &args.csv {
        export_csv(session.type_index(), csv_path)?;
        println!("Exported to CSV: {}", csv_path.display());
    }

    if let Some(lines_path) = &args.lines {
        export_lines(session.source(), lines_path)?;
        println!("Exported lines: {}", lines_path.display());
    }

    if args.json.is_some() || args.csv.is_some() || args.lines.is_some() {
        return Ok(());
    }

    let terminal = ratatui::init();
    let result = App::new(session, root).run(terminal);
    ratatui::restore();
    result
}
