use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use pledgemap_core::config::load_config;
use pledgemap_core::hierarchy::load_tree;
use pledgemap_core::human::human_amount;
use pledgemap_core::{export, Treemap};

#[derive(Parser, Debug)]
#[command(name = "pledgemap-cli", about = "Lay out a funding hierarchy as a treemap")]
struct Args {
    /// Dataset: a JSON tree of {name, category, value, children}
    input: PathBuf,
    /// JSON config file (canvas size, padding, palette, legend policy)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Canvas width, overrides the config file
    #[arg(short, long)]
    width: Option<f64>,
    /// Canvas height, overrides the config file
    #[arg(short = 'H', long)]
    height: Option<f64>,
    /// Gap around each tile, overrides the config file
    #[arg(short, long)]
    padding: Option<f64>,
    /// Output JSON layout path
    #[arg(long)]
    json: Option<PathBuf>,
    /// Output CSV layout path
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Output SVG path
    #[arg(long)]
    svg: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    pledgemap_core::logging::init();
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())
        .with_context(|| format!("reading config {:?}", args.config))?;
    if let Some(w) = args.width {
        config.width = w;
    }
    if let Some(h) = args.height {
        config.height = h;
    }
    if let Some(p) = args.padding {
        config.padding = p;
    }

    let root = load_tree(&args.input)
        .with_context(|| format!("reading dataset {}", args.input.display()))?;
    let map = Treemap::compute(&root, &config).context("dataset is malformed")?;

    if let Some(path) = &args.json {
        let json = serde_json::to_string_pretty(&export::to_json(&map))?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(path = %path.display(), "wrote JSON layout");
    }
    if let Some(path) = &args.csv {
        let file = std::fs::File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        export::to_csv(&map, std::io::BufWriter::new(file))?;
        tracing::info!(path = %path.display(), "wrote CSV layout");
    }
    if let Some(path) = &args.svg {
        std::fs::write(path, export::to_svg(&map))
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(path = %path.display(), "wrote SVG");
    }

    println!(
        "Laid out {} tiles in {} categories (total {})",
        map.leaves.len(),
        map.legend.len(),
        human_amount(map.total)
    );
    Ok(())
}
