#![deny(unsafe_code)]
//! CLI binary for the colorgrid proportional color-map synthesizer.
//!
//! Subcommands:
//! - `render`: synthesize a colormap from a prompt or request file, write PNG
//! - `list`: print known colors, aliases, layouts and granule densities

mod error;

use clap::{Parser, Subcommand};
use colorgrid_core::request::{GranuleDensity, LayoutChoice};
use colorgrid_core::{normalize, parse_color_prompt, ColorTable, SynthesisRequest};
use colorgrid_layouts::{synthesize, LayoutKind};
use error::CliError;
use std::path::{Path, PathBuf};
use std::process;

const DEFAULT_SIZE: usize = 256;

#[derive(Parser)]
#[command(name = "colorgrid", about = "Proportional color-map synthesizer")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Synthesize a colormap and write it as a PNG.
    Render {
        /// Color prompt, e.g. "70% red, 30% blue".
        #[arg(short, long, conflicts_with = "request", required_unless_present = "request")]
        colors: Option<String>,

        /// Request document (JSON) to render instead of a prompt.
        #[arg(short, long)]
        request: Option<PathBuf>,

        /// Canvas width in pixels [default: 256].
        #[arg(short = 'W', long)]
        width: Option<usize>,

        /// Canvas height in pixels [default: 256].
        #[arg(short = 'H', long)]
        height: Option<usize>,

        /// Layout (auto, random, grid, radial, granular).
        #[arg(short, long)]
        layout: Option<String>,

        /// Granule size class (small, medium, large).
        #[arg(short, long)]
        density: Option<String>,

        /// PRNG seed for deterministic output.
        #[arg(long)]
        seed: Option<u64>,

        /// Granular tuning overrides as a JSON string.
        #[arg(long)]
        params: Option<String>,

        /// Output file path.
        #[arg(short, long, default_value = "colormap.png")]
        output: PathBuf,
    },
    /// List known colors, aliases, layouts and granule densities.
    List,
}

/// Command-line overrides applied on top of a prompt or request file.
struct RenderArgs {
    colors: Option<String>,
    request: Option<PathBuf>,
    width: Option<usize>,
    height: Option<usize>,
    layout: Option<String>,
    density: Option<String>,
    seed: Option<u64>,
    params: Option<String>,
}

fn read_request(path: &Path) -> Result<SynthesisRequest, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| CliError::Input(format!("invalid request {}: {e}", path.display())))
}

fn build_request(args: RenderArgs) -> Result<SynthesisRequest, CliError> {
    let mut request = match (&args.request, &args.colors) {
        (Some(path), _) => read_request(path)?,
        (None, Some(prompt)) => {
            SynthesisRequest::new(parse_color_prompt(prompt)?, DEFAULT_SIZE, DEFAULT_SIZE, 42)
        }
        (None, None) => return Err(CliError::Input("either --colors or --request is required".into())),
    };

    if let Some(w) = args.width {
        request.width = w;
    }
    if let Some(h) = args.height {
        request.height = h;
    }
    if let Some(seed) = args.seed {
        request.seed = seed;
    }
    if let Some(layout) = args.layout {
        request.layout = layout.parse::<LayoutChoice>()?;
    }
    if let Some(density) = args.density {
        request.density = Some(density.parse::<GranuleDensity>()?);
    }
    if let Some(params) = args.params {
        request.params = serde_json::from_str(&params)
            .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
    }
    tracing::debug!(?request, "request built");
    Ok(request)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let colors: Vec<(&str, String)> = ColorTable::names()
                .into_iter()
                .map(|n| (n, ColorTable::resolve(n).to_hex()))
                .collect();
            let layouts = LayoutKind::list_layouts();
            let densities: Vec<&str> = GranuleDensity::ALL.iter().map(|d| d.as_str()).collect();
            if cli.json {
                let info = serde_json::json!({
                    "colors": colors
                        .iter()
                        .map(|(n, hex)| serde_json::json!({"name": n, "hex": hex}))
                        .collect::<Vec<_>>(),
                    "aliases": ColorTable::aliases()
                        .iter()
                        .map(|(alias, code)| serde_json::json!({"alias": alias, "code": code}))
                        .collect::<Vec<_>>(),
                    "layouts": layouts,
                    "densities": densities,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Colors:");
                for (name, hex) in &colors {
                    println!("  {name:<10} {hex}");
                }
                println!("Aliases:");
                for (alias, code) in ColorTable::aliases() {
                    println!("  {alias} -> {code}");
                }
                println!("Layouts:");
                println!("  {}", layouts.join(", "));
                println!("Densities:");
                println!("  {}", densities.join(", "));
            }
        }
        Command::Render {
            colors,
            request,
            width,
            height,
            layout,
            density,
            seed,
            params,
            output,
        } => {
            let request = build_request(RenderArgs {
                colors,
                request,
                width,
                height,
                layout,
                density,
                seed,
                params,
            })?;

            let result = synthesize(&request)?;
            colorgrid_layouts::snapshot::write_png(&result.canvas, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "colors": normalize(&request.colors),
                    "width": request.width,
                    "height": request.height,
                    "seed": request.seed,
                    "layout": result.layout,
                    "rebuilt": result.rebuilt,
                    "params": result.params,
                    "opaque_pixels": result.report.opaque,
                    "clusters": result.report.clusters,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                let rebuilt = if result.rebuilt { ", rebuilt" } else { "" };
                eprintln!(
                    "rendered {} ({}x{}, seed {}{rebuilt}) -> {}",
                    result.layout,
                    request.width,
                    request.height,
                    request.seed,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("colorgrid=warn")),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
