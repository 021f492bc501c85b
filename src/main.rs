//! meshcore - mesh command line tool

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use meshcore::io::load_obj;
use meshcore::transform::LengthUnit;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "meshcore")]
#[command(about = "Mesh utilities")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert OBJ meshes from one length unit to another
    ConvertUnits {
        /// Units of the input meshes (mm, cm, m, km, in, ft, yd, mi)
        from: LengthUnit,

        /// Units to convert to
        to: LengthUnit,

        /// OBJ files to convert
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Directory for the converted files (defaults to the current one)
        #[arg(short, long)]
        outdir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::ConvertUnits {
            from,
            to,
            paths,
            outdir,
        } => {
            let outdir = outdir.unwrap_or_default();
            for path in &paths {
                convert_units(path, from, to, &outdir)?;
            }
        },
    }

    Ok(())
}

/// Convert one file, writing `<stem>_<to>.obj` into `outdir`. Returns the
/// written path.
fn convert_units(path: &Path, from: LengthUnit, to: LengthUnit, outdir: &Path) -> Result<PathBuf> {
    tracing::info!("Converting {} from {} to {}", path.display(), from, to);
    let mesh = load_obj(path, false).with_context(|| format!("Failed to load {:?}", path))?;

    let stem = path
        .file_stem()
        .with_context(|| format!("No file name in {:?}", path))?
        .to_string_lossy();
    let output = outdir.join(format!("{stem}_{to}.obj"));
    mesh.units_converted(from, to)
        .write_obj(&output)
        .with_context(|| format!("Failed to write {:?}", output))?;

    tracing::info!("  Wrote {}", output.display());
    Ok(output)
}
