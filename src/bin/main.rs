//! Block Tables CLI
//!
//! Generate the block lookup tables used by the map viewer.

use block_tables::extract::{decode_shape_legend, extract_texture_colors, write_shapes, write_texture_colors};
use block_tables::{
    export_csv, export_json, flatten, resolve_blocks, tables::loader::load_from_dir, ResolverConfig,
    TableFiles,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "block-tables")]
#[command(author, version, about = "Generate block lookup tables for the map viewer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve every block and write the block table
    Blocks {
        /// Directory containing the input tables
        #[arg(short, long)]
        data: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: OutputFormat,

        /// Texture color table to use instead of the one in the data directory
        /// (relative paths are resolved against the data directory)
        #[arg(long)]
        texture_colors: Option<PathBuf>,

        /// Shape table to use instead of the one in the data directory
        /// (relative paths are resolved against the data directory)
        #[arg(long)]
        shapes: Option<PathBuf>,

        /// Shape used for blocks without state rules
        #[arg(long, default_value = block_tables::resolver::DEFAULT_SHAPE)]
        default_shape: String,

        /// Use the texture named like the block when it has no primary color rule
        #[arg(long)]
        texture_fallback: bool,
    },

    /// Average block texture colors from a client jar, pack zip or directory
    Textures {
        /// Client jar, resource pack ZIP, or directory of PNG textures
        #[arg(short, long)]
        source: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Decode shape codes from the shape legend image
    Shapes {
        /// Legend PNG
        #[arg(short, long)]
        legend: PathBuf,

        /// Shape names, one per line, in legend order
        #[arg(short, long)]
        names: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Show information about a data directory
    Info {
        /// Directory containing the input tables
        #[arg(short, long)]
        data: PathBuf,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Viewer table with header and blank default row
    Csv,
    /// Pretty-printed JSON array of rows
    Json,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Blocks {
            data,
            output,
            format,
            texture_colors,
            shapes,
            default_shape,
            texture_fallback,
        } => {
            let mut files = TableFiles::default();
            if let Some(path) = texture_colors {
                files = files.with_texture_colors(path);
            }
            if let Some(path) = shapes {
                files = files.with_shapes(path);
            }
            let config = ResolverConfig::default()
                .with_default_shape(&default_shape)
                .with_texture_fallback(texture_fallback);

            build_blocks(&data, &files, &config, &output, format)?;
        }
        Commands::Textures { source, output } => {
            build_textures(&source, &output)?;
        }
        Commands::Shapes {
            legend,
            names,
            output,
        } => {
            build_shapes(&legend, &names, &output)?;
        }
        Commands::Info { data } => {
            show_data_info(&data)?;
        }
    }

    Ok(())
}

fn build_blocks(
    data_dir: &PathBuf,
    files: &TableFiles,
    config: &ResolverConfig,
    output_path: &PathBuf,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Loading tables from {:?}...", data_dir);
    let tables = load_from_dir(data_dir, files)?;
    println!("  Found {} blocks", tables.block_count());

    println!("Resolving blocks:");
    println!("  - Default shape: {}", config.default_shape);
    println!("  - Texture fallback: {}", config.texture_fallback);
    let blocks = resolve_blocks(&tables, config)?;
    let rows = flatten(&blocks);
    println!("  Resolved {} rows", rows.len());

    let bytes = match format {
        OutputFormat::Csv => export_csv(&rows)?,
        OutputFormat::Json => export_json(&rows)?,
    };
    fs::write(output_path, &bytes)?;
    println!("Exported block table ({} bytes) to {:?}", bytes.len(), output_path);

    Ok(())
}

fn build_textures(source: &PathBuf, output_path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    println!("Reading textures from {:?}...", source);
    let colors = extract_texture_colors(source)?;

    let mut bytes = Vec::new();
    write_texture_colors(&mut bytes, &colors)?;
    fs::write(output_path, &bytes)?;
    println!("Exported {} texture colors to {:?}", colors.len(), output_path);

    Ok(())
}

fn build_shapes(
    legend: &PathBuf,
    names: &PathBuf,
    output_path: &PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Decoding shape legend {:?}...", legend);
    let shapes = decode_shape_legend(legend, names)?;

    let mut bytes = Vec::new();
    write_shapes(&mut bytes, &shapes)?;
    fs::write(output_path, &bytes)?;
    println!("Exported {} shapes to {:?}", shapes.len(), output_path);

    Ok(())
}

fn show_data_info(data_dir: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    println!("Loading tables from {:?}...", data_dir);
    let tables = load_from_dir(data_dir, &TableFiles::default())?;

    println!("\nData Info:");
    println!("  Blocks: {}", tables.block_count());
    println!("  Blocks with color rules: {}", tables.colored_block_count());
    println!("  Blocks with state shapes: {}", tables.shaped_block_count());
    println!("  Texture colors: {}", tables.texture_count());
    println!("  Shapes: {}", tables.shape_count());

    Ok(())
}
