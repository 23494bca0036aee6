//! wadtex CLI - Command-line tool for WAD archives and TEX textures.
//!
//! This is the main entry point for the wadtex command-line application.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use glob::{MatchOptions, Pattern};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use wadtex::prelude::*;
use wadtex::wad::{extract_parallel, ExtractProgress};

/// wadtex - WAD archive extraction and TEX texture conversion tool
#[derive(Parser)]
#[command(name = "wadtex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Work with TEX textures
    #[command(subcommand)]
    Tex(TexCommand),

    /// Work with WAD archives
    #[command(subcommand)]
    Wad(WadCommand),
}

#[derive(Subcommand)]
enum TexCommand {
    /// Show the header of a TEX file
    Info {
        /// Input TEX file
        tex: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert a TEX file to an indexed PNG
    Decode {
        /// Input TEX file
        tex: PathBuf,

        /// Output PNG file
        output: PathBuf,

        /// Palette file (raw RGB triplets)
        #[arg(short, long, env = "WADTEX_PALETTE")]
        palette: PathBuf,
    },

    /// Convert an indexed PNG to a TEX file
    Encode {
        /// Input PNG file
        image: PathBuf,

        /// Output TEX file
        tex: PathBuf,

        /// Palette file (raw RGB triplets)
        #[arg(short, long, env = "WADTEX_PALETTE")]
        palette: PathBuf,

        /// Write the name field too, named after the output file
        #[arg(long)]
        named: bool,
    },
}

#[derive(Subcommand)]
enum WadCommand {
    /// Show item counts per type and archive size
    Info {
        /// Path to the WAD file
        wad: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List item names in directory order
    List {
        /// Path to the WAD file
        wad: PathBuf,

        /// Filter pattern (glob-style)
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Extract every item to a directory
    Extract {
        /// Path to the WAD file
        wad: PathBuf,

        /// Output directory
        #[arg(env = "WADTEX_OUTPUT")]
        output: PathBuf,

        /// Filter pattern (glob-style)
        #[arg(short, long)]
        filter: Option<String>,

        /// Extract items on the rayon thread pool
        #[arg(long)]
        parallel: bool,
    },

    /// Create a WAD archive from a directory
    Create {
        /// Input directory
        input: PathBuf,

        /// Output WAD file
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Tex(TexCommand::Info { tex, json }) => cmd_tex_info(&tex, json)?,
        Commands::Tex(TexCommand::Decode { tex, output, palette }) => {
            cmd_tex_decode(&tex, &palette, &output)?;
        }
        Commands::Tex(TexCommand::Encode {
            image,
            tex,
            palette,
            named,
        }) => cmd_tex_encode(&image, &palette, &tex, named)?,
        Commands::Wad(WadCommand::Info { wad, json }) => cmd_wad_info(&wad, json)?,
        Commands::Wad(WadCommand::List { wad, filter }) => cmd_wad_list(&wad, filter.as_deref())?,
        Commands::Wad(WadCommand::Extract {
            wad,
            output,
            filter,
            parallel,
        }) => cmd_wad_extract(&wad, &output, filter.as_deref(), parallel)?,
        Commands::Wad(WadCommand::Create { input, output }) => cmd_wad_create(&input, &output)?,
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_tex_info(tex_path: &Path, json: bool) -> Result<()> {
    let tex = TexHeader::open(tex_path)
        .with_context(|| format!("Failed to load TEX file {}", tex_path.display()))?;

    if json {
        let info = serde_json::json!({
            "name": tex.name,
            "width": tex.width,
            "height": tex.height,
            "payload_size": tex.data.len(),
            "payload_matches_dimensions": tex.payload_matches_dimensions(),
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("Name:    {}", tex.name);
    println!("Size:    {}x{}", tex.width, tex.height);
    println!("Payload: {} bytes", tex.data.len());
    if !tex.payload_matches_dimensions() {
        println!(
            "Warning: payload does not match {}x{} pixels",
            tex.width, tex.height
        );
    }

    Ok(())
}

fn cmd_tex_decode(tex_path: &Path, palette_path: &Path, output: &Path) -> Result<()> {
    println!("Decoding: {} -> {}", tex_path.display(), output.display());

    let tex = TexHeader::open(tex_path)
        .with_context(|| format!("Failed to load TEX file {}", tex_path.display()))?;
    let palette = Palette::open(palette_path)
        .with_context(|| format!("Failed to load palette {}", palette_path.display()))?;

    let png = to_indexed_image(&tex, &palette, &PngCodec).with_context(|| {
        format!(
            "Failed to convert {} with palette {}",
            tex_path.display(),
            palette_path.display()
        )
    })?;
    fs::write(output, png).with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Conversion complete");

    Ok(())
}

fn cmd_tex_encode(image_path: &Path, palette_path: &Path, output: &Path, named: bool) -> Result<()> {
    println!("Encoding: {} -> {}", image_path.display(), output.display());

    let palette = Palette::open(palette_path)
        .with_context(|| format!("Failed to load palette {}", palette_path.display()))?;
    let bytes = fs::read(image_path)
        .with_context(|| format!("Failed to read image {}", image_path.display()))?;

    let name = output
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .to_string();

    let tex = from_indexed_image(&bytes, &palette, name, &PngCodec)
        .with_context(|| format!("Failed to convert image {}", image_path.display()))?;

    if named {
        tex.save_named_to(output)
    } else {
        tex.save_to(output)
    }
    .with_context(|| format!("Failed to write TEX file {}", output.display()))?;

    println!("Conversion complete");

    Ok(())
}

fn cmd_wad_info(wad_path: &Path, json: bool) -> Result<()> {
    let archive = open_archive(wad_path)?;
    let summary = archive.summary();

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Archive: {}", archive.path().display());
    println!("Size:    {} bytes", summary.archive_size);
    println!("Items:   {}", summary.item_count);
    for row in &summary.type_counts {
        println!("{:>12} ({:>3}): {}", row.type_name, row.type_byte, row.count);
    }

    Ok(())
}

fn cmd_wad_list(wad_path: &Path, filter: Option<&str>) -> Result<()> {
    let archive = open_archive(wad_path)?;
    let pattern = filter.map(Pattern::new).transpose().context("Invalid filter pattern")?;

    for name in archive.names() {
        if pattern.as_ref().map_or(true, |p| glob_match(p, &name)) {
            println!("{}", name);
        }
    }

    Ok(())
}

fn cmd_wad_extract(wad_path: &Path, output: &Path, filter: Option<&str>, parallel: bool) -> Result<()> {
    println!("Opening WAD archive: {}", wad_path.display());

    let start = Instant::now();
    let mut archive = open_archive(wad_path)?;
    println!("Loaded {} items in {:?}", archive.item_count(), start.elapsed());

    let pattern = filter.map(Pattern::new).transpose().context("Invalid filter pattern")?;
    let items: Vec<WadItemHeader> = archive
        .items()
        .iter()
        .filter(|item| pattern.as_ref().map_or(true, |p| glob_match(p, &item.name())))
        .copied()
        .collect();

    println!("Extracting {} items...", items.len());

    let pb = ProgressBar::new(items.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory {}", output.display()))?;

    let report = |p: &ExtractProgress<'_>| {
        pb.println(format!("{}/{} {}", p.index, p.total, p.name));
        pb.inc(1);
    };

    let start = Instant::now();
    let extracted = if parallel {
        extract_parallel(archive.path(), &items, output, report)
    } else {
        archive.extract_items(&items, output, report)
    }
    .with_context(|| format!("Failed to extract {}", wad_path.display()))?;

    pb.finish_with_message("Done");
    println!("Extracted {} items in {:?}", extracted, start.elapsed());

    Ok(())
}

fn cmd_wad_create(input: &Path, output: &Path) -> Result<()> {
    wadtex::wad::create(input, output)
        .with_context(|| format!("Cannot create {} from {}", output.display(), input.display()))
}

fn open_archive(wad_path: &Path) -> Result<WadArchive> {
    WadArchive::open(wad_path)
        .with_context(|| format!("Failed to open WAD archive {}", wad_path.display()))
}

/// Case-insensitive glob match on an item name.
fn glob_match(pattern: &Pattern, name: &str) -> bool {
    pattern.matches_with(
        name,
        MatchOptions {
            case_sensitive: false,
            ..MatchOptions::new()
        },
    )
}
