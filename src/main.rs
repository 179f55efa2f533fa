//! CGTEX CLI - Command-line tool for CGTEX texture containers.
//!
//! This is the main entry point for the `cgtex` command-line application.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use glob::{MatchOptions, Pattern};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use cgtex::common::blocks;
use cgtex::container::TextureSummary;
use cgtex::prelude::*;
use cgtex::PngExporter;

/// CGTEX - texture container packing and extraction tool
#[derive(Parser)]
#[command(name = "cgtex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack DDS files into a CGTEX container
    Pack {
        /// DDS files or directories to scan for *.dds
        #[arg(required = true, env = "CGTEX_INPUT", value_delimiter = ',')]
        inputs: Vec<PathBuf>,

        /// Output container
        #[arg(short, long, env = "CGTEX_OUTPUT")]
        output: PathBuf,

        /// Store each DDS mip level separately instead of the whole payload
        #[arg(short, long)]
        mipmaps: bool,
    },

    /// List textures in a container
    List {
        /// Path to the CGTEX file
        #[arg(env = "CGTEX_INPUT")]
        file: PathBuf,

        /// Filter pattern for texture names (glob-style)
        #[arg(short, long)]
        filter: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Export textures from a container
    Extract {
        /// Path to the CGTEX file
        #[arg(env = "CGTEX_INPUT")]
        file: PathBuf,

        /// Output directory
        #[arg(short, long, env = "CGTEX_OUTPUT")]
        output: PathBuf,

        /// Export format (file extension)
        #[arg(long, default_value = "png")]
        format: String,

        /// Filter pattern for texture names (glob-style)
        #[arg(short, long)]
        filter: Option<String>,

        /// Mip level to export
        #[arg(short, long, default_value_t = 0)]
        level: usize,

        /// Decode all 16 BC2 alpha values instead of one per row
        #[arg(long)]
        per_pixel_alpha: bool,
    },

    /// Show what would be packed from a DDS file
    DdsInfo {
        /// Input DDS file
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Pack { inputs, output, mipmaps } => {
            cmd_pack(&inputs, &output, mipmaps)?;
        }
        Commands::List { file, filter, json } => {
            cmd_list(&file, filter.as_deref(), json)?;
        }
        Commands::Extract {
            file,
            output,
            format,
            filter,
            level,
            per_pixel_alpha,
        } => {
            let explicit_alpha = if per_pixel_alpha {
                ExplicitAlpha::PerPixel
            } else {
                ExplicitAlpha::Broadcast
            };
            cmd_extract(&file, &output, &format, filter.as_deref(), level, explicit_alpha)?;
        }
        Commands::DdsInfo { file } => {
            cmd_dds_info(&file)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_pack(inputs: &[PathBuf], output: &Path, mipmaps: bool) -> Result<()> {
    let files = collect_dds_files(inputs)?;
    if files.is_empty() {
        bail!("No DDS files found in the given inputs");
    }

    println!("Packing {} DDS files into {}", files.len(), output.display());

    let start = Instant::now();
    let options = IngestOptions { split_mipmaps: mipmaps };
    let entries = files
        .par_iter()
        .map(|path| load_dds(path, &options))
        .collect::<Result<Vec<_>>>()?;

    let metadata = CgtexFile::write_to_path(output, &entries).context("Failed to write CGTEX container")?;

    println!(
        "Wrote {} textures ({} bytes) in {:?}",
        metadata.texture_count(),
        metadata.file_size(),
        start.elapsed()
    );

    Ok(())
}

fn collect_dds_files(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if !input.is_dir() {
            files.push(input.clone());
            continue;
        }

        for entry in WalkDir::new(input).sort_by_file_name() {
            let entry = entry.with_context(|| format!("Failed to scan {}", input.display()))?;
            let is_dds = entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("dds"));
            if entry.file_type().is_file() && is_dds {
                files.push(entry.into_path());
            }
        }
    }
    Ok(files)
}

fn load_dds(path: &Path, options: &IngestOptions) -> Result<TextureEntry> {
    let texture = DdsTexture::open(path).with_context(|| format!("Failed to read DDS file {}", path.display()))?;

    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default().to_string();
    let name = texture.name_or(&stem).to_string();

    let mut entry = texture
        .into_entry_with(options)
        .with_context(|| format!("Failed to split mip levels of {}", path.display()))?;
    entry.set_name(name);
    debug!(path = %path.display(), %entry, "ingested DDS");

    Ok(entry)
}

#[derive(Serialize)]
struct ListOutput<'a> {
    metadata: &'a ContainerMetadata,
    textures: Vec<TextureSummary>,
}

fn cmd_list(path: &Path, filter: Option<&str>, json: bool) -> Result<()> {
    let file = CgtexFile::open(path).context("Failed to open CGTEX container")?;
    let matcher = NameFilter::new(filter)?;

    let textures: Vec<TextureSummary> = file
        .textures()
        .iter()
        .filter(|t| matcher.matches(t.name()))
        .map(TextureEntry::summary)
        .collect();

    if json {
        let output = ListOutput {
            metadata: file.metadata(),
            textures,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let metadata = file.metadata();
    println!(
        "Version {} | {} textures | data offset {} | {} bytes",
        metadata.version().as_u32(),
        metadata.texture_count(),
        metadata.data_offset(),
        metadata.file_size()
    );
    println!();

    for summary in &textures {
        let format = summary
            .format_name
            .map(str::to_string)
            .unwrap_or_else(|| format!("?{}", summary.format));
        println!(
            "{:>5}x{:<5} {:<5} {:>2} mips {:>10}  {}",
            summary.width, summary.height, format, summary.mip_map_count, summary.payload_len, summary.name
        );
    }

    println!("\nTotal: {} textures", textures.len());

    Ok(())
}

fn cmd_extract(
    path: &Path,
    output: &Path,
    format: &str,
    filter: Option<&str>,
    level: usize,
    explicit_alpha: ExplicitAlpha,
) -> Result<()> {
    let mut registry = ExportRegistry::with_defaults();
    registry.register(PngExporter::with_options(DecodeOptions { explicit_alpha }));

    let Some(exporter) = registry.get(format) else {
        let known: Vec<_> = registry.extensions().collect();
        bail!("Unknown export format '{}' (available: {})", format, known.join(", "));
    };
    let extension = exporter.extension();

    println!("Opening CGTEX container: {}", path.display());
    let file = CgtexFile::open(path).context("Failed to open CGTEX container")?;
    let matcher = NameFilter::new(filter)?;

    let mut used_names = HashSet::new();
    let jobs: Vec<(&TextureEntry, PathBuf)> = file
        .textures()
        .iter()
        .enumerate()
        .filter(|(_, t)| matcher.matches(t.name()))
        .map(|(index, entry)| {
            let stem = output_stem(entry.name(), index, level, &mut used_names);
            (entry, output.join(format!("{stem}.{extension}")))
        })
        .collect();

    println!("Exporting {} textures as {}...", jobs.len(), exporter.description());
    fs::create_dir_all(output).with_context(|| format!("Failed to create {}", output.display()))?;

    let pb = ProgressBar::new(jobs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let exported = AtomicUsize::new(0);
    let skipped = AtomicUsize::new(0);
    let errors = AtomicUsize::new(0);

    jobs.par_iter().for_each(|(entry, target)| {
        if entry.level(level).is_none() {
            warn!(name = entry.name(), level, mips = entry.levels().len(), "texture has no such level");
            skipped.fetch_add(1, Ordering::Relaxed);
        } else {
            match registry.export_to_path(extension, entry, level, target) {
                Ok(()) => {
                    exported.fetch_add(1, Ordering::Relaxed);
                }
                Err(e) => {
                    pb.println(format!("Error exporting {}: {}", entry.name(), e));
                    errors.fetch_add(1, Ordering::Relaxed);
                }
            }
        }
        pb.inc(1);
    });

    pb.finish_with_message("Done");
    println!(
        "Exported {} textures in {:?} ({} skipped, {} errors)",
        exported.load(Ordering::Relaxed),
        start.elapsed(),
        skipped.load(Ordering::Relaxed),
        errors.load(Ordering::Relaxed)
    );

    Ok(())
}

fn cmd_dds_info(path: &Path) -> Result<()> {
    let texture = DdsTexture::open(path).context("Failed to read DDS file")?;

    println!("File:     {}", path.display());
    println!("Size:     {}x{}", texture.width, texture.height);
    println!("Codec:    {} (format code {})", texture.four_cc, texture.format.code());
    println!("Name:     {}", if texture.name.is_empty() { "<none>" } else { texture.name.as_str() });
    println!("Mipmaps:  {}", texture.mip_map_count);
    println!("Payload:  {} bytes", texture.payload.len());

    let declared = texture.mip_map_count;
    let full_chain = blocks::max_mip_levels(texture.width as u32, texture.height as u32);
    let entry = texture.into_entry();
    let levels = declared.min(full_chain);
    let chain: usize = (0..levels).filter_map(|level| entry.expected_level_size(level)).sum();
    println!("Chain:    {} bytes expected for {} level(s)", chain, levels);
    if declared > full_chain {
        println!("Warning:  header declares {} levels, a full chain has {}", declared, full_chain);
    }

    Ok(())
}

/// Case-insensitive glob filter on texture names; matches everything when empty.
struct NameFilter(Option<Pattern>);

impl NameFilter {
    fn new(pattern: Option<&str>) -> Result<Self> {
        let pattern = pattern
            .map(Pattern::new)
            .transpose()
            .context("Invalid filter pattern")?;
        Ok(Self(pattern))
    }

    fn matches(&self, name: &str) -> bool {
        let options = MatchOptions {
            case_sensitive: false,
            ..MatchOptions::default()
        };
        self.0.as_ref().map_or(true, |p| p.matches_with(name, options))
    }
}

/// File stem for an exported texture, unique within one extraction.
fn output_stem(name: &str, index: usize, level: usize, used: &mut HashSet<String>) -> String {
    let mut stem: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') { c } else { '_' })
        .collect();
    if stem.trim_matches('.').is_empty() {
        stem = format!("texture_{index}");
    }
    if level > 0 {
        stem = format!("{stem}_mip{level}");
    }
    if used.insert(stem.clone()) {
        return stem;
    }

    // Another name may already have produced `<stem>_<n>`; keep counting.
    let mut suffix = index;
    loop {
        let candidate = format!("{stem}_{suffix}");
        if used.insert(candidate.clone()) {
            return candidate;
        }
        suffix += 1;
    }
}
