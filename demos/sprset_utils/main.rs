//! Sprite set CLI Utility
//!
//! A command-line tool for inspecting, extracting, resaving and re-indexing
//! sprite set containers (`acsprset.spr`) and their companion index files.
//!
//! # Features
//!
//! - **info**: Display the header of a sprite set and how its slot table was found
//! - **list**: List every present slot with its offset and size
//! - **extract**: Write the raw pixels of one sprite to a file
//! - **resave**: Copy a sprite set, optionally changing its compression
//! - **reindex**: Rebuild the companion index by scanning the container
//! - **verify**: Decode every sprite and report the ones that fail
//!
//! # Configuration
//!
//! Defaults for `resave` are read from an optional TOML file (`--config`) and
//! from `SPRSET_*` environment variables, with command-line flags winning:
//!
//! ```toml
//! compress = true
//! index_name = "sprindex.dat"
//! ```
//!
//! # Usage
//!
//! ```bash
//! # Show header information, looking for sprindex.dat next to the file
//! cargo run --example sprset_utils -- info game/acsprset.spr
//!
//! # List slots as JSON
//! cargo run --example sprset_utils -- list game/acsprset.spr --json
//!
//! # Extract sprite 42 and dump its first bytes
//! cargo run --example sprset_utils -- extract game/acsprset.spr 42 -o sprite_42.raw --hex
//!
//! # Resave uncompressed, writing a fresh index next to the output
//! SPRSET_COMPRESS=false cargo run --example sprset_utils -- resave game/acsprset.spr out/acsprset.spr
//!
//! # Rebuild a missing index
//! cargo run --example sprset_utils -- reindex game/acsprset.spr
//! ```

use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use log::{info, warn};
use serde::Deserialize;
use serde_json::json;
use sprset_rs::prelude::file::spr::constants::DEFAULT_SPRITE_INDEX_NAME;
use sprset_rs::prelude::*;

/// Number of payload bytes shown by `extract --hex`
const HEX_PREVIEW_BYTES: usize = 64;

fn main() -> Result<()> {
	// Initialize logger with default level set to info if RUST_LOG is not set
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();
	let settings = Settings::load(cli.config.as_deref())?;
	match cli.command {
		Command::Info(args) => run_info(&args, &settings),
		Command::List(args) => run_list(&args, &settings),
		Command::Extract(args) => run_extract(&args, &settings),
		Command::Resave(args) => run_resave(&args, &settings),
		Command::Reindex(args) => run_reindex(&args, &settings),
		Command::Verify(args) => run_verify(&args, &settings),
	}
}

#[derive(Parser)]
#[command(name = "sprset_utils")]
#[command(author = "sprset-rs project")]
#[command(version)]
#[command(about = "Sprite set utility - inspect, extract, resave and re-index sprite sets", long_about = None)]
struct Cli {
	/// Optional TOML file with default settings
	#[arg(short, long, global = true, value_name = "FILE", env = "SPRSET_CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Display information about a sprite set
	Info(OpenArgs),
	/// List present slots
	List(OpenArgs),
	/// Write the raw pixels of one sprite to a file
	Extract(ExtractArgs),
	/// Copy a sprite set, optionally changing its compression
	Resave(ResaveArgs),
	/// Rebuild the companion index by scanning the container
	Reindex(ReindexArgs),
	/// Decode every sprite and report failures
	Verify(OpenArgs),
}

#[derive(Args)]
struct OpenArgs {
	/// Sprite set file
	#[arg(value_name = "SPR")]
	file: PathBuf,

	/// Companion index, defaults to the configured name next to the file
	#[arg(short, long, value_name = "INDEX")]
	index: Option<PathBuf>,

	/// Print JSON instead of text
	#[arg(long, default_value_t = false)]
	json: bool,
}

#[derive(Args)]
struct ExtractArgs {
	#[command(flatten)]
	open: OpenArgs,

	/// Key of the sprite to extract
	#[arg(value_name = "KEY")]
	key: SpriteKey,

	/// Output file for the raw pixels
	#[arg(short, long, value_name = "FILE")]
	output: Option<PathBuf>,

	/// Print a hex dump of the first payload bytes
	#[arg(long, default_value_t = false)]
	hex: bool,
}

#[derive(Args)]
struct ResaveArgs {
	/// Source sprite set
	#[arg(value_name = "SPR")]
	file: PathBuf,

	/// Destination sprite set
	#[arg(value_name = "OUT")]
	output: PathBuf,

	/// Compress the output, defaults to the source's setting
	#[arg(long, value_name = "BOOL", env = "SPRSET_COMPRESS")]
	compress: Option<bool>,

	/// Reuse the source's file id instead of generating a new one
	#[arg(long, default_value_t = false)]
	keep_file_id: bool,

	/// Do not write a companion index for the output
	#[arg(long, default_value_t = false)]
	no_index: bool,
}

#[derive(Args)]
struct ReindexArgs {
	/// Sprite set file
	#[arg(value_name = "SPR")]
	file: PathBuf,

	/// Index to write, defaults to the configured name next to the file
	#[arg(short, long, value_name = "INDEX")]
	output: Option<PathBuf>,
}

/// Defaults merged from the config file and `SPRSET_*` variables
#[derive(Debug, Deserialize)]
#[serde(default)]
struct Settings {
	/// Compression used by `resave` when no flag is given
	compress: Option<bool>,
	/// File name of companion indexes
	index_name: String,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			compress: None,
			index_name: DEFAULT_SPRITE_INDEX_NAME.to_string(),
		}
	}
}

impl Settings {
	fn load(path: Option<&Path>) -> Result<Self> {
		let mut builder = config::Config::builder();
		if let Some(path) = path {
			builder = builder.add_source(config::File::from(path));
		}
		builder = builder.add_source(config::Environment::with_prefix("SPRSET"));

		let merged = builder.build().context("Failed to load settings")?;
		merged.try_deserialize().context("Invalid settings")
	}

	fn index_path_for(&self, file: &Path) -> PathBuf {
		file.with_file_name(&self.index_name)
	}
}

fn open(args: &OpenArgs, settings: &Settings) -> Result<SprFile<BufReader<fs::File>>> {
	let index = args.index.clone().unwrap_or_else(|| settings.index_path_for(&args.file));
	SprFile::open(&args.file, &index)
		.with_context(|| format!("Failed to open sprite set {}", args.file.display()))
}

fn run_info(args: &OpenArgs, settings: &Settings) -> Result<()> {
	let file = open(args, settings)?;
	let populated = file.iter_info().filter(|info| info.metric.width > 0).count();

	if args.json {
		let summary = json!({
			"version": file.version(),
			"format": file.format().to_string(),
			"compressed": file.is_compressed(),
			"file_id": file.file_id(),
			"slots": file.slot_count(),
			"populated": populated,
			"index": file.index_source().to_string(),
		});
		println!("{}", serde_json::to_string_pretty(&summary)?);
		return Ok(());
	}

	println!("=== Sprite Set Information ===");
	println!("File: {}", args.file.display());
	println!("Version: {} ({})", file.version(), file.format());
	println!("Compressed: {}", file.is_compressed());
	println!("File id: {}", file.file_id());
	println!("Slots: {} ({} populated)", file.slot_count(), populated);
	println!("Slot table: {}", file.index_source());
	Ok(())
}

fn run_list(args: &OpenArgs, settings: &Settings) -> Result<()> {
	let file = open(args, settings)?;

	if args.json {
		let slots: Vec<_> = file
			.iter_info()
			.map(|info| {
				json!({
					"key": info.key,
					"offset": info.offset,
					"width": info.metric.width,
					"height": info.metric.height,
				})
			})
			.collect();
		println!("{}", serde_json::to_string_pretty(&slots)?);
		return Ok(());
	}

	for info in file.iter_info() {
		println!("{:>6}  0x{:08X}  {}", info.key, info.offset, info.metric);
	}
	Ok(())
}

fn run_extract(args: &ExtractArgs, settings: &Settings) -> Result<()> {
	let mut file = open(&args.open, settings)?;
	let Some(image) = file
		.load_sprite(args.key)
		.with_context(|| format!("Failed to load sprite {}", args.key))?
	else {
		bail!("Sprite {} is empty", args.key);
	};

	println!("Sprite {}: {}", args.key, image);
	if args.hex {
		let preview = &image.pixels()[..image.pixels().len().min(HEX_PREVIEW_BYTES)];
		for (row, chunk) in preview.chunks(16).enumerate() {
			println!("  {:04X}: {}", row * 16, hex::encode(chunk));
		}
	}

	if let Some(output) = &args.output {
		fs::write(output, image.pixels())
			.with_context(|| format!("Failed to write {}", output.display()))?;
		info!("Wrote {} bytes to {}", image.pixels().len(), output.display());
	}
	Ok(())
}

fn run_resave(args: &ResaveArgs, settings: &Settings) -> Result<()> {
	let index_path = settings.index_path_for(&args.file);
	let mut source = SprFile::open(&args.file, &index_path)
		.with_context(|| format!("Failed to open sprite set {}", args.file.display()))?;

	let compress = args.compress.or(settings.compress).unwrap_or(source.is_compressed());
	let mut options = SaveOptions::new(compress);
	if args.keep_file_id {
		options = options.with_file_id(source.file_id());
	}

	let index = save_sprite_file(&args.output, &SpriteSet::new(), Some(&mut source), &options)
		.with_context(|| format!("Failed to save {}", args.output.display()))?;
	info!(
		"Saved {} slots to {} (compressed: {})",
		index.len(),
		args.output.display(),
		compress
	);

	if !args.no_index {
		let output_index = settings.index_path_for(&args.output);
		if output_index == index_path {
			warn!("Overwriting the source index at {}", output_index.display());
		}
		save_sprite_index(&output_index, &index)
			.with_context(|| format!("Failed to save index {}", output_index.display()))?;
	}
	Ok(())
}

fn run_reindex(args: &ReindexArgs, settings: &Settings) -> Result<()> {
	let reader = fs::File::open(&args.file)
		.with_context(|| format!("Failed to open sprite set {}", args.file.display()))?;
	let file = SprFile::from_reader(BufReader::new(reader))?;

	let mut index = SpriteFileIndex::new(file.file_id());
	index.reserve(file.slot_count());
	for (slot, metric) in file.slots().iter().zip(file.metrics()) {
		let offset = if slot.is_present() {
			slot.offset - file.base_offset()
		} else {
			0
		};
		index.push(metric.width, metric.height, offset);
	}

	let output = args.output.clone().unwrap_or_else(|| settings.index_path_for(&args.file));
	save_sprite_index(&output, &index)
		.with_context(|| format!("Failed to save index {}", output.display()))?;
	info!("Wrote index for {} slots to {}", index.len(), output.display());
	Ok(())
}

fn run_verify(args: &OpenArgs, settings: &Settings) -> Result<()> {
	let mut file = open(args, settings)?;
	let key_count = file.slot_count() as SpriteKey;

	let mut loaded = 0usize;
	let mut failures = Vec::new();
	for key in 0..key_count {
		match file.load_sprite(key) {
			Ok(Some(_)) => loaded += 1,
			Ok(None) => {}
			Err(e) if e.is_per_sprite() => {
				warn!("Sprite {}: {}", key, e);
				failures.push(json!({ "key": key, "error": e.to_string() }));
			}
			Err(e) => {
				return Err(e).with_context(|| format!("Stopped verifying at sprite {key}"));
			}
		}
	}

	if args.json {
		let report = json!({ "loaded": loaded, "failed": failures });
		println!("{}", serde_json::to_string_pretty(&report)?);
	} else {
		println!("Loaded {} sprites, {} failed", loaded, failures.len());
	}

	if !failures.is_empty() {
		bail!("{} sprites failed to decode", failures.len());
	}
	Ok(())
}
