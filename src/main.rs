use clap::{Parser, Subcommand};
use photo_tools::color::Color;
use photo_tools::imaging::{
    self, CommandSegmenter, EncodeOptions, ExportFormat, MaskSegmenter, Segmenter,
};
use photo_tools::tools::{self, Operation};
use photo_tools::{config, output};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Input photo and optional explicit output path.
#[derive(clap::Args, Clone)]
struct InputArgs {
    /// Photo to process (JPEG or PNG)
    input: PathBuf,

    /// Write here instead of <out-dir>/<default name>
    #[arg(long, short)]
    output: Option<PathBuf>,
}

/// Flags for tools that cut out the background.
#[derive(clap::Args, Clone)]
struct SegmentArgs {
    /// Use this grayscale mask instead of running the segmentation command
    #[arg(long)]
    mask: Option<PathBuf>,
}

#[derive(Parser)]
#[command(name = "photo-tools")]
#[command(about = "Background removal, passport photos and print layouts")]
#[command(long_about = "\
Background removal, passport photos and print layouts

Tools:

  remove-bg   Cut the subject out          → no_bg.png (transparent PNG)
  bg-color    Cut out + solid background   → bg_<color>.jpg
  passport    531x649 + 20px white border  → passport.jpg
  layout      Six passport photos on 4x6in → 4x6_layout.jpg (300 DPI)

Background removal runs an external model program, `rembg i {input} {output}`
by default (see [segmentation] in the config), or applies a mask given with
--mask.

Run 'photo-tools gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Config file (defaults apply when omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory for outputs written under their default names
    #[arg(long, default_value = ".", global = true)]
    out_dir: PathBuf,

    /// Log processing steps to stderr (RUST_LOG overrides the filter)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Remove the background, keeping transparency
    RemoveBg {
        #[command(flatten)]
        io: InputArgs,
        #[command(flatten)]
        segment: SegmentArgs,
    },
    /// Replace the background with a solid color
    BgColor {
        #[command(flatten)]
        io: InputArgs,
        #[command(flatten)]
        segment: SegmentArgs,
        /// Palette name (white, black, red, green, blue, gray, yellow) or hex
        #[arg(long, default_value = "white")]
        color: Color,
    },
    /// Make a bordered passport photo
    Passport(InputArgs),
    /// Tile the passport photo onto a print sheet
    Layout(InputArgs),
    /// Write a display-sized PNG preview
    Preview {
        #[command(flatten)]
        io: InputArgs,
        /// Overrides display.max_width
        #[arg(long)]
        max_width: Option<u32>,
    },
    /// List the tools in menu order
    Tools,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.verbose {
        init_logging();
    }

    let config = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Command::RemoveBg { io, segment } => {
            let segmenter = build_segmenter(&segment, &config)?;
            execute(
                Operation::RemoveBackground,
                &io,
                &config,
                Some(segmenter.as_ref()),
                &cli.out_dir,
            )?;
        }
        Command::BgColor { io, segment, color } => {
            let segmenter = build_segmenter(&segment, &config)?;
            execute(
                Operation::BackgroundColor { color },
                &io,
                &config,
                Some(segmenter.as_ref()),
                &cli.out_dir,
            )?;
        }
        Command::Passport(io) => {
            execute(Operation::Passport, &io, &config, None, &cli.out_dir)?;
        }
        Command::Layout(io) => {
            execute(Operation::Layout, &io, &config, None, &cli.out_dir)?;
        }
        Command::Preview { io, max_width } => {
            let image = imaging::load(&io.input)?;
            let preview = imaging::preview_resize(
                &image,
                max_width.unwrap_or(config.display.max_width),
            );
            let bytes = imaging::encode(&preview, ExportFormat::Png, &EncodeOptions::default())?;
            let path = io
                .output
                .unwrap_or_else(|| cli.out_dir.join(preview_file_name(&io.input)));
            write_output(&path, &bytes)?;
            output::print_preview(
                (image.width(), image.height()),
                (preview.width(), preview.height()),
                &path,
            );
        }
        Command::Tools => {
            output::print_menu(&config.display.menu);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Send `tracing` events to stderr so stdout stays a clean report.
fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("photo_tools=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// A mask flag wins over the configured segmentation command.
fn build_segmenter(
    args: &SegmentArgs,
    config: &config::AppConfig,
) -> Result<Box<dyn Segmenter>, imaging::SegmentError> {
    match &args.mask {
        Some(mask) => Ok(Box::new(MaskSegmenter::open(mask)?)),
        None => Ok(Box::new(CommandSegmenter::from_config(&config.segmentation)?)),
    }
}

/// Load, run one tool, write the export.
fn execute(
    operation: Operation,
    io: &InputArgs,
    config: &config::AppConfig,
    segmenter: Option<&dyn Segmenter>,
    out_dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let image = imaging::load(&io.input)?;
    let outcome = tools::run(&operation, &image, config, segmenter)?;
    let path = io
        .output
        .clone()
        .unwrap_or_else(|| out_dir.join(&outcome.export.file_name));
    write_output(&path, &outcome.export.bytes)?;
    output::print_export(operation.kind(), &outcome.export, &path);
    Ok(())
}

fn write_output(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)
}

/// `photo.jpg` → `photo-preview.png`
fn preview_file_name(input: &Path) -> String {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("image");
    format!("{stem}-preview.png")
}
