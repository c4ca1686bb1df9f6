use clap::{Parser, Subcommand};
use join_images::engine::Limits;
use join_images::ops::{self, JoinRequest, ResizeRequest};
use join_images::{TextSpec, TextStyle, output, payload};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "join-images")]
#[command(about = "Join two images into one and resize images to fit a byte budget")]
#[command(long_about = "\
Join two images into one and resize images to fit a byte budget

join   Stacks a second image below the first (scaled to the first's width)
       and optionally draws text over the result. A join with a single image
       is a resize plus the text overlay.

resize Re-encodes one or more images as JPEG within the size limit, lowering
       quality first and shrinking resolution only when quality alone cannot
       meet the budget. Multiple inputs are processed in parallel.

Inputs are image files (JPEG, PNG, WebP) or, with --base64, text files
holding base64 payloads. With --base64 and no --out, results are printed to
stdout as base64 — the transport the original plugin surface used.")]
#[command(version = version_string())]
struct Cli {
    /// Worker threads for batch processing (default: all cores)
    #[arg(long, global = true)]
    threads: Option<usize>,

    /// Read inputs as base64 text; print results as base64 when not saving
    #[arg(long, global = true)]
    base64: bool,

    /// Print a JSON summary per result instead of the human display
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct JoinArgs {
    /// First (topmost) image
    first: PathBuf,
    /// Second image, stacked below the first
    second: Option<PathBuf>,
    /// Text to draw over the composed image
    #[arg(long)]
    text: Option<String>,
    /// Font size in pixels for the overlay text
    #[arg(long, default_value_t = 48.0)]
    text_size: f32,
    /// Maximum output size in megabytes
    #[arg(long, default_value_t = 5.0)]
    max_size_mb: f64,
    /// Folder to save the result into (requires --name)
    #[arg(long)]
    out: Option<PathBuf>,
    /// Filename for the saved result
    #[arg(long)]
    name: Option<String>,
}

#[derive(clap::Args)]
struct ResizeArgs {
    /// Images to resize
    #[arg(required = true)]
    images: Vec<PathBuf>,
    /// Maximum output size in megabytes, per image
    #[arg(long, default_value_t = 5.0)]
    max_size_mb: f64,
    /// Folder to save results into as <stem>.jpg
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Join one or two images, optionally with overlaid text
    Join(JoinArgs),
    /// Re-encode images as JPEG within the size limit
    Resize(ResizeArgs),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_thread_pool(cli.threads);

    match &cli.command {
        Command::Join(args) => run_join(&cli, args),
        Command::Resize(args) => run_resize(&cli, args),
    }
}

fn run_join(cli: &Cli, args: &JoinArgs) -> Result<(), Box<dyn std::error::Error>> {
    let request = JoinRequest {
        first: read_payload(&args.first, cli.base64)?,
        second: match &args.second {
            Some(path) => Some(read_payload(path, cli.base64)?),
            None => None,
        },
        text: args.text.as_ref().map(|content| TextSpec {
            content: content.clone(),
            style: TextStyle {
                size: args.text_size,
                ..TextStyle::default()
            },
        }),
        max_size_mb: Some(args.max_size_mb),
        output_folder: args.out.clone(),
        output_filename: args.name.clone(),
    };

    let result = ops::join_with_limits(&request, &Limits::default())?;
    report(cli, &args.first.display().to_string(), &result);
    Ok(())
}

fn run_resize(cli: &Cli, args: &ResizeArgs) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(out) = &args.out {
        std::fs::create_dir_all(out)?;
    }

    let results: Result<Vec<_>, String> = args
        .images
        .par_iter()
        .map(|path| {
            let request = ResizeRequest {
                image: read_payload(path, cli.base64).map_err(|e| e.to_string())?,
                max_size_mb: Some(args.max_size_mb),
            };
            let mut result = ops::resize(&request)
                .map_err(|e| format!("{}: {e}", path.display()))?;
            if let Some(out) = &args.out {
                let target = out.join(output_name(path));
                std::fs::write(&target, &result.bytes)
                    .map_err(|e| format!("{}: {e}", target.display()))?;
                result.path = Some(target);
            }
            Ok((path, result))
        })
        .collect();

    for (path, result) in results? {
        report(cli, &path.display().to_string(), &result);
    }
    Ok(())
}

fn report(cli: &Cli, input: &str, result: &join_images::EncodedResult) {
    if cli.json {
        let summary = output::ResultSummary::new(input, result);
        println!("{}", serde_json::to_string(&summary).unwrap());
    } else if cli.base64 && result.path.is_none() {
        println!("{}", payload::to_base64(&result.bytes));
    } else {
        for line in output::format_result(input, result) {
            println!("{line}");
        }
    }
}

/// Read an input file as raw image bytes, or decode it from base64 text.
fn read_payload(path: &Path, base64: bool) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    if base64 {
        let text = std::fs::read_to_string(path)?;
        Ok(payload::from_base64(&text)?)
    } else {
        Ok(std::fs::read(path)?)
    }
}

/// Output filename for a resized image: source stem with a .jpg extension.
fn output_name(source: &Path) -> String {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("resized");
    format!("{stem}.jpg")
}

/// Initialize the rayon thread pool for batch resizing.
///
/// Caps at the number of available CPU cores — user can constrain down, not up.
fn init_thread_pool(threads: Option<usize>) {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    let threads = threads.map_or(cores, |t| t.clamp(1, cores));
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
