use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::Parser;
use gltihc::{
    BlendOp, FilterKind, GlitchOptions, Glitcher, NameContext, OutputFormat, OutputName,
    PixelBuffer, Preset,
};

#[derive(Parser, Debug)]
#[command(name = "gltihc", version, about = "Randomized block-wise glitch art generator")]
struct Cli {
    /// Input images.
    #[arg(required_unless_present = "list")]
    inputs: Vec<PathBuf>,

    /// Load engine options from a JSON file; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Minimum iterations number.
    #[arg(long)]
    min_iterations: Option<u32>,

    /// Maximum iterations number.
    #[arg(long)]
    max_iterations: Option<u32>,

    /// Block size in pixels.
    #[arg(long = "bs")]
    block_size: Option<u32>,

    /// Minimum segment size relative to the block count.
    #[arg(long)]
    min_segment_size: Option<f64>,

    /// Maximum segment size relative to the block count.
    #[arg(long)]
    max_segment_size: Option<f64>,

    /// Minimum filters number in a chain.
    #[arg(long)]
    min_filters: Option<u32>,

    /// Maximum filters number in a chain.
    #[arg(long)]
    max_filters: Option<u32>,

    /// Worker threads (0 = all cores).
    #[arg(long)]
    threads: Option<usize>,

    /// Allowed filters, comma separated.
    #[arg(long, value_delimiter = ',')]
    filters: Option<Vec<String>>,

    /// Allowed operations, comma separated.
    #[arg(long, value_delimiter = ',')]
    ops: Option<Vec<String>>,

    /// Named allow-list preset; replaces --filters and --ops.
    #[arg(long)]
    preset: Option<Preset>,

    /// Output copies per input.
    #[arg(long, default_value_t = 1)]
    copies: usize,

    /// Output file name template.
    #[arg(long = "fmt", default_value = gltihc::naming::DEFAULT_TEMPLATE)]
    name_format: OutputName,

    /// Output directory.
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,

    /// Downscale inputs wider than this before glitching.
    #[arg(long)]
    max_width: Option<u32>,

    /// Downscale inputs taller than this before glitching.
    #[arg(long)]
    max_height: Option<u32>,

    /// Keep the alpha channel in the output.
    #[arg(long)]
    alpha: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, default_value_t = tracing::Level::INFO)]
    log: tracing::Level,

    /// Print filter, operation and preset names, then exit.
    #[arg(long)]
    list: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log)
        .with_writer(std::io::stderr)
        .init();

    if cli.list {
        print_names();
        return Ok(());
    }

    let opts = resolve_options(&cli)?;
    let glitcher = Glitcher::new(&opts)?;

    if let Some(dir) = &cli.dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create output dir '{}'", dir.display()))?;
    }

    let mut rng = gltihc::seeded_rng(cli.seed);
    for (index, input) in cli.inputs.iter().enumerate() {
        tracing::info!("processing: {}", input.display());
        let source = read_image(input, cli.max_width, cli.max_height)?;
        let buffer = PixelBuffer::from_image(&source);

        for copy in 0..cli.copies {
            tracing::debug!(copy, "copy");
            let mut name = PathBuf::from(cli.name_format.render(&NameContext {
                input,
                index,
                copy,
            }));
            if let Some(dir) = &cli.dir {
                name = dir.join(name);
            }

            let out = glitcher
                .apply(&buffer, &mut rng)
                .with_context(|| format!("glitch '{}'", input.display()))?;
            write_image(&name, &out, cli.alpha)?;
        }
    }
    Ok(())
}

fn resolve_options(cli: &Cli) -> anyhow::Result<GlitchOptions> {
    let mut opts = match &cli.config {
        Some(path) => {
            let f = File::open(path)
                .with_context(|| format!("open config '{}'", path.display()))?;
            serde_json::from_reader(BufReader::new(f))
                .with_context(|| format!("parse config JSON '{}'", path.display()))?
        }
        None => GlitchOptions::default(),
    };

    macro_rules! override_field {
        ($($field:ident),*) => {
            $(if let Some(v) = cli.$field { opts.$field = v; })*
        };
    }
    override_field!(
        min_iterations,
        max_iterations,
        block_size,
        min_segment_size,
        max_segment_size,
        min_filters,
        max_filters,
        threads
    );

    match cli.preset {
        Some(preset) => preset.apply_to(&mut opts),
        None => {
            if let Some(filters) = &cli.filters {
                opts.filters = Some(filters.clone());
            }
            if let Some(ops) = &cli.ops {
                opts.ops = Some(ops.clone());
            }
        }
    }
    Ok(opts)
}

fn read_image(
    path: &Path,
    max_width: Option<u32>,
    max_height: Option<u32>,
) -> anyhow::Result<image::DynamicImage> {
    let img = image::ImageReader::open(path)
        .with_context(|| format!("open image '{}'", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("probe image format '{}'", path.display()))?
        .decode()
        .with_context(|| format!("decode image '{}'", path.display()))?;

    let (w, h) = (img.width(), img.height());
    let bound_w = max_width.unwrap_or(w).min(w);
    let bound_h = max_height.unwrap_or(h).min(h);
    if (bound_w, bound_h) == (w, h) {
        return Ok(img);
    }
    let scaled = img.resize(bound_w, bound_h, image::imageops::FilterType::Triangle);
    tracing::info!(
        from = %format!("{w}x{h}"),
        to = %format!("{}x{}", scaled.width(), scaled.height()),
        "downscaled"
    );
    Ok(scaled)
}

fn write_image(path: &Path, buffer: &PixelBuffer, alpha: bool) -> anyhow::Result<()> {
    let format = image::ImageFormat::from_path(path)
        .with_context(|| format!("output format of '{}'", path.display()))?;
    let pixels = match (alpha, format) {
        (true, image::ImageFormat::Jpeg) => {
            tracing::warn!("jpeg has no alpha channel, dropping it");
            OutputFormat::Rgb8
        }
        (true, _) => OutputFormat::Rgba8,
        (false, _) => OutputFormat::Rgb8,
    };

    tracing::info!("writing: {}", path.display());
    buffer
        .to_image(pixels)
        .save_with_format(path, format)
        .with_context(|| format!("write image '{}'", path.display()))?;
    Ok(())
}

fn print_names() {
    let presets: Vec<_> = Preset::ALL.iter().map(|p| p.name()).collect();
    println!(
        "Filters:\n  {}\n\nOperations:\n  {}\n\nPresets:\n  {}",
        FilterKind::names().join(", "),
        BlendOp::names().join(", "),
        presets.join(", ")
    );
}
