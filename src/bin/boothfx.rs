use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "boothfx", version)]
struct Cli {
    /// Log engine stages at DEBUG level.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose photos described by a JSON job file into one PNG.
    Compose(ComposeArgs),
    /// Apply one effect to a photo.
    Effect(EffectArgs),
    /// Encode photos into a looping GIF.
    Gif(GifArgs),
    /// List built-in themes.
    Themes,
    /// List built-in color presets.
    Presets,
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Input job JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct EffectArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Effect as JSON, e.g. '{"kind":"vignette","params":{"intensity":0.8}}'.
    #[arg(long)]
    effect: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct GifArgs {
    /// Input frame, repeatable; order is kept.
    #[arg(long = "frame", required = true)]
    frames: Vec<PathBuf>,

    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,

    #[arg(long, default_value_t = 500)]
    delay_ms: u32,

    #[arg(long, default_value_t = 480)]
    max_width: u32,

    /// Loop count; 0 loops forever.
    #[arg(long, default_value_t = 0)]
    loops: u16,
}

/// Composition job. Relative paths resolve against the job file's directory.
#[derive(serde::Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct ComposeJob {
    photos: Vec<PathBuf>,
    #[serde(default)]
    background_image: Option<PathBuf>,
    #[serde(default)]
    theme_id: Option<String>,
    #[serde(default)]
    font: Option<PathBuf>,
    /// Resize every photo to `[width, height]` before composing.
    #[serde(default)]
    fit: Option<[u32; 2]>,
    /// Effects applied to each photo before it is placed.
    #[serde(default)]
    effects: Vec<boothfx::EffectInstance>,
    #[serde(default)]
    options: boothfx::ComposeOptions,
    #[serde(default)]
    overlays: boothfx::OverlayList,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Effect(args) => cmd_effect(args),
        Command::Gif(args) => cmd_gif(args),
        Command::Themes => cmd_themes(),
        Command::Presets => cmd_presets(),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_image(path: &Path) -> anyhow::Result<boothfx::PixelBuffer> {
    let bytes = std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    boothfx::decode_image(&bytes).with_context(|| format!("decode image '{}'", path.display()))
}

fn write_png(path: &Path, buffer: &boothfx::PixelBuffer) -> anyhow::Result<()> {
    write_bytes(path, &boothfx::encode_png(buffer)?)
}

fn write_bytes(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn read_job(path: &Path) -> anyhow::Result<ComposeJob> {
    let f = File::open(path).with_context(|| format!("open job '{}'", path.display()))?;
    let job: ComposeJob =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse job JSON")?;
    Ok(job)
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let job = read_job(&args.in_path)?;
    let root = args.in_path.parent().unwrap_or_else(|| Path::new("."));

    let mut photos = job
        .photos
        .iter()
        .map(|p| read_image(&root.join(p)))
        .collect::<anyhow::Result<Vec<_>>>()?;
    if let Some([w, h]) = job.fit {
        photos = boothfx::fit_photos(&photos, w, h)?;
    }

    let chain = boothfx::EffectChain::from_instances(&job.effects)?;
    if !chain.is_empty() {
        photos = photos
            .iter()
            .map(|p| chain.apply(p))
            .collect::<boothfx::BoothResult<Vec<_>>>()?;
    }

    let background = job
        .background_image
        .as_ref()
        .map(|p| read_image(&root.join(p)))
        .transpose()?;

    let mut options = job.options;
    if let Some(id) = &job.theme_id {
        options.theme = Some(boothfx::theme_by_id(id)?);
    }

    let mut composer = match &job.font {
        Some(p) => {
            let path = root.join(p);
            let bytes =
                std::fs::read(&path).with_context(|| format!("read font '{}'", path.display()))?;
            boothfx::Composer::with_font(bytes)?
        }
        None => boothfx::Composer::new(),
    };

    let mut out = composer.compose(&photos, background.as_ref(), &options)?;
    if !job.overlays.is_empty() {
        let mut bundled;
        let renderer = match composer.text_renderer() {
            Some(r) => r,
            None => {
                bundled = boothfx::TextRenderer::bundled()?;
                &mut bundled
            }
        };
        out = boothfx::apply_overlays(&out, &job.overlays, renderer)?;
    }
    write_png(&args.out, &out)
}

fn cmd_effect(args: EffectArgs) -> anyhow::Result<()> {
    let inst: boothfx::EffectInstance =
        serde_json::from_str(&args.effect).with_context(|| "parse effect JSON")?;
    let effect = boothfx::parse_effect(&inst)?;
    let input = read_image(&args.in_path)?;
    let out = effect.apply(&input)?;
    write_png(&args.out, &out)
}

fn cmd_gif(args: GifArgs) -> anyhow::Result<()> {
    let frames = args
        .frames
        .iter()
        .map(|p| {
            std::fs::read(p)
                .map(boothfx::GifFrame::Encoded)
                .with_context(|| format!("read frame '{}'", p.display()))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    let options = boothfx::GifOptions {
        delay_ms: args.delay_ms,
        repeat: boothfx::GifRepeat::from_loop_count(args.loops),
        max_width: args.max_width,
    };
    let out = boothfx::encode_gif(&frames, &options)?;
    for d in &out.dropped {
        let name = args
            .frames
            .get(d.index)
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        eprintln!("warning: dropped frame {} '{name}': {}", d.index, d.reason);
    }
    write_bytes(&args.out, &out.bytes)
}

fn cmd_themes() -> anyhow::Result<()> {
    for t in boothfx::builtin_themes() {
        println!(
            "{:<14} {:<14} {:?} {}",
            t.id,
            t.name,
            t.pattern,
            t.background_color.to_hex()
        );
    }
    Ok(())
}

fn cmd_presets() -> anyhow::Result<()> {
    for p in boothfx::Preset::ALL {
        println!("{}", p.name());
    }
    Ok(())
}
