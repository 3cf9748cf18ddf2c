use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use photobooth::{
    Action, BackgroundChoice, BoothConfig, BoothController, CapturedPhoto, Compositor,
    CountdownTick, DirectoryCamera, DirectoryDownload, EncodedImage, PhotoId, StyleParameters,
    SystemClock, Template, decode_image, logging::init_logging,
};

#[derive(Parser, Debug)]
#[command(name = "photobooth", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose existing image files into a template and write a JPEG.
    Compose(ComposeArgs),
    /// Run a full booth session against a directory of frames.
    Session(SessionArgs),
}

#[derive(Args, Debug)]
struct StyleArgs {
    /// Layout template: strip, grid, collage, or single.
    #[arg(long)]
    template: Template,

    /// Background: white, black, gray, or pattern.
    #[arg(long, default_value = "white")]
    background: BackgroundChoice,

    /// Border width in pixels (clamped to 0..=10).
    #[arg(long, default_value_t = 0)]
    border: u32,

    /// Spacing in pixels (clamped to 0..=20).
    #[arg(long, default_value_t = 0)]
    spacing: u32,

    /// JSON config file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ComposeArgs {
    #[command(flatten)]
    style: StyleArgs,

    /// Output JPEG path.
    #[arg(long)]
    out: PathBuf,

    /// Input images, in placement order.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

#[derive(Args, Debug)]
struct SessionArgs {
    #[command(flatten)]
    style: StyleArgs,

    /// Directory of still images used as camera frames.
    #[arg(long)]
    frames: PathBuf,

    /// Export directory (overrides config and environment).
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Do not sleep between countdown ticks.
    #[arg(long)]
    no_wait: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Session(args) => cmd_session(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<BoothConfig> {
    let mut cfg = match path {
        Some(path) => BoothConfig::load(path)?,
        None => BoothConfig::default(),
    };
    cfg.apply_env_overrides();
    cfg.validate()?;
    init_logging(&cfg.logging);
    Ok(cfg)
}

fn read_photo(path: &Path, id: i64) -> anyhow::Result<CapturedPhoto> {
    let bytes = std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    let (width, height) = decode_image(&bytes)
        .with_context(|| format!("decode image '{}'", path.display()))?
        .dimensions();
    Ok(CapturedPhoto {
        id: PhotoId(id),
        image: EncodedImage::new(width, height, bytes),
        captured_at_ms: id,
    })
}

fn write_output(path: &Path, image: &EncodedImage) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, image.bytes.as_slice())
        .with_context(|| format!("write jpeg '{}'", path.display()))
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.style.config.as_deref())?;
    let template = args.style.template;

    let required = template.required_count();
    if args.inputs.len() > required {
        tracing::warn!(
            given = args.inputs.len(),
            required,
            "extra inputs are ignored by the {template} template"
        );
    }
    let photos = args
        .inputs
        .iter()
        .take(required)
        .zip(1..)
        .map(|(path, id)| read_photo(path, id))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let compositor = Compositor::new(cfg.compositor_opts())?;
    let style = StyleParameters::new(args.style.border, args.style.spacing);
    let image = compositor
        .generate_final_image(&photos, Some(template), args.style.background, style)
        .context("composite produced no image")?;

    write_output(&args.out, &image)?;
    eprintln!(
        "wrote {} ({}x{})",
        args.out.display(),
        image.width,
        image.height
    );
    Ok(())
}

fn cmd_session(args: SessionArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(args.style.config.as_deref())?;
    if let Some(dir) = args.export_dir {
        cfg.export_dir = dir;
    }

    let camera = Arc::new(DirectoryCamera::new(&args.frames));
    let mut booth = BoothController::new(&cfg, camera, Arc::new(SystemClock))?;
    booth.dispatch(Action::Begin);
    booth.dispatch(Action::SelectTemplate(args.style.template));
    anyhow::ensure!(
        booth.camera_live(),
        "no usable frames in '{}'",
        args.frames.display()
    );

    while !booth.state().is_full() {
        let before = booth.state().photos.len();
        anyhow::ensure!(booth.start_countdown(), "countdown refused");
        loop {
            if !args.no_wait {
                std::thread::sleep(Duration::from_secs(1));
            }
            match booth.tick() {
                CountdownTick::Remaining(n) => eprintln!("{n}..."),
                CountdownTick::Fire | CountdownTick::Idle => break,
            }
        }
        let after = booth.state().photos.len();
        anyhow::ensure!(after > before, "capture {} failed", before + 1);
        eprintln!("captured photo {after}/{}", booth.state().required_count());
    }

    booth.dispatch(Action::SetBorderWidth(args.style.border));
    booth.dispatch(Action::SetSpacing(args.style.spacing));
    booth.dispatch(Action::SetBackground(args.style.background));
    booth.dispatch(Action::Finish);

    let download = DirectoryDownload::new(&cfg.export_dir);
    anyhow::ensure!(
        booth.export_composite(&download),
        "composite produced no image"
    );
    let photos = booth.export_all_photos(&download);
    eprintln!(
        "exported composite and {photos} photos to {}",
        cfg.export_dir.display()
    );
    Ok(())
}
