use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use serde::Deserialize;

use rankcard::{
    AssetStore, CardRenderer, CardSettings, CardStyle, ColorDef, FsSource, LayoutConfig, RankCard,
    RenderOpts,
};

#[derive(Parser, Debug)]
#[command(name = "rankcard", version)]
struct Cli {
    /// Log debug events to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a rank card as a PNG.
    Render(RenderArgs),
    /// Print a built-in layout as JSON.
    Layout(LayoutArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Background image (required by the classic and shade styles).
    #[arg(long)]
    background: Option<PathBuf>,

    /// Avatar image.
    #[arg(long)]
    avatar: PathBuf,

    #[arg(long)]
    username: String,

    #[arg(long)]
    level: u64,

    #[arg(long)]
    current_exp: u64,

    #[arg(long)]
    max_exp: u64,

    #[arg(long)]
    rank: Option<u64>,

    /// Built-in design: classic, solid or shade.
    #[arg(long, default_value = "classic")]
    style: CardStyle,

    /// Directory holding fonts and mask art referenced by the layout.
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Font file to use instead of the layout's font asset.
    #[arg(long)]
    font: Option<PathBuf>,

    /// JSON file with `settings` and/or `layout` overrides.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    background_color: Option<ColorDef>,

    #[arg(long)]
    bar_color: Option<ColorDef>,

    #[arg(long)]
    text_color: Option<ColorDef>,

    #[arg(long)]
    card_color: Option<ColorDef>,

    /// Rescale the finished card by this percentage.
    #[arg(long, default_value_t = 100)]
    resize: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    #[arg(long, default_value = "classic")]
    style: CardStyle,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    settings: Option<CardSettings>,
    #[serde(default)]
    layout: Option<LayoutConfig>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Layout(args) => cmd_layout(args),
    }
}

fn read_config(path: &Path) -> anyhow::Result<ConfigFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse config '{}'", path.display()))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(p) => read_config(p)?,
        None => ConfigFile::default(),
    };

    let mut settings = config.settings.unwrap_or_default();
    for (flag, field) in [
        (args.background_color, &mut settings.background_color),
        (args.bar_color, &mut settings.bar_color),
        (args.text_color, &mut settings.text_color),
        (args.card_color, &mut settings.card_color),
    ] {
        if let Some(c) = flag {
            *field = c;
        }
    }

    let layout = config
        .layout
        .unwrap_or_else(|| LayoutConfig::preset(args.style));

    let mut assets = AssetStore::new(&args.assets);
    if let Some(font) = &args.font {
        let bytes =
            std::fs::read(font).with_context(|| format!("read font '{}'", font.display()))?;
        assets.insert(&layout.font, bytes)?;
    }

    let card = RankCard {
        username: args.username,
        level: args.level,
        current_exp: args.current_exp,
        max_exp: args.max_exp,
        rank: args.rank,
    };

    let renderer = CardRenderer::new(assets, layout, settings)?;
    let background = args
        .background
        .as_ref()
        .map(|p| p.to_string_lossy().into_owned());
    let avatar = args.avatar.to_string_lossy().into_owned();
    let png = renderer.render_from_source(
        &FsSource::new("."),
        &card,
        background.as_deref(),
        &avatar,
        RenderOpts {
            resize_percent: args.resize,
        },
    )?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let layout = LayoutConfig::preset(args.style);
    let json = serde_json::to_string_pretty(&layout).context("serialize layout")?;
    println!("{json}");
    Ok(())
}
