use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "memepen", version)]
struct Cli {
    /// JSON configuration file (defaults are used when omitted).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List available templates.
    Templates,
    /// Compose a meme and write it as a PNG.
    Render(RenderArgs),
    /// Compose a meme, upload it and print the stored record as JSON.
    Upload(UploadArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Template identifier.
    #[arg(long)]
    template: String,

    /// One string per template field, in field order.
    #[arg(long = "text", num_args = 1..)]
    text: Vec<String>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct UploadArgs {
    /// Template identifier.
    #[arg(long)]
    template: String,

    /// One string per template field, in field order.
    #[arg(long = "text", num_args = 1..)]
    text: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    match cli.cmd {
        Command::Templates => cmd_templates(&config),
        Command::Render(args) => cmd_render(&config, args),
        Command::Upload(args) => cmd_upload(&config, args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<memepen::Config> {
    match path {
        Some(path) => memepen::Config::load(path)
            .with_context(|| format!("load config '{}'", path.display())),
        None => Ok(memepen::Config::default()),
    }
}

fn build_service(config: &memepen::Config) -> anyhow::Result<memepen::MemeService> {
    let compositor = memepen::Compositor::new(
        Arc::new(config.font_repository()),
        Arc::new(config.image_repository()),
    );
    Ok(memepen::MemeService::new(
        compositor,
        Arc::new(config.template_repository()?),
        Arc::new(memepen::InMemoryMemeRepository::new()),
        config.uploader(),
        config.publish_settings(),
    ))
}

fn cmd_templates(config: &memepen::Config) -> anyhow::Result<()> {
    let repo = config.template_repository()?;
    for t in memepen::TemplateRepository::templates(&repo) {
        println!(
            "{}\t{}x{}\t{} field(s)\t{}",
            t.id,
            t.image.width,
            t.image.height,
            t.field_count(),
            t.name
        );
    }
    Ok(())
}

fn cmd_render(config: &memepen::Config, args: RenderArgs) -> anyhow::Result<()> {
    let service = build_service(config)?;
    let canvas = service.create_meme_from_template_id(&args.template, &args.text)?;

    let png = canvas.encode_png()?;
    std::fs::write(&args.out, png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_upload(config: &memepen::Config, args: UploadArgs) -> anyhow::Result<()> {
    let service = build_service(config)?;
    let meme = service.create_meme_and_upload_from_template_id(&args.template, &args.text)?;
    println!("{}", serde_json::to_string_pretty(&meme)?);
    Ok(())
}
