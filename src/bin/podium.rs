use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "podium", version)]
struct Cli {
    /// Log debug output to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a podium form as a PNG.
    Render(RenderArgs),
    /// Validate a podium form without rendering.
    Validate(ValidateArgs),
    /// Store an image in an upload directory and print its URL.
    Upload(UploadArgs),
    /// Validate a podium form and print the records it creates.
    Submit(ValidateArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input podium form JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Renderer config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also print the image as a `data:image/png;base64,` URI on stdout.
    #[arg(long)]
    data_uri: bool,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input podium form JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct UploadArgs {
    /// Image file to store.
    #[arg(long)]
    file: PathBuf,

    /// Upload directory.
    #[arg(long, default_value = "uploads")]
    dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Validate(args) => cmd_validate(args),
        Command::Upload(args) => cmd_upload(args),
        Command::Submit(args) => cmd_submit(args),
    }
}

fn read_form(path: &Path) -> anyhow::Result<podium::PodiumRenderRequest> {
    podium::PodiumRenderRequest::from_path(path)
        .with_context(|| format!("read podium form '{}'", path.display()))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let req = read_form(&args.in_path)?;

    let cfg = match &args.config {
        Some(path) => podium::RenderConfig::from_path(path)?,
        None => podium::RenderConfig {
            assets_root: args
                .in_path
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .to_path_buf(),
            ..podium::RenderConfig::default()
        },
    }
    .apply_env()?;

    let renderer = podium::PodiumRenderer::from_config(&cfg)?;
    let image = renderer.render(&req)?;
    image
        .write_to(&args.out)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    if args.data_uri {
        println!("{}", image.to_data_uri());
    }
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let req = read_form(&args.in_path)?;
    req.validate()?;
    println!("ok");
    Ok(())
}

fn cmd_upload(args: UploadArgs) -> anyhow::Result<()> {
    let bytes =
        std::fs::read(&args.file).with_context(|| format!("read '{}'", args.file.display()))?;
    let name = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let store = podium::DirUploadStore::new(&args.dir);
    let receipt = store.accept(&name, &bytes)?;
    println!("{}", serde_json::to_string(&receipt)?);
    Ok(())
}

fn cmd_submit(args: ValidateArgs) -> anyhow::Result<()> {
    let req = read_form(&args.in_path)?;
    let store = podium::MemRecordStore::new();
    let created = podium::submit_podium(&store, &req)?;
    println!("{}", serde_json::to_string_pretty(&created)?);
    Ok(())
}
