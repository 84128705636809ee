use std::{
    fs::File,
    io::{BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "scrollwork", version)]
struct Cli {
    /// Log engine state transitions to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a scene JSON file and list what it would mount.
    Validate(ValidateArgs),
    /// Replay a scroll trace against a scene and dump every property write as JSON.
    Simulate(SimulateArgs),
    /// Print the built-in site catalog as JSON.
    Catalog,
    /// Send one contact-form submission through the relay.
    #[cfg(feature = "http-relay")]
    Contact(ContactArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Scroll trace JSON (`{"frames": [...]}`).
    #[arg(long)]
    trace: PathBuf,

    /// Output path for the frame log. Defaults to stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[cfg(feature = "http-relay")]
#[derive(Parser, Debug)]
struct ContactArgs {
    #[arg(long)]
    access_key: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    message: String,
    /// Override the relay endpoint.
    #[arg(long)]
    endpoint: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Simulate(args) => cmd_simulate(args),
        Command::Catalog => cmd_catalog(),
        #[cfg(feature = "http-relay")]
        Command::Contact(args) => cmd_contact(args),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    let r = BufReader::new(f);
    serde_json::from_reader(r).with_context(|| format!("parse {what} JSON"))
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let scene: scrollwork::SceneSpec = read_json(&args.in_path, "scene")?;
    scene.validate()?;

    eprintln!(
        "ok: {} sections, {} effects",
        scene.sections.len(),
        scene.effects.len()
    );
    for effect in &scene.effects {
        match effect.section() {
            Some(section) => eprintln!("  {:<8} on '{section}'", effect.kind()),
            None => eprintln!("  {}", effect.kind()),
        }
    }
    for kind in scene.strategies()? {
        eprintln!("  remap strategy: {kind:?}");
    }
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let scene: scrollwork::SceneSpec = read_json(&args.in_path, "scene")?;
    let trace_json = std::fs::read_to_string(&args.trace)
        .with_context(|| format!("read trace '{}'", args.trace.display()))?;
    let trace = scrollwork::ScrollTrace::from_json(&trace_json)?;

    let records = scrollwork::simulate(&scene, &trace)?;
    let writes: usize = records.iter().map(|r| r.writes.len()).sum();

    match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = File::create(path)
                .with_context(|| format!("create output '{}'", path.display()))?;
            let mut w = BufWriter::new(f);
            serde_json::to_writer_pretty(&mut w, &records)?;
            w.flush()?;
            eprintln!(
                "wrote {} ({} frames, {writes} writes)",
                path.display(),
                records.len()
            );
        }
        None => {
            let stdout = std::io::stdout();
            let mut w = stdout.lock();
            serde_json::to_writer_pretty(&mut w, &records)?;
            writeln!(w)?;
        }
    }
    Ok(())
}

fn cmd_catalog() -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut w = stdout.lock();
    serde_json::to_writer_pretty(&mut w, &scrollwork::catalog::CATALOG)?;
    writeln!(w)?;
    Ok(())
}

#[cfg(feature = "http-relay")]
fn cmd_contact(args: ContactArgs) -> anyhow::Result<()> {
    use scrollwork::{Field, FormController, FormStatus, HttpRelay, RelayConfig, TargetId};

    let mut config = RelayConfig::new(args.access_key);
    if let Some(endpoint) = args.endpoint {
        config.endpoint = endpoint;
    }
    let mut form = FormController::new(config, TargetId(0))?;
    form.edit(Field::Name, args.name);
    form.edit(Field::Email, args.email);
    form.edit(Field::Message, args.message);

    let status = form.submit(&HttpRelay::new(), std::time::Duration::ZERO).clone();
    match status {
        FormStatus::Success => {
            eprintln!("sent");
            Ok(())
        }
        FormStatus::Error(msg) => anyhow::bail!("relay error: {msg}"),
        _ => {
            let errors = serde_json::to_string_pretty(form.errors())?;
            anyhow::bail!("form rejected:\n{errors}")
        }
    }
}
