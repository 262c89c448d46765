use std::{
    collections::BTreeMap,
    fs,
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "scrollweave", version)]
struct Cli {
    /// Log lifecycle and build events to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the reference header reveal configuration as JSON.
    Scenario(ScenarioArgs),
    /// Evaluate a choreography at one or more scroll fractions and print the state as JSON.
    Sample(SampleArgs),
    /// List resolved phase markers and the total span.
    Phases(PhasesArgs),
}

#[derive(Parser, Debug)]
struct ScenarioArgs {
    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1440.0)]
    width: f64,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 900.0)]
    height: f64,

    /// Write to a file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Input choreography JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Evenly spaced samples from 0 to 1 (inclusive).
    #[arg(long, conflicts_with = "progress")]
    steps: Option<u32>,

    /// Single scroll fraction to sample.
    #[arg(long)]
    progress: Option<f64>,

    /// Seconds since mount for entry animations. Defaults to after all of them finished.
    #[arg(long)]
    entry_time: Option<f64>,
}

#[derive(Parser, Debug)]
struct PhasesArgs {
    /// Input choreography JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(serde::Serialize)]
struct Sample {
    progress: f64,
    position: f64,
    elements: BTreeMap<scrollweave::ElementId, scrollweave::PropertyBag>,
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
        Command::Scenario(args) => cmd_scenario(args),
        Command::Sample(args) => cmd_sample(args),
        Command::Phases(args) => cmd_phases(args),
    }
}

fn read_def(path: &Path) -> anyhow::Result<scrollweave::Choreography> {
    let def = scrollweave::ChoreographyDef::from_path(path)
        .with_context(|| format!("load choreography '{}'", path.display()))?;
    def.build()
        .with_context(|| format!("build choreography '{}'", path.display()))
}

fn cmd_scenario(args: ScenarioArgs) -> anyhow::Result<()> {
    let viewport = scrollweave::Viewport::new(args.width, args.height)?;
    let json = scrollweave::scene::header::header_reveal_def(viewport).to_json_pretty()?;
    match args.out {
        Some(out) => {
            if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            fs::write(&out, json).with_context(|| format!("write '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let choreography = read_def(&args.in_path)?;
    let fractions: Vec<f64> = match (args.steps, args.progress) {
        (_, Some(p)) => vec![p],
        (Some(0), None) => anyhow::bail!("--steps must be at least 1"),
        (Some(n), None) => (0..=n).map(|i| f64::from(i) / f64::from(n)).collect(),
        (None, None) => vec![0.0, 0.5, 1.0],
    };

    let mut ch = choreography.into_choreographer(scrollweave::RecordingBinding::new());
    ch.mount(0.0)?;
    ch.advance(args.entry_time.unwrap_or(f64::MAX));

    let mut samples = Vec::with_capacity(fractions.len());
    for progress in fractions {
        ch.tick_normalized(progress)?;
        samples.push(Sample {
            progress,
            position: ch.position().unwrap_or(0.0),
            elements: ch.binding().snapshots().clone(),
        });
    }
    ch.unmount();

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &samples).context("write samples")?;
    writeln!(stdout)?;
    Ok(())
}

fn cmd_phases(args: PhasesArgs) -> anyhow::Result<()> {
    let choreography = read_def(&args.in_path)?;
    let plan = choreography.plan();
    for marker in plan.timeline().markers() {
        println!("{:<20} {:>8.3}", marker.name, marker.offset);
    }
    println!("{:<20} {:>8.3}", "(total span)", plan.total_span());
    Ok(())
}
