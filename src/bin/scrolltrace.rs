use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use scrolltrace::{
    AnimationEngine, CountingEvents, EngineConfig, Outcome, RenderAttributes, StaticLayout,
    ViewportEvent, label_placements, scroll_sweep,
};

#[derive(Parser, Debug)]
#[command(name = "scrolltrace", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sample the curve at one progress value.
    Sample(SampleArgs),
    /// Scroll a container from below to above the viewport and print each published state.
    Sweep(SweepArgs),
    /// Validate a config and print curve and label geometry.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Engine config JSON (defaults to the journey page).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Progress in [0, 1].
    #[arg(long)]
    progress: f64,
}

#[derive(Parser, Debug)]
struct SweepArgs {
    /// Engine config JSON (defaults to the journey page).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 800.0)]
    viewport_height: f64,

    /// Height of the tracked container in pixels.
    #[arg(long, default_value_t = 1200.0)]
    container_height: f64,

    /// Number of scroll steps.
    #[arg(long, default_value_t = 20)]
    steps: usize,

    /// Override the config's speed multiplier.
    #[arg(long)]
    speed: Option<f64>,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Engine config JSON.
    #[arg(long)]
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Sample(args) => cmd_sample(args),
        Command::Sweep(args) => cmd_sweep(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display())),
        None => Ok(EngineConfig::journey()),
    }
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_ref())?;
    let curve = cfg.build_curve()?;
    let sample = curve
        .sample_at(args.progress)
        .with_context(|| format!("sample at progress {}", args.progress))?;
    let reveal = scrolltrace::RevealPolicy::resolve(&curve, args.progress);
    let labels: Vec<&str> = reveal.labels(&curve).collect();

    let out = serde_json::json!({
        "progress": args.progress,
        "x": sample.point.x,
        "y": sample.point.y,
        "angle_deg": sample.angle_deg,
        "labels": labels,
    });
    println!("{out}");
    Ok(())
}

fn cmd_sweep(args: SweepArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(args.config.as_ref())?;
    if let Some(speed) = args.speed {
        cfg = cfg.with_speed_multiplier(speed);
    }
    let mut engine: AnimationEngine = cfg.build()?;
    let sweep = scroll_sweep(args.viewport_height, args.container_height, args.steps);
    let Some(first) = sweep.first() else {
        return Ok(());
    };

    let layout = StaticLayout::new(first.rect, first.viewport_height);
    let events = Rc::new(CountingEvents::default());
    let mut outcome = engine.mount(&events, &layout);

    for (step, tracked) in sweep.iter().enumerate() {
        if step > 0 {
            layout.set(*tracked);
            outcome = engine.handle_event(ViewportEvent::Scroll, &layout);
        }
        if let Outcome::Skipped(reason) = outcome {
            eprintln!("step {step}: skipped ({reason:?})");
            continue;
        }
        let state = engine.state();
        let attrs = RenderAttributes::from_state(state, &cfg.style);
        let labels: Vec<&str> = state.reveal.labels(engine.curve()).collect();
        let line = serde_json::json!({
            "step": step,
            "top": tracked.rect.top,
            "progress": state.progress(),
            "x": state.point().x,
            "y": state.point().y,
            "angle_deg": state.angle_deg(),
            "dash_offset": attrs.dash_offset,
            "labels": labels,
        });
        println!("{line}");
    }

    engine.unmount();
    eprintln!(
        "{} steps, {} states published",
        sweep.len(),
        engine.publications()
    );
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let cfg = load_config(Some(&args.config))?;
    let engine = cfg.build()?;
    let curve = engine.curve();
    let placements = label_placements(curve, engine.sampler())
        .context("place labels on the curve")?;

    let out = serde_json::json!({
        "segments": curve.segments().len(),
        "length": curve.length(),
        "start": curve.start(),
        "end": curve.end(),
        "speed_multiplier": engine.tracker().speed_multiplier(),
        "labels": placements,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
