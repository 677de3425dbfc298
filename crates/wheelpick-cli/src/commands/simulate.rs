use std::time::Duration;

use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;
use tracing::{debug, warn};

use wheelpick_core::wheel::{Geometry, RecordingScheduler};
use wheelpick_core::{AppConfig, ScrollEngine};

/// Frames after which a run is reported as not settling
const MAX_FRAMES: usize = 10_000;

#[derive(Debug, Args)]
pub struct SimulateArgs {
    /// Number of items on the wheel
    #[arg(short = 'n', long, default_value_t = 20)]
    pub count: usize,
    /// Wrap around instead of stopping at the ends
    #[arg(long)]
    pub cyclic: bool,
    /// Row height in pixels
    #[arg(long, default_value_t = 40)]
    pub item_height: i32,
    /// Item centered before the gesture
    #[arg(long, default_value_t = 0)]
    pub start_index: usize,
    /// Total drag distance in pixels (negative drags upward)
    #[arg(long, default_value_t = -120, allow_negative_numbers = true)]
    pub drag: i32,
    /// Drag duration in milliseconds
    #[arg(long, default_value_t = 100)]
    pub duration_ms: u64,
    /// Number of move events spread over the drag
    #[arg(long, default_value_t = 10)]
    pub steps: u32,
    /// Release with this velocity (px/s) instead of the measured one
    #[arg(long, allow_negative_numbers = true)]
    pub velocity: Option<f64>,
    /// Print one JSON object per frame
    #[arg(long)]
    pub json: bool,
}

/// One rendered frame of the simulation
#[derive(Debug, Serialize)]
pub struct FrameRecord {
    pub frame: usize,
    pub elapsed_ms: u64,
    pub scroll_offset: i32,
    pub centered_index: Option<usize>,
    pub settled: bool,
}

/// Outcome of a whole simulated gesture
#[derive(Debug, Serialize)]
pub struct Summary {
    pub frames: Vec<FrameRecord>,
    pub final_offset: i32,
    pub selected_index: Option<usize>,
    pub frame_requests: usize,
}

pub fn simulate(config: &AppConfig, args: &SimulateArgs) -> Result<Summary> {
    if args.count == 0 {
        bail!("--count must be at least 1");
    }
    let half = config.wheel.half_visible_count;
    let geometry = Geometry::new(args.item_height, half, args.item_height * (2 * half + 1))?;

    let mut engine = ScrollEngine::with_scheduler(
        config.wheel.clone(),
        args.count,
        args.cyclic,
        RecordingScheduler::default(),
    );
    engine.set_geometry(geometry)?;
    engine.set_current_item_index(args.start_index)?;

    // Scripted press, evenly spaced moves, release
    let origin = (args.item_height * (2 * half + 1) / 2) as f64;
    let steps = args.steps.max(1);
    let duration = Duration::from_millis(args.duration_ms);
    engine.on_press_start(origin, Duration::ZERO);
    for step in 1..=steps {
        let fraction = step as f64 / steps as f64;
        let y = origin + args.drag as f64 * fraction;
        engine.on_press_move(y, duration.mul_f64(fraction));
    }
    match args.velocity {
        Some(velocity) => engine.release_with_velocity(velocity),
        None => engine.on_press_end(duration),
    }
    debug!(offset = engine.scroll_offset(), phase = ?engine.phase(), "Gesture released");

    let mut frames = Vec::new();
    let mut elapsed = Duration::ZERO;
    while let Some(delay) = engine.scheduler_mut().take_pending() {
        if frames.len() >= MAX_FRAMES {
            warn!(frames = frames.len(), "Simulation did not settle");
            break;
        }
        elapsed += delay;
        let result = engine.tick(delay);
        frames.push(FrameRecord {
            frame: frames.len(),
            elapsed_ms: elapsed.as_millis() as u64,
            scroll_offset: result.scroll_offset,
            centered_index: engine.centered_index(),
            settled: result.settled,
        });
    }

    Ok(Summary {
        frames,
        final_offset: engine.scroll_offset(),
        selected_index: engine.current_selected_index(),
        frame_requests: engine.scheduler().requested,
    })
}

pub fn run(config: &AppConfig, args: &SimulateArgs) -> Result<()> {
    let summary = simulate(config, args)?;

    if args.json {
        for frame in &summary.frames {
            println!("{}", serde_json::to_string(frame)?);
        }
        return Ok(());
    }

    println!("{:>6} {:>8} {:>10} {:>8}", "frame", "ms", "offset", "center");
    for frame in &summary.frames {
        let center = frame
            .centered_index
            .map(|i| i.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>6} {:>8} {:>10} {:>8}",
            frame.frame, frame.elapsed_ms, frame.scroll_offset, center
        );
    }
    match summary.selected_index {
        Some(index) => println!("Settled at offset {} on item {}", summary.final_offset, index),
        None => println!("Still moving at offset {}", summary.final_offset),
    }
    Ok(())
}
