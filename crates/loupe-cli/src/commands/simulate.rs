//! Simulate command: scroll the page top to bottom and record every frame

use super::load_config;
use anyhow::{Context, Result};
use loupe_animator::{AnimatorStats, Showcase};
use loupe_core::Vec3;
use serde::Serialize;
use std::path::Path;

pub struct SimulateArgs {
    pub config: Option<String>,
    pub fps: f64,
    pub scroll_speed: f32,
    pub settle: f64,
    pub snapshot: Option<String>,
    pub format: String,
}

#[derive(Serialize)]
struct FrameRecord {
    frame: u64,
    scroll_y: f32,
    position: Vec3,
    target: Vec3,
    camera_changed: bool,
    shadows_recomputed: bool,
    samples: u32,
}

#[derive(Serialize)]
struct Totals {
    frames: usize,
    position_notifications: u64,
    target_notifications: u64,
    shadow_reset_requests: u64,
    shadow_recomputes: u64,
    animator: AnimatorStats,
}

#[derive(Serialize)]
struct Report {
    frames: Vec<FrameRecord>,
    totals: Totals,
}

pub fn run(args: SimulateArgs) -> Result<()> {
    if args.fps <= 0.0 {
        anyhow::bail!("--fps must be positive");
    }
    if args.scroll_speed <= 0.0 {
        anyhow::bail!("--scroll-speed must be positive");
    }

    let config = load_config(args.config.as_deref())?;
    let mut showcase = Showcase::new(&config).context("Showcase setup failed")?;

    let dt = 1.0 / args.fps;
    let step = args.scroll_speed * dt as f32;
    let mut frames = Vec::new();

    // Scroll phase, then settle phase
    let bottom = showcase.max_scroll();
    let settle_frames = (args.settle * args.fps).ceil() as usize;
    let mut remaining_settle = settle_frames;
    loop {
        let scrolling = showcase.scroll_y() < bottom;
        if scrolling {
            showcase.scroll_by(step);
        } else if remaining_settle == 0 {
            break;
        } else {
            remaining_settle -= 1;
        }

        let stats = showcase.tick(dt);
        let camera = showcase.camera();
        frames.push(FrameRecord {
            frame: stats.frame,
            scroll_y: showcase.scroll_y(),
            position: camera.position,
            target: camera.target,
            camera_changed: stats.camera_changed,
            shadows_recomputed: stats.shadows_recomputed,
            samples: stats.samples,
        });
    }

    log::info!(
        "Simulated {} frames ({} scrolling, {} settling)",
        frames.len(),
        frames.len() - settle_frames,
        settle_frames
    );

    if let Some(out) = &args.snapshot {
        let written = showcase
            .viewer_mut()
            .export_snapshot(Path::new(out))
            .context("Snapshot export failed")?;
        if args.format == "text" {
            println!("Snapshot written to {}", written.display());
        }
    }

    let camera = showcase.camera();
    let renderer = showcase.viewer().renderer();
    let totals = Totals {
        frames: frames.len(),
        position_notifications: camera.position_notifications(),
        target_notifications: camera.target_notifications(),
        shadow_reset_requests: renderer.shadow_reset_requests(),
        shadow_recomputes: renderer.shadow_recomputes(),
        animator: showcase.stats(),
    };

    if args.format == "json" {
        let report = Report { frames, totals };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{:>6}  {:>7}  {:<24}  {:<24}  {:>7}", "frame", "scroll", "position", "target", "samples");
    for record in frames.iter().filter(|r| r.camera_changed) {
        println!(
            "{:>6}  {:>7.1}  {:<24}  {:<24}  {:>7}",
            record.frame,
            record.scroll_y,
            record.position.to_string(),
            record.target.to_string(),
            record.samples
        );
    }
    if let Some(last) = frames.last() {
        println!(
            "{:>6}  {:>7.1}  {:<24}  {:<24}  {:>7}  (final)",
            last.frame,
            last.scroll_y,
            last.position.to_string(),
            last.target.to_string(),
            last.samples
        );
    }

    println!();
    println!("Frames:                  {}", totals.frames);
    println!("Frames with camera update: {}", totals.animator.updated_frames);
    println!("Position notifications:  {}", totals.position_notifications);
    println!("Target notifications:    {}", totals.target_notifications);
    println!("Shadow reset requests:   {}", totals.shadow_reset_requests);
    println!("Shadow recomputes:       {}", totals.shadow_recomputes);
    println!(
        "Tween writes:            {} ({} hooked)",
        totals.animator.writes, totals.animator.hooked_writes
    );

    Ok(())
}
