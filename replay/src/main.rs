#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod plan;
mod trace;

use std::time::Duration;

use anyhow::Result;
use structopt::StructOpt;

use animator::{AnimationConfig, Fleet, DEFAULT_REACH_THRESHOLD_METERS};

use self::plan::RescuePlan;
use self::trace::{Toasts, Trace};

#[derive(StructOpt)]
struct Args {
    /// The path to a rescue plan, as JSON with routes and victim locations
    #[structopt(long)]
    plan: String,
    /// How long every route takes to play, in milliseconds
    #[structopt(long, default_value = "15000")]
    duration_ms: u64,
    /// A victim is reached when a team passes closer than this
    #[structopt(long)]
    threshold_meters: Option<f64>,
    /// Frames per second
    #[structopt(long, default_value = "60")]
    fps: u32,
    /// Don't wait in real time; step a simulated clock instead
    #[structopt(long)]
    simulate: bool,
    /// Write the path each team took and where they reached victims as GeoJSON
    #[structopt(long)]
    trace: Option<String>,
    /// Write a JSON summary of each team's run
    #[structopt(long)]
    save_summary: Option<String>,
}

impl Args {
    fn config(&self) -> Result<AnimationConfig> {
        let threshold = self
            .threshold_meters
            .unwrap_or(DEFAULT_REACH_THRESHOLD_METERS);
        if !(threshold > 0.0) {
            bail!("--threshold-meters must be positive, not {}", threshold);
        }
        Ok(AnimationConfig::default()
            .with_duration(Duration::from_millis(self.duration_ms))
            .with_reach_threshold(threshold))
    }

    fn frame_interval(&self) -> Result<Duration> {
        if self.fps == 0 {
            bail!("--fps must be at least 1");
        }
        Ok(Duration::from_secs_f64(1.0 / self.fps as f64))
    }
}

fn main() -> Result<()> {
    abstutil::logger::setup();

    let args = Args::from_iter(abstutil::cli_args());
    let config = args.config()?;
    let frame_interval = args.frame_interval()?;
    let plan = RescuePlan::load(&args.plan)?;

    if let Some(base) = plan.base {
        info!("Rescue base at {}", base);
    }
    info!(
        "{} routes, {} victims",
        plan.routes.len(),
        plan.victims.len()
    );

    let mut fleet = Fleet::new(config);
    let mut sinks = (Toasts, Trace::new());
    for route in &plan.routes {
        if !route.description.is_empty() {
            info!(
                "{} ({} priority, {}): {}",
                route.team, route.priority, route.travelling_duration, route.description
            );
        }
        fleet.start(
            route.team.clone(),
            &route.points,
            plan.victims.clone(),
            &mut sinks,
        );
    }

    if args.simulate {
        let frames = fleet.run_simulated(&mut sinks, frame_interval);
        info!("Simulated {} frames", frames);
    } else {
        fleet.run_realtime(&mut sinks, frame_interval);
    }

    let (_, trace) = sinks;
    for team in trace.summary().teams {
        let reached = if team.victims_reached.is_empty() {
            "no victims".to_string()
        } else {
            team.victims_reached
                .iter()
                .map(|idx| format!("#{}", idx))
                .collect::<Vec<_>>()
                .join(", ")
        };
        println!("{}: {} frames, reached {}", team.team, team.frames, reached);
    }

    if let Some(path) = args.trace {
        trace.write_geojson(&path, &plan.victims)?;
    }
    if let Some(path) = args.save_summary {
        abstio::write_json(path, &trace.summary());
    }
    Ok(())
}
