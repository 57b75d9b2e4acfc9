//! Headless run of the fabric simulation
//!
//! Drops a handful of planets around a black hole, steps the simulation and
//! reports what got swallowed, what escaped and how deep the fabric sags.
//!
//! Run with: cargo run --package spacetime --example headless -- --steps 600
//! Pass `--config path/to/scenario.yaml` to override any simulation setting,
//! and `RUST_LOG=debug` to see absorptions as they happen.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use nalgebra::{Point3, Vector3};

use spacetime::body::{BodyKind, SizeClass};
use spacetime::config::SimulationConfig;
use spacetime::simulation::Simulation;

#[derive(Parser, Debug)]
struct Args {
    /// YAML file with simulation settings; defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of fixed timesteps to run
    #[arg(short, long, default_value_t = 600)]
    steps: u32,

    /// Print a status line every this many steps
    #[arg(long, default_value_t = 60)]
    every: u32,
}

fn load_config(path: Option<&PathBuf>) -> Result<SimulationConfig> {
    let Some(path) = path else {
        return Ok(SimulationConfig::default());
    };
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let config = SimulationConfig::from_yaml_reader(BufReader::new(file))
        .with_context(|| format!("reading {}", path.display()))?;
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = load_config(args.config.as_ref())?;
    let mut sim = Simulation::new(config)?;

    println!("Space-time fabric, headless\n");
    println!("{}", "=".repeat(60));

    sim.create_body(BodyKind::BlackHole, Point3::origin(), SizeClass::Medium);

    // A ring of planets with a little sideways drift
    let ring = [
        (4.0, 0.0, SizeClass::Small),
        (-5.0, 1.0, SizeClass::Medium),
        (0.5, 6.0, SizeClass::Large),
        (-2.0, -7.0, SizeClass::Small),
    ];
    for (x, z, size) in ring {
        let drift = Vector3::new(-z, 0.0, x).normalize() * 0.3;
        sim.create_body_with_velocity(BodyKind::Planet, Point3::new(x, 0.0, z), drift, size);
    }

    println!("Bodies: {}", sim.body_count());
    println!(
        "Fabric: {} x {} samples over {:.1} units",
        sim.fabric().samples_per_axis(),
        sim.fabric().samples_per_axis(),
        sim.fabric().size()
    );
    println!("{}", "=".repeat(60));

    let every = args.every.max(1);
    let mut absorbed = 0;
    let mut escaped = 0;
    let mut bounces = 0;

    for step in 1..=args.steps {
        let report = sim.tick();
        absorbed += report.absorbed.len();
        escaped += report.escaped.len();
        bounces += report.bounces;

        if step % every == 0 {
            println!(
                "t = {:6.2}s  bodies {:2}  KE {:8.4}  deepest {:8.4}",
                sim.time(),
                sim.body_count(),
                sim.store().kinetic_energy(),
                sim.height_field().min_height()
            );
        }
    }

    println!("{}", "=".repeat(60));
    println!("Absorbed: {}", absorbed);
    println!("Escaped:  {}", escaped);
    println!("Bounces:  {}", bounces);
    println!("\nSurvivors:");
    for body in sim.bodies() {
        println!(
            "  #{:<3} {:?} {:?}  at ({:6.2}, {:6.2}, {:6.2})",
            body.id.0,
            body.kind,
            body.size_class,
            body.position.x,
            body.position.y,
            body.position.z
        );
    }

    Ok(())
}
