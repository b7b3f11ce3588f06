use clap::Parser;
use pollution_sim_core::{
    BlurConfig, DecayConfig, GridConfig, PollutionGrid, SimulationConfig, SourceConfig,
};
use pollution_sim_core::{Blur, CellIndex, Source, Vec3};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Pollutant diffusion demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "pollution-demo")]
#[command(about = "3D pollutant diffusion simulation demo", long_about = None)]
struct Args {
    /// Grid cells along x
    #[arg(long, default_value_t = 10)]
    width: usize,

    /// Grid cells along y
    #[arg(long, default_value_t = 10)]
    breadth: usize,

    /// Grid cells along z
    #[arg(long, default_value_t = 10)]
    height: usize,

    /// Cubic cell edge length in meters
    #[arg(long, default_value_t = 1.0)]
    cell_size: f32,

    /// Number of time steps
    #[arg(short = 'n', long, default_value_t = 1000)]
    steps: u32,

    /// Time step in seconds
    #[arg(long, default_value_t = 0.1)]
    dt: f32,

    /// Blur rate per face (particles/m³/s)
    #[arg(short, long, default_value_t = Blur::DEFAULT_BLUR)]
    blur: f32,

    /// Disable the blur updater
    #[arg(long)]
    no_blur: bool,

    /// Source injection rate (particles/m³/s)
    #[arg(short, long, default_value_t = Source::DEFAULT_POLLUTION)]
    pollution: f32,

    /// Source center x in meters
    #[arg(long, default_value_t = Source::DEFAULT_X)]
    source_x: f32,

    /// Source center y in meters
    #[arg(long, default_value_t = Source::DEFAULT_Y)]
    source_y: f32,

    /// Source center z in meters
    #[arg(long, default_value_t = Source::DEFAULT_Z)]
    source_z: f32,

    /// Source radius in meters
    #[arg(short, long, default_value_t = Source::DEFAULT_RADIUS)]
    radius: f32,

    /// First-order decay rate (1/s), off when omitted
    #[arg(long)]
    decay: Option<f32>,

    /// Report interval in steps
    #[arg(long, default_value_t = 100)]
    report_interval: u32,

    /// Horizontal layer (z index) to draw at the end, defaults to the source layer
    #[arg(long)]
    layer: Option<usize>,
}

impl Args {
    fn to_config(&self) -> SimulationConfig {
        SimulationConfig {
            grid: GridConfig {
                width: self.width,
                breadth: self.breadth,
                height: self.height,
                origin: [0.0; 3],
                cell_size: [self.cell_size; 3],
            },
            steps: self.steps,
            dt: self.dt,
            blur: (!self.no_blur).then_some(BlurConfig { blur: self.blur }),
            sources: vec![SourceConfig {
                pollution: self.pollution,
                x: self.source_x,
                y: self.source_y,
                z: self.source_z,
                radius: self.radius,
            }],
            decay: self.decay.map(|rate| DecayConfig { rate }),
        }
    }
}

/// Characters from empty to densest
const SHADES: &[u8] = b" .:-=+*#%@";

/// Draw one horizontal layer as text, scaled to the layer's peak
fn render_layer(grid: &PollutionGrid, k: usize) -> String {
    let (width, breadth, _) = grid.geometry().extents();
    let k = k as i32;

    let peak = (0..width)
        .flat_map(|i| (0..breadth).map(move |j| CellIndex::new(i as i32, j as i32, k)))
        .map(|index| grid.cell_at(index).concentration())
        .fold(0.0_f32, f32::max);

    let mut out = String::new();
    for j in (0..breadth).rev() {
        for i in 0..width {
            let value = grid
                .cell_at(CellIndex::new(i as i32, j as i32, k))
                .concentration();
            let shade = if peak > 0.0 {
                ((value / peak) * (SHADES.len() - 1) as f32).round() as usize
            } else {
                0
            };
            out.push(SHADES[shade.min(SHADES.len() - 1)] as char);
            out.push(' ');
        }
        out.push('\n');
    }
    out
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = args.to_config();

    println!("=== Pollution Diffusion Demo ===\n");

    let mut sim = match config.build() {
        Ok(sim) => sim,
        Err(err) => {
            eprintln!("Invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!(
        "Grid: {}x{}x{} cells of {:.2}m, dt={:.3}s, {} steps",
        args.width, args.breadth, args.height, args.cell_size, args.dt, args.steps
    );
    for updater in sim.updaters() {
        println!("  updater: {updater:?}");
    }
    println!();

    let interval = args.report_interval.max(1);
    let mut remaining = config.steps;
    while remaining > 0 {
        let chunk = remaining.min(interval);
        let stats = sim.run(chunk, config.dt);
        println!("{stats}");
        remaining -= chunk;
    }

    let stats = sim.stats();
    info!("Final total mass: {:.4}", stats.total_mass);

    let grid = sim.grid();
    let source_layer = grid
        .index_from_location(&Vec3::new(args.source_x, args.source_y, args.source_z))
        .k;
    let layer = args
        .layer
        .unwrap_or_else(|| source_layer.clamp(0, args.height as i32 - 1) as usize);

    if layer < args.height {
        println!("\nLayer z={layer} (x across, y up):\n");
        print!("{}", render_layer(grid, layer));
    } else {
        eprintln!("Layer {layer} is outside the grid (height {})", args.height);
    }

    ExitCode::SUCCESS
}
