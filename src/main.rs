use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use driftgrid::{AnalysisRecorder, DesktopApp, ImageExporter, RenderFlags, SimConfig, Simulator};
use log::info;

const DEFAULT_FRAMES: usize = 20;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && args[1] == "headless" {
        let config = load_config(args.get(2).map(PathBuf::from))?;
        let frames = match args.get(3) {
            Some(n) => n.parse::<usize>().with_context(|| format!("invalid frame count {:?}", n))?,
            None => DEFAULT_FRAMES,
        };
        run_headless(config, frames)
    } else {
        let config = load_config(args.get(1).map(PathBuf::from))?;
        run_gui_app(config)
    }
}

fn load_config(path: Option<PathBuf>) -> Result<SimConfig> {
    match path {
        Some(path) => {
            SimConfig::load(&path).with_context(|| format!("loading {}", path.display()))
        }
        None => Ok(SimConfig::default()),
    }
}

fn run_headless(config: SimConfig, frames: usize) -> Result<()> {
    info!("Running headless simulation for {} frames...", frames);

    let (width, height) = (config.domain_width as u32, config.domain_height as u32);
    let mut simulator = Simulator::new(config)?;
    let exporter = ImageExporter::new(width.max(1), height.max(1));
    let mut recorder = AnalysisRecorder::new();
    let flags = RenderFlags::default().with_velocity(true);

    let out_dir = Path::new("frames");
    std::fs::create_dir_all(out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    // Seed a blob of density at the centre so the forcing has something to carry.
    let n = simulator.grid().nx();
    let centre = (n / 2).max(1);
    for j in centre.saturating_sub(2).max(1)..=(centre + 2).min(n) {
        for i in centre.saturating_sub(2).max(1)..=(centre + 2).min(n) {
            simulator.grid_mut().density[(i, j)] = 1.0;
        }
    }

    recorder.record_frame(simulator.grid(), 0);
    exporter.export_png(simulator.grid(), flags, &out_dir.join("frame_0000.png"))?;

    for _ in 0..frames {
        simulator.step();
        let frame = simulator.frame();
        exporter.export_png(
            simulator.grid(),
            flags,
            &out_dir.join(format!("frame_{:04}.png", frame)),
        )?;

        let metrics = recorder.record_frame(simulator.grid(), frame);
        if frame % 5 == 0 {
            info!("{}", metrics);
        }
    }

    recorder.log_trends();
    info!("Wrote {} frames to {}", frames + 1, out_dir.display());
    Ok(())
}

fn run_gui_app(config: SimConfig) -> Result<()> {
    let size = [config.domain_width + 40.0, config.domain_height + 140.0];
    let app = DesktopApp::new(config)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(size)
            .with_title("driftgrid - Stable Fluids"),
        ..Default::default()
    };

    eframe::run_native("driftgrid", options, Box::new(move |_cc| Box::new(app)))
        .map_err(|err| anyhow!("desktop app failed: {}", err))
}
