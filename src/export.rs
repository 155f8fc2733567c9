use std::path::Path;

use image::ImageResult;

use crate::grid::Grid;
use crate::render::{RenderFlags, Renderer};
use crate::simulator::Simulator;

pub struct ImageExporter {
    renderer: Renderer,
}

impl ImageExporter {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            renderer: Renderer::new(width, height),
        }
    }

    pub fn export_png(&self, grid: &Grid, flags: RenderFlags, path: &Path) -> ImageResult<()> {
        self.renderer.render_to_image(grid, flags).save(path)
    }

    /// Steps `simulator` `steps` times, writing `{prefix}_frame_{n:04}.png`
    /// into `output_dir` after each tick.
    pub fn export_frame_sequence(
        &self,
        simulator: &mut Simulator,
        steps: usize,
        flags: RenderFlags,
        output_dir: &Path,
        prefix: &str,
    ) -> ImageResult<()> {
        for _ in 0..steps {
            simulator.step();

            let filename = format!("{}_frame_{:04}.png", prefix, simulator.frame());
            self.export_png(simulator.grid(), flags, &output_dir.join(filename))?;
        }
        Ok(())
    }
}
