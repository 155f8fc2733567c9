use eframe::egui;
use glam::Vec2;
use log::warn;

use crate::config::SimConfig;
use crate::error::ConfigError;
use crate::grid::Grid;
use crate::render::{Render, RenderFlags, cell_color};
use crate::simulator::Simulator;

const RESOLUTIONS: [usize; 4] = [32, 64, 128, 256];

/// Paints a grid onto an egui canvas rect, one filled square per active cell.
pub struct PainterTarget<'a> {
    painter: &'a egui::Painter,
    rect: egui::Rect,
}

impl<'a> PainterTarget<'a> {
    pub fn new(painter: &'a egui::Painter, rect: egui::Rect) -> Self {
        Self { painter, rect }
    }
}

impl Render for PainterTarget<'_> {
    fn render(&mut self, grid: &Grid, flags: RenderFlags) {
        let cell_w = self.rect.width() / grid.nx() as f32;
        let cell_h = self.rect.height() / grid.ny() as f32;

        for j in 1..=grid.ny() {
            for i in 1..=grid.nx() {
                let [r, g, b] = cell_color(grid, i, j, flags);
                let min = egui::Pos2::new(
                    self.rect.left() + (i - 1) as f32 * cell_w,
                    self.rect.top() + (j - 1) as f32 * cell_h,
                );
                self.painter.rect_filled(
                    egui::Rect::from_min_size(min, egui::Vec2::new(cell_w, cell_h)),
                    0.0,
                    egui::Color32::from_rgb(r, g, b),
                );
            }
        }
    }
}

pub struct DesktopApp {
    simulator: Simulator,
    paused: bool,
    flags: RenderFlags,
    viscosity: f32,
    diffusion: f32,
    dt: f32,
    clicking: bool,
}

impl DesktopApp {
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        let simulator = Simulator::new(config)?;
        let config = simulator.config();
        Ok(Self {
            viscosity: config.viscosity,
            diffusion: config.diffusion,
            dt: config.dt,
            simulator,
            paused: false,
            flags: RenderFlags::default(),
            clicking: false,
        })
    }

    fn change_resolution(&mut self, resolution: usize) {
        if resolution == self.simulator.config().resolution {
            return;
        }
        let config = SimConfig {
            resolution,
            ..self.simulator.config().clone()
        };
        match Simulator::new(config) {
            Ok(simulator) => {
                self.simulator = simulator;
                self.clicking = false;
            }
            Err(err) => warn!(
                "keeping {}x{} grid: {}",
                self.simulator.grid().nx(),
                self.simulator.grid().ny(),
                err
            ),
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button(if self.paused { "Resume" } else { "Pause" }).clicked() {
                self.paused = !self.paused;
            }
            if ui.button("Reset").clicked() {
                self.simulator.reset();
            }
            ui.checkbox(&mut self.flags.density, "Density");
            ui.checkbox(&mut self.flags.velocity, "Velocity");
        });

        ui.horizontal(|ui| {
            let viscosity = ui.add(
                egui::Slider::new(&mut self.viscosity, 0.0..=0.01)
                    .logarithmic(true)
                    .text("Viscosity"),
            );
            if viscosity.changed() {
                if let Err(err) = self.simulator.set_viscosity(self.viscosity) {
                    warn!("{}", err);
                }
            }

            let diffusion = ui.add(
                egui::Slider::new(&mut self.diffusion, 0.0..=0.01)
                    .logarithmic(true)
                    .text("Diffusion"),
            );
            if diffusion.changed() {
                if let Err(err) = self.simulator.set_diffusion(self.diffusion) {
                    warn!("{}", err);
                }
            }

            let dt = ui.add(
                egui::Slider::new(&mut self.dt, 0.001..=0.5)
                    .logarithmic(true)
                    .text("Time Step"),
            );
            if dt.changed() {
                if let Err(err) = self.simulator.set_time_step(self.dt) {
                    warn!("{}", err);
                }
            }
        });

        ui.horizontal(|ui| {
            ui.label("Resolution:");
            let current = self.simulator.config().resolution;
            for resolution in RESOLUTIONS {
                if ui
                    .selectable_label(current == resolution, format!("{}", resolution))
                    .clicked()
                {
                    self.change_resolution(resolution);
                }
            }
        });
    }
}

impl eframe::App for DesktopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("driftgrid");
            self.controls(ui);
            ui.separator();

            let domain = self.simulator.grid().domain_size();
            let (rect, response) = ui.allocate_exact_size(
                egui::Vec2::new(domain.x, domain.y),
                egui::Sense::click_and_drag(),
            );

            // Clicks only change source state here, strictly between ticks.
            if response.is_pointer_button_down_on() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let local = pos - rect.min;
                    self.simulator.register_click(Vec2::new(local.x, local.y));
                    self.clicking = true;
                }
            } else if self.clicking {
                self.simulator.clear_click();
                self.clicking = false;
            }

            let mut target = PainterTarget::new(ui.painter(), rect);
            if self.paused {
                self.simulator.render(&mut target, self.flags);
            } else {
                self.simulator.tick(&mut target, self.flags);
            }

            let grid = self.simulator.grid();
            ui.label(format!(
                "Frame: {} | Grid: {}x{} | Mass: {:.3} | Click and hold to inject density",
                self.simulator.frame(),
                grid.nx(),
                grid.ny(),
                grid.density.active_sum()
            ));
        });

        ctx.request_repaint();
    }
}
