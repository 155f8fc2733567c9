use image::{ImageBuffer, Rgb, RgbImage};

use crate::grid::Grid;

/// What a frame should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderFlags {
    pub density: bool,
    pub velocity: bool,
}

impl Default for RenderFlags {
    fn default() -> Self {
        Self {
            density: true,
            velocity: false,
        }
    }
}

impl RenderFlags {
    pub fn with_velocity(mut self, velocity: bool) -> Self {
        self.velocity = velocity;
        self
    }
}

/// Anything that can present a settled grid at the end of a tick.
pub trait Render {
    fn render(&mut self, grid: &Grid, flags: RenderFlags);
}

/// Color of one active cell: density as a white-on-blue ramp, velocity
/// magnitude per axis in the red and green channels.
pub fn cell_color(grid: &Grid, i: usize, j: usize, flags: RenderFlags) -> [u8; 3] {
    let mut rgb = [0u8; 3];

    if flags.density {
        let density = grid.density[(i, j)].clamp(0.0, 1.0);
        let intensity = (density * 255.0) as u8;
        rgb = [intensity, intensity, 255];
    }

    if flags.velocity {
        let vel = grid.velocity.at(i, j);
        let r = (vel.x.abs() * 255.0).min(255.0) as u8;
        let g = (vel.y.abs() * 255.0).min(255.0) as u8;
        if flags.density {
            rgb[0] = rgb[0].max(r);
            rgb[1] = rgb[1].max(g);
        } else {
            rgb = [r, g, 128];
        }
    }

    rgb
}

/// Rasterises the active region of a grid into an RGB image, keeping the
/// most recent frame.
pub struct Renderer {
    width: u32,
    height: u32,
    frame: RgbImage,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            frame: ImageBuffer::new(width, height),
        }
    }

    pub fn render_to_image(&self, grid: &Grid, flags: RenderFlags) -> RgbImage {
        let mut img = ImageBuffer::new(self.width, self.height);

        let scale_x = grid.nx() as f32 / self.width as f32;
        let scale_y = grid.ny() as f32 / self.height as f32;

        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let i = ((x as f32 * scale_x) as usize).min(grid.nx() - 1) + 1;
            let j = ((y as f32 * scale_y) as usize).min(grid.ny() - 1) + 1;
            *pixel = Rgb(cell_color(grid, i, j, flags));
        }

        img
    }

    pub fn frame(&self) -> &RgbImage {
        &self.frame
    }
}

impl Render for Renderer {
    fn render(&mut self, grid: &Grid, flags: RenderFlags) {
        self.frame = self.render_to_image(grid, flags);
    }
}
