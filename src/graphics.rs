use image::{Rgba, RgbaImage};
use pixels::{Pixels, SurfaceTexture};
use winit::dpi::PhysicalPosition;
use winit::window::Window;

use crate::grid::{CellRect, GridGeometry, GridState};

pub type Color = [u8; 4];

pub const BLACK: Color = [0, 0, 0, 255];
pub const WHITE: Color = [255, 255, 255, 255];

/// Anything cells can be painted onto: the window frame or an export bitmap.
/// Writes outside the surface are clipped.
pub trait Surface {
    fn put_pixel(&mut self, x: u32, y: u32, color: Color);

    fn fill_rectangle(&mut self, rect: CellRect, color: Color) {
        for dy in 0..rect.height {
            for dx in 0..rect.width {
                self.put_pixel(rect.x + dx, rect.y + dy, color);
            }
        }
    }

    /// 1-pixel outline whose right and bottom edges sit at `x + width` and
    /// `y + height`, so neighbouring cells share their border line.
    fn stroke_rectangle(&mut self, rect: CellRect, color: Color) {
        let right = rect.x + rect.width;
        let bottom = rect.y + rect.height;

        for px in rect.x..=right {
            self.put_pixel(px, rect.y, color);
            self.put_pixel(px, bottom, color);
        }
        for py in rect.y..=bottom {
            self.put_pixel(rect.x, py, color);
            self.put_pixel(right, py, color);
        }
    }
}

/// RGBA byte frame as handed out by `Pixels::frame_mut`.
pub struct FrameSurface<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> FrameSurface<'a> {
    pub fn new(frame: &'a mut [u8], width: u32, height: u32) -> Self {
        Self { frame, width, height }
    }
}

impl Surface for FrameSurface<'_> {
    fn put_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width && y < self.height {
            let index = ((y * self.width + x) * 4) as usize;
            if index + 3 < self.frame.len() {
                self.frame[index..index + 4].copy_from_slice(&color);
            }
        }
    }
}

impl Surface for RgbaImage {
    fn put_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width() && y < self.height() {
            RgbaImage::put_pixel(self, x, y, Rgba(color));
        }
    }
}

/// Fill then outline one cell.
pub fn paint_cell<S: Surface + ?Sized>(surface: &mut S, grid: &GridState, column: u32, row: u32) {
    let rect = grid.geometry().cell_rect(column, row);
    let fill = if grid.get_cell(column, row) { BLACK } else { WHITE };

    surface.fill_rectangle(rect, fill);
    surface.stroke_rectangle(rect, BLACK);
}

pub fn render_to_surface<S: Surface + ?Sized>(surface: &mut S, grid: &GridState) {
    for (column, row) in grid.coordinates() {
        paint_cell(surface, grid, column, row);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedrawRegion {
    Cell(u32, u32),
    All,
}

/// Regions queued for repaint since the last frame.
#[derive(Debug, Default)]
pub struct DirtyRegions {
    all: bool,
    cells: Vec<(u32, u32)>,
}

impl DirtyRegions {
    pub fn request(&mut self, region: RedrawRegion) {
        match region {
            RedrawRegion::All => {
                self.all = true;
                self.cells.clear();
            }
            RedrawRegion::Cell(column, row) => {
                if !self.all && !self.cells.contains(&(column, row)) {
                    self.cells.push((column, row));
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.all && self.cells.is_empty()
    }

    pub fn take(&mut self) -> Vec<RedrawRegion> {
        if std::mem::take(&mut self.all) {
            self.cells.clear();
            return vec![RedrawRegion::All];
        }
        self.cells
            .drain(..)
            .map(|(column, row)| RedrawRegion::Cell(column, row))
            .collect()
    }
}

pub fn repaint_regions<S: Surface + ?Sized>(surface: &mut S, grid: &GridState, regions: &[RedrawRegion]) {
    for region in regions {
        match *region {
            RedrawRegion::All => render_to_surface(surface, grid),
            RedrawRegion::Cell(column, row) => paint_cell(surface, grid, column, row),
        }
    }
}

pub struct GraphicsRenderer {
    pixels: Pixels,
    geometry: GridGeometry,
    dirty: DirtyRegions,
}

impl GraphicsRenderer {
    pub fn new(window: &Window, geometry: GridGeometry) -> Result<Self, pixels::Error> {
        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, window);
        let pixels = Pixels::new(geometry.pixel_width(), geometry.pixel_height(), surface_texture)?;

        let mut dirty = DirtyRegions::default();
        dirty.request(RedrawRegion::All);

        Ok(Self { pixels, geometry, dirty })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if let Err(err) = self.pixels.resize_surface(width, height) {
            log::error!("Failed to resize surface: {}", err);
        }
        self.request_redraw(RedrawRegion::All);
    }

    pub fn request_redraw(&mut self, region: RedrawRegion) {
        self.dirty.request(region);
    }

    pub fn needs_redraw(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Window position to frame-buffer pixel. Positions off the frame are
    /// returned unclamped so the caller can reject them.
    pub fn window_pos_to_pixel(&self, position: PhysicalPosition<f64>) -> (i32, i32) {
        match self.pixels.window_pos_to_pixel((position.x as f32, position.y as f32)) {
            Ok((x, y)) => (x as i32, y as i32),
            Err((x, y)) => (x as i32, y as i32),
        }
    }

    /// Repaints only the queued regions into the persistent frame.
    pub fn render(&mut self, grid: &GridState) {
        let regions = self.dirty.take();
        if regions.is_empty() {
            return;
        }

        let mut surface = FrameSurface::new(
            self.pixels.frame_mut(),
            self.geometry.pixel_width(),
            self.geometry.pixel_height(),
        );
        repaint_regions(&mut surface, grid, &regions);
    }

    pub fn present(&mut self) -> Result<(), pixels::Error> {
        self.pixels.render()
    }
}
