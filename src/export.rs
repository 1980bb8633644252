use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgba, RgbaImage};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};
use thiserror::Error;

use crate::graphics::{render_to_surface, WHITE};
use crate::grid::GridState;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Saved(PathBuf),
    Cancelled,
}

/// Asks the user where to save. `None` or an empty path means cancel.
pub trait SaveDialog {
    fn prompt_save_path(&self) -> Option<PathBuf>;

    fn report_error(&self, _error: &ExportError) {}
}

pub struct RfdSaveDialog;

impl SaveDialog for RfdSaveDialog {
    fn prompt_save_path(&self) -> Option<PathBuf> {
        FileDialog::new()
            .set_title("Save Image")
            .add_filter("PNG Image", &["png"])
            .set_file_name("grid.png")
            .save_file()
    }

    fn report_error(&self, error: &ExportError) {
        MessageDialog::new()
            .set_level(MessageLevel::Error)
            .set_title("Save Image")
            .set_description(&error.to_string())
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}

/// Draws the grid into a fresh bitmap that covers exactly the cells.
pub fn rasterize_to_bitmap(grid: &GridState) -> RgbaImage {
    let geometry = grid.geometry();
    let mut bitmap = RgbaImage::from_pixel(geometry.pixel_width(), geometry.pixel_height(), Rgba(WHITE));
    render_to_surface(&mut bitmap, grid);
    bitmap
}

pub fn encode_png(bitmap: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Cursor::new(Vec::new());
    bitmap.write_to(&mut bytes, ImageFormat::Png)?;
    Ok(bytes.into_inner())
}

/// Rasterizes and writes the grid as PNG. A missing or empty destination is
/// a cancelled save and touches nothing.
pub fn export_png(grid: &GridState, destination: Option<&Path>) -> Result<ExportOutcome, ExportError> {
    let path = match destination {
        Some(path) if !path.as_os_str().is_empty() => path,
        _ => {
            log::debug!("Save cancelled");
            return Ok(ExportOutcome::Cancelled);
        }
    };

    let bytes = encode_png(&rasterize_to_bitmap(grid))?;
    std::fs::write(path, bytes).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!("Saved grid image to {}", path.display());
    Ok(ExportOutcome::Saved(path.to_path_buf()))
}

/// The "Save Image" command: prompt, export, and report any failure.
pub fn save_image<D: SaveDialog + ?Sized>(dialog: &D, grid: &GridState) -> Result<ExportOutcome, ExportError> {
    let destination = dialog.prompt_save_path();
    let result = export_png(grid, destination.as_deref());

    if let Err(err) = &result {
        log::error!("Export failed: {}", err);
        dialog.report_error(err);
    }
    result
}
