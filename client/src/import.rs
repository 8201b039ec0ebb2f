//! Placing an uploaded picture on the board.

use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageError, ImageReader, Rgba, RgbaImage};
use thiserror::Error;

use crate::actions::cancel_stroke;
use crate::geometry::fit_contain;
use crate::state::State;
use crate::surface::{Surface, SurfaceError};

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("could not read the selected file: {0}")]
    Read(String),
    #[error("file is not a supported image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("image has no pixels")]
    EmptyImage,
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

/// Decodes `bytes` and renders a full canvas-sized frame: white background
/// with the image scaled to fit and centered.
pub fn compose_import(
    bytes: &[u8],
    canvas_width: u32,
    canvas_height: u32,
) -> Result<RgbaImage, ImportError> {
    let decoded = decode_upright(bytes)?.to_rgba8();
    let (image_width, image_height) = decoded.dimensions();
    let placement = fit_contain(
        image_width as f64,
        image_height as f64,
        canvas_width as f64,
        canvas_height as f64,
    )
    .ok_or(ImportError::EmptyImage)?;

    let width = (placement.width.round() as u32).clamp(1, canvas_width.max(1));
    let height = (placement.height.round() as u32).clamp(1, canvas_height.max(1));
    let scaled = imageops::resize(&decoded, width, height, FilterType::Triangle);

    let mut frame = RgbaImage::from_pixel(canvas_width, canvas_height, BACKGROUND);
    let x = canvas_width.saturating_sub(width) / 2;
    let y = canvas_height.saturating_sub(height) / 2;
    imageops::overlay(&mut frame, &scaled, i64::from(x), i64::from(y));
    Ok(frame)
}

/// Decodes `bytes`, turning camera photos upright per their EXIF orientation.
fn decode_upright(bytes: &[u8]) -> Result<DynamicImage, ImportError> {
    let mut decoder = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(ImageError::IoError)?
        .into_decoder()?;
    let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);
    let mut image = DynamicImage::from_decoder(decoder)?;
    image.apply_orientation(orientation);
    Ok(image)
}

/// Replaces the board contents with the uploaded image.
///
/// The frame is composed off screen first; on any error the canvas keeps
/// its previous pixels.
pub fn import_image<S: Surface>(state: &mut State<S>, bytes: &[u8]) -> Result<(), ImportError> {
    let frame = compose_import(
        bytes,
        state.surface.width() as u32,
        state.surface.height() as u32,
    )?;
    state.surface.put_rgba(0.0, 0.0, &frame)?;
    cancel_stroke(state);
    log::debug!("imported {} byte image", bytes.len());
    Ok(())
}
