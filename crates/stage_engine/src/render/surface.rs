//! Draw target contract
//!
//! The engine never blits pixels itself. The graphics system computes a
//! world-space [`Placement`] for every drawable and hands it, together with an
//! opaque [`ImageHandle`], to whatever [`Surface`] the host supplies.

use crate::foundation::math::{vec2, Vec2};
use thiserror::Error;

/// Errors raised by a draw backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The backend does not know the image
    #[error("unknown image: {0}")]
    UnknownImage(u64),

    /// Generic backend failure
    #[error("backend error: {0}")]
    Backend(String),
}

/// Opaque reference to an image owned by the draw backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle {
    /// Backend-assigned identifier
    pub id: u64,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl ImageHandle {
    /// Create a new image handle
    pub const fn new(id: u64, width: u32, height: u32) -> Self {
        Self { id, width, height }
    }

    /// Pixel dimensions as a vector
    pub fn pixel_size(&self) -> Vec2 {
        vec2(f64::from(self.width), f64::from(self.height))
    }
}

/// Final world-space placement of one drawable
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Placement {
    /// Top-left X in world units
    pub x: f64,
    /// Top-left Y in world units
    pub y: f64,
    /// Width in world units
    pub width: f64,
    /// Height in world units
    pub height: f64,
    /// Rotation in radians
    pub rotation: f64,
}

impl Placement {
    /// Build a placement from a position, a size and a rotation
    pub fn new(position: Vec2, size: Vec2, rotation: f64) -> Self {
        Self {
            x: position.x,
            y: position.y,
            width: size.x,
            height: size.y,
            rotation,
        }
    }

    /// Convert to the pixel-space affine parameters a backend applies to `image`
    ///
    /// The image is scaled to the placement size, rotated, then translated.
    pub fn to_pixel_transform(&self, image: &ImageHandle, pixels_per_unit: f64) -> PixelTransform {
        let image_size = image.pixel_size();
        PixelTransform {
            scale_x: self.width / image_size.x * pixels_per_unit,
            scale_y: self.height / image_size.y * pixels_per_unit,
            rotation: self.rotation,
            translate_x: self.x * pixels_per_unit,
            translate_y: self.y * pixels_per_unit,
        }
    }
}

/// Scale, rotate, translate parameters in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelTransform {
    /// Horizontal scale applied to the source image
    pub scale_x: f64,
    /// Vertical scale applied to the source image
    pub scale_y: f64,
    /// Rotation in radians, applied after scaling
    pub rotation: f64,
    /// Horizontal translation in pixels, applied last
    pub translate_x: f64,
    /// Vertical translation in pixels, applied last
    pub translate_y: f64,
}

/// A target the graphics system can draw onto
pub trait Surface {
    /// Draw `image` at `placement`
    fn draw_image(&mut self, image: &ImageHandle, placement: &Placement) -> Result<(), SurfaceError>;
}

/// A single recorded draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    /// Image that was drawn
    pub image: ImageHandle,
    /// Where it was drawn
    pub placement: Placement,
}

/// Surface that records every draw instead of rasterizing
///
/// Used by headless hosts and tests. Can be told to fail after a number of
/// successful draws to exercise error propagation.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    fail_after: Option<usize>,
}

impl RecordingSurface {
    /// Create an empty recording surface
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every draw after the first `successes` fail
    pub fn fail_after(successes: usize) -> Self {
        Self {
            commands: Vec::new(),
            fail_after: Some(successes),
        }
    }

    /// Recorded draws in submission order
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Forget all recorded draws (start of a new frame)
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Surface for RecordingSurface {
    fn draw_image(&mut self, image: &ImageHandle, placement: &Placement) -> Result<(), SurfaceError> {
        if self.fail_after.is_some_and(|limit| self.commands.len() >= limit) {
            return Err(SurfaceError::Backend(format!(
                "draw of image {} rejected",
                image.id
            )));
        }
        self.commands.push(DrawCommand {
            image: *image,
            placement: *placement,
        });
        Ok(())
    }
}
