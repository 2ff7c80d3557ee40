//! Sprite providers
//!
//! A sprite provider is anything that can hand the graphics system an image to
//! draw and tell it how large that image is in world units. Static sprites
//! always return the same image; animated sprites step through a strip of
//! frames, advancing on every image query.

use crate::config::EngineConfig;
use crate::foundation::math::Vec2;
use crate::render::ImageHandle;

/// Source of a drawable image and its intrinsic size
pub trait SpriteSource {
    /// Image to draw this tick, or `None` when nothing should be drawn
    fn current_image(&mut self) -> Option<ImageHandle>;

    /// Unscaled size in world units
    fn intrinsic_size(&self) -> Vec2;
}

/// Sprite source that plays back a strip of frames
pub trait AnimatedSource: SpriteSource {
    /// Whether the animation is still producing frames
    fn is_active(&self) -> bool;

    /// Start or stop the animation
    fn set_active(&mut self, active: bool);

    /// Index of the frame currently shown
    fn current_frame(&self) -> usize;

    /// Number of frames in the strip
    fn num_frames(&self) -> usize;

    /// Jump to the next frame, wrapping at the end of the strip
    fn next_frame(&mut self);

    /// Jump to `frame`; returns `false` if it is out of range
    fn set_frame(&mut self, frame: usize) -> bool;

    /// Whether to restart after the last frame instead of stopping
    fn set_looping(&mut self, looping: bool);

    /// Draw ticks each frame stays on screen
    fn ticks_per_frame(&self) -> u32;

    /// Set the draw ticks each frame stays on screen
    fn set_ticks_per_frame(&mut self, ticks: u32);

    /// Restart the tick counter for the current frame
    fn reset_ticks(&mut self);
}

/// A single, never-changing image
#[derive(Debug, Clone, PartialEq)]
pub struct StaticSprite {
    image: ImageHandle,
    size: Vec2,
}

impl StaticSprite {
    /// Create a sprite sized from the image's pixel dimensions
    pub fn new(image: ImageHandle, config: &EngineConfig) -> Self {
        Self {
            image,
            size: image.pixel_size() / config.pixels_per_unit,
        }
    }

    /// Create a sprite with an explicit world-space size
    pub const fn with_size(image: ImageHandle, size: Vec2) -> Self {
        Self { image, size }
    }

    /// The underlying image
    pub const fn image(&self) -> ImageHandle {
        self.image
    }
}

impl SpriteSource for StaticSprite {
    fn current_image(&mut self) -> Option<ImageHandle> {
        Some(self.image)
    }

    fn intrinsic_size(&self) -> Vec2 {
        self.size
    }
}

/// Frame-strip animation driven by draw ticks
#[derive(Debug, Clone)]
pub struct AnimatedSprite {
    frames: Vec<ImageHandle>,
    current_frame: usize,
    ticks: u32,
    ticks_per_frame: u32,
    looping: bool,
    active: bool,
    pixels_per_unit: f64,
    tick_rate: f64,
}

impl AnimatedSprite {
    /// Create an animation that plays the whole strip in `seconds_to_loop`
    pub fn new(
        frames: Vec<ImageHandle>,
        seconds_to_loop: f64,
        looping: bool,
        config: &EngineConfig,
    ) -> Self {
        let mut sprite = Self {
            frames,
            current_frame: 0,
            ticks: 0,
            ticks_per_frame: 0,
            looping,
            active: true,
            pixels_per_unit: config.pixels_per_unit,
            tick_rate: config.animation_ticks_per_second,
        };
        sprite.set_seconds_to_run(seconds_to_loop);
        sprite
    }

    /// Retime the animation so one pass over the strip lasts `seconds`
    pub fn set_seconds_to_run(&mut self, seconds: f64) {
        if self.frames.is_empty() || seconds <= 0.0 {
            self.ticks_per_frame = 0;
            return;
        }
        #[allow(clippy::cast_precision_loss)]
        let frames_per_second = self.frames.len() as f64 / seconds;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let ticks = (self.tick_rate / frames_per_second).floor() as u32;
        self.ticks_per_frame = ticks;
    }

    /// Whether the animation restarts after its last frame
    pub const fn is_looping(&self) -> bool {
        self.looping
    }
}

impl SpriteSource for AnimatedSprite {
    fn current_image(&mut self) -> Option<ImageHandle> {
        if !self.active || self.frames.is_empty() {
            return None;
        }
        self.ticks = self.ticks.saturating_add(1);
        if self.ticks > self.ticks_per_frame {
            self.next_frame();
        }
        self.frames.get(self.current_frame).copied()
    }

    fn intrinsic_size(&self) -> Vec2 {
        self.frames
            .get(self.current_frame)
            .map_or_else(Vec2::zeros, |frame| frame.pixel_size() / self.pixels_per_unit)
    }
}

impl AnimatedSource for AnimatedSprite {
    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn current_frame(&self) -> usize {
        self.current_frame
    }

    fn num_frames(&self) -> usize {
        self.frames.len()
    }

    fn next_frame(&mut self) {
        if !self.active {
            return;
        }
        self.ticks = 0;
        self.current_frame += 1;
        if self.current_frame >= self.frames.len() {
            self.current_frame = 0;
            if !self.looping {
                self.active = false;
            }
        }
    }

    fn set_frame(&mut self, frame: usize) -> bool {
        if frame >= self.frames.len() {
            return false;
        }
        self.current_frame = frame;
        true
    }

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    fn ticks_per_frame(&self) -> u32 {
        self.ticks_per_frame
    }

    fn set_ticks_per_frame(&mut self, ticks: u32) {
        self.ticks_per_frame = ticks;
    }

    fn reset_ticks(&mut self) {
        self.ticks = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::vec2;

    fn strip(count: u64) -> Vec<ImageHandle> {
        (0..count).map(|id| ImageHandle::new(id, 200, 100)).collect()
    }

    #[test]
    fn test_static_sprite_size_from_pixels() {
        let config = EngineConfig::default();
        let mut sprite = StaticSprite::new(ImageHandle::new(9, 200, 50), &config);
        assert_eq!(sprite.intrinsic_size(), vec2(2.0, 0.5));
        assert_eq!(sprite.current_image(), Some(ImageHandle::new(9, 200, 50)));
    }

    #[test]
    fn test_ticks_per_frame_from_duration() {
        let config = EngineConfig::default();
        // 4 frames over 2 seconds at 60 ticks/s -> 2 fps -> 30 ticks per frame
        let sprite = AnimatedSprite::new(strip(4), 2.0, true, &config);
        assert_eq!(sprite.ticks_per_frame(), 30);
    }

    #[test]
    fn test_advances_after_ticks_elapse() {
        let config = EngineConfig::default();
        let mut sprite = AnimatedSprite::new(strip(3), 1.0, true, &config);
        sprite.set_ticks_per_frame(2);

        assert_eq!(sprite.current_image().map(|i| i.id), Some(0));
        assert_eq!(sprite.current_image().map(|i| i.id), Some(0));
        // third query exceeds two ticks and flips to the next frame
        assert_eq!(sprite.current_image().map(|i| i.id), Some(1));
        assert_eq!(sprite.current_frame(), 1);
    }

    #[test]
    fn test_tick_counter_saturates() {
        let config = EngineConfig::default();
        let mut sprite = AnimatedSprite::new(strip(2), 1.0, true, &config);
        sprite.set_ticks_per_frame(u32::MAX);
        sprite.ticks = u32::MAX - 1;

        assert_eq!(sprite.current_image().map(|i| i.id), Some(0));
        assert_eq!(sprite.current_image().map(|i| i.id), Some(0));
        assert_eq!(sprite.ticks, u32::MAX);
        assert_eq!(sprite.current_frame(), 0);
    }

    #[test]
    fn test_looping_wraps() {
        let config = EngineConfig::default();
        let mut sprite = AnimatedSprite::new(strip(2), 1.0, true, &config);
        sprite.next_frame();
        sprite.next_frame();
        assert_eq!(sprite.current_frame(), 0);
        assert!(sprite.is_active());
    }

    #[test]
    fn test_one_shot_deactivates() {
        let config = EngineConfig::default();
        let mut sprite = AnimatedSprite::new(strip(2), 1.0, false, &config);
        sprite.next_frame();
        sprite.next_frame();
        assert_eq!(sprite.current_frame(), 0);
        assert!(!sprite.is_active());
        assert_eq!(sprite.current_image(), None);

        // inactive animations ignore frame stepping
        sprite.next_frame();
        assert_eq!(sprite.current_frame(), 0);
    }

    #[test]
    fn test_set_frame_bounds() {
        let config = EngineConfig::default();
        let mut sprite = AnimatedSprite::new(strip(3), 1.0, true, &config);
        assert!(sprite.set_frame(2));
        assert_eq!(sprite.current_frame(), 2);
        assert!(!sprite.set_frame(3));
        assert_eq!(sprite.current_frame(), 2);
    }

    #[test]
    fn test_empty_strip() {
        let config = EngineConfig::default();
        let mut sprite = AnimatedSprite::new(Vec::new(), 1.0, true, &config);
        assert_eq!(sprite.ticks_per_frame(), 0);
        assert_eq!(sprite.current_image(), None);
        assert_eq!(sprite.intrinsic_size(), Vec2::zeros());
    }
}
