//! Save screenshot handling
//!
//! One fixed texture slot displays whichever save slot's screenshot is
//! selected. The texture is reused across selections and only recreated when
//! the decoded image dimensions change; `clear` merely hides it. Decoding is
//! kept separate from the SDL texture work so it can be tested headless.
//!
//! Also hosts the capture side: encoding the current frame to the JPEG bytes
//! a subsequent save embeds in its slot file.

use image::codecs::jpeg::JpegEncoder;
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};

/// JPEG quality for save screenshots.
const CAPTURE_QUALITY: u8 = 85;

/// Decodes JPEG bytes to a tightly packed RGBA8 buffer plus dimensions.
pub fn decode_rgba(jpeg: &[u8]) -> Result<(Vec<u8>, u32, u32), String> {
    let img = image::load_from_memory(jpeg)
        .map_err(|e| format!("screenshot decode failed: {}", e))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok((rgba.into_raw(), width, height))
}

/// Reads the canvas back and encodes it as JPEG for embedding in a save.
pub fn capture_jpeg(canvas: &Canvas<Window>) -> Result<Vec<u8>, String> {
    let (width, height) = canvas.output_size()?;
    let pixels = canvas.read_pixels(None, PixelFormatEnum::RGB24)?;

    let img = image::RgbImage::from_raw(width, height, pixels)
        .ok_or_else(|| "capture buffer size mismatch".to_string())?;

    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, CAPTURE_QUALITY)
        .encode_image(&img)
        .map_err(|e| format!("screenshot encode failed: {}", e))?;
    Ok(jpeg)
}

/// Single-slot screenshot texture cache.
pub struct ScreenshotCache<'a> {
    texture: Option<Texture<'a>>,
    size: (u32, u32),
    visible: bool,
}

impl<'a> ScreenshotCache<'a> {
    pub fn new() -> Self {
        ScreenshotCache {
            texture: None,
            size: (0, 0),
            visible: false,
        }
    }

    /// Decodes `jpeg` into the cached texture and marks it visible.
    ///
    /// The existing texture is updated in place when the dimensions match;
    /// otherwise it is dropped and a new streaming texture allocated.
    pub fn show(
        &mut self,
        jpeg: &[u8],
        creator: &'a TextureCreator<WindowContext>,
    ) -> Result<(), String> {
        let (rgba, width, height) = decode_rgba(jpeg)?;

        if self.texture.is_none() || self.size != (width, height) {
            let texture = creator
                .create_texture_streaming(PixelFormatEnum::RGBA32, width, height)
                .map_err(|e| format!("screenshot texture creation failed: {}", e))?;
            self.texture = Some(texture);
            self.size = (width, height);
        }

        if let Some(texture) = self.texture.as_mut() {
            texture
                .update(None, &rgba, width as usize * 4)
                .map_err(|e| format!("screenshot texture update failed: {}", e))?;
        }

        self.visible = true;
        Ok(())
    }

    /// Hides the thumbnail without releasing the texture.
    pub fn clear(&mut self) {
        self.visible = false;
    }

    #[allow(dead_code)] // Inspection hook for tests
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Copies the screenshot into `dest`, letterboxed to its aspect ratio.
    pub fn render(&self, canvas: &mut Canvas<Window>, dest: Rect) -> Result<(), String> {
        if !self.visible {
            return Ok(());
        }
        let Some(texture) = self.texture.as_ref() else {
            return Ok(());
        };

        let (img_w, img_h) = self.size;
        if img_w == 0 || img_h == 0 {
            return Ok(());
        }

        let scale = (dest.width() as f32 / img_w as f32)
            .min(dest.height() as f32 / img_h as f32);
        let draw_w = (img_w as f32 * scale) as u32;
        let draw_h = (img_h as f32 * scale) as u32;
        let draw = Rect::new(
            dest.x() + ((dest.width() - draw_w) / 2) as i32,
            dest.y() + ((dest.height() - draw_h) / 2) as i32,
            draw_w,
            draw_h,
        );

        canvas.copy(texture, None, draw)
    }
}

impl Default for ScreenshotCache<'_> {
    fn default() -> Self {
        Self::new()
    }
}
