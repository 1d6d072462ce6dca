/// Flattens a scene into a single bitmap
///
/// `render` hides the toolbars, rasterises the whole scene at the device
/// scale and puts the toolbars back. It takes the scene by `&mut`, so no
/// input can be handled while the toolbars are hidden, and the restore
/// happens on every exit path.
use image::{imageops, imageops::FilterType, Rgba, RgbaImage};
use std::ops::Deref;

use super::font::CaptionFont;
use super::scene::Scene;
use super::text::{draw_caption, CaptionBox};
use crate::config::CaptionStyle;
use crate::error::RenderError;

/// Renders scenes with the fixed caption style
#[derive(Debug, Clone)]
pub struct Compositor {
    style: CaptionStyle,
    font: Option<CaptionFont>,
}

impl Compositor {
    /// A compositor without a font can still render scenes whose
    /// captions are all blank.
    pub fn new(style: CaptionStyle, font: Option<CaptionFont>) -> Self {
        Self { style, font }
    }

    pub fn style(&self) -> &CaptionStyle {
        &self.style
    }

    /// Render the scene as it should be exported: toolbars excluded
    pub fn render(&self, scene: &mut Scene) -> Result<RgbaImage, RenderError> {
        let scene = ChromeSuppressed::new(scene);
        self.rasterize(&scene)
    }

    /// Rasterise every visible layer of the scene
    pub fn rasterize(&self, scene: &Scene) -> Result<RgbaImage, RenderError> {
        let (width, height) = scene.pixel_size();
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyScene { width, height });
        }

        let metrics = scene.metrics();
        let mut canvas = RgbaImage::from_pixel(width, height, Rgba(metrics.backdrop));

        if let Some(photo) = scene.background() {
            draw_aspect_fit(&mut canvas, photo);
        }

        for caption in scene.captions() {
            if caption.text.trim().is_empty() {
                continue;
            }
            let font = self
                .font
                .as_ref()
                .ok_or_else(|| RenderError::FontUnavailable(caption.text.clone()))?;

            let (x0, y0, x1, y1) = caption.frame.to_pixels(metrics.scale, (width, height));
            draw_caption(
                &mut canvas,
                font,
                &self.style,
                &caption.text,
                CaptionBox { x0, y0, x1, y1 },
                metrics.scale,
            );
        }

        for toolbar in scene.toolbars().iter().filter(|toolbar| !toolbar.hidden) {
            let (x0, y0, x1, y1) = toolbar.frame.to_pixels(metrics.scale, (width, height));
            fill_rect(&mut canvas, (x0, y0, x1, y1), Rgba(metrics.chrome_color));
        }

        tracing::debug!(width, height, "rasterised scene");
        Ok(canvas)
    }
}

/// Scale `photo` to fit inside the canvas, centred, keeping its aspect ratio
fn draw_aspect_fit(canvas: &mut RgbaImage, photo: &RgbaImage) {
    let (cw, ch) = canvas.dimensions();
    let (pw, ph) = photo.dimensions();
    if pw == 0 || ph == 0 {
        return;
    }

    let ratio = (cw as f32 / pw as f32).min(ch as f32 / ph as f32);
    let w = ((pw as f32 * ratio).round() as u32).clamp(1, cw);
    let h = ((ph as f32 * ratio).round() as u32).clamp(1, ch);

    let x = (cw - w) / 2;
    let y = (ch - h) / 2;

    if (w, h) == (pw, ph) {
        imageops::overlay(canvas, photo, x as i64, y as i64);
    } else {
        let resized = imageops::resize(photo, w, h, FilterType::Triangle);
        imageops::overlay(canvas, &resized, x as i64, y as i64);
    }
}

fn fill_rect(canvas: &mut RgbaImage, (x0, y0, x1, y1): (u32, u32, u32, u32), color: Rgba<u8>) {
    for y in y0..y1 {
        for x in x0..x1 {
            canvas.put_pixel(x, y, color);
        }
    }
}

/// Hides the toolbars for as long as it lives
struct ChromeSuppressed<'a> {
    scene: &'a mut Scene,
    was_hidden: bool,
}

impl<'a> ChromeSuppressed<'a> {
    fn new(scene: &'a mut Scene) -> Self {
        let was_hidden = scene.chrome_hidden();
        scene.set_chrome_hidden(true);
        Self { scene, was_hidden }
    }
}

impl Deref for ChromeSuppressed<'_> {
    type Target = Scene;

    fn deref(&self) -> &Scene {
        self.scene
    }
}

impl Drop for ChromeSuppressed<'_> {
    fn drop(&mut self) {
        self.scene.set_chrome_hidden(self.was_hidden);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneMetrics;
    use std::sync::Arc;

    const PHOTO: Rgba<u8> = Rgba([200, 30, 30, 255]);

    fn metrics() -> SceneMetrics {
        SceneMetrics {
            width: 100.0,
            height: 200.0,
            scale: 2.0,
            scale_override: None,
            toolbar_height: 20.0,
            caption_inset: 5.0,
            chrome_color: [0, 255, 0, 255],
            backdrop: [0, 0, 0, 255],
        }
    }

    fn scene_with_photo(top: &str, bottom: &str) -> Scene {
        // Exactly the scene's pixel size so the photo covers every pixel
        let photo = Arc::new(RgbaImage::from_pixel(200, 400, PHOTO));
        Scene::new(metrics(), 10.0, Some(photo), top, bottom)
    }

    #[test]
    fn test_render_excludes_toolbars() {
        let compositor = Compositor::new(CaptionStyle::default(), None);
        let mut scene = scene_with_photo("", "");

        let image = compositor.render(&mut scene).unwrap();

        assert_eq!(image.dimensions(), (200, 400));
        // Inside the top and bottom toolbar regions
        assert_eq!(*image.get_pixel(100, 10), PHOTO);
        assert_eq!(*image.get_pixel(100, 390), PHOTO);
        assert_eq!(*image.get_pixel(0, 0), PHOTO);
        assert_eq!(*image.get_pixel(199, 399), PHOTO);
    }

    #[test]
    fn test_render_restores_toolbars() {
        let compositor = Compositor::new(CaptionStyle::default(), None);
        let mut scene = scene_with_photo("", "");

        compositor.render(&mut scene).unwrap();

        assert!(!scene.chrome_hidden());
        let on_screen = compositor.rasterize(&scene).unwrap();
        assert_eq!(*on_screen.get_pixel(100, 10), Rgba([0, 255, 0, 255]));
    }

    #[test]
    fn test_render_restores_toolbars_on_error() {
        let compositor = Compositor::new(CaptionStyle::default(), None);
        let mut scene = scene_with_photo("NO FONT", "");

        let err = compositor.render(&mut scene).unwrap_err();

        assert_eq!(err, RenderError::FontUnavailable("NO FONT".into()));
        assert!(!scene.chrome_hidden());
    }

    #[test]
    fn test_photo_is_letterboxed() {
        let compositor = Compositor::new(CaptionStyle::default(), None);
        // Wide photo in a tall scene: black bars above and below
        let photo = Arc::new(RgbaImage::from_pixel(200, 100, PHOTO));
        let mut scene = Scene::new(metrics(), 10.0, Some(photo), "", "");

        let image = compositor.render(&mut scene).unwrap();

        assert_eq!(*image.get_pixel(100, 200), PHOTO);
        assert_eq!(*image.get_pixel(100, 5), Rgba([0, 0, 0, 255]));
        assert_eq!(*image.get_pixel(100, 395), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_empty_scene_is_an_error() {
        let compositor = Compositor::new(CaptionStyle::default(), None);
        let mut scene = Scene::new(
            SceneMetrics {
                width: 0.0,
                ..metrics()
            },
            10.0,
            None,
            "",
            "",
        );

        let err = compositor.render(&mut scene).unwrap_err();
        assert_eq!(err, RenderError::EmptyScene { width: 0, height: 400 });
    }

    #[test]
    #[ignore = "needs a system caption font"]
    fn test_captions_do_not_touch_toolbar_regions() {
        let font = CaptionFont::discover(&CaptionStyle::default())
            .unwrap_or_else(|e| panic!("caption font required: {e}"));
        let style = CaptionStyle {
            font_size: 10.0,
            min_font_size: 5.0,
            ..CaptionStyle::default()
        };
        let compositor = Compositor::new(style, Some(font));
        let mut scene = scene_with_photo("TOP", "BOTTOM");

        let image = compositor.render(&mut scene).unwrap();

        for x in 0..200 {
            assert_eq!(*image.get_pixel(x, 2), PHOTO);
            assert_eq!(*image.get_pixel(x, 397), PHOTO);
        }
        // Something other than the photo was drawn for the captions
        assert!(image.pixels().any(|p| *p != PHOTO));
    }
}
