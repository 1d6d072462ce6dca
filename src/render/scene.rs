/// The visual scene that gets flattened into a meme
///
/// A scene is a background photo, two caption layers anchored under the
/// top toolbar and above the bottom toolbar, and the two toolbars
/// themselves. All geometry is in points; the compositor multiplies by
/// the device scale.
use crate::config::SceneMetrics;
use crate::state::data::{CaptionSlot, Photo};

/// Line height relative to the font size
const LINE_HEIGHT: f32 = 1.25;

/// Axis-aligned rectangle in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Pixel bounds `(x0, y0, x1, y1)` at `scale`, clamped to the canvas
    pub fn to_pixels(&self, scale: f32, canvas: (u32, u32)) -> (u32, u32, u32, u32) {
        let clamp = |v: f32, max: u32| (v * scale).round().clamp(0.0, max as f32) as u32;
        (
            clamp(self.x, canvas.0),
            clamp(self.y, canvas.1),
            clamp(self.x + self.width, canvas.0),
            clamp(self.y + self.height, canvas.1),
        )
    }
}

/// A positioned caption
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionLayer {
    pub slot: CaptionSlot,
    pub text: String,
    pub frame: Rect,
}

/// A toolbar that is visible on screen but never exported
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChromeLayer {
    pub frame: Rect,
    pub hidden: bool,
}

#[derive(Debug, Clone)]
pub struct Scene {
    metrics: SceneMetrics,
    background: Option<Photo>,
    captions: [CaptionLayer; 2],
    toolbars: [ChromeLayer; 2],
}

impl Scene {
    /// Lay out a scene for the given captions. `font_size` sets the
    /// height of the caption boxes.
    pub fn new(
        metrics: SceneMetrics,
        font_size: f32,
        background: Option<Photo>,
        top_text: &str,
        bottom_text: &str,
    ) -> Self {
        let SceneMetrics {
            width,
            height,
            toolbar_height,
            caption_inset,
            ..
        } = metrics;

        let caption_height = font_size * LINE_HEIGHT;
        let caption_width = (width - 2.0 * caption_inset).max(0.0);

        let top = Rect::new(
            caption_inset,
            toolbar_height + caption_inset,
            caption_width,
            caption_height,
        );
        let bottom = Rect::new(
            caption_inset,
            height - toolbar_height - caption_inset - caption_height,
            caption_width,
            caption_height,
        );

        Self {
            metrics,
            background,
            captions: [
                CaptionLayer {
                    slot: CaptionSlot::Top,
                    text: top_text.to_string(),
                    frame: top,
                },
                CaptionLayer {
                    slot: CaptionSlot::Bottom,
                    text: bottom_text.to_string(),
                    frame: bottom,
                },
            ],
            toolbars: [
                ChromeLayer {
                    frame: Rect::new(0.0, 0.0, width, toolbar_height),
                    hidden: false,
                },
                ChromeLayer {
                    frame: Rect::new(0.0, height - toolbar_height, width, toolbar_height),
                    hidden: false,
                },
            ],
        }
    }

    pub fn metrics(&self) -> &SceneMetrics {
        &self.metrics
    }

    pub fn background(&self) -> Option<&Photo> {
        self.background.as_ref()
    }

    pub fn captions(&self) -> &[CaptionLayer; 2] {
        &self.captions
    }

    pub fn toolbars(&self) -> &[ChromeLayer; 2] {
        &self.toolbars
    }

    /// Output size in pixels at the device scale
    pub fn pixel_size(&self) -> (u32, u32) {
        let to_px = |points: f32| (points * self.metrics.scale).round().max(0.0) as u32;
        (to_px(self.metrics.width), to_px(self.metrics.height))
    }

    pub fn chrome_hidden(&self) -> bool {
        self.toolbars.iter().all(|toolbar| toolbar.hidden)
    }

    pub fn set_chrome_hidden(&mut self, hidden: bool) {
        for toolbar in &mut self.toolbars {
            toolbar.hidden = hidden;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captions_sit_between_toolbars() {
        let scene = Scene::new(SceneMetrics::default(), 40.0, None, "TOP", "BOTTOM");
        let [top_bar, bottom_bar] = scene.toolbars();
        let [top, bottom] = scene.captions();

        assert!(top.frame.y >= top_bar.frame.y + top_bar.frame.height);
        assert!(bottom.frame.y + bottom.frame.height <= bottom_bar.frame.y);
        assert_eq!(top.text, "TOP");
        assert_eq!(bottom.slot, CaptionSlot::Bottom);
    }

    #[test]
    fn test_pixel_size_uses_scale() {
        let metrics = SceneMetrics {
            width: 100.0,
            height: 50.5,
            scale: 3.0,
            ..SceneMetrics::default()
        };
        let scene = Scene::new(metrics, 40.0, None, "", "");

        assert_eq!(scene.pixel_size(), (300, 152));
    }

    #[test]
    fn test_rect_to_pixels_clamps() {
        let rect = Rect::new(-5.0, 10.0, 100.0, 100.0);
        assert_eq!(rect.to_pixels(2.0, (120, 80)), (0, 20, 120, 80));
    }
}
