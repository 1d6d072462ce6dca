/// Stroked caption text
///
/// Glyphs are rasterised into a coverage mask, the mask is dilated to get
/// the outline, and both are blended onto the canvas: stroke first, fill
/// on top.
use image::{Pixel, Rgba, RgbaImage};
use rusttype::{point, Font, Scale};

use super::font::CaptionFont;
use crate::config::CaptionStyle;

/// Pixel box a caption is centred in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptionBox {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl CaptionBox {
    fn width(&self) -> f32 {
        self.x1.saturating_sub(self.x0) as f32
    }

    fn height(&self) -> f32 {
        self.y1.saturating_sub(self.y0) as f32
    }
}

/// Advance width of `text` at `scale`
fn measure(font: &Font<'static>, scale: Scale, text: &str) -> f32 {
    font.layout(text, scale, point(0.0, 0.0))
        .last()
        .map(|glyph| glyph.position().x + glyph.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
}

/// Largest pixel size between `min` and `max` at which `text` fits `width`
pub fn fit_font_size(font: &CaptionFont, text: &str, width: f32, max: f32, min: f32) -> f32 {
    let font = font.font();
    fit_size(|size| measure(font, Scale::uniform(size), text), width, max, min)
}

/// Shrink from `max` until `advance(size)` fits `width`. Never returns more
/// than `max`, even when `min` is larger.
fn fit_size(advance: impl Fn(f32) -> f32, width: f32, max: f32, min: f32) -> f32 {
    let min = min.min(max);
    let mut size = max;

    let measured = advance(size);
    if measured > width && measured > 0.0 {
        size = (size * width / measured).max(min);
    }

    // Kerning is not perfectly linear, so walk down the last few steps
    while size > min && advance(size) > width {
        size = (size - 0.5).max(min);
    }

    size
}

/// Draw `text` centred in `frame`, shrinking it to fit the frame width
pub fn draw_caption(
    canvas: &mut RgbaImage,
    font: &CaptionFont,
    style: &CaptionStyle,
    text: &str,
    frame: CaptionBox,
    scale: f32,
) {
    if text.is_empty() || frame.width() <= 0.0 {
        return;
    }

    let size = fit_font_size(
        font,
        text,
        frame.width(),
        style.font_size * scale,
        style.min_font_size * scale,
    );
    let glyph_scale = Scale::uniform(size);
    let font = font.font();

    let v_metrics = font.v_metrics(glyph_scale);
    let text_width = measure(font, glyph_scale, text);
    let text_height = v_metrics.ascent - v_metrics.descent;

    let stroke_radius = style.stroke_width.abs() / 100.0 * size / 2.0;
    let pad = stroke_radius.ceil() as i64 + 1;

    // Coverage mask for the glyphs, padded for the stroke
    let mask_w = text_width.ceil() as i64 + 2 * pad;
    let mask_h = text_height.ceil() as i64 + 2 * pad;
    if mask_w <= 0 || mask_h <= 0 {
        return;
    }
    let mut mask = vec![0.0f32; (mask_w * mask_h) as usize];

    let origin = point(pad as f32, pad as f32 + v_metrics.ascent);
    for glyph in font.layout(text, glyph_scale, origin) {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let mx = bb.min.x as i64 + gx as i64;
            let my = bb.min.y as i64 + gy as i64;
            if mx >= 0 && my >= 0 && mx < mask_w && my < mask_h {
                let cell = &mut mask[(my * mask_w + mx) as usize];
                *cell = cell.max(coverage);
            }
        });
    }

    // Where the mask's top-left lands on the canvas
    let left = frame.x0 as f32 + (frame.width() - text_width) / 2.0;
    let top = frame.y0 as f32 + (frame.height() - text_height) / 2.0;
    let ox = left.round() as i64 - pad;
    let oy = top.round() as i64 - pad;

    let fill = style.stroke_width <= 0.0;
    let outline = if style.stroke_width != 0.0 {
        Some(dilate(&mask, mask_w, mask_h, stroke_radius))
    } else {
        None
    };

    for my in 0..mask_h {
        for mx in 0..mask_w {
            let cx = ox + mx;
            let cy = oy + my;
            if cx < 0 || cy < 0 || cx >= canvas.width() as i64 || cy >= canvas.height() as i64 {
                continue;
            }

            let i = (my * mask_w + mx) as usize;
            let pixel = canvas.get_pixel_mut(cx as u32, cy as u32);

            if let Some(outline) = &outline {
                let coverage = if fill {
                    outline[i]
                } else {
                    outline[i] * (1.0 - mask[i])
                };
                blend(pixel, style.stroke, coverage);
            }
            if fill {
                blend(pixel, style.fill, mask[i]);
            }
        }
    }
}

/// Grow the mask by `radius` pixels (max over a disc)
fn dilate(mask: &[f32], width: i64, height: i64, radius: f32) -> Vec<f32> {
    let r = radius.ceil() as i64;
    let offsets: Vec<(i64, i64)> = (-r..=r)
        .flat_map(|dy| (-r..=r).map(move |dx| (dx, dy)))
        .filter(|(dx, dy)| ((dx * dx + dy * dy) as f32) <= radius * radius + 0.5)
        .collect();

    let mut out = vec![0.0f32; mask.len()];
    for y in 0..height {
        for x in 0..width {
            let mut best = 0.0f32;
            for (dx, dy) in &offsets {
                let sx = x + dx;
                let sy = y + dy;
                if sx >= 0 && sy >= 0 && sx < width && sy < height {
                    best = best.max(mask[(sy * width + sx) as usize]);
                    if best >= 1.0 {
                        break;
                    }
                }
            }
            out[(y * width + x) as usize] = best;
        }
    }
    out
}

fn blend(pixel: &mut Rgba<u8>, color: [u8; 4], coverage: f32) {
    if coverage <= 0.0 {
        return;
    }
    let alpha = (color[3] as f32 * coverage.min(1.0)).round() as u8;
    pixel.blend(&Rgba([color[0], color[1], color[2], alpha]));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system_font() -> CaptionFont {
        CaptionFont::discover(&CaptionStyle::default())
            .unwrap_or_else(|e| panic!("caption font required: {e}"))
    }

    /// Advance of a monospaced face whose glyphs are `ratio` of the size wide
    fn monospace(chars: usize, ratio: f32) -> impl Fn(f32) -> f32 {
        move |size| chars as f32 * size * ratio
    }

    #[test]
    fn test_dilate_grows_a_single_pixel() {
        let mut mask = vec![0.0; 25];
        mask[12] = 1.0;

        let out = dilate(&mask, 5, 5, 1.0);

        assert_eq!(out[12], 1.0);
        assert_eq!(out[7], 1.0);
        assert_eq!(out[11], 1.0);
        assert_eq!(out[0], 0.0);
    }

    #[test]
    fn test_blend_ignores_zero_coverage() {
        let mut pixel = Rgba([10, 20, 30, 255]);
        blend(&mut pixel, [255, 255, 255, 255], 0.0);
        assert_eq!(pixel, Rgba([10, 20, 30, 255]));

        blend(&mut pixel, [255, 255, 255, 255], 1.0);
        assert_eq!(pixel, Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_fit_size_shrinks_to_width() {
        assert_eq!(fit_size(monospace(2, 0.5), 300.0, 80.0, 20.0), 80.0);

        let fitted = fit_size(monospace(10, 0.5), 300.0, 80.0, 20.0);
        assert!(fitted <= 60.0 && fitted >= 20.0);

        assert_eq!(fit_size(monospace(100, 0.5), 50.0, 80.0, 20.0), 20.0);
    }

    #[test]
    fn test_fit_size_never_exceeds_max() {
        // A minimum above the maximum collapses onto the maximum
        assert_eq!(fit_size(monospace(100, 0.5), 50.0, 8.0, 20.0), 8.0);
        assert_eq!(fit_size(monospace(1, 0.5), 500.0, 8.0, 20.0), 8.0);
    }

    #[test]
    #[ignore = "needs a system caption font"]
    fn test_long_caption_shrinks_but_not_below_minimum() {
        let font = system_font();

        let short = fit_font_size(&font, "HI", 300.0, 80.0, 20.0);
        assert_eq!(short, 80.0);

        let long = fit_font_size(&font, "A VERY LONG CAPTION THAT NEVER FITS", 300.0, 80.0, 20.0);
        assert!(long < 80.0);
        assert!(long >= 20.0);

        let tiny = fit_font_size(&font, &"W".repeat(200), 50.0, 80.0, 20.0);
        assert_eq!(tiny, 20.0);

        let inverted = fit_font_size(&font, &"W".repeat(100), 50.0, 8.0, 20.0);
        assert_eq!(inverted, 8.0);
    }

    #[test]
    #[ignore = "needs a system caption font"]
    fn test_caption_paints_fill_and_stroke() {
        let font = system_font();

        let mut canvas = RgbaImage::from_pixel(400, 100, Rgba([255, 0, 0, 255]));
        let frame = CaptionBox { x0: 0, y0: 0, x1: 400, y1: 100 };

        draw_caption(&mut canvas, &font, &CaptionStyle::default(), "MEME", frame, 2.0);

        let white = canvas.pixels().filter(|p| **p == Rgba([255, 255, 255, 255])).count();
        let black = canvas.pixels().filter(|p| **p == Rgba([0, 0, 0, 255])).count();
        assert!(white > 0, "no fill painted");
        assert!(black > 0, "no stroke painted");
        // Corners stay untouched
        assert_eq!(*canvas.get_pixel(0, 0), Rgba([255, 0, 0, 255]));
    }
}
