//! Canvas toolbox shared by the render styles
//!
//! Resizing, masking, gradients and decorative primitives over `RgbaImage`
//! buffers. Everything here is pure pixel work with no I/O.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

/// Resize proportionally so the image fits within `max_w` x `max_h`
pub fn fit_within(image: &RgbaImage, max_w: u32, max_h: u32) -> RgbaImage {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return image.clone();
    }

    let ratio = (max_w as f64 / w as f64).min(max_h as f64 / h as f64);
    let new_w = ((w as f64 * ratio) as u32).max(1);
    let new_h = ((h as f64 * ratio) as u32).max(1);
    imageops::resize(image, new_w, new_h, FilterType::Lanczos3)
}

/// Resize to exact dimensions, ignoring aspect ratio
pub fn resize_exact(image: &RgbaImage, w: u32, h: u32) -> RgbaImage {
    imageops::resize(image, w, h, FilterType::Lanczos3)
}

/// Zero the alpha channel outside a rounded rectangle of the given radius
pub fn round_corners(image: &mut RgbaImage, radius: u32) {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return;
    }
    // radius capped so the clamp below always has a valid range
    let r = (radius as i64)
        .min((w as i64 - 1) / 2)
        .min((h as i64 - 1) / 2);
    let r_sq = r * r;

    for y in 0..h {
        for x in 0..w {
            let xi = x as i64;
            let yi = y as i64;
            // distance to the nearest point of the inset core rectangle
            let cx = xi.clamp(r, w as i64 - 1 - r);
            let cy = yi.clamp(r, h as i64 - 1 - r);
            let dx = xi - cx;
            let dy = yi - cy;
            if dx * dx + dy * dy > r_sq {
                image.get_pixel_mut(x, y).0[3] = 0;
            }
        }
    }
}

/// Zero the alpha channel outside the largest inscribed circle
pub fn circular_crop(image: &mut RgbaImage) {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return;
    }
    let cx = (w as i64 - 1) / 2;
    let cy = (h as i64 - 1) / 2;
    let r = (w.min(h) as i64) / 2;
    let r_sq = r * r;

    for y in 0..h {
        for x in 0..w {
            let dx = x as i64 - cx;
            let dy = y as i64 - cy;
            if dx * dx + dy * dy > r_sq {
                image.get_pixel_mut(x, y).0[3] = 0;
            }
        }
    }
}

/// Vertical two-color gradient fill
pub fn vertical_gradient(w: u32, h: u32, top: Rgba<u8>, bottom: Rgba<u8>) -> RgbaImage {
    let mut image = RgbaImage::new(w, h);
    let span = (h.max(2) - 1) as f64;

    for y in 0..h {
        let t = y as f64 / span;
        let pixel = Rgba([
            lerp_channel(top.0[0], bottom.0[0], t),
            lerp_channel(top.0[1], bottom.0[1], t),
            lerp_channel(top.0[2], bottom.0[2], t),
            lerp_channel(top.0[3], bottom.0[3], t),
        ]);
        for x in 0..w {
            image.put_pixel(x, y, pixel);
        }
    }

    image
}

fn lerp_channel(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * t).round() as u8
}

/// Transparent layer holding a filled rounded rectangle
pub fn rounded_rect_layer(w: u32, h: u32, radius: u32, color: Rgba<u8>) -> RgbaImage {
    let mut layer = RgbaImage::from_pixel(w, h, color);
    round_corners(&mut layer, radius);
    layer
}

/// Composite a semi-transparent black veil over the whole image
pub fn darken(image: &mut RgbaImage, alpha: u8) {
    let t = alpha as f64 / 255.0;
    for pixel in image.pixels_mut() {
        pixel.0[0] = (pixel.0[0] as f64 * (1.0 - t)) as u8;
        pixel.0[1] = (pixel.0[1] as f64 * (1.0 - t)) as u8;
        pixel.0[2] = (pixel.0[2] as f64 * (1.0 - t)) as u8;
    }
}

/// Full-canvas backdrop: cover resized to fit, blurred, centered on black
pub fn blurred_backdrop(cover: &RgbaImage, w: u32, h: u32, sigma: f32) -> RgbaImage {
    let fitted = fit_within(cover, w, h);
    let blurred = imageops::blur(&fitted, sigma);

    let mut canvas = RgbaImage::from_pixel(w, h, Rgba([0, 0, 0, 255]));
    let x = (w.saturating_sub(blurred.width())) / 2;
    let y = (h.saturating_sub(blurred.height())) / 2;
    imageops::overlay(&mut canvas, &blurred, x as i64, y as i64);
    canvas
}

/// Annulus of the given thickness drawn directly onto the image
pub fn draw_ring(image: &mut RgbaImage, cx: i64, cy: i64, outer_radius: i64, thickness: i64, color: Rgba<u8>) {
    let (w, h) = image.dimensions();
    let inner = (outer_radius - thickness).max(0);
    let outer_sq = outer_radius * outer_radius;
    let inner_sq = inner * inner;

    let x0 = (cx - outer_radius).max(0) as u32;
    let x1 = ((cx + outer_radius + 1).max(0) as u32).min(w);
    let y0 = (cy - outer_radius).max(0) as u32;
    let y1 = ((cy + outer_radius + 1).max(0) as u32).min(h);

    for y in y0..y1 {
        for x in x0..x1 {
            let dx = x as i64 - cx;
            let dy = y as i64 - cy;
            let dist_sq = dx * dx + dy * dy;
            if dist_sq <= outer_sq && dist_sq >= inner_sq {
                image.put_pixel(x, y, color);
            }
        }
    }
}

/// Hollow circle outline with stroke width
pub fn draw_circle_outline(image: &mut RgbaImage, cx: i64, cy: i64, radius: i64, width: i64, color: Rgba<u8>) {
    draw_ring(image, cx, cy, radius + width / 2, width, color);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba([200, 100, 50, 255]))
    }

    #[test]
    fn test_fit_within_preserves_aspect() {
        let image = solid(400, 200);
        let fitted = fit_within(&image, 100, 100);
        assert_eq!(fitted.dimensions(), (100, 50));

        let tall = solid(200, 400);
        let fitted = fit_within(&tall, 100, 100);
        assert_eq!(fitted.dimensions(), (50, 100));
    }

    #[test]
    fn test_fit_within_upscales() {
        let image = solid(10, 10);
        let fitted = fit_within(&image, 50, 100);
        assert_eq!(fitted.dimensions(), (50, 50));
    }

    #[test]
    fn test_round_corners_clears_corner_alpha() {
        let mut image = solid(100, 100);
        round_corners(&mut image, 20);

        // corner pixel lies outside the rounded mask
        assert_eq!(image.get_pixel(0, 0).0[3], 0);
        assert_eq!(image.get_pixel(99, 99).0[3], 0);
        // center and edge midpoints stay opaque
        assert_eq!(image.get_pixel(50, 50).0[3], 255);
        assert_eq!(image.get_pixel(50, 0).0[3], 255);
    }

    #[test]
    fn test_circular_crop_keeps_center() {
        let mut image = solid(100, 100);
        circular_crop(&mut image);

        assert_eq!(image.get_pixel(50, 50).0[3], 255);
        assert_eq!(image.get_pixel(0, 0).0[3], 0);
        assert_eq!(image.get_pixel(99, 0).0[3], 0);
    }

    #[test]
    fn test_vertical_gradient_endpoints() {
        let gradient = vertical_gradient(4, 10, Rgba([0, 0, 0, 255]), Rgba([200, 100, 50, 255]));
        assert_eq!(*gradient.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
        assert_eq!(*gradient.get_pixel(0, 9), Rgba([200, 100, 50, 255]));
    }

    #[test]
    fn test_ring_hits_band_only() {
        let mut image = RgbaImage::from_pixel(100, 100, Rgba([0, 0, 0, 255]));
        let color = Rgba([10, 20, 30, 255]);
        draw_ring(&mut image, 50, 50, 40, 10, color);

        // on the band
        assert_eq!(*image.get_pixel(50, 15), color);
        // inside the hole
        assert_eq!(*image.get_pixel(50, 50), Rgba([0, 0, 0, 255]));
        // outside the ring
        assert_eq!(*image.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_darken_scales_channels() {
        let mut image = solid(2, 2);
        darken(&mut image, 128);
        let pixel = image.get_pixel(0, 0);
        assert!(pixel.0[0] < 200 && pixel.0[0] > 80);
        assert_eq!(pixel.0[3], 255);
    }

    #[test]
    fn test_blurred_backdrop_dimensions() {
        let cover = solid(640, 480);
        let backdrop = blurred_backdrop(&cover, 1280, 720, 4.0);
        assert_eq!(backdrop.dimensions(), (1280, 720));
    }
}
