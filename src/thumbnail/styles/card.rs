//! Card style: dark gradient background, rounded bordered cover with play
//! badge on the left, "NOW PLAYING" pill and metadata column on the right.

use ab_glyph::PxScale;
use image::imageops::{self, overlay};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_polygon_mut, Blend};
use imageproc::point::Point;
use imageproc::rect::Rect;

use crate::config::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::thumbnail::canvas::{
    draw_circle_outline, round_corners, rounded_rect_layer, vertical_gradient,
};
use crate::thumbnail::fonts::FontSet;
use crate::thumbnail::text::{
    draw_shadowed_lines, draw_shadowed_text, fit_lines, line_width, truncate_chars,
};
use crate::youtube::VideoMeta;

const PRIMARY: Rgba<u8> = Rgba([144, 238, 144, 255]); // light green
const SECONDARY: Rgba<u8> = Rgba([30, 144, 255, 255]); // dodger blue
const ACCENT: Rgba<u8> = Rgba([255, 105, 180, 255]); // hot pink
const TEXT_WHITE: Rgba<u8> = Rgba([245, 245, 245, 255]);
const TEXT_GRAY: Rgba<u8> = Rgba([200, 200, 200, 255]);
const TEXT_DARK: Rgba<u8> = Rgba([20, 20, 30, 255]);
const TEXT_SHADOW: Rgba<u8> = Rgba([0, 0, 0, 100]);
const GLOW: Rgba<u8> = Rgba([255, 255, 255, 30]);

const THUMB_SIZE: u32 = 380;
const PADDING: i32 = 40;

pub fn render(cover: &RgbaImage, meta: &VideoMeta, fonts: &FontSet, brand: &str) -> RgbaImage {
    let mut canvas = vertical_gradient(
        CANVAS_WIDTH,
        CANVAS_HEIGHT,
        Rgba([30, 30, 45, 255]),
        Rgba([20, 20, 30, 255]),
    );

    // decorative edge bars
    draw_filled_rect_mut(&mut canvas, Rect::at(0, 0).of_size(CANVAS_WIDTH, 8), PRIMARY);
    draw_filled_rect_mut(
        &mut canvas,
        Rect::at(0, CANVAS_HEIGHT as i32 - 8).of_size(CANVAS_WIDTH, 8),
        SECONDARY,
    );
    draw_filled_rect_mut(&mut canvas, Rect::at(0, 0).of_size(12, CANVAS_HEIGHT), ACCENT);
    draw_filled_rect_mut(
        &mut canvas,
        Rect::at(CANVAS_WIDTH as i32 - 12, 0).of_size(3, CANVAS_HEIGHT),
        PRIMARY,
    );

    // cover shadow
    let shadow_offset = 8;
    let shadow = rounded_rect_layer(THUMB_SIZE + 10, THUMB_SIZE + 10, 30, Rgba([0, 0, 0, 100]));
    overlay(
        &mut canvas,
        &shadow,
        (PADDING + shadow_offset) as i64,
        (PADDING + 40 + shadow_offset) as i64,
    );

    // rounded cover inside a primary-colored border
    let mut thumb = imageops::resize(
        cover,
        THUMB_SIZE,
        THUMB_SIZE,
        imageops::FilterType::Lanczos3,
    );
    round_corners(&mut thumb, 25);

    let mut bordered = RgbaImage::from_pixel(THUMB_SIZE + 10, THUMB_SIZE + 10, PRIMARY);
    overlay(&mut bordered, &thumb, 5, 5);
    round_corners(&mut bordered, 30);
    overlay(&mut canvas, &bordered, PADDING as i64, (PADDING + 40) as i64);

    // play button overlay, softened with a light blur
    let play_size: i32 = 80;
    let mut play_circle = RgbaImage::new(play_size as u32, play_size as u32);
    draw_filled_circle_mut(
        &mut play_circle,
        (play_size / 2, play_size / 2),
        play_size / 2 - 1,
        Rgba([255, 255, 255, 180]),
    );
    draw_polygon_mut(
        &mut play_circle,
        &[
            Point::new((play_size as f32 * 0.35) as i32, (play_size as f32 * 0.25) as i32),
            Point::new((play_size as f32 * 0.35) as i32, (play_size as f32 * 0.75) as i32),
            Point::new((play_size as f32 * 0.75) as i32, (play_size as f32 * 0.5) as i32),
        ],
        PRIMARY,
    );
    let play_circle = imageops::blur(&play_circle, 2.0);
    let play_x = PADDING + (THUMB_SIZE as i32 - play_size) / 2;
    let play_y = PADDING + 40 + (THUMB_SIZE as i32 - play_size) / 2;
    overlay(&mut canvas, &play_circle, play_x as i64, play_y as i64);

    // bottom-left outline circle
    draw_circle_outline(
        &mut canvas,
        90,
        CANVAS_HEIGHT as i64 - 90,
        60,
        3,
        SECONDARY,
    );

    eprintln!("DBG after outline: {} non255, (1065,41)={:?}", canvas.pixels().filter(|p| p.0[3]!=255).count(), canvas.get_pixel(1065,41));
    // text phases blend over what is already on the canvas
    let mut draw = Blend(canvas);

    // branding, glow first
    let brand_scale = PxScale::from(36.0);
    let brand_width = line_width(&fonts.bold, brand_scale, brand) as i32;
    let brand_x = CANVAS_WIDTH as i32 - brand_width - 40;
    let brand_y = 30;
    for offset in (1..=3).rev() {
        imageproc::drawing::draw_text_mut(
            &mut draw,
            GLOW,
            brand_x + offset,
            brand_y + offset,
            brand_scale,
            &fonts.bold,
            brand,
        );
    }
    imageproc::drawing::draw_text_mut(
        &mut draw,
        PRIMARY,
        brand_x,
        brand_y,
        brand_scale,
        &fonts.bold,
        brand,
    );

    eprintln!("DBG after brand text: {} non255, (1065,41)={:?}", draw.0.pixels().filter(|p| p.0[3]!=255).count(), draw.0.get_pixel(1065,41));
    let content_x = PADDING + THUMB_SIZE as i32 + PADDING + 40;
    let content_width = CANVAS_WIDTH as i32 - content_x - PADDING;

    // "NOW PLAYING" pill badge
    let np_scale = PxScale::from(28.0);
    let np_text = "NOW PLAYING";
    let np_width = line_width(&fonts.bold, np_scale, np_text) as i32;
    let np_y = PADDING + 40;
    let badge_height: u32 = 45;
    let badge = rounded_rect_layer(
        (np_width + 40) as u32,
        badge_height,
        badge_height / 2,
        PRIMARY,
    );
    let mut canvas = draw.0;
    overlay(&mut canvas, &badge, content_x as i64, np_y as i64);
    let mut draw = Blend(canvas);
    imageproc::drawing::draw_text_mut(
        &mut draw,
        TEXT_DARK,
        content_x + 20,
        np_y + (badge_height as i32 - np_scale.y as i32) / 2,
        np_scale,
        &fonts.bold,
        np_text,
    );

    // auto-fitted title
    let title_y = np_y + badge_height as i32 + 30;
    let (title_scale, title_lines) = fit_lines(
        &fonts.bold,
        &meta.title,
        (content_width - 20).max(0) as u32,
        2,
        36.0,
        28.0,
    );
    draw_shadowed_lines(
        &mut draw,
        content_x,
        title_y,
        2,
        title_scale,
        &fonts.bold,
        &title_lines,
        8,
        TEXT_WHITE,
        TEXT_SHADOW,
    );

    // metadata column with colored markers
    let meta_y = title_y + 100;
    let meta_scale = PxScale::from(26.0);
    let rows = [
        (format!("Channel: {}", truncate_chars(&meta.channel, 30)), ACCENT),
        (format!("Views: {}", meta.views), SECONDARY),
        (format!("Duration: {}", meta.duration), PRIMARY),
    ];
    let mut canvas = draw.0;
    for (index, (_, marker)) in rows.iter().enumerate() {
        draw_filled_circle_mut(
            &mut canvas,
            (content_x + 10, meta_y + index as i32 * 50 + 14),
            6,
            *marker,
        );
    }
    let mut draw = Blend(canvas);
    for (index, (line, _)) in rows.iter().enumerate() {
        draw_shadowed_text(
            &mut draw,
            content_x + 40,
            meta_y + index as i32 * 50,
            1,
            meta_scale,
            &fonts.regular,
            line,
            TEXT_GRAY,
            TEXT_SHADOW,
        );
    }

    draw.0
}
