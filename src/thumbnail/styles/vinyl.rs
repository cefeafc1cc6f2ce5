//! Vinyl style: the cover blurred into a full-canvas backdrop behind a lime
//! frame, circular cover art with a colored ring, and a large "NOW PLAYING"
//! heading over the metadata column.

use ab_glyph::PxScale;
use image::imageops::{self, overlay};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, Blend};
use imageproc::rect::Rect;

use crate::config::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::thumbnail::canvas::{blurred_backdrop, circular_crop, darken, draw_ring};
use crate::thumbnail::fonts::FontSet;
use crate::thumbnail::text::{draw_shadowed_lines, draw_shadowed_text, fit_lines, line_width};
use crate::youtube::VideoMeta;

const LIME_BORDER: Rgba<u8> = Rgba([158, 255, 49, 255]);
const RING_COLOR: Rgba<u8> = Rgba([98, 193, 169, 255]);
const TEXT_WHITE: Rgba<u8> = Rgba([245, 245, 245, 255]);
const TEXT_SOFT: Rgba<u8> = Rgba([230, 230, 230, 255]);
const TEXT_SHADOW: Rgba<u8> = Rgba([0, 0, 0, 140]);

const BG_BLUR: f32 = 16.0;
const BG_DARKEN: u8 = 40;
const FRAME_INSET: u32 = 12;
const THUMB_SIZE: u32 = 470;
const RING_WIDTH: i64 = 20;
const CIRCLE_X: i64 = 92;

pub fn render(cover: &RgbaImage, meta: &VideoMeta, fonts: &FontSet, brand: &str) -> RgbaImage {
    let mut canvas = blurred_backdrop(cover, CANVAS_WIDTH, CANVAS_HEIGHT, BG_BLUR);
    darken(&mut canvas, BG_DARKEN);

    // outer lime frame, four strokes
    draw_filled_rect_mut(
        &mut canvas,
        Rect::at(0, 0).of_size(CANVAS_WIDTH, FRAME_INSET),
        LIME_BORDER,
    );
    draw_filled_rect_mut(
        &mut canvas,
        Rect::at(0, (CANVAS_HEIGHT - FRAME_INSET) as i32).of_size(CANVAS_WIDTH, FRAME_INSET),
        LIME_BORDER,
    );
    draw_filled_rect_mut(
        &mut canvas,
        Rect::at(0, 0).of_size(FRAME_INSET, CANVAS_HEIGHT),
        LIME_BORDER,
    );
    draw_filled_rect_mut(
        &mut canvas,
        Rect::at((CANVAS_WIDTH - FRAME_INSET) as i32, 0).of_size(FRAME_INSET, CANVAS_HEIGHT),
        LIME_BORDER,
    );

    // circular cover art with ring
    let circle_y = ((CANVAS_HEIGHT - THUMB_SIZE) / 2) as i64;
    let center_x = CIRCLE_X + THUMB_SIZE as i64 / 2;
    let center_y = circle_y + THUMB_SIZE as i64 / 2;
    draw_ring(
        &mut canvas,
        center_x,
        center_y,
        THUMB_SIZE as i64 / 2 + RING_WIDTH,
        RING_WIDTH,
        RING_COLOR,
    );

    let mut art = imageops::resize(
        cover,
        THUMB_SIZE,
        THUMB_SIZE,
        imageops::FilterType::Lanczos3,
    );
    circular_crop(&mut art);
    overlay(&mut canvas, &art, CIRCLE_X, circle_y);

    let mut draw = Blend(canvas);

    // branding, top left
    let brand_scale = PxScale::from(34.0);
    draw_shadowed_text(
        &mut draw,
        28,
        18,
        1,
        brand_scale,
        &fonts.bold,
        brand,
        TEXT_WHITE,
        TEXT_SHADOW,
    );

    let info_x = CIRCLE_X as i32 + THUMB_SIZE as i32 + 60;
    let max_text_w = CANVAS_WIDTH as i32 - info_x - 48;

    // big "NOW PLAYING" heading, roughly centered over the column
    let np_scale = PxScale::from(60.0);
    let np_text = "NOW PLAYING";
    let np_width = line_width(&fonts.bold, np_scale, np_text) as i32;
    let np_x = (info_x + (max_text_w - np_width) / 2 - 95).max(info_x);
    let np_y = circle_y as i32 + 30;
    draw_shadowed_text(
        &mut draw,
        np_x,
        np_y,
        2,
        np_scale,
        &fonts.bold,
        np_text,
        TEXT_WHITE,
        TEXT_SHADOW,
    );

    // two-line title
    let (title_scale, title_lines) =
        fit_lines(&fonts.bold, &meta.title, max_text_w.max(0) as u32, 2, 30.0, 30.0);
    let title_y = np_y + 110;
    draw_shadowed_lines(
        &mut draw,
        info_x,
        title_y,
        2,
        title_scale,
        &fonts.bold,
        &title_lines,
        8,
        TEXT_WHITE,
        TEXT_SHADOW,
    );

    // metadata lines
    let meta_scale = PxScale::from(30.0);
    let line_gap = 46;
    let meta_start_y = title_y + 130;

    let rows = [
        format!("Views : {}", meta.views),
        format!("Duration : {}", duration_label(&meta.duration)),
        format!("Channel : {}", meta.channel),
    ];
    for (index, row) in rows.iter().enumerate() {
        draw_shadowed_text(
            &mut draw,
            info_x,
            meta_start_y + index as i32 * line_gap,
            1,
            meta_scale,
            &fonts.regular,
            row,
            TEXT_SOFT,
            TEXT_SHADOW,
        );
    }

    draw.0
}

/// Bare `mm:ss` durations get a `Mins` suffix
fn duration_label(duration: &str) -> String {
    if duration.contains(':') && !duration.to_lowercase().contains("min") {
        format!("{} Mins", duration)
    } else {
        duration.to_string()
    }
}
