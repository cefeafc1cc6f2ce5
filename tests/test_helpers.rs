//! # Test Helper Library
//!
//! Common setup functions shared by the integration tests.

use image::{Rgba, RgbaImage};
use std::sync::Arc;
use tunegram::localization::{create_localization_manager, LocalizationManager};
use tunegram::thumbnail::fonts::FontSet;
use tunegram::VideoMeta;

/// Build the shared localization manager for tests
pub fn setup_localization() -> Arc<LocalizationManager> {
    create_localization_manager().expect("Failed to create localization manager")
}

/// Load fonts from system fallbacks
///
/// Returns None when the environment ships no usable font, so render tests
/// can skip instead of failing.
pub fn setup_fonts() -> Option<FontSet> {
    match FontSet::load_default() {
        Ok(fonts) => Some(fonts),
        Err(e) => {
            eprintln!("⚠️ Skipping font-dependent test - no usable font: {}", e);
            None
        }
    }
}

/// Synthetic cover art with distinct quadrants
pub fn sample_cover() -> RgbaImage {
    let mut cover = RgbaImage::from_pixel(480, 360, Rgba([40, 40, 90, 255]));
    for y in 0..180 {
        for x in 0..240 {
            cover.put_pixel(x, y, Rgba([200, 80, 40, 255]));
        }
    }
    cover
}

/// Plausible metadata for render tests
pub fn sample_meta() -> VideoMeta {
    VideoMeta {
        video_id: "dQw4w9WgXcQ".to_string(),
        title: "A Longer Test Track Title That Wraps Over Two Lines".to_string(),
        channel: "Testing Channel".to_string(),
        duration: "3:45".to_string(),
        views: "1.2M".to_string(),
        cover_url: "https://img.youtube.com/vi/dQw4w9WgXcQ/hqdefault.jpg".to_string(),
    }
}
