//! Font loading for thumbnail text
//!
//! Prefers the bundled fonts from the configuration and falls back to common
//! system fonts so development machines without the assets still render.

use ab_glyph::FontArc;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::config::ThumbnailConfig;

const REGULAR_FALLBACKS: [&str; 3] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
];

const BOLD_FALLBACKS: [&str; 3] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
];

/// Regular and bold faces used by the render styles
#[derive(Debug, Clone)]
pub struct FontSet {
    pub regular: FontArc,
    pub bold: FontArc,
}

impl FontSet {
    /// Load fonts from the configured paths, with system fallbacks
    pub fn load(config: &ThumbnailConfig) -> Result<Self> {
        let regular = load_font(&config.font_regular, &REGULAR_FALLBACKS)?;
        let bold = load_font(&config.font_bold, &BOLD_FALLBACKS)?;
        Ok(Self { regular, bold })
    }

    /// Load from system fallbacks only; used by tests
    pub fn load_default() -> Result<Self> {
        Self::load(&ThumbnailConfig::default())
    }
}

fn load_font(preferred: &Path, fallbacks: &[&str]) -> Result<FontArc> {
    let font_data = if preferred.exists() {
        fs::read(preferred).with_context(|| format!("Failed to read {}", preferred.display()))?
    } else if let Some(path) = fallbacks.iter().find(|path| Path::new(path).exists()) {
        fs::read(path).with_context(|| format!("Failed to read {}", path))?
    } else {
        return Err(anyhow::anyhow!(
            "No suitable font found (looked for {} and system fallbacks)",
            preferred.display()
        ));
    };

    FontArc::try_from_vec(font_data).context("Failed to load font")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_loading() {
        let fonts = FontSet::load_default();
        // Font loading might fail in minimal environments, but it must not panic
        let _ = fonts;
    }
}
