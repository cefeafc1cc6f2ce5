//! "Now playing" thumbnail generation
//!
//! The pipeline behind [`ThumbnailGenerator::generate`]:
//!
//! 1. fetch video metadata,
//! 2. download the cover image into the cache directory,
//! 3. composite the configured style onto a 1280x720 canvas,
//! 4. save the result as `<id>_styled.png`,
//! 5. remove the downloaded cover.
//!
//! Any failure along the way falls back to the configured static image, so
//! callers always have something to send.

pub mod canvas;
pub mod fetch;
pub mod fonts;
pub mod style;
pub mod styles;
pub mod text;

pub use style::ThumbStyle;

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info};

use crate::cache::CacheDir;
use crate::config::ThumbnailConfig;
use crate::errors::{error_logging, AppError, AppResult};
use crate::observability;
use crate::validation::validate_video_id;
use crate::youtube::YouTubeClient;
use fonts::FontSet;

/// Generates styled "now playing" thumbnails for YouTube videos
pub struct ThumbnailGenerator {
    http: reqwest::Client,
    youtube: YouTubeClient,
    cache: CacheDir,
    fonts: FontSet,
    config: ThumbnailConfig,
}

impl ThumbnailGenerator {
    /// Build a generator, validating the configuration and loading fonts
    pub fn new(http: reqwest::Client, config: ThumbnailConfig) -> AppResult<Self> {
        config.validate().map_err(AppError::Config)?;
        let cache = CacheDir::new(&config.cache_dir)?;
        let fonts = FontSet::load(&config).map_err(|e| AppError::Config(e.to_string()))?;
        let youtube = YouTubeClient::new(http.clone());

        Ok(Self {
            http,
            youtube,
            cache,
            fonts,
            config,
        })
    }

    /// Cache directory the generator writes into
    pub fn cache(&self) -> &CacheDir {
        &self.cache
    }

    /// Static image returned when generation fails
    pub fn fallback_path(&self) -> &Path {
        &self.config.fallback_thumb
    }

    /// Generate a thumbnail for `video_id`, falling back to the static image
    /// on any pipeline error
    pub async fn generate(&self, video_id: &str) -> AppResult<PathBuf> {
        let style = self.config.style;
        let started = Instant::now();

        match self.render(video_id).await {
            Ok(path) => {
                observability::record_thumbnail_metrics(style.as_str(), true, started.elapsed());
                Ok(path)
            }
            Err(e) => {
                error_logging::log_render_error(
                    &e,
                    "generate_thumbnail",
                    video_id,
                    Some(style.as_str()),
                );
                observability::record_thumbnail_metrics(style.as_str(), false, started.elapsed());

                let fallback = &self.config.fallback_thumb;
                if fallback.exists() {
                    info!(video_id = %video_id, fallback = %fallback.display(), "Returning fallback thumbnail");
                    Ok(fallback.clone())
                } else {
                    error_logging::log_filesystem_error(
                        &"fallback thumbnail missing",
                        "fallback_thumbnail",
                        Some(&fallback.display().to_string()),
                    );
                    Err(e)
                }
            }
        }
    }

    async fn render(&self, video_id: &str) -> AppResult<PathBuf> {
        let id = validate_video_id(video_id)
            .map_err(|e| AppError::Validation(format!("{}: {}", e, video_id)))?;

        let out = self.cache.styled_path(id);
        if out.exists() {
            debug!(video_id = %id, path = %out.display(), "Reusing generated thumbnail");
            observability::record_thumbnail_cache(true);
            return Ok(out);
        }
        observability::record_thumbnail_cache(false);

        let meta = self.youtube.video_meta(id).await?;

        let cover_guard = fetch::download_cover(
            &self.http,
            &meta.cover_url,
            &self.cache.cover_path(id),
            self.config.max_cover_bytes,
        )
        .await?;

        let cover = image::open(cover_guard.path())?.to_rgba8();

        let composite = match self.config.style {
            ThumbStyle::Card => styles::card::render(&cover, &meta, &self.fonts, &self.config.brand_text),
            ThumbStyle::Vinyl => {
                styles::vinyl::render(&cover, &meta, &self.fonts, &self.config.brand_text)
            }
        };

        composite.save(&out)?;
        info!(video_id = %id, path = %out.display(), style = %self.config.style, "Thumbnail generated");

        // cover_guard drops here and removes the downloaded cover
        Ok(out)
    }
}
