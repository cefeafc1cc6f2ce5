//! Validation module for common validation patterns
//!
//! This module consolidates validation logic for:
//!
//! - YouTube video ids
//! - Help-menu callback data
//! - Basic input constraints

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref VIDEO_ID_PATTERN: Regex =
        Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("Invalid video id regex pattern");
}

/// Number of help sections addressable through `help_callback hbN`
pub const HELP_SECTION_COUNT: u8 = 15;

/// Validates a YouTube video id
///
/// # Arguments
/// * `id` - The candidate video id
///
/// # Returns
/// * `Ok(&str)` - The trimmed id if valid
/// * `Err(&str)` - Error type: "empty" or "malformed"
///
/// # Examples
/// ```
/// use tunegram::validation::validate_video_id;
///
/// assert!(validate_video_id("dQw4w9WgXcQ").is_ok());
/// assert_eq!(validate_video_id(""), Err("empty"));
/// assert_eq!(validate_video_id("not a video"), Err("malformed"));
/// ```
pub fn validate_video_id(id: &str) -> Result<&str, &'static str> {
    let trimmed = id.trim();

    if trimmed.is_empty() {
        return Err("empty");
    }

    if !VIDEO_ID_PATTERN.is_match(trimmed) {
        return Err("malformed");
    }

    Ok(trimmed)
}

/// Parses a `help_callback hbN` data string into a section number
///
/// The section number is 1-based and bounded by [`HELP_SECTION_COUNT`].
///
/// # Examples
/// ```
/// use tunegram::validation::parse_help_section;
///
/// assert_eq!(parse_help_section("help_callback hb7"), Ok(7));
/// assert_eq!(parse_help_section("help_callback hb99"), Err("out_of_range"));
/// assert_eq!(parse_help_section("help_callback"), Err("missing_section"));
/// ```
pub fn parse_help_section(data: &str) -> Result<u8, &'static str> {
    let mut parts = data.trim().split_whitespace();

    if parts.next() != Some("help_callback") {
        return Err("not_help_callback");
    }

    let section = parts.next().ok_or("missing_section")?;
    let number = section
        .strip_prefix("hb")
        .ok_or("malformed")?
        .parse::<u8>()
        .map_err(|_| "malformed")?;

    if number == 0 || number > HELP_SECTION_COUNT {
        return Err("out_of_range");
    }

    Ok(number)
}

/// Validate basic input constraints for free-form command arguments
///
/// # Examples
/// ```
/// use tunegram::validation::validate_basic_input;
///
/// assert!(validate_basic_input("valid input").is_ok());
/// assert_eq!(validate_basic_input(""), Err("empty"));
/// assert_eq!(validate_basic_input(&"a".repeat(201)), Err("too_long"));
/// ```
pub fn validate_basic_input(input: &str) -> Result<(), &'static str> {
    if input.is_empty() {
        return Err("empty");
    }

    if input.len() > 200 {
        return Err("too_long");
    }

    Ok(())
}
