//! Localization support for the Tunegram plugins
//!
//! Messages live in Fluent resources under `locales/<lang>/main.ftl`. The
//! manager is shared across handler tasks, so the concurrent bundle flavor
//! is used.

use anyhow::Result;
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use std::collections::HashMap;
use std::fs;
use std::sync::Arc;
use unic_langid::LanguageIdentifier;

/// Locales shipped with the bot; the first entry is the fallback.
pub const SUPPORTED_LOCALES: [&str; 2] = ["en", "fr"];

/// Localization manager holding one bundle per supported locale
pub struct LocalizationManager {
    bundles: HashMap<String, FluentBundle<FluentResource>>,
}

impl LocalizationManager {
    /// Create a new localization manager
    pub fn new() -> Result<Self> {
        let mut bundles = HashMap::new();

        for locale_str in SUPPORTED_LOCALES {
            let locale: LanguageIdentifier = locale_str.parse()?;
            let bundle = Self::create_bundle(&locale)?;
            bundles.insert(locale_str.to_string(), bundle);
        }

        Ok(Self { bundles })
    }

    /// Create a fluent bundle for a specific locale
    fn create_bundle(locale: &LanguageIdentifier) -> Result<FluentBundle<FluentResource>> {
        let mut bundle = FluentBundle::new_concurrent(vec![locale.clone()]);

        // Resource path is relative to Cargo.toml
        let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
        let resource_path = format!("{}/locales/{}/main.ftl", manifest_dir, locale);
        if let Ok(content) = fs::read_to_string(&resource_path) {
            if let Ok(resource) = FluentResource::try_new(content) {
                let _ = bundle.add_resource(resource);
            }
        }

        Ok(bundle)
    }

    /// Get a localized message in a specific language
    pub fn get_message_in_language(
        &self,
        key: &str,
        language: &str,
        args: Option<&FluentArgs>,
    ) -> String {
        let bundle = match self.bundles.get(language) {
            Some(bundle) => bundle,
            None => {
                // Fallback to English if language not found
                match self.bundles.get("en") {
                    Some(bundle) => bundle,
                    None => return format!("Missing translation: {}", key),
                }
            }
        };

        let msg = match bundle.get_message(key) {
            Some(msg) => msg,
            None => return format!("Missing translation: {}", key),
        };

        let pattern = match msg.value() {
            Some(pattern) => pattern,
            None => return format!("Missing value for key: {}", key),
        };

        let mut errors = vec![];
        bundle
            .format_pattern(pattern, args, &mut errors)
            .into_owned()
    }

    /// Check if a language is supported
    pub fn is_language_supported(&self, language: &str) -> bool {
        self.bundles.contains_key(language)
    }
}

/// Create a shared localization manager
pub fn create_localization_manager() -> Result<Arc<LocalizationManager>> {
    Ok(Arc::new(LocalizationManager::new()?))
}

/// Map a Telegram language code onto a supported locale
pub fn detect_language(language_code: Option<&str>) -> &'static str {
    match language_code {
        Some(code) if code == "fr" || code.starts_with("fr-") => "fr",
        _ => "en",
    }
}

/// Convenience function to get a localized message in the user's language
pub fn t_lang(
    localization: &LocalizationManager,
    key: &str,
    language_code: Option<&str>,
) -> String {
    let language = detect_language(language_code);
    localization.get_message_in_language(key, language, None)
}

/// Convenience function to get a localized message with arguments in the user's language
pub fn t_args_lang(
    localization: &LocalizationManager,
    key: &str,
    language_code: Option<&str>,
    args: &[(&str, &str)],
) -> String {
    let language = detect_language(language_code);
    let mut fluent_args = FluentArgs::new();
    for (name, value) in args {
        fluent_args.set(*name, FluentValue::from(*value));
    }
    localization.get_message_in_language(key, language, Some(&fluent_args))
}
