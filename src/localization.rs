//! # Localization Module
//!
//! Fluent-backed label lookup for the two display languages. Engine
//! output is language-neutral; only the presentation layer asks this
//! module for labels, so switching languages never recomputes anything.

use anyhow::Result;
use fluent_bundle::{FluentBundle, FluentResource};
use std::collections::HashMap;
use std::fs;
use std::str::FromStr;
use std::sync::Arc;
use unic_langid::LanguageIdentifier;

/// Supported display languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// English
    En,
    /// Traditional Chinese
    Zh,
}

impl Language {
    /// Locale code used for the fluent resource directory
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "en" => Ok(Language::En),
            "zh" => Ok(Language::Zh),
            other => Err(anyhow::anyhow!("Unsupported language: {}", other)),
        }
    }
}

/// Localization manager holding one fluent bundle per language
pub struct LocalizationManager {
    bundles: HashMap<Language, Arc<FluentBundle<FluentResource>>>,
}

impl LocalizationManager {
    /// Create a manager with both language bundles loaded
    pub fn new() -> Result<Self> {
        let mut bundles = HashMap::new();
        for lang in [Language::En, Language::Zh] {
            let locale: LanguageIdentifier = lang.code().parse()?;
            let bundle = Self::create_bundle(&locale)?;
            bundles.insert(lang, Arc::new(bundle));
        }
        Ok(Self { bundles })
    }

    /// Create a fluent bundle for a specific locale
    fn create_bundle(locale: &LanguageIdentifier) -> Result<FluentBundle<FluentResource>> {
        let mut bundle = FluentBundle::new(vec![locale.clone()]);
        // The default wraps arguments in bidi isolation marks, which
        // breaks exact string comparison of rendered labels.
        bundle.set_use_isolating(false);

        let resource_path = format!("./locales/{}/main.ftl", locale);
        if let Ok(content) = fs::read_to_string(&resource_path) {
            if let Ok(resource) = FluentResource::try_new(content) {
                let _ = bundle.add_resource(resource);
            }
        }

        Ok(bundle)
    }

    /// Get a localized message
    pub fn get_message(
        &self,
        lang: Language,
        key: &str,
        args: Option<&HashMap<&str, &str>>,
    ) -> String {
        let bundle = match self.bundles.get(&lang) {
            Some(bundle) => bundle,
            None => return format!("Missing bundle: {}", lang.code()),
        };

        let msg = match bundle.get_message(key) {
            Some(msg) => msg,
            None => return format!("Missing translation: {}", key),
        };

        let pattern = match msg.value() {
            Some(pattern) => pattern,
            None => return format!("Missing value for key: {}", key),
        };

        let mut value = String::new();

        if let Some(args) = args {
            let fluent_args = fluent_bundle::FluentArgs::from_iter(
                args.iter()
                    .map(|(k, v)| (*k, fluent_bundle::FluentValue::from(*v))),
            );
            let _ = bundle.write_pattern(&mut value, pattern, Some(&fluent_args), &mut vec![]);
        } else {
            let _ = bundle.write_pattern(&mut value, pattern, None, &mut vec![]);
        }

        value
    }

    /// Get a localized message with simple string arguments
    pub fn get_message_with_args(
        &self,
        lang: Language,
        key: &str,
        args: &[(&str, &str)],
    ) -> String {
        let args_map: HashMap<&str, &str> = args.iter().cloned().collect();
        self.get_message(lang, key, Some(&args_map))
    }

    /// Convenience lookup without arguments
    pub fn t(&self, lang: Language, key: &str) -> String {
        self.get_message(lang, key, None)
    }
}
