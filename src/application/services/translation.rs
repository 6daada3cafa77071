//! Translation lookup service
//!
//! Maps a language code to a dictionary of source text → translated text.
//! Source texts may carry a trailing ` [context: ...]` annotation to tell
//! identical English strings apart; it is stripped when no translation exists.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use regex::Regex;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::infrastructure::traits::FileSystem;

static CONTEXT_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r" \[context: [^\]]+\]$").expect("context suffix pattern is valid")
});

type Dictionary = HashMap<String, String>;

/// Process-wide translation table, shared through the service container.
pub struct TranslationService {
    fs: Arc<dyn FileSystem>,
    translations: RwLock<HashMap<String, Dictionary>>,
}

impl TranslationService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            translations: RwLock::new(HashMap::new()),
        }
    }

    /// Merge entries into the language's dictionary; last write wins per key.
    pub fn add<K, V>(&self, lang: &str, dictionary: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut translations = self
            .translations
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let entries = translations.entry(lang.to_string()).or_default();
        for (key, value) in dictionary {
            entries.insert(key.into(), value.into());
        }
        debug!("add: lang={} entries={}", lang, entries.len());
    }

    /// Translated text, or `key` without its context annotation.
    pub fn translate(&self, lang: &str, key: &str) -> String {
        let translations = self
            .translations
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        match translations.get(lang).and_then(|d| d.get(key)) {
            Some(text) => text.clone(),
            None => CONTEXT_SUFFIX.replace(key, "").into_owned(),
        }
    }

    /// Drop every language.
    pub fn clear(&self) {
        self.translations
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Known language codes, sorted.
    pub fn languages(&self) -> Vec<String> {
        let translations = self
            .translations
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let mut langs: Vec<_> = translations.keys().cloned().collect();
        langs.sort();
        langs
    }

    /// Number of entries for `lang`.
    pub fn len(&self, lang: &str) -> usize {
        self.translations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(lang)
            .map_or(0, HashMap::len)
    }

    /// Load a flat TOML table of `"source" = "translation"` for `lang`.
    #[instrument(level = "debug", skip(self))]
    pub fn load_file(&self, lang: &str, path: &Path) -> ApplicationResult<()> {
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read dictionary", path)?;
        let dictionary: Dictionary =
            toml::from_str(&content).map_err(|e| ApplicationError::InvalidDictionary {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        self.add(lang, dictionary);
        Ok(())
    }

    /// Load every `<lang>.toml` file in `dir`. A missing directory loads nothing.
    ///
    /// Returns the languages loaded.
    #[instrument(level = "debug", skip(self))]
    pub fn load_dir(&self, dir: &Path) -> ApplicationResult<Vec<String>> {
        if !self.fs.is_dir(dir) {
            debug!("load_dir: no dictionary directory at {}", dir.display());
            return Ok(Vec::new());
        }
        let mut loaded = Vec::new();
        for path in self
            .fs
            .list_files(dir)
            .with_path_context("list dictionaries", dir)?
        {
            if path.extension().and_then(|ext| ext.to_str()) != Some("toml") {
                continue;
            }
            let Some(lang) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            self.load_file(lang, &path)?;
            loaded.push(lang.to_string());
        }
        Ok(loaded)
    }
}
