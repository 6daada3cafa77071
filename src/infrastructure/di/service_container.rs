//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use tracing::debug;

use crate::application::services::{DocumentService, TranslationService};
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Translation table shared by everything in the process
    pub translations: Arc<TranslationService>,

    pub documents: DocumentService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let settings = Arc::new(settings);
        let translations = Arc::new(TranslationService::new(Arc::clone(&fs)));
        let documents = DocumentService::new(fs);

        Self {
            settings,
            translations,
            documents,
        }
    }

    /// Load the dictionaries from the configured translations directory.
    pub fn load_translations(&self) -> ApplicationResult<Vec<String>> {
        let langs = self
            .translations
            .load_dir(&self.settings.translations_dir)?;
        debug!("load_translations: {:?}", langs);
        Ok(langs)
    }
}
