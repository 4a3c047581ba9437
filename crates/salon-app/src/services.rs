//! Process-scoped composition root
//!
//! One [`AppServices`] value is constructed at application start and
//! passed by reference to whatever needs it. No component reaches for a
//! global; lifecycle is explicit.

use crate::client::BoxedClientBridge;
use crate::config::AppConfig;
use crate::dialogs::ModalPresenter;
use crate::dispatch::Dispatcher;
use crate::i18n::MessageCatalog;
use std::sync::Arc;

/// The collaborators and configuration the application core runs on
pub struct AppServices {
    /// Chat-client SDK access
    pub bridge: BoxedClientBridge,
    /// Modal dialog display
    pub presenter: Arc<dyn ModalPresenter>,
    /// The shared, process-wide action dispatcher
    pub dispatcher: Arc<Dispatcher>,
    /// Localized message catalog
    pub catalog: MessageCatalog,
    /// Application configuration
    pub config: AppConfig,
}

impl AppServices {
    /// Assemble services with a fresh dispatcher, the built-in catalog
    /// and default configuration
    pub fn new(bridge: BoxedClientBridge, presenter: Arc<dyn ModalPresenter>) -> Self {
        Self {
            bridge,
            presenter,
            dispatcher: Dispatcher::new(),
            catalog: MessageCatalog::default(),
            config: AppConfig::default(),
        }
    }

    /// Replace the configuration
    #[must_use]
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the message catalog
    #[must_use]
    pub fn with_catalog(mut self, catalog: MessageCatalog) -> Self {
        self.catalog = catalog;
        self
    }
}
