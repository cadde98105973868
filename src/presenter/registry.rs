use bon::Builder;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::html::HtmlPresenterFactory;
use super::json::JsonPresenterFactory;
use super::traits::PresenterFactory;
use super::types::{OPTION_CONTROLLER_PREFIX, OPTION_CONTROLLER_SUFFIX, Options, flatten_options};
use crate::config::{Config, PresenterKind};
use crate::negotiation::normalize_mime;
use crate::views::ViewEngine;

/// Everything `register` needs to bind a presenter name
#[derive(Builder)]
pub struct Registration {
    factory: Arc<dyn PresenterFactory>,
    /// Values accepted by the `presentUsing` route parameter
    #[builder(default)]
    extensions: Vec<String>,
    /// Content types this presenter answers during negotiation
    #[builder(default)]
    mimes: Vec<String>,
    /// Merged into the registry options on registration
    #[builder(default)]
    options: Options,
}

/// Process-wide presenter bindings
///
/// Populated once at startup and shared read-only afterwards; all
/// per-request state goes through [`PresentContext`](super::PresentContext).
#[derive(Clone)]
pub struct PresenterRegistry {
    pub(super) presenters: BTreeMap<String, Arc<dyn PresenterFactory>>,
    pub(super) extensions: BTreeMap<String, String>,
    pub(super) mimes: BTreeMap<String, String>,
    options: Options,
}

impl PresenterRegistry {
    pub fn new() -> Self {
        let mut options = Options::new();
        options.insert(OPTION_CONTROLLER_PREFIX.to_string(), Value::from(""));
        options.insert(
            OPTION_CONTROLLER_SUFFIX.to_string(),
            Value::from("Controller"),
        );

        Self {
            presenters: BTreeMap::new(),
            extensions: BTreeMap::new(),
            mimes: BTreeMap::new(),
            options,
        }
    }

    /// Bind `name` to a factory plus its extensions, mimes and options
    ///
    /// Later registrations overwrite earlier ones sharing a key.
    pub fn register(&mut self, name: impl Into<String>, registration: Registration) {
        let name = name.into();
        let Registration {
            factory,
            extensions,
            mimes,
            options,
        } = registration;

        if self.presenters.insert(name.clone(), factory).is_some() {
            tracing::warn!(presenter = %name, "Presenter re-registered, previous binding replaced");
        }

        for extension in extensions {
            if let Some(previous) = self.extensions.insert(extension.clone(), name.clone()) {
                if previous != name {
                    tracing::warn!(%extension, %previous, presenter = %name, "Extension rebound");
                }
            }
        }

        for mime in mimes {
            let mime = normalize_mime(&mime);
            if let Some(previous) = self.mimes.insert(mime.clone(), name.clone()) {
                if previous != name {
                    tracing::warn!(%mime, %previous, presenter = %name, "Mime rebound");
                }
            }
        }

        for (key, value) in options {
            self.set_option(key, value);
        }

        tracing::debug!(presenter = %name, "Presenter registered");
    }

    pub fn set_option(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn has_presenter(&self, name: &str) -> bool {
        self.presenters.contains_key(name)
    }

    /// Registered presenter names, sorted
    pub fn presenters(&self) -> impl Iterator<Item = &str> {
        self.presenters.keys().map(String::as_str)
    }

    /// Extension to presenter name bindings
    pub fn extensions(&self) -> &BTreeMap<String, String> {
        &self.extensions
    }

    /// Normalized mime to presenter name bindings
    pub fn mimes(&self) -> &BTreeMap<String, String> {
        &self.mimes
    }

    /// Build the registry described by configuration
    ///
    /// Expects a validated [`Config`]; `views` backs every html presenter.
    pub fn from_config(config: &Config, views: Arc<dyn ViewEngine>) -> Self {
        let mut registry = Self::new();
        registry
            .set_option(
                OPTION_CONTROLLER_PREFIX,
                config.dispatch.controller_prefix.as_str(),
            )
            .set_option(
                OPTION_CONTROLLER_SUFFIX,
                config.dispatch.controller_suffix.as_str(),
            );

        for (key, value) in flatten_options(&config.dispatch.options) {
            registry.set_option(key, value);
        }

        for (name, presenter) in &config.presenters {
            let factory: Arc<dyn PresenterFactory> = match presenter.kind {
                PresenterKind::Html => Arc::new(HtmlPresenterFactory::new(Arc::clone(&views))),
                PresenterKind::Json => Arc::new(JsonPresenterFactory),
            };

            let registration = Registration::builder()
                .factory(factory)
                .extensions(presenter.extensions.clone())
                .mimes(presenter.mimes.clone())
                .options(flatten_options(&presenter.options))
                .build();

            registry.register(name.as_str(), registration);
        }

        registry
    }
}

impl Default for PresenterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PresenterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresenterRegistry")
            .field("presenters", &self.presenters.keys().collect::<Vec<_>>())
            .field("extensions", &self.extensions)
            .field("mimes", &self.mimes)
            .field("options", &self.options)
            .finish()
    }
}
