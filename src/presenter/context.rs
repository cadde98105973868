use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use super::registry::PresenterRegistry;
use super::traits::PresentError;
use super::types::{AnyError, OPTION_DATA, Options, is_set};

/// Named data transforms a controller offers to presenters
///
/// Option `data.<presenter>` (or `data`) names the method to call instead
/// of handing the raw data to the presenter.
pub trait DataProvider: Send + Sync {
    /// Returns `None` when no method by that name exists
    fn call_data_method(&self, method: &str) -> Option<Result<Value, AnyError>>;
}

type DataMethod = Box<dyn Fn() -> Result<Value, AnyError> + Send + Sync>;

/// Dictionary-backed [`DataProvider`]
#[derive(Default)]
pub struct DataMethods {
    methods: BTreeMap<String, DataMethod>,
}

impl DataMethods {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<F>(mut self, name: impl Into<String>, method: F) -> Self
    where
        F: Fn() -> Result<Value, AnyError> + Send + Sync + 'static,
    {
        self.methods.insert(name.into(), Box::new(method));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }
}

impl fmt::Debug for DataMethods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.methods.keys()).finish()
    }
}

impl DataProvider for DataMethods {
    fn call_data_method(&self, method: &str) -> Option<Result<Value, AnyError>> {
        self.methods.get(method).map(|f| f())
    }
}

/// Per-request presentation state
///
/// Holds everything a single dispatch needs that must not live on the
/// shared registry: the controller, its raw data, option overrides and
/// the client's acceptable content types.
#[derive(Default)]
pub struct PresentContext {
    controller: Option<Box<dyn DataProvider>>,
    data: Value,
    options: Options,
    accept: Vec<String>,
}

impl PresentContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_controller(mut self, controller: impl DataProvider + 'static) -> Self {
        self.controller = Some(Box::new(controller));
        self
    }

    pub fn controller(&self) -> Option<&dyn DataProvider> {
        self.controller.as_deref()
    }

    pub fn set_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }

    pub fn raw_data(&self) -> &Value {
        &self.data
    }

    pub fn set_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Request-level option only; see [`Scope::option`] for the merged view
    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    /// Acceptable content types, most preferred first
    pub fn set_accept<I, S>(mut self, content_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accept = content_types.into_iter().map(Into::into).collect();
        self
    }

    pub fn accept(&self) -> &[String] {
        &self.accept
    }
}

impl fmt::Debug for PresentContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresentContext")
            .field("has_controller", &self.controller.is_some())
            .field("data", &self.data)
            .field("options", &self.options)
            .field("accept", &self.accept)
            .finish()
    }
}

/// Read-only view handed to presenters during a dispatch
#[derive(Clone, Copy)]
pub struct Scope<'a> {
    registry: &'a PresenterRegistry,
    context: &'a PresentContext,
}

impl<'a> Scope<'a> {
    pub fn new(registry: &'a PresenterRegistry, context: &'a PresentContext) -> Self {
        Self { registry, context }
    }

    /// Request options shadow registry options; unset values are skipped
    pub fn option(&self, key: &str) -> Option<&'a Value> {
        self.context
            .option(key)
            .filter(|value| is_set(value))
            .or_else(|| self.registry.option(key).filter(|value| is_set(value)))
    }

    pub fn option_str(&self, key: &str) -> Option<&'a str> {
        self.option(key).and_then(Value::as_str)
    }

    pub fn registry(&self) -> &'a PresenterRegistry {
        self.registry
    }

    pub fn context(&self) -> &'a PresentContext {
        self.context
    }

    /// Data for `presenter`: `data.<presenter>` method, then `data`
    /// method, then the raw data.
    pub fn data(&self, presenter: &str) -> Result<Value, PresentError> {
        let method = self
            .option_str(&format!("{OPTION_DATA}.{presenter}"))
            .or_else(|| self.option_str(OPTION_DATA));

        match method {
            Some(method) => self.call_data_method(method),
            None => Ok(self.context.raw_data().clone()),
        }
    }

    fn call_data_method(&self, method: &str) -> Result<Value, PresentError> {
        let result = self
            .context
            .controller()
            .and_then(|controller| controller.call_data_method(method))
            .ok_or_else(|| PresentError::DataMethodMissing(method.to_string()))?;

        result.map_err(|source| PresentError::DataMethod {
            method: method.to_string(),
            source,
        })
    }
}
