//! Controller-facing presentation helper
//!
//! [`Present`] is an extractor that captures what a dispatch needs from the
//! current request: the route's [`Action`], its path parameters and the
//! client's Accept header. Handlers attach data and finish with
//! [`Present::using`]:
//!
//! ```rust,ignore
//! async fn show(present: Present, Path(id): Path<u32>) -> Result<Response, ApiError> {
//!     let user = load_user(id)?;
//!     present.data(serde_json::to_value(user)?).using(&["html", "json"])
//! }
//! ```

use std::convert::Infallible;
use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, RawPathParams},
    http::{header, request::Parts},
    response::Response,
};
use serde_json::{Map, Value};
use thiserror::Error;

use super::error::ApiError;
use super::state::AppState;
use crate::negotiation::acceptable_content_types;
use crate::observability::Metrics;
use crate::presenter::types::{OPTION_CONTROLLER, OPTION_METHOD, OPTION_ROUTE_PARAMS};
use crate::presenter::{DataProvider, FailureKind, PresentContext, PresentError, PresenterRegistry};

/// Controller and method a route is served by
///
/// Attach to a route with `.layer(Extension(action))`; the html presenter
/// derives its view name from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub controller: String,
    pub method: String,
}

impl Action {
    pub fn new(controller: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            controller: controller.into(),
            method: method.into(),
        }
    }
}

#[derive(Debug, Error)]
#[error("action must look like 'Controller@method', got '{0}'")]
pub struct ParseActionError(String);

impl FromStr for Action {
    type Err = ParseActionError;

    /// Parses `UserProfileController@show`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('@') {
            Some((controller, method)) if !controller.is_empty() && !method.is_empty() => {
                Ok(Self::new(controller, method))
            }
            _ => Err(ParseActionError(s.to_string())),
        }
    }
}

/// Request-scoped presentation builder
pub struct Present {
    registry: Arc<PresenterRegistry>,
    metrics: Arc<Metrics>,
    context: PresentContext,
}

impl Present {
    pub fn new(
        registry: Arc<PresenterRegistry>,
        metrics: Arc<Metrics>,
        context: PresentContext,
    ) -> Self {
        Self {
            registry,
            metrics,
            context,
        }
    }

    pub fn controller(mut self, controller: impl DataProvider + 'static) -> Self {
        self.context = self.context.set_controller(controller);
        self
    }

    pub fn set_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context = self.context.set_option(key, value);
        self
    }

    pub fn data(mut self, data: Value) -> Self {
        self.context = self.context.set_data(data);
        self
    }

    pub fn context(&self) -> &PresentContext {
        &self.context
    }

    /// Render with the first presenter among `types` the request can take
    pub fn using(self, types: &[&str]) -> Result<Response, ApiError> {
        match self.registry.using(&self.context, types) {
            Ok(response) => {
                self.metrics.presented();
                Ok(response)
            }
            Err(err) => {
                match err.kind() {
                    FailureKind::Client => {
                        tracing::debug!(error = %err, "No acceptable representation");
                        self.metrics.not_found();
                    }
                    _ if matches!(err, PresentError::PresenterNotLoaded(_)) => {
                        tracing::warn!(error = %err, ?types, "Override not allowed");
                        self.metrics.failed();
                    }
                    _ => {
                        tracing::error!(error = %err, ?types, "Presentation failed");
                        self.metrics.failed();
                    }
                }
                Err(err.into())
            }
        }
    }
}

impl FromRequestParts<AppState> for Present {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let accept = acceptable_content_types(
            parts
                .headers
                .get_all(header::ACCEPT)
                .iter()
                .filter_map(|value| value.to_str().ok()),
        );

        // Routes without parameters have nothing to extract
        let route_params: Map<String, Value> = RawPathParams::from_request_parts(parts, state)
            .await
            .map(|params| {
                params
                    .iter()
                    .map(|(key, value)| (key.to_string(), Value::from(value)))
                    .collect()
            })
            .unwrap_or_default();

        let mut context = PresentContext::new()
            .set_accept(accept)
            .set_option(OPTION_ROUTE_PARAMS, Value::Object(route_params));

        if let Some(action) = parts.extensions.get::<Action>() {
            context = context
                .set_option(OPTION_CONTROLLER, action.controller.as_str())
                .set_option(OPTION_METHOD, action.method.as_str());
        }

        Ok(Present::new(
            Arc::clone(&state.registry),
            Arc::clone(&state.metrics),
            context,
        ))
    }
}
