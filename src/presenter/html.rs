use axum::response::{Html, IntoResponse, Response};
use heck::ToKebabCase;
use serde_json::Value;
use std::sync::Arc;

use super::context::Scope;
use super::traits::{PresentError, Presenter, PresenterFactory};
use super::types::{
    OPTION_CONTROLLER, OPTION_CONTROLLER_PREFIX, OPTION_CONTROLLER_SUFFIX, OPTION_METHOD,
    OPTION_VIEW,
};
use crate::views::ViewEngine;

/// Renders data through a named view of the [`ViewEngine`]
pub struct HtmlPresenter<'a> {
    scope: Scope<'a>,
    views: Arc<dyn ViewEngine>,
}

impl<'a> HtmlPresenter<'a> {
    pub fn new(scope: Scope<'a>, views: Arc<dyn ViewEngine>) -> Self {
        Self { scope, views }
    }

    /// Explicit `view` option, or a name derived from `controller` and `method`
    pub fn view_path(&self) -> Result<String, PresentError> {
        if let Some(view) = self.scope.option_str(OPTION_VIEW) {
            return Ok(view.to_string());
        }

        let (Some(controller), Some(method)) = (
            self.scope.option_str(OPTION_CONTROLLER),
            self.scope.option_str(OPTION_METHOD),
        ) else {
            return Err(PresentError::UnableToResolveView);
        };

        Ok(derive_view_path(
            controller,
            method,
            self.scope.option_str(OPTION_CONTROLLER_PREFIX).unwrap_or(""),
            self.scope.option_str(OPTION_CONTROLLER_SUFFIX).unwrap_or(""),
        ))
    }
}

impl Presenter for HtmlPresenter<'_> {
    fn render(&self, data: Value) -> Result<Response, PresentError> {
        let view = self.view_path()?;
        tracing::debug!(%view, "Rendering view");

        let body = self.views.render(&view, &data)?;
        Ok(Html(body).into_response())
    }
}

#[derive(Clone)]
pub struct HtmlPresenterFactory {
    views: Arc<dyn ViewEngine>,
}

impl HtmlPresenterFactory {
    pub fn new(views: Arc<dyn ViewEngine>) -> Self {
        Self { views }
    }
}

impl PresenterFactory for HtmlPresenterFactory {
    fn create<'a>(&self, scope: Scope<'a>) -> Box<dyn Presenter + 'a> {
        Box::new(HtmlPresenter::new(scope, Arc::clone(&self.views)))
    }
}

/// View name for a controller action
///
/// `UserProfileController` + `show` becomes `user-profile.show` once the
/// prefix and suffix are stripped. Acronym runs are kept together, so
/// `HTMLReportController` maps to `html-report`. Namespace separators left over (`::` or
/// `\`) become nested view segments.
pub fn derive_view_path(controller: &str, method: &str, prefix: &str, suffix: &str) -> String {
    let name = controller.strip_prefix(prefix).unwrap_or(controller);
    let name = match suffix {
        "" => name,
        suffix => name.strip_suffix(suffix).unwrap_or(name),
    };

    let segments: Vec<String> = name
        .split("::")
        .flat_map(|part| part.split('\\'))
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.to_kebab_case())
        .collect();

    format!("{}.{}", segments.join("."), method)
}
