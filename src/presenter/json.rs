use axum::{
    Json,
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use serde_json::Value;

use super::context::Scope;
use super::traits::{PresentError, Presenter, PresenterFactory};

const OPTION_PRETTY: &str = "json.pretty";

/// Serializes data unchanged as `application/json`
pub struct JsonPresenter<'a> {
    scope: Scope<'a>,
}

impl<'a> JsonPresenter<'a> {
    pub fn new(scope: Scope<'a>) -> Self {
        Self { scope }
    }
}

impl Presenter for JsonPresenter<'_> {
    fn render(&self, data: Value) -> Result<Response, PresentError> {
        let pretty = self
            .scope
            .option(OPTION_PRETTY)
            .and_then(Value::as_bool)
            .unwrap_or(false);

        if !pretty {
            return Ok(Json(data).into_response());
        }

        let body = serde_json::to_vec_pretty(&data)?;
        Ok((
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            )],
            body,
        )
            .into_response())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPresenterFactory;

impl PresenterFactory for JsonPresenterFactory {
    fn create<'a>(&self, scope: Scope<'a>) -> Box<dyn Presenter + 'a> {
        Box::new(JsonPresenter::new(scope))
    }
}
