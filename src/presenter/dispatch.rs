use axum::response::Response;
use serde_json::Value;

use super::context::{PresentContext, Scope};
use super::registry::PresenterRegistry;
use super::traits::{PresentError, Unmatched};
use super::types::{OPTION_ROUTE_PARAMS, ROUTE_PARAM_PRESENT_USING, Resolution, ResolvedBy};

impl PresenterRegistry {
    /// Pick the presenter for this request among the allowed `types`
    ///
    /// A `presentUsing` route parameter wins over the Accept header. During
    /// negotiation the first acceptable content type bound to an allowed
    /// presenter is taken.
    pub fn resolve(
        &self,
        context: &PresentContext,
        types: &[&str],
    ) -> Result<Resolution, PresentError> {
        if let Some(missing) = types.iter().find(|name| !self.has_presenter(name)) {
            return Err(PresentError::PresenterNotFound(missing.to_string()));
        }

        let scope = Scope::new(self, context);
        if let Some(extension) = present_using(&scope) {
            let presenter = self.extensions.get(extension).ok_or_else(|| {
                PresentError::NoAcceptableRepresentation(Unmatched::Extension(
                    extension.to_string(),
                ))
            })?;

            if !types.contains(&presenter.as_str()) {
                return Err(PresentError::PresenterNotLoaded(extension.to_string()));
            }

            return Ok(Resolution {
                presenter: presenter.clone(),
                resolved_by: ResolvedBy::Override,
            });
        }

        context
            .accept()
            .iter()
            .filter_map(|content_type| self.mimes.get(content_type))
            .find(|presenter| types.contains(&presenter.as_str()))
            .map(|presenter| Resolution {
                presenter: presenter.clone(),
                resolved_by: ResolvedBy::Negotiation,
            })
            .ok_or_else(|| {
                PresentError::NoAcceptableRepresentation(Unmatched::ContentTypes(
                    context.accept().to_vec(),
                ))
            })
    }

    /// Resolve a presenter and render the request's data with it
    pub fn using(
        &self,
        context: &PresentContext,
        types: &[&str],
    ) -> Result<Response, PresentError> {
        let resolution = self.resolve(context, types)?;
        tracing::debug!(
            presenter = %resolution.presenter,
            resolved_by = ?resolution.resolved_by,
            "Presenter resolved"
        );

        let factory = self
            .presenters
            .get(&resolution.presenter)
            .ok_or_else(|| PresentError::PresenterNotFound(resolution.presenter.clone()))?;

        let scope = Scope::new(self, context);
        let presenter = factory.create(scope);
        let data = scope.data(&resolution.presenter)?;
        presenter.render(data)
    }
}

fn present_using<'a>(scope: &Scope<'a>) -> Option<&'a str> {
    scope
        .option(OPTION_ROUTE_PARAMS)
        .and_then(Value::as_object)
        .and_then(|params| params.get(ROUTE_PARAM_PRESENT_USING))
        .and_then(Value::as_str)
        .filter(|extension| !extension.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::{FailureKind, HtmlPresenterFactory, JsonPresenterFactory, Registration};
    use crate::views::InMemoryViews;
    use axum::http::{StatusCode, header};
    use http_body_util::BodyExt;
    use serde_json::json;
    use std::sync::Arc;

    fn registry() -> PresenterRegistry {
        let views = InMemoryViews::new().with_view("users.show", "<h1>{{ name }}</h1>");

        let mut registry = PresenterRegistry::new();
        registry.register(
            "html",
            Registration::builder()
                .factory(Arc::new(HtmlPresenterFactory::new(Arc::new(views))))
                .mimes(vec![
                    "text/html".to_string(),
                    "application/xhtml+xml".to_string(),
                ])
                .build(),
        );
        registry.register(
            "json",
            Registration::builder()
                .factory(Arc::new(JsonPresenterFactory))
                .extensions(vec!["json".to_string()])
                .mimes(vec!["application/json".to_string()])
                .build(),
        );
        registry
    }

    fn accepting(types: &[&str]) -> PresentContext {
        PresentContext::new().set_accept(types.iter().copied())
    }

    fn overriding(extension: &str) -> PresentContext {
        PresentContext::new().set_option(
            OPTION_ROUTE_PARAMS,
            json!({ "id": "7", "presentUsing": extension }),
        )
    }

    #[test]
    fn test_negotiates_first_mime() {
        let registry = registry();
        for (mime, expected) in [
            ("text/html", "html"),
            ("application/xhtml+xml", "html"),
            ("application/json", "json"),
        ] {
            let resolution = registry
                .resolve(&accepting(&[mime, "text/plain"]), &["html", "json"])
                .unwrap();
            assert_eq!(resolution.presenter, expected);
            assert_eq!(resolution.resolved_by, ResolvedBy::Negotiation);
        }
    }

    #[test]
    fn test_negotiation_follows_client_preference() {
        let registry = registry();
        let ctx = accepting(&["application/json", "text/html"]);
        assert_eq!(registry.resolve(&ctx, &["html", "json"]).unwrap().presenter, "json");

        let ctx = accepting(&["text/html", "application/json"]);
        assert_eq!(registry.resolve(&ctx, &["json", "html"]).unwrap().presenter, "html");
    }

    #[test]
    fn test_negotiation_skips_disallowed_presenters() {
        let registry = registry();
        let ctx = accepting(&["text/html", "application/json"]);
        assert_eq!(registry.resolve(&ctx, &["json"]).unwrap().presenter, "json");

        let ctx = accepting(&["application/xhtml+xml", "application/json"]);
        assert_eq!(registry.resolve(&ctx, &["json"]).unwrap().presenter, "json");
    }

    #[test]
    fn test_negotiation_without_match_is_client_facing() {
        let registry = registry();
        let err = registry
            .resolve(&accepting(&["text/html", "*/*"]), &["json"])
            .unwrap_err();

        assert!(err.is_client_facing());
        assert!(matches!(
            err,
            PresentError::NoAcceptableRepresentation(Unmatched::ContentTypes(ref types))
                if types == &["text/html", "*/*"]
        ));

        let err = registry.resolve(&accepting(&[]), &["json", "html"]).unwrap_err();
        assert!(err.is_client_facing());
    }

    #[test]
    fn test_unknown_type_is_presenter_not_found() {
        let registry = registry();
        let err = registry
            .resolve(&accepting(&["application/json"]), &["json", "xml", "csv"])
            .unwrap_err();

        assert!(matches!(err, PresentError::PresenterNotFound(ref name) if name == "xml"));
        assert_eq!(err.kind(), FailureKind::Misconfiguration);
    }

    #[test]
    fn test_override_ignores_accept_header() {
        let registry = registry();
        let ctx = overriding("json").set_accept(["text/html"]);

        let resolution = registry.resolve(&ctx, &["json"]).unwrap();
        assert_eq!(resolution.presenter, "json");
        assert_eq!(resolution.resolved_by, ResolvedBy::Override);
    }

    #[test]
    fn test_override_unknown_extension_is_client_facing() {
        let registry = registry();
        let err = registry
            .resolve(&overriding("xml").set_accept(["application/json"]), &["json"])
            .unwrap_err();

        assert!(matches!(
            err,
            PresentError::NoAcceptableRepresentation(Unmatched::Extension(ref ext)) if ext == "xml"
        ));
    }

    #[test]
    fn test_override_not_allowed_is_not_loaded() {
        let registry = registry();
        let err = registry.resolve(&overriding("json"), &["html"]).unwrap_err();

        assert!(matches!(err, PresentError::PresenterNotLoaded(ref ext) if ext == "json"));
        assert!(!err.is_client_facing());
    }

    #[test]
    fn test_override_checks_bound_presenter_not_extension() {
        let mut registry = registry();
        registry.register(
            "api",
            Registration::builder()
                .factory(Arc::new(JsonPresenterFactory))
                .extensions(vec!["json".to_string()])
                .build(),
        );

        let resolution = registry.resolve(&overriding("json"), &["api"]).unwrap();
        assert_eq!(resolution.presenter, "api");
        assert_eq!(resolution.resolved_by, ResolvedBy::Override);

        // Extension name alone does not make the override allowed
        let err = registry.resolve(&overriding("json"), &["json"]).unwrap_err();
        assert!(matches!(err, PresentError::PresenterNotLoaded(ref ext) if ext == "json"));

        let err = registry.resolve(&overriding("json"), &["html"]).unwrap_err();
        assert!(matches!(err, PresentError::PresenterNotLoaded(ref ext) if ext == "json"));
    }

    #[test]
    fn test_route_params_without_override_negotiate() {
        let registry = registry();
        let ctx = PresentContext::new()
            .set_option(OPTION_ROUTE_PARAMS, json!({ "id": "7" }))
            .set_accept(["application/json"]);

        let resolution = registry.resolve(&ctx, &["html", "json"]).unwrap();
        assert_eq!(resolution.resolved_by, ResolvedBy::Negotiation);
    }

    #[test]
    fn test_override_from_registry_options() {
        let mut registry = registry();
        registry.set_option(OPTION_ROUTE_PARAMS, json!({ "presentUsing": "json" }));

        let resolution = registry
            .resolve(&accepting(&["text/html"]), &["html", "json"])
            .unwrap();
        assert_eq!(resolution.presenter, "json");
    }

    #[tokio::test]
    async fn test_using_renders_json() {
        let registry = registry();
        let ctx = accepting(&["application/json"]).set_data(json!({ "name": "Ada" }));

        let response = registry.using(&ctx, &["html", "json"]).unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, json!({ "name": "Ada" }));
    }

    #[tokio::test]
    async fn test_using_renders_html_with_derived_view() {
        let registry = registry();
        let ctx = accepting(&["text/html"])
            .set_option("controller", "UsersController")
            .set_option("method", "show")
            .set_data(json!({ "name": "Ada" }));

        let response = registry.using(&ctx, &["html", "json"]).unwrap();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"<h1>Ada</h1>");
    }

    #[test]
    fn test_using_html_without_view_fails_to_resolve() {
        let registry = registry();
        let ctx = accepting(&["text/html"]);

        let err = registry.using(&ctx, &["html"]).unwrap_err();
        assert!(matches!(err, PresentError::UnableToResolveView));
    }

    #[tokio::test]
    async fn test_using_passes_presenter_specific_data() {
        use crate::presenter::DataMethods;

        let registry = registry();
        let ctx = overriding("json")
            .set_controller(DataMethods::new().with("summary", || Ok(json!({ "count": 2 }))))
            .set_option("data.json", "summary")
            .set_data(json!([{ "name": "Ada" }, { "name": "Grace" }]));

        let response = registry.using(&ctx, &["json"]).unwrap();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, json!({ "count": 2 }));
    }
}
