use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Option bag keyed by flat dotted names (`"data.json"`, `"controllerPrefix"`)
pub type Options = BTreeMap<String, Value>;

pub const OPTION_VIEW: &str = "view";
pub const OPTION_CONTROLLER: &str = "controller";
pub const OPTION_METHOD: &str = "method";
pub const OPTION_ROUTE_PARAMS: &str = "routeParams";
pub const OPTION_CONTROLLER_PREFIX: &str = "controllerPrefix";
pub const OPTION_CONTROLLER_SUFFIX: &str = "controllerSuffix";
pub const OPTION_DATA: &str = "data";
pub const ROUTE_PARAM_PRESENT_USING: &str = "presentUsing";

/// How a dispatch arrived at its presenter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedBy {
    /// `presentUsing` route parameter
    Override,
    /// Accept header negotiation
    Negotiation,
}

/// Outcome of presenter resolution, before rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub presenter: String,
    pub resolved_by: ResolvedBy,
}

/// Option values that count as unset: absent, `null` or `""`
pub(crate) fn is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// Flatten nested tables into dotted keys
///
/// `{ data = { json = "listing" } }` becomes `"data.json" = "listing"`.
pub fn flatten_options(source: &Map<String, Value>) -> Options {
    let mut options = Options::new();
    flatten_into(&mut options, None, source);
    options
}

fn flatten_into(options: &mut Options, prefix: Option<&str>, source: &Map<String, Value>) {
    for (key, value) in source {
        let key = match prefix {
            Some(prefix) => format!("{prefix}.{key}"),
            None => key.clone(),
        };
        match value {
            Value::Object(nested) if !nested.is_empty() => {
                flatten_into(options, Some(&key), nested)
            }
            _ => {
                options.insert(key, value.clone());
            }
        }
    }
}
