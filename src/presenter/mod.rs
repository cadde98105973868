//! Presenter registry and dispatch
//!
//! A presenter turns a controller action's data into a response. The
//! [`PresenterRegistry`] binds presenter names to factories, extensions
//! and mimes at startup; each request then supplies a [`PresentContext`]
//! and the names its action supports, and [`PresenterRegistry::using`]
//! picks one by explicit `presentUsing` override or by Accept header.
//!
//! ## Key Components
//!
//! - [`Presenter`] / [`PresenterFactory`] - rendering capability
//! - [`HtmlPresenter`] - renders named views through a [`ViewEngine`](crate::views::ViewEngine)
//! - [`JsonPresenter`] - serializes data as JSON
//! - [`PresentContext`] - request-scoped controller, data and options
//! - [`DataProvider`] - named data transforms a controller exposes
//!
//! ## Example
//!
//! ```rust,ignore
//! use presently::presenter::{PresentContext, PresenterRegistry};
//!
//! let ctx = PresentContext::new()
//!     .set_accept(["application/json"])
//!     .set_data(serde_json::json!({ "id": 7 }));
//! let response = registry.using(&ctx, &["html", "json"])?;
//! ```

mod context;
mod dispatch;
mod html;
mod json;
mod registry;
mod traits;
pub(crate) mod types;

pub use context::{DataMethods, DataProvider, PresentContext, Scope};
pub use html::{HtmlPresenter, HtmlPresenterFactory, derive_view_path};
pub use json::{JsonPresenter, JsonPresenterFactory};
pub use registry::{PresenterRegistry, Registration};
pub use traits::{FailureKind, PresentError, Presenter, PresenterFactory, Unmatched};
pub use types::{AnyError, Options, Resolution, ResolvedBy, flatten_options};
