use axum::response::Response;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

use super::context::Scope;
use super::types::AnyError;
use crate::views::ViewError;

/// What the client asked for when no presenter could satisfy it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unmatched {
    /// Explicit `presentUsing` override naming an unknown extension
    Extension(String),
    /// Acceptable content types, in preference order, none of which matched
    ContentTypes(Vec<String>),
}

impl fmt::Display for Unmatched {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unmatched::Extension(ext) => write!(f, "extension '{ext}'"),
            Unmatched::ContentTypes(types) if types.is_empty() => {
                write!(f, "no acceptable content types")
            }
            Unmatched::ContentTypes(types) => write!(f, "content types [{}]", types.join(", ")),
        }
    }
}

/// Failure class of a [`PresentError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The client asked for a representation that cannot be produced
    Client,
    /// The calling code or the registrations are wrong
    Misconfiguration,
    /// A data provider, view engine or serializer failed
    Collaborator,
}

#[derive(Debug, Error)]
pub enum PresentError {
    #[error("presenter for {0} not found")]
    PresenterNotFound(String),
    #[error("presenter {0} not loaded for this method")]
    PresenterNotLoaded(String),
    #[error(
        "presenter unable to resolve view; set the `view` option (e.g. \"users.show\") to resolve"
    )]
    UnableToResolveView,
    #[error("no acceptable representation for {0}")]
    NoAcceptableRepresentation(Unmatched),
    #[error("controller does not provide data method '{0}'")]
    DataMethodMissing(String),
    #[error("data method '{method}' failed: {source}")]
    DataMethod {
        method: String,
        #[source]
        source: AnyError,
    },
    #[error("view rendering failed: {0}")]
    View(#[from] ViewError),
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl PresentError {
    pub fn kind(&self) -> FailureKind {
        match self {
            PresentError::NoAcceptableRepresentation(_) => FailureKind::Client,
            PresentError::PresenterNotFound(_)
            | PresentError::PresenterNotLoaded(_)
            | PresentError::UnableToResolveView
            | PresentError::DataMethodMissing(_) => FailureKind::Misconfiguration,
            PresentError::DataMethod { .. }
            | PresentError::View(_)
            | PresentError::Serialize(_) => FailureKind::Collaborator,
        }
    }

    pub fn is_client_facing(&self) -> bool {
        self.kind() == FailureKind::Client
    }
}

/// Renders already-computed data into a response
///
/// A presenter is created per dispatch by its [`PresenterFactory`] and
/// dropped once `render` returns.
pub trait Presenter {
    fn render(&self, data: Value) -> Result<Response, PresentError>;
}

/// Builds a presenter bound to the scope of a single dispatch
pub trait PresenterFactory: Send + Sync {
    fn create<'a>(&self, scope: Scope<'a>) -> Box<dyn Presenter + 'a>;
}
