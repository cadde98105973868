use super::models::Config;
use crate::negotiation::normalize_mime;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("No presenters configured")]
    NoPresentersConfigured,

    #[error("Presenter '{presenter}' has an empty extension")]
    EmptyExtension { presenter: String },

    #[error("Presenter '{presenter}' has invalid mime '{mime}'")]
    InvalidMime { presenter: String, mime: String },

    #[error("Presenter '{presenter}' mime '{mime}' is a wildcard range, expected a concrete type")]
    WildcardMime { presenter: String, mime: String },

    #[error("Extension '{extension}' claimed by both '{first}' and '{second}'")]
    ConflictingExtension {
        extension: String,
        first: String,
        second: String,
    },

    #[error("Mime '{mime}' claimed by both '{first}' and '{second}'")]
    ConflictingMime {
        mime: String,
        first: String,
        second: String,
    },
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    if config.presenters.is_empty() {
        return Err(ValidationError::NoPresentersConfigured);
    }
    validate_extensions(config)?;
    validate_mimes(config)?;
    Ok(())
}

/// Extensions must be non-empty and bound to a single presenter
fn validate_extensions(config: &Config) -> Result<(), ValidationError> {
    let mut owners: HashMap<&str, &str> = HashMap::new();

    for (name, presenter) in &config.presenters {
        for extension in &presenter.extensions {
            if extension.trim().is_empty() {
                return Err(ValidationError::EmptyExtension {
                    presenter: name.clone(),
                });
            }

            if let Some(first) = owners.insert(extension, name) {
                if first != name.as_str() {
                    return Err(ValidationError::ConflictingExtension {
                        extension: extension.clone(),
                        first: first.to_string(),
                        second: name.clone(),
                    });
                }
            }
        }
    }

    Ok(())
}

/// Mimes must parse, be concrete, and be bound to a single presenter
fn validate_mimes(config: &Config) -> Result<(), ValidationError> {
    let mut owners: HashMap<String, &str> = HashMap::new();

    for (name, presenter) in &config.presenters {
        for value in &presenter.mimes {
            let parsed: mime::Mime = value.parse().map_err(|_| ValidationError::InvalidMime {
                presenter: name.clone(),
                mime: value.clone(),
            })?;

            if parsed.type_() == mime::STAR || parsed.subtype() == mime::STAR {
                return Err(ValidationError::WildcardMime {
                    presenter: name.clone(),
                    mime: value.clone(),
                });
            }

            if let Some(first) = owners.insert(normalize_mime(value), name) {
                if first != name.as_str() {
                    return Err(ValidationError::ConflictingMime {
                        mime: value.clone(),
                        first: first.to_string(),
                        second: name.clone(),
                    });
                }
            }
        }
    }

    Ok(())
}
