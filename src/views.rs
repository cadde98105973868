//! View engines for the html presenter
//!
//! Views are addressed by dotted names (`user-profile.show`). Templates
//! interpolate `{{ key }}` placeholders from the data object, HTML-escaped;
//! `{{ user.name }}` walks nested objects. Missing keys render empty.

use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

const TEMPLATE_EXTENSION: &str = "html";

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("view '{0}' not found")]
    NotFound(String),

    #[error("failed to read view '{view}': {source}")]
    Io {
        view: String,
        #[source]
        source: std::io::Error,
    },
}

/// Renders a named view with data bound as its variable scope
pub trait ViewEngine: Send + Sync {
    fn render(&self, view: &str, data: &Value) -> Result<String, ViewError>;
}

/// Templates held in memory, for tests and embedded views
#[derive(Debug, Clone, Default)]
pub struct InMemoryViews {
    templates: BTreeMap<String, String>,
}

impl InMemoryViews {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_view(mut self, name: impl Into<String>, template: impl Into<String>) -> Self {
        self.templates.insert(name.into(), template.into());
        self
    }
}

impl ViewEngine for InMemoryViews {
    fn render(&self, view: &str, data: &Value) -> Result<String, ViewError> {
        let template = self
            .templates
            .get(view)
            .ok_or_else(|| ViewError::NotFound(view.to_string()))?;
        Ok(interpolate(template, data))
    }
}

/// Templates loaded from disk on every render
///
/// `users.show` resolves to `<root>/users/show.html`. Reads are blocking
/// and run on the calling thread, which suits small demo templates; wrap
/// a caching engine around it for heavier use.
#[derive(Debug, Clone)]
pub struct FileViews {
    root: PathBuf,
}

impl FileViews {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn template_path(&self, view: &str) -> Option<PathBuf> {
        let mut path = self.root.clone();
        for segment in view.split('.') {
            if segment.is_empty() || segment == ".." || segment.contains(['/', '\\']) {
                return None;
            }
            path.push(segment);
        }
        path.set_extension(TEMPLATE_EXTENSION);
        Some(path)
    }
}

impl ViewEngine for FileViews {
    fn render(&self, view: &str, data: &Value) -> Result<String, ViewError> {
        let path = self
            .template_path(view)
            .ok_or_else(|| ViewError::NotFound(view.to_string()))?;

        let template = std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ViewError::NotFound(view.to_string())
            } else {
                ViewError::Io {
                    view: view.to_string(),
                    source,
                }
            }
        })?;

        Ok(interpolate(&template, data))
    }
}

/// Replace `{{ key }}` placeholders with escaped values from `data`
pub fn interpolate(template: &str, data: &Value) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];

        let Some(end) = after_open.find("}}") else {
            // Unterminated placeholder, emit verbatim
            output.push_str(&rest[start..]);
            return output;
        };

        let key = after_open[..end].trim();
        if let Some(value) = lookup(data, key) {
            escape_into(&mut output, &display(value));
        }
        rest = &after_open[end + 2..];
    }

    output.push_str(rest);
    output
}

fn lookup<'a>(data: &'a Value, key: &str) -> Option<&'a Value> {
    if key.is_empty() {
        return None;
    }
    key.split('.').try_fold(data, |value, segment| match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

fn display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn escape_into(output: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#39;"),
            c => output.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_interpolate() {
        let data = json!({
            "name": "Ada",
            "age": 36,
            "user": { "email": "ada@example.com" },
            "tags": ["math", "engines"],
            "nothing": null
        });

        assert_eq!(
            interpolate("{{name}} ({{ age }}) <{{ user.email }}>", &data),
            "Ada (36) <ada@example.com>"
        );
        assert_eq!(interpolate("{{ tags.1 }}", &data), "engines");
        assert_eq!(interpolate("[{{ nothing }}][{{ missing }}]", &data), "[][]");
    }

    #[test]
    fn test_interpolate_escapes() {
        let data = json!({ "html": "<script>alert('x') & \"y\"</script>" });
        assert_eq!(
            interpolate("{{ html }}", &data),
            "&lt;script&gt;alert(&#39;x&#39;) &amp; &quot;y&quot;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_interpolate_unterminated() {
        let data = json!({ "name": "Ada" });
        assert_eq!(interpolate("Hi {{ name }}, {{ oops", &data), "Hi Ada, {{ oops");
    }

    #[test]
    fn test_in_memory_views() {
        let views = InMemoryViews::new().with_view("users.show", "<h1>{{ name }}</h1>");

        assert_eq!(
            views.render("users.show", &json!({ "name": "Grace" })).unwrap(),
            "<h1>Grace</h1>"
        );
        assert!(matches!(
            views.render("users.index", &json!({})),
            Err(ViewError::NotFound(_))
        ));
    }

    #[test]
    fn test_file_views() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("user-profile")).unwrap();
        fs::write(
            temp_dir.path().join("user-profile/show.html"),
            "<p>{{ name }}</p>\n",
        )
        .unwrap();

        let views = FileViews::new(temp_dir.path());
        assert_eq!(
            views
                .render("user-profile.show", &json!({ "name": "Ada" }))
                .unwrap(),
            "<p>Ada</p>\n"
        );
        assert!(matches!(
            views.render("user-profile.edit", &json!({})),
            Err(ViewError::NotFound(_))
        ));
    }

    #[test]
    fn test_file_views_reject_traversal() {
        let views = FileViews::new("views");
        assert!(views.template_path("..").is_none());
        assert!(views.template_path("users..show").is_none());
        assert!(views.template_path("users/../secret").is_none());
        assert_eq!(
            views.template_path("users.show").unwrap(),
            PathBuf::from("views/users/show.html")
        );
    }
}
