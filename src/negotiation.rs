//! Accept header parsing
//!
//! Turns `Accept` header values into the list of acceptable content types a
//! dispatch scans, most preferred first.

use std::cmp::Ordering;

/// Lower-cased `type/subtype` of a media type, parameters dropped
///
/// Falls back to the trimmed, lower-cased input when it does not parse.
pub fn normalize_mime(value: &str) -> String {
    match value.trim().parse::<mime::Mime>() {
        Ok(media_type) => media_type.essence_str().to_ascii_lowercase(),
        Err(_) => value.trim().to_ascii_lowercase(),
    }
}

/// Acceptable content types from one or more `Accept` header values
///
/// Items are ordered by quality, highest first; equal qualities keep
/// header order. Unparsable items and items with `q=0` are dropped.
pub fn acceptable_content_types<'a, I>(headers: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut ranked: Vec<(f32, String)> = Vec::new();

    for header in headers {
        for item in header.split(',') {
            let item = item.trim();
            if item.is_empty() {
                continue;
            }

            let media_type: mime::Mime = match item.parse() {
                Ok(media_type) => media_type,
                Err(err) => {
                    tracing::debug!(%item, error = %err, "Skipping unparsable Accept item");
                    continue;
                }
            };

            let quality = quality(&media_type);
            if quality <= 0.0 {
                continue;
            }

            ranked.push((quality, media_type.essence_str().to_ascii_lowercase()));
        }
    }

    // sort_by is stable, ties stay in header order
    ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
    ranked.into_iter().map(|(_, essence)| essence).collect()
}

fn quality(media_type: &mime::Mime) -> f32 {
    media_type
        .get_param("q")
        .and_then(|q| q.as_str().parse::<f32>().ok())
        .filter(|q| q.is_finite())
        .map(|q| q.clamp(0.0, 1.0))
        .unwrap_or(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_order_without_quality() {
        let types = acceptable_content_types(["text/html, application/json"]);
        assert_eq!(types, vec!["text/html", "application/json"]);
    }

    #[test]
    fn test_quality_ordering() {
        let types = acceptable_content_types([
            "text/html;q=0.5, application/json, application/xhtml+xml;q=0.9",
        ]);
        assert_eq!(
            types,
            vec!["application/json", "application/xhtml+xml", "text/html"]
        );
    }

    #[test]
    fn test_ties_keep_header_order() {
        let types = acceptable_content_types(["b/b;q=0.8, a/a;q=0.8, c/c"]);
        assert_eq!(types, vec!["c/c", "b/b", "a/a"]);
    }

    #[test]
    fn test_browser_accept_header() {
        let types = acceptable_content_types([
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        ]);
        assert_eq!(
            types,
            vec!["text/html", "application/xhtml+xml", "application/xml", "*/*"]
        );
    }

    #[test]
    fn test_zero_quality_and_garbage_dropped() {
        let types = acceptable_content_types(["text/html;q=0, nonsense, , application/json"]);
        assert_eq!(types, vec!["application/json"]);
    }

    #[test]
    fn test_multiple_header_values() {
        let types = acceptable_content_types(["text/html;q=0.4", "application/json"]);
        assert_eq!(types, vec!["application/json", "text/html"]);
    }

    #[test]
    fn test_parameters_and_case_normalized() {
        let types = acceptable_content_types(["Application/JSON; charset=utf-8"]);
        assert_eq!(types, vec!["application/json"]);
    }

    #[test]
    fn test_empty_header() {
        assert!(acceptable_content_types([""]).is_empty());
        assert!(acceptable_content_types(std::iter::empty::<&str>()).is_empty());
    }

    #[test]
    fn test_normalize_mime() {
        assert_eq!(normalize_mime("text/HTML; charset=utf-8"), "text/html");
        assert_eq!(normalize_mime(" application/json "), "application/json");
        assert_eq!(normalize_mime("Not A Mime"), "not a mime");
    }
}
