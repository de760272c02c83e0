//! Stored document codec.
//!
//! A post on disk is UTF-8 text shaped as
//!
//! ```text
//! ---
//! <yaml front matter>
//! ---
//! <body>
//! ```
//!
//! Decoding splits on the first two `---` delimiter lines and coerces every
//! front-matter value into the list-valued [`PropertySet`] shape. Encoding
//! sorts property names so that re-encoding unchanged data yields
//! byte-identical files — stored content diffs cleanly under version control.

use crate::content::{ContentError, FrontMatter, PropertySet};
use indexmap::IndexMap;
use serde_json::Value;
use std::{fs, path::Path};

/// A decoded post: front-matter properties plus the opaque body text.
///
/// The body lives outside the property map. The one place that needs to
/// address it as a property — the update operation — injects it under the
/// reserved `content` key and extracts it again afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub properties: PropertySet,
    pub body: String,
}

impl Document {
    /// Decode raw text into properties and body.
    ///
    /// Text before the first delimiter is ignored; a third `---` line is
    /// body content, not a delimiter.
    pub fn decode(raw: &str) -> Result<Self, ContentError> {
        let mut front_lines: Vec<&str> = Vec::new();
        let mut body_lines: Vec<&str> = Vec::new();
        let mut delimiters = 0usize;

        for line in raw.lines() {
            if delimiters < 2 && line.trim_end_matches('\r') == "---" {
                delimiters += 1;
                continue;
            }
            match delimiters {
                0 => {}
                1 => front_lines.push(line),
                _ => body_lines.push(line),
            }
        }

        if delimiters < 2 {
            return Err(ContentError::MalformedFrontMatter);
        }

        let front = front_lines.join("\n");
        let properties = if front.trim().is_empty() {
            PropertySet::new()
        } else {
            let loose: IndexMap<String, Value> = serde_yaml::from_str(&front)?;
            PropertySet::from_loose(loose)
        };

        Ok(Self {
            properties,
            body: body_lines.join("\n").trim().to_owned(),
        })
    }

    /// Read and decode a source file.
    pub fn read(path: &Path) -> Result<Self, ContentError> {
        let raw = fs::read_to_string(path)
            .map_err(|err| ContentError::SourceRead(path.to_path_buf(), err))?;
        Self::decode(&raw)
    }
}

/// Serialize front matter and body into the stored text form.
///
/// Property names are sorted lexicographically before dumping.
pub fn encode(front: &FrontMatter, body: &str) -> Result<String, ContentError> {
    let mut pairs: Vec<(&String, &Value)> = front.iter().collect();
    pairs.sort_by(|a, b| a.0.cmp(b.0));

    let mut mapping = serde_yaml::Mapping::new();
    for (name, value) in pairs {
        mapping.insert(
            serde_yaml::Value::String(name.clone()),
            serde_yaml::to_value(value)?,
        );
    }

    let yaml = serde_yaml::to_string(&mapping)?;
    Ok(format!("---\n{yaml}---\n{body}\n"))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::normalize;
    use serde_json::json;

    const SAMPLE: &str = "---\n\
        date: 2025-06-14 10:30:00\n\
        published: true\n\
        title: Hello\n\
        ---\n\
        First paragraph.\n";

    #[test]
    fn test_decode_splits_front_matter_and_body() {
        let doc = Document::decode(SAMPLE).unwrap();
        assert_eq!(doc.properties.first_str("title"), Some("Hello"));
        assert_eq!(doc.body, "First paragraph.");
    }

    #[test]
    fn test_decode_wraps_scalars_into_lists() {
        let doc = Document::decode(SAMPLE).unwrap();
        assert_eq!(doc.properties.get("published"), Some(&[json!(true)][..]));
    }

    #[test]
    fn test_decode_keeps_lists_as_lists() {
        let raw = "---\nphoto:\n- one.jpg\n- two.jpg\n---\nbody\n";
        let doc = Document::decode(raw).unwrap();
        assert_eq!(doc.properties.get("photo").unwrap().len(), 2);
    }

    #[test]
    fn test_decode_missing_delimiters_fails() {
        let err = Document::decode("title: Hello\n\nbody\n").unwrap_err();
        assert!(matches!(err, ContentError::MalformedFrontMatter));
    }

    #[test]
    fn test_decode_single_delimiter_fails() {
        let err = Document::decode("---\ntitle: Hello\n").unwrap_err();
        assert!(matches!(err, ContentError::MalformedFrontMatter));
    }

    #[test]
    fn test_decode_third_delimiter_belongs_to_body() {
        let raw = "---\ntitle: Hello\n---\nabove\n---\nbelow\n";
        let doc = Document::decode(raw).unwrap();
        assert_eq!(doc.body, "above\n---\nbelow");
    }

    #[test]
    fn test_decode_trims_body_whitespace() {
        let raw = "---\ntitle: Hello\n---\n\n  body text\n\n";
        let doc = Document::decode(raw).unwrap();
        assert_eq!(doc.body, "body text");
    }

    #[test]
    fn test_encode_sorts_property_names() {
        let mut front = FrontMatter::new();
        front.insert("title".into(), json!("Hello"));
        front.insert("date".into(), json!("2025-06-14"));
        let text = encode(&front, "body").unwrap();
        let date_at = text.find("date:").unwrap();
        let title_at = text.find("title:").unwrap();
        assert!(date_at < title_at);
    }

    #[test]
    fn test_encode_wraps_with_delimiters_and_trailing_newline() {
        let mut front = FrontMatter::new();
        front.insert("title".into(), json!("Hello"));
        let text = encode(&front, "body").unwrap();
        assert!(text.starts_with("---\n"));
        assert!(text.contains("\n---\nbody\n"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_round_trip_preserves_properties_and_body() {
        let properties = PropertySet::from_loose([
            ("title".to_owned(), json!("Hello")),
            ("published".to_owned(), json!(true)),
            ("photo".to_owned(), json!(["one.jpg"])),
            ("category".to_owned(), json!(["a", "b"])),
        ]);
        let body = "Some body\n\nwith paragraphs.";

        let text = encode(&normalize(&properties), body).unwrap();
        let doc = Document::decode(&text).unwrap();

        assert_eq!(doc.properties, properties);
        assert_eq!(doc.body, body);
    }

    #[test]
    fn test_re_encode_is_byte_identical() {
        let doc = Document::decode(SAMPLE).unwrap();
        let first = encode(&normalize(&doc.properties), &doc.body).unwrap();
        let reloaded = Document::decode(&first).unwrap();
        let second = encode(&normalize(&reloaded.properties), &reloaded.body).unwrap();
        assert_eq!(first, second);
    }
}
