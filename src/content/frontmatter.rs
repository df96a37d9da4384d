//! Front-matter parsing

use serde_yaml::Value;

use super::Metadata;

/// Result of splitting a content file into metadata and body.
///
/// Errors are plain strings here; the loader attaches the file path.
pub type ParseResult<'a> = Result<(Metadata, &'a str), String>;

const DELIMITER: &str = "---";

/// Split a content file into its YAML front-matter block and the markdown body.
///
/// A file that does not open with `---` has no metadata and the whole text is
/// the body. An opened block must be closed by a line that is exactly `---`.
pub fn parse(content: &str) -> ParseResult<'_> {
    let content = content.trim_start_matches(['\u{feff}']);
    let trimmed = content.trim_start_matches(['\n', '\r', ' ', '\t']);

    let Some(after_open) = strip_delimiter_line(trimmed) else {
        return Ok((Metadata::default(), content));
    };

    let (yaml, body) = split_at_closing(after_open)
        .ok_or_else(|| "front-matter block is not terminated by '---'".to_string())?;

    let metadata = parse_yaml(yaml)?;
    Ok((metadata, body.trim_start_matches(['\n', '\r'])))
}

/// Strip an opening `---` line, returning the text after it.
fn strip_delimiter_line(s: &str) -> Option<&str> {
    let (first, rest) = match s.find('\n') {
        Some(pos) => (&s[..pos], &s[pos + 1..]),
        None => (s, ""),
    };
    // "----" or "--- title" is not a delimiter line
    (first.trim_end() == DELIMITER).then_some(rest)
}

/// Find the closing delimiter line; returns (yaml, remaining body).
fn split_at_closing(s: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    for line in s.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            return Some((&s[..offset], &s[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

fn parse_yaml(yaml: &str) -> Result<Metadata, String> {
    if yaml.trim().is_empty() {
        return Ok(Metadata::default());
    }

    let value: Value = serde_yaml::from_str(yaml).map_err(|e| e.to_string())?;
    match value {
        Value::Null => Ok(Metadata::default()),
        Value::Mapping(map) => {
            let mut metadata = Metadata::default();
            for (key, value) in map {
                let key = match key {
                    Value::String(s) => s,
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    other => {
                        return Err(format!("unsupported front-matter key: {:?}", other));
                    }
                };
                metadata.insert(key, value);
            }
            Ok(metadata)
        }
        _ => Err("front-matter must be a mapping of keys to values".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-01-15
tags:
  - rust
  - web
featured: true
---

This is the content.
"#;

        let (meta, body) = parse(content).unwrap();
        assert_eq!(meta.title(), Some("Hello World"));
        assert_eq!(meta.tags(), vec!["rust", "web"]);
        assert!(meta.featured());
        assert_eq!(body, "This is the content.\n");
    }

    #[test]
    fn test_keys_keep_file_order() {
        let content = "---\nzeta: 1\nalpha: 2\nmid: 3\n---\n";
        let (meta, _) = parse(content).unwrap();
        let keys: Vec<_> = meta.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Just markdown\n\nNo metadata here.";
        let (meta, body) = parse(content).unwrap();
        assert!(meta.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_empty_frontmatter() {
        let (meta, body) = parse("---\n---\nBody").unwrap();
        assert!(meta.is_empty());
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_crlf_line_endings() {
        let content = "---\r\ntitle: Windows\r\n---\r\nBody text\r\n";
        let (meta, body) = parse(content).unwrap();
        assert_eq!(meta.title(), Some("Windows"));
        assert_eq!(body, "Body text\r\n");
    }

    #[test]
    fn test_horizontal_rule_in_body_is_kept() {
        let content = "---\ntitle: Rules\n---\nAbove\n\n---\n\nBelow\n";
        let (meta, body) = parse(content).unwrap();
        assert_eq!(meta.title(), Some("Rules"));
        assert!(body.contains("Above"));
        assert!(body.contains("Below"));
    }

    #[test]
    fn test_unterminated_block_is_an_error() {
        let err = parse("---\ntitle: Oops\n\nNo closing line").unwrap_err();
        assert!(err.contains("not terminated"));
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        assert!(parse("---\ntitle: [unclosed\n---\nbody").is_err());
    }

    #[test]
    fn test_non_mapping_is_an_error() {
        let err = parse("---\n- just\n- a list\n---\nbody").unwrap_err();
        assert!(err.contains("mapping"));
    }

    #[test]
    fn test_four_dashes_is_not_a_delimiter() {
        let content = "----\ntitle: nope\n---\n";
        let (meta, body) = parse(content).unwrap();
        assert!(meta.is_empty());
        assert_eq!(body, content);
    }
}
