//! Show a single content entry

use anyhow::Result;

use crate::content::{Category, ContentRecord, MarkdownRenderer};
use crate::Folio;

/// Render a record's metadata followed by its body (or the body as HTML)
pub fn render(folio: &Folio, record: &ContentRecord, html: bool) -> Result<String> {
    let mut out = String::new();

    out.push_str(&format!("slug: {}\n", record.slug));
    for (key, value) in record.metadata.iter() {
        let value = match value {
            serde_yaml::Value::String(s) => s.clone(),
            other => serde_json::to_string(other)?,
        };
        out.push_str(&format!("{}: {}\n", key, value));
    }

    let body = record.body.as_deref().unwrap_or_default();
    out.push('\n');
    if html {
        let renderer = MarkdownRenderer::from_config(&folio.config.highlight);
        out.push_str(&renderer.render(body)?);
    } else {
        out.push_str(body);
    }

    Ok(out)
}

/// Print one entry
pub fn run(folio: &Folio, category: Category, slug: &str, html: bool) -> Result<()> {
    let record = folio.loader().get(category, slug)?;
    print!("{}", render(folio, &record, html)?);
    Ok(())
}
