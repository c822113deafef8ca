//! Citation extraction and report rendering.
//!
//! Report markdown embeds citation markers of the form `[2309.00071]`. The
//! transform rewrites each canonicalizable marker into an addressable
//! markdown link (`[2309.00071](citation:ARXIV:2309.00071)`) while leaving
//! every other byte untouched, and the renderer turns those links into
//! clickable `<span>` elements carrying the canonical identifier so the view
//! layer can emit a selection event instead of navigating.

use crate::identifiers::{canonicalize, numeric_portion};
use crate::models::CitationToken;

use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use regex::Regex;

#[cfg(test)]
#[path = "citations_test.rs"]
mod citations_test;

/// Link scheme used for rewritten citation references.
pub const CITATION_SCHEME: &str = "citation:";

// ============================================================================
// Citation Transform
// ============================================================================

/// Scan `content` left-to-right for `[<digits>.<digits>]` markers and rewrite
/// each canonicalizable one into a `citation:` markdown link.
///
/// Markers whose payload fails canonicalization are left byte-for-byte
/// untouched, as is all surrounding text. The transform is idempotent:
/// markers already followed by a `(citation:...)` destination are recognized
/// as rewritten and passed through unchanged. Returns the rewritten document
/// and the ordered token list; token positions index into the output and
/// always span exactly the bracketed marker `[<raw>]`, whether or not a
/// destination follows it.
pub fn transform_citations(content: &str) -> (String, Vec<CitationToken>) {
    let marker = Regex::new(r"\[(\d+\.\d+)\]").unwrap();

    let mut out = String::with_capacity(content.len());
    let mut tokens = Vec::new();
    let mut last = 0;

    for caps in marker.captures_iter(content) {
        let whole = caps.get(0).unwrap();
        let raw = caps.get(1).unwrap().as_str();

        out.push_str(&content[last..whole.start()]);
        last = whole.end();

        let canonical = match canonicalize(raw) {
            Some(c) => c,
            None => {
                // Unrecognized payload: never corrupt it, never drop it
                out.push_str(whole.as_str());
                continue;
            }
        };

        let start = out.len();
        let end = start + whole.as_str().len();
        if content[whole.end()..].starts_with(&format!("({}", CITATION_SCHEME)) {
            // Already rewritten by a previous pass; the destination that
            // follows is copied verbatim with the surrounding text
            out.push_str(whole.as_str());
        } else {
            out.push_str(&format!("[{}]({}{})", raw, CITATION_SCHEME, canonical));
        }

        tokens.push(CitationToken {
            raw: raw.to_string(),
            canonical,
            start,
            end,
        });
    }

    out.push_str(&content[last..]);
    (out, tokens)
}

// ============================================================================
// Report Rendering
// ============================================================================

/// Transform citations in `content`, render the markdown to HTML, and
/// sanitize it. `citation:` links become `<span class="citation"
/// data-citation-id="...">` elements; the page script reads the attribute and
/// posts a citation-activation event on click, so activating a reference
/// never navigates.
pub fn render_report(content: &str) -> (String, Vec<CitationToken>) {
    let (transformed, tokens) = transform_citations(content);

    let mut events: Vec<Event> = Vec::new();
    let mut active_citation: Option<String> = None;

    for event in Parser::new(&transformed) {
        match event {
            Event::Start(Tag::Link { ref dest_url, .. })
                if dest_url.starts_with(CITATION_SCHEME) =>
            {
                active_citation =
                    Some(dest_url.trim_start_matches(CITATION_SCHEME).to_string());
            }
            Event::End(TagEnd::Link) if active_citation.is_some() => {
                let canonical = active_citation.take().unwrap();
                events.push(Event::Html(
                    format!(
                        r#"<span class="citation" data-citation-id="{}">[{}]</span>"#,
                        canonical,
                        numeric_portion(&canonical)
                    )
                    .into(),
                ));
            }
            // The literal link text is re-emitted inside the span
            Event::Text(_) if active_citation.is_some() => {}
            other => events.push(other),
        }
    }

    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, events.into_iter());

    let clean = ammonia::Builder::default()
        .add_tag_attributes("span", &["class", "data-citation-id"])
        .clean(&html)
        .to_string();

    (clean, tokens)
}
