//! Text section extractor: heuristic fallback for model output that is not usable JSON.
//!
//! A line is a heading when it starts with digits and a period (`1.`) or with
//! upper-case words followed by a colon (`CONFIDENTIALITY:`). Both patterns are
//! known to fire on some body text, for example a sentence opening with `1.5 million`
//! or `NOTE:`. They are kept as-is for compatibility with existing drafts.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::drafting::defaults::SIGNATURE_BOILERPLATE;
use crate::drafting::models::{PartialDocument, Section};

static NUMBERED_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.").expect("invalid numbered heading regex"));

static CAPS_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z ]+:").expect("invalid caps heading regex"));

const CONCLUSION_MARKER: &str = "signature";

fn is_heading(line: &str) -> bool {
    NUMBERED_HEADING.is_match(line) || CAPS_HEADING.is_match(line)
}

/// Heading text minus its leading `N.` numeral.
fn heading_title(line: &str) -> String {
    NUMBERED_HEADING.replace(line, "").trim().to_string()
}

/// Segments free text into a preamble, numbered sections and a conclusion.
///
/// Zero headings is a normal outcome: no sections, the whole text as preamble.
/// `subsections` are always empty; this extractor does not detect nesting.
pub fn extract_sections(raw: &str) -> PartialDocument {
    let mut preamble_lines: Vec<&str> = Vec::new();
    let mut sections: Vec<Section> = Vec::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    for line in raw.lines() {
        if is_heading(line) {
            if let Some((title, body)) = current.take() {
                push_section(&mut sections, title, &body);
            }
            current = Some((heading_title(line), Vec::new()));
        } else if line.trim().is_empty() {
            continue;
        } else if let Some((_, body)) = current.as_mut() {
            body.push(line);
        } else {
            preamble_lines.push(line);
        }
    }

    if let Some((title, body)) = current {
        push_section(&mut sections, title, &body);
    }

    let preamble = preamble_lines.join("\n").trim().to_string();

    debug!(
        "Text extraction found {} sections, preamble {} chars",
        sections.len(),
        preamble.len()
    );

    PartialDocument {
        preamble: (!preamble.is_empty()).then_some(preamble),
        sections,
        conclusion: Some(extract_conclusion(raw)),
        ..PartialDocument::default()
    }
}

/// A heading with no title or no body lines does not become a section.
fn push_section(sections: &mut Vec<Section>, title: String, body: &[&str]) {
    let content = body.join("\n").trim().to_string();
    if title.is_empty() || content.is_empty() {
        debug!("Skipping heading without body: {title:?}");
        return;
    }

    sections.push(Section {
        title,
        content,
        number: sections.len() as u32 + 1,
        subsections: Vec::new(),
    });
}

/// Everything from the last case-insensitive "signature" onward, else the boilerplate block.
fn extract_conclusion(raw: &str) -> String {
    // ASCII lowercasing keeps byte offsets valid for slicing `raw`.
    raw.to_ascii_lowercase()
        .rfind(CONCLUSION_MARKER)
        .map(|idx| raw[idx..].trim().to_string())
        .unwrap_or_else(|| SIGNATURE_BOILERPLATE.to_string())
}
