//! Structured parser: decodes sanitized model output into a `PartialDocument`.
//!
//! Field lookup goes through `JsonFields`, which answers `None` for absent keys and
//! wrong scalar types instead of failing. Only a broken document shape (not JSON,
//! not an object, `sections` not a list, a section that is not an object) is
//! reported as `MalformedStructuredResponse`.

use serde_json::{Map, Value};
use tracing::warn;

use crate::drafting::error::DraftError;
use crate::drafting::models::{
    PartialDocument, PartialRiskAnalysis, PartialRiskItem, Section, Severity,
};

/// Optional-field view over a JSON object. Each lookup takes a list of accepted
/// key spellings and returns the first usable hit.
#[derive(Clone, Copy)]
struct JsonFields<'a>(&'a Map<String, Value>);

impl<'a> JsonFields<'a> {
    /// First non-blank string under any of `keys`, trimmed.
    fn text(&self, keys: &[&str]) -> Option<String> {
        keys.iter()
            .filter_map(|k| self.0.get(*k))
            .filter_map(Value::as_str)
            .map(str::trim)
            .find(|s| !s.is_empty())
            .map(str::to_string)
    }

    fn object(&self, keys: &[&str]) -> Option<JsonFields<'a>> {
        let map: &'a Map<String, Value> = self.0;
        keys.iter()
            .filter_map(|k| map.get(*k))
            .find_map(Value::as_object)
            .map(JsonFields)
    }

    /// `Ok(None)` when absent or null, `Err` when present but not an array.
    fn list(&self, keys: &[&str]) -> Result<Option<&'a Vec<Value>>, DraftError> {
        let map: &'a Map<String, Value> = self.0;
        for key in keys {
            match map.get(*key) {
                None | Some(Value::Null) => continue,
                Some(Value::Array(items)) => return Ok(Some(items)),
                Some(_) => {
                    return Err(DraftError::MalformedStructuredResponse(format!(
                        "`{key}` is not a list"
                    )))
                }
            }
        }
        Ok(None)
    }

    fn severity(&self, keys: &[&str]) -> Option<Severity> {
        let raw = self.text(keys)?;
        match raw.parse::<Severity>() {
            Ok(severity) => Some(severity),
            Err(e) => {
                warn!("Ignoring model-supplied severity: {e}");
                None
            }
        }
    }
}

/// Parses sanitized model text. Sections are numbered 1..N in array order.
pub fn parse_structured(text: &str) -> Result<PartialDocument, DraftError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| DraftError::MalformedStructuredResponse(e.to_string()))?;

    let root = value.as_object().map(JsonFields).ok_or_else(|| {
        DraftError::MalformedStructuredResponse("top-level value is not an object".to_string())
    })?;

    let parties = root.object(&["parties"]);

    Ok(PartialDocument {
        title: root.text(&["title", "contractTitle", "contract_title"]),
        contract_type: root.text(&["contractType", "contract_type"]),
        party_a: party(root, parties, &["partyA", "party_a"]),
        party_b: party(root, parties, &["partyB", "party_b"]),
        generated_at: None,
        preamble: root.text(&["preamble"]),
        sections: parse_sections(root)?,
        conclusion: root.text(&["conclusion"]),
        jurisdiction: root.text(&["jurisdiction"]),
        governing_law: root.text(&["governingLaw", "governing_law"]),
        effective_date: root.text(&["effectiveDate", "effective_date"]),
        expiration_date: root.text(&["expirationDate", "expiration_date"]),
        risk_analysis: parse_risk_analysis(root),
    })
}

/// Party names may sit at the top level or under a `parties` object.
fn party(root: JsonFields<'_>, parties: Option<JsonFields<'_>>, keys: &[&str]) -> Option<String> {
    root.text(keys).or_else(|| parties.and_then(|p| p.text(keys)))
}

fn parse_sections(root: JsonFields<'_>) -> Result<Vec<Section>, DraftError> {
    let Some(entries) = root.list(&["sections", "clauses"])? else {
        return Ok(Vec::new());
    };

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| -> Result<Section, DraftError> {
            let fields = entry.as_object().map(JsonFields).ok_or_else(|| {
                DraftError::MalformedStructuredResponse(format!("section {} is not an object", i + 1))
            })?;

            Ok(Section {
                title: fields.text(&["title", "heading"]).unwrap_or_default(),
                content: fields.text(&["content", "body", "text"]).unwrap_or_default(),
                number: i as u32 + 1,
                subsections: parse_subsections(fields),
            })
        })
        .collect()
}

/// String entries are trimmed; object entries contribute their `content` or `title`.
/// Entries that yield no text (blank strings, numbers, nulls) are dropped, so every
/// surviving subsection is a non-empty clause in its original order.
fn parse_subsections(section: JsonFields<'_>) -> Vec<String> {
    let Ok(Some(entries)) = section.list(&["subsections"]) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| match entry {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Object(map) => JsonFields(map).text(&["content", "text", "title"]),
            _ => None,
        })
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_risk_analysis(root: JsonFields<'_>) -> Option<PartialRiskAnalysis> {
    let Some(risk) = root.object(&["riskAnalysis", "risk_analysis"]) else {
        if root.0.contains_key("riskAnalysis") {
            warn!("Ignoring `riskAnalysis` that is not an object");
        }
        return None;
    };

    let items = match risk.list(&["items", "risks"]) {
        Ok(Some(entries)) => entries
            .iter()
            .filter_map(Value::as_object)
            .map(|map| {
                let item = JsonFields(map);
                PartialRiskItem {
                    severity: item.severity(&["severity", "type", "level"]),
                    title: item.text(&["title"]),
                    description: item.text(&["description"]),
                    location: item.text(&["location"]),
                    recommendation: item.text(&["recommendation"]),
                }
            })
            .collect(),
        Ok(None) => Vec::new(),
        Err(e) => {
            warn!("Ignoring risk items: {e}");
            Vec::new()
        }
    };

    Some(PartialRiskAnalysis {
        overall_risk: risk.severity(&["overallRisk", "overall_risk"]),
        summary: risk.text(&["summary"]),
        items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_RESPONSE: &str = r#"{
        "preamble": "This Mutual Non-Disclosure Agreement is made between Acme Corp and Globex LLC.",
        "sections": [
            {"title": "Definitions", "content": "Confidential Information means...", "subsections": ["(a) Trade secrets", "(b) Source code"]},
            {"title": "Obligations", "content": "The Receiving Party shall...", "subsections": []},
            {"title": "Term", "content": "Two (2) years.", "subsections": []}
        ],
        "conclusion": "IN WITNESS WHEREOF the parties sign below.",
        "riskAnalysis": {
            "overallRisk": "Low",
            "summary": "Balanced mutual terms.",
            "items": [
                {"severity": "high", "title": "Residuals", "description": "No residuals clause.", "location": "Obligations", "recommendation": "Add one."}
            ]
        }
    }"#;

    #[test]
    fn test_full_response_parses_every_field() {
        let doc = parse_structured(FULL_RESPONSE).unwrap();

        assert!(doc.preamble.unwrap().starts_with("This Mutual"));
        assert_eq!(doc.conclusion.as_deref(), Some("IN WITNESS WHEREOF the parties sign below."));
        assert_eq!(doc.sections.len(), 3);

        let risk = doc.risk_analysis.unwrap();
        assert_eq!(risk.overall_risk, Some(Severity::Low));
        assert_eq!(risk.summary.as_deref(), Some("Balanced mutual terms."));
        assert_eq!(risk.items.len(), 1);
        assert_eq!(risk.items[0].severity, Some(Severity::High));
        assert_eq!(risk.items[0].location.as_deref(), Some("Obligations"));
    }

    #[test]
    fn test_sections_match_json_entry_for_entry() {
        let doc = parse_structured(FULL_RESPONSE).unwrap();
        let titles: Vec<_> = doc.sections.iter().map(|s| s.title.as_str()).collect();
        let numbers: Vec<_> = doc.sections.iter().map(|s| s.number).collect();

        assert_eq!(titles, vec!["Definitions", "Obligations", "Term"]);
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(doc.sections[0].content, "Confidential Information means...");
        assert_eq!(
            doc.sections[0].subsections,
            vec!["(a) Trade secrets".to_string(), "(b) Source code".to_string()]
        );
    }

    #[test]
    fn test_model_supplied_numbers_are_reassigned() {
        let json = r#"{"sections": [
            {"title": "B", "content": "b", "number": 7},
            {"title": "A", "content": "a", "number": 3}
        ]}"#;
        let doc = parse_structured(json).unwrap();
        assert_eq!(doc.sections[0].number, 1);
        assert_eq!(doc.sections[1].number, 2);
        assert_eq!(doc.sections[0].title, "B");
    }

    #[test]
    fn test_absent_fields_stay_unset() {
        let doc = parse_structured(r#"{"preamble": "only this"}"#).unwrap();
        assert_eq!(doc.preamble.as_deref(), Some("only this"));
        assert!(doc.title.is_none());
        assert!(doc.conclusion.is_none());
        assert!(doc.sections.is_empty());
        assert!(doc.risk_analysis.is_none());
    }

    #[test]
    fn test_blank_and_wrongly_typed_scalars_are_unset() {
        let doc = parse_structured(r#"{"preamble": "   ", "conclusion": 42, "jurisdiction": null}"#)
            .unwrap();
        assert!(doc.preamble.is_none());
        assert!(doc.conclusion.is_none());
        assert!(doc.jurisdiction.is_none());
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let result = parse_structured("{\"preamble\": \"unterminated");
        assert!(matches!(
            result,
            Err(DraftError::MalformedStructuredResponse(_))
        ));
    }

    #[test]
    fn test_non_object_top_level_is_malformed() {
        assert!(matches!(
            parse_structured(r#"["a", "b"]"#),
            Err(DraftError::MalformedStructuredResponse(_))
        ));
    }

    #[test]
    fn test_sections_not_a_list_is_malformed() {
        let result = parse_structured(r#"{"sections": "Definitions, Term"}"#);
        match result {
            Err(DraftError::MalformedStructuredResponse(msg)) => assert!(msg.contains("sections")),
            other => panic!("expected malformed, got {other:?}"),
        }
    }

    #[test]
    fn test_section_entry_not_an_object_is_malformed() {
        assert!(matches!(
            parse_structured(r#"{"sections": ["Definitions"]}"#),
            Err(DraftError::MalformedStructuredResponse(_))
        ));
    }

    #[test]
    fn test_legacy_snake_case_schema_is_accepted() {
        let json = r#"{
            "contract_title": "Consulting Agreement",
            "contract_type": "Consulting Agreement",
            "parties": {"party_a": "Acme", "party_b": "Jane Doe"},
            "effective_date": "2024-01-01",
            "clauses": [{"clause_number": "1", "title": "Scope", "content": "Advisory services."}]
        }"#;
        let doc = parse_structured(json).unwrap();
        assert_eq!(doc.title.as_deref(), Some("Consulting Agreement"));
        assert_eq!(doc.party_a.as_deref(), Some("Acme"));
        assert_eq!(doc.party_b.as_deref(), Some("Jane Doe"));
        assert_eq!(doc.effective_date.as_deref(), Some("2024-01-01"));
        assert_eq!(doc.sections[0].title, "Scope");
    }

    #[test]
    fn test_unknown_severity_is_treated_as_absent() {
        let json = r#"{"riskAnalysis": {"overallRisk": "spicy", "items": [{"type": "MODERATE", "title": "x"}]}}"#;
        let risk = parse_structured(json).unwrap().risk_analysis.unwrap();
        assert_eq!(risk.overall_risk, None);
        assert_eq!(risk.items[0].severity, Some(Severity::Medium));
    }

    #[test]
    fn test_risk_analysis_of_wrong_type_is_ignored() {
        let doc = parse_structured(r#"{"riskAnalysis": "low"}"#).unwrap();
        assert!(doc.risk_analysis.is_none());
    }

    #[test]
    fn test_object_subsections_contribute_their_text() {
        let json = r#"{"sections": [{"title": "T", "content": "c", "subsections": [
            {"title": "1.1", "content": "first"}, "second", 3, ""
        ]}]}"#;
        let doc = parse_structured(json).unwrap();
        assert_eq!(
            doc.sections[0].subsections,
            vec!["first".to_string(), "second".to_string()]
        );
    }

    #[test]
    fn test_subsections_are_trimmed_and_empty_entries_dropped_in_order() {
        let json = r#"{"sections": [{"title": "T", "content": "c", "subsections": [
            "  (a) first  ", null, "   ", {"note": "no text keys"}, "(b) second"
        ]}]}"#;
        let doc = parse_structured(json).unwrap();
        assert_eq!(
            doc.sections[0].subsections,
            vec!["(a) first".to_string(), "(b) second".to_string()]
        );
    }
}
