// All model prompt constants for the drafting module.
// Reuses the JSON-only fragment from llm_client::prompts.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::drafting::models::DraftRequest;
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;

/// Contract drafting prompt template.
/// Replace: {json_only_instruction}, {contract_type}, {party_a}, {party_b}, {request}
pub const CONTRACT_DRAFT_PROMPT_TEMPLATE: &str = r#"You are a professional legal contract drafting assistant.

Draft a {contract_type} between the following parties:
- First Party (partyA): {party_a}
- Second Party (partyB): {party_b}

Return a JSON object with this EXACT schema (no extra fields):
{
  "preamble": "Opening recitals naming both parties and the purpose of the agreement",
  "sections": [
    {
      "title": "Definitions",
      "content": "Full clause text",
      "subsections": ["Optional sub-clause text"]
    }
  ],
  "conclusion": "Closing statement and signature block for both parties",
  "riskAnalysis": {
    "overallRisk": "low | medium | high",
    "summary": "One or two sentences on the overall legal risk",
    "items": [
      {
        "severity": "low | medium | high",
        "title": "Short risk name",
        "description": "What the risk is",
        "location": "Which section it appears in",
        "recommendation": "How to mitigate it"
      }
    ]
  }
}

Rules:
1. Include every clause a {contract_type} normally needs, in a sensible order
2. `subsections` may be an empty array but must always be present
3. `riskAnalysis.items` must contain at least one entry
4. Use professional, legally sound language

{json_only_instruction}
Return ONLY the JSON object, nothing else.

DRAFTING REQUEST:
{request}"#;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(json_only_instruction|contract_type|party_a|party_b|request)\}")
        .expect("invalid placeholder regex")
});

/// Builds the drafting prompt. Request fields are embedded verbatim.
///
/// All placeholders are substituted in one pass over the template, so text inside a
/// substituted value is never expanded again.
pub fn build_draft_prompt(request: &DraftRequest) -> String {
    PLACEHOLDER
        .replace_all(CONTRACT_DRAFT_PROMPT_TEMPLATE, |caps: &Captures| {
            match &caps[1] {
                "json_only_instruction" => JSON_ONLY_INSTRUCTION,
                "contract_type" => request.contract_type.as_str(),
                "party_a" => request.party_a.as_str(),
                "party_b" => request.party_b.as_str(),
                _ => request.prompt.as_str(),
            }
            .to_string()
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> DraftRequest {
        DraftRequest::new(
            "NDA",
            "Acme Corp",
            "Globex LLC",
            "Mutual NDA covering a 6-month hardware pilot",
        )
    }

    #[test]
    fn test_prompt_embeds_request_fields_verbatim() {
        let prompt = build_draft_prompt(&request());
        assert!(prompt.contains("Draft a NDA between"));
        assert!(prompt.contains("First Party (partyA): Acme Corp"));
        assert!(prompt.contains("Second Party (partyB): Globex LLC"));
        assert!(prompt.contains("Mutual NDA covering a 6-month hardware pilot"));
    }

    #[test]
    fn test_prompt_enumerates_required_keys() {
        let prompt = build_draft_prompt(&request());
        for key in [
            "\"preamble\"",
            "\"sections\"",
            "\"title\"",
            "\"content\"",
            "\"subsections\"",
            "\"conclusion\"",
            "\"riskAnalysis\"",
            "\"overallRisk\"",
            "\"summary\"",
            "\"items\"",
            "\"severity\"",
            "\"recommendation\"",
        ] {
            assert!(prompt.contains(key), "prompt is missing {key}");
        }
    }

    #[test]
    fn test_prompt_demands_json_only() {
        let prompt = build_draft_prompt(&request());
        assert!(prompt.contains(JSON_ONLY_INSTRUCTION));
        assert!(prompt.contains("Return ONLY the JSON object"));
        assert!(!prompt.contains("{json_only_instruction}"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(build_draft_prompt(&request()), build_draft_prompt(&request()));
    }

    #[test]
    fn test_placeholder_text_in_request_is_not_expanded() {
        let request = DraftRequest::new("NDA", "Acme", "Globex", "keep {party_a} literal");
        let prompt = build_draft_prompt(&request);
        assert!(prompt.contains("keep {party_a} literal"));
    }

    #[test]
    fn test_placeholder_text_in_party_names_is_not_expanded() {
        let request = DraftRequest::new("{party_b}", "{request}", "Globex", "SECRET INSTRUCTION");
        let prompt = build_draft_prompt(&request);

        assert!(prompt.contains("Draft a {party_b} between"));
        assert!(prompt.contains("First Party (partyA): {request}"));
        assert!(prompt.contains("Second Party (partyB): Globex"));
        assert_eq!(prompt.matches("SECRET INSTRUCTION").count(), 1);
    }

    #[test]
    fn test_every_placeholder_is_substituted() {
        let prompt = build_draft_prompt(&request());
        assert!(!PLACEHOLDER.is_match(&prompt));
    }
}
