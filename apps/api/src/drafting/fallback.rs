//! Offline fallback draft, used when the model cannot be reached.
//!
//! The output is a JSON string in the same shape the model is asked for, so it goes
//! through the structured parser and defaulter like any model response.

use serde_json::json;

use crate::drafting::models::DraftRequest;

pub const FALLBACK_RISK_SUMMARY: &str = "The drafting model was unavailable, so this contract \
    was generated from a fallback template. Have it reviewed before execution.";

/// Builds the fallback JSON document for `request`. Request text is escaped by `serde_json`.
pub fn generate_fallback(request: &DraftRequest) -> String {
    let contract_type = &request.contract_type;
    let party_a = &request.party_a;
    let party_b = &request.party_b;
    let confidentiality = format!(
        "The parties acknowledge that confidential information may be disclosed during \
         their business relationship. {}",
        request.prompt
    );

    json!({
        "contractType": contract_type,
        "partyA": party_a,
        "partyB": party_b,
        "preamble": format!(
            "This {contract_type} Agreement (\"Agreement\") is entered into between \
             {party_a} (\"Disclosing Party\") and {party_b} (\"Receiving Party\")."
        ),
        "sections": [
            {
                "title": "Confidential Information",
                "content": confidentiality.trim_end(),
                "subsections": []
            },
            {
                "title": "Obligations",
                "content": "The Receiving Party agrees to the following obligations.",
                "subsections": [
                    "Maintain confidentiality of all disclosed information.",
                    "Use the information solely for the intended purpose.",
                    "Not disclose information to third parties without written consent."
                ]
            },
            {
                "title": "Term",
                "content": "This Agreement shall remain in effect for a period of two (2) years \
                            from the date of execution. Upon termination, all confidential \
                            materials shall be returned or destroyed.",
                "subsections": []
            },
            {
                "title": "Governing Law",
                "content": "This Agreement shall be governed by the laws of the applicable \
                            jurisdiction.",
                "subsections": []
            }
        ],
        "conclusion": format!(
            "IN WITNESS WHEREOF, the parties have executed this Agreement.\n\n\
             Party A: _________________________ ({party_a})\n\
             Party B: _________________________ ({party_b})"
        ),
        "riskAnalysis": {
            "overallRisk": "medium",
            "summary": FALLBACK_RISK_SUMMARY,
            "items": [
                {
                    "severity": "medium",
                    "title": "Generic Terms",
                    "description": "The contract uses generic template language that was not \
                                    tailored to the drafting request.",
                    "location": "Entire Agreement",
                    "recommendation": "Review every section and adapt it to the specific \
                                       transaction before signing."
                }
            ]
        }
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn request() -> DraftRequest {
        DraftRequest::new("NDA", "Acme Corp", "Globex LLC", "Protect the \"Falcon\" prototype.")
    }

    #[test]
    fn test_fallback_is_valid_json_with_four_sections() {
        let value: Value = serde_json::from_str(&generate_fallback(&request())).unwrap();

        let titles: Vec<_> = value["sections"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["title"].as_str().unwrap())
            .collect();
        assert_eq!(
            titles,
            vec!["Confidential Information", "Obligations", "Term", "Governing Law"]
        );
    }

    #[test]
    fn test_fallback_embeds_request_fields() {
        let value: Value = serde_json::from_str(&generate_fallback(&request())).unwrap();

        assert_eq!(value["contractType"], "NDA");
        assert_eq!(value["partyA"], "Acme Corp");
        assert_eq!(value["partyB"], "Globex LLC");
        assert!(value["sections"][0]["content"]
            .as_str()
            .unwrap()
            .ends_with("Protect the \"Falcon\" prototype."));
        assert!(value["conclusion"].as_str().unwrap().contains("Globex LLC"));
    }

    #[test]
    fn test_fallback_has_single_generic_risk_item() {
        let value: Value = serde_json::from_str(&generate_fallback(&request())).unwrap();
        let items = value["riskAnalysis"]["items"].as_array().unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["title"], "Generic Terms");
        assert_eq!(items[0]["severity"], "medium");
        assert_eq!(value["riskAnalysis"]["summary"], FALLBACK_RISK_SUMMARY);
    }

    #[test]
    fn test_fallback_is_deterministic() {
        assert_eq!(generate_fallback(&request()), generate_fallback(&request()));
    }
}
