//! Defaulter / validator: the single point where a `ContractDocument` is completed.
//!
//! Every rule is independent and only fires on an unset or blank field, so running
//! the stage on an already complete document returns it unchanged.

use chrono::{DateTime, Days, Months, NaiveDate, Utc};
use tracing::debug;

use crate::drafting::error::DraftError;
use crate::drafting::models::{ContractDocument, DraftRequest, PartialDocument, Section};
use crate::drafting::risk::annotate_risk;

pub const DEFAULT_JURISDICTION: &str = "United States";
pub const DEFAULT_GOVERNING_LAW: &str = "State Law";

pub const SIGNATURE_BOILERPLATE: &str = "IN WITNESS WHEREOF, the parties have executed this \
Agreement as of the date first written above.\n\n\
Party A: _________________________\n\
Party B: _________________________";

const RESERVED_CLAUSE: &str = "This section is intentionally left blank.";

/// The fixed clause set used whenever a draft has no sections.
const BOILERPLATE_CLAUSES: &[(&str, &str)] = &[
    (
        "Definitions",
        "In this Agreement, the following terms shall have the meanings set forth below: \
         'Agreement' refers to this contract and all attachments hereto; 'Effective Date' means \
         the date first written above; 'Party' or 'Parties' refers to the parties to this Agreement.",
    ),
    (
        "Purpose and Scope",
        "This Agreement sets forth the terms and conditions under which the Parties agree to \
         conduct their business relationship. The scope of this Agreement encompasses all \
         activities, obligations, and rights detailed herein.",
    ),
    (
        "Obligations",
        "Each Party agrees to fulfill all obligations set forth in this Agreement in a timely and \
         professional manner. Both Parties shall act in good faith and shall cooperate with each \
         other to achieve the purposes of this Agreement.",
    ),
    (
        "Term and Termination",
        "This Agreement shall commence on the Effective Date and continue until terminated by \
         either Party upon thirty (30) days written notice. Either Party may terminate immediately \
         for material breach by the other Party.",
    ),
    (
        "Confidentiality",
        "Each Party acknowledges that it may have access to confidential information of the other \
         Party. Both Parties agree to maintain the confidentiality of such information and not to \
         disclose it to third parties without prior written consent.",
    ),
    (
        "Dispute Resolution",
        "Any disputes arising out of or in connection with this Agreement shall first be attempted \
         to be resolved through good faith negotiations. If negotiations fail, disputes shall be \
         resolved through binding arbitration in accordance with applicable laws.",
    ),
    (
        "Governing Law",
        "This Agreement shall be governed by and construed in accordance with the laws of the \
         applicable jurisdiction, without regard to its conflict of law provisions.",
    ),
    (
        "Entire Agreement",
        "This Agreement constitutes the entire agreement between the Parties and supersedes all \
         prior understandings and agreements, whether written or oral, relating to the subject \
         matter hereof.",
    ),
];

/// The eight boilerplate clauses, numbered 1–8.
pub fn boilerplate_sections() -> Vec<Section> {
    BOILERPLATE_CLAUSES
        .iter()
        .enumerate()
        .map(|(i, (title, content))| Section {
            title: title.to_string(),
            content: content.to_string(),
            number: i as u32 + 1,
            subsections: Vec::new(),
        })
        .collect()
}

/// Returns the field's value, or the default when it is unset or blank.
fn filled(value: Option<String>, field: &'static str, default: impl FnOnce() -> String) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => {
            debug!("{}; applying default", DraftError::ValidationGap { field });
            default()
        }
    }
}

pub(crate) fn one_year_after(date: NaiveDate) -> NaiveDate {
    date.checked_add_months(Months::new(12))
        .or_else(|| date.checked_add_days(Days::new(365)))
        .unwrap_or(date)
}

/// Completes a partial draft. `now` drives `generatedAt` and the default dates.
pub fn fill_defaults(
    partial: PartialDocument,
    request: &DraftRequest,
    now: DateTime<Utc>,
) -> ContractDocument {
    let today = now.date_naive();

    let contract_type = filled(partial.contract_type, "contractType", || {
        request.contract_type.clone()
    });
    let party_a = filled(partial.party_a, "partyA", || request.party_a.clone());
    let party_b = filled(partial.party_b, "partyB", || request.party_b.clone());
    let title = filled(partial.title, "title", || format!("{contract_type} Agreement"));
    let effective_date = filled(partial.effective_date, "effectiveDate", || today.to_string());
    let expiration_date = filled(partial.expiration_date, "expirationDate", || {
        one_year_after(today).to_string()
    });
    let preamble = filled(partial.preamble, "preamble", || {
        format!(
            "This {contract_type} Agreement (the \"Agreement\") is entered into as of \
             {effective_date} by and between {party_a} (\"Party A\") and {party_b} (\"Party B\")."
        )
    });
    let conclusion = filled(partial.conclusion, "conclusion", || {
        SIGNATURE_BOILERPLATE.to_string()
    });
    let jurisdiction = filled(partial.jurisdiction, "jurisdiction", || {
        DEFAULT_JURISDICTION.to_string()
    });
    let governing_law = filled(partial.governing_law, "governingLaw", || {
        DEFAULT_GOVERNING_LAW.to_string()
    });

    let sections = if partial.sections.is_empty() {
        debug!(
            "{}; using boilerplate clauses",
            DraftError::ValidationGap { field: "sections" }
        );
        boilerplate_sections()
    } else {
        normalize_sections(partial.sections)
    };

    if partial.risk_analysis.is_none() {
        debug!(
            "{}; synthesizing",
            DraftError::ValidationGap {
                field: "riskAnalysis"
            }
        );
    }
    let risk_analysis = annotate_risk(partial.risk_analysis, &contract_type);

    ContractDocument {
        title,
        contract_type,
        party_a,
        party_b,
        generated_at: partial.generated_at.unwrap_or(now),
        preamble,
        sections,
        conclusion,
        jurisdiction,
        governing_law,
        effective_date,
        expiration_date,
        risk_analysis,
    }
}

/// Renumbers 1..N and fills blank titles and bodies.
fn normalize_sections(sections: Vec<Section>) -> Vec<Section> {
    sections
        .into_iter()
        .enumerate()
        .map(|(i, section)| {
            let number = i as u32 + 1;
            Section {
                title: filled(Some(section.title), "sections[].title", || {
                    format!("Section {number}")
                }),
                content: filled(Some(section.content), "sections[].content", || {
                    RESERVED_CLAUSE.to_string()
                }),
                number,
                subsections: section.subsections,
            }
        })
        .collect()
}

/// Re-checks every document invariant. A failure here means a defaulting rule is missing.
pub fn validate(doc: &ContractDocument) -> Result<(), DraftError> {
    let required = [
        ("title", &doc.title),
        ("contractType", &doc.contract_type),
        ("partyA", &doc.party_a),
        ("partyB", &doc.party_b),
        ("preamble", &doc.preamble),
        ("conclusion", &doc.conclusion),
        ("jurisdiction", &doc.jurisdiction),
        ("governingLaw", &doc.governing_law),
        ("effectiveDate", &doc.effective_date),
        ("expirationDate", &doc.expiration_date),
        ("riskAnalysis.summary", &doc.risk_analysis.summary),
    ];
    if let Some(&(field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
        return Err(DraftError::ValidationGap { field });
    }

    if doc.sections.is_empty() {
        return Err(DraftError::ValidationGap { field: "sections" });
    }
    for (i, section) in doc.sections.iter().enumerate() {
        if section.number != i as u32 + 1 {
            return Err(DraftError::ValidationGap {
                field: "sections[].number",
            });
        }
        if section.title.trim().is_empty() || section.content.trim().is_empty() {
            return Err(DraftError::ValidationGap {
                field: "sections[].title/content",
            });
        }
    }

    if doc.risk_analysis.items.is_empty() {
        return Err(DraftError::ValidationGap {
            field: "riskAnalysis.items",
        });
    }
    let blank_item = doc.risk_analysis.items.iter().any(|item| {
        [
            &item.title,
            &item.description,
            &item.location,
            &item.recommendation,
        ]
        .iter()
        .any(|v| v.trim().is_empty())
    });
    if blank_item {
        return Err(DraftError::ValidationGap {
            field: "riskAnalysis.items[]",
        });
    }

    Ok(())
}
