//! Drafting data model: the request, the caller-facing document, and the partial
//! document every pipeline stage hands to the defaulter.
//!
//! `ContractDocument` is only ever built by `defaults::fill_defaults`; earlier stages
//! work on `PartialDocument`, whose fields may all be unset.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::drafting::error::DraftError;

const DEFAULT_CONTRACT_TYPE: &str = "General Agreement";
const DEFAULT_PARTY_A: &str = "Party A";
const DEFAULT_PARTY_B: &str = "Party B";

// ────────────────────────────────────────────────────────────────────────────
// Request
// ────────────────────────────────────────────────────────────────────────────

/// Incoming drafting request. Build with `DraftRequest::new` (or normalize a
/// deserialized one) so the type and party names are never blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRequest {
    #[serde(default)]
    pub contract_type: String,
    #[serde(default)]
    pub party_a: String,
    #[serde(default)]
    pub party_b: String,
    #[serde(default)]
    pub prompt: String,
}

impl DraftRequest {
    pub fn new(
        contract_type: impl Into<String>,
        party_a: impl Into<String>,
        party_b: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            contract_type: contract_type.into(),
            party_a: party_a.into(),
            party_b: party_b.into(),
            prompt: prompt.into(),
        }
        .normalized()
    }

    /// Trims every field and substitutes placeholders for a blank type or party.
    pub fn normalized(self) -> Self {
        Self {
            contract_type: or_placeholder(self.contract_type, DEFAULT_CONTRACT_TYPE),
            party_a: or_placeholder(self.party_a, DEFAULT_PARTY_A),
            party_b: or_placeholder(self.party_b, DEFAULT_PARTY_B),
            prompt: self.prompt.trim().to_string(),
        }
    }
}

fn or_placeholder(value: String, placeholder: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        placeholder.to_string()
    } else {
        trimmed.to_string()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Severity
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
}

/// Accepted spellings, compared after trimming and ASCII-lowercasing.
const SEVERITY_ALIASES: &[(&str, Severity)] = &[
    ("low", Severity::Low),
    ("minor", Severity::Low),
    ("medium", Severity::Medium),
    ("moderate", Severity::Medium),
    ("med", Severity::Medium),
    ("high", Severity::High),
    ("severe", Severity::High),
    ("critical", Severity::High),
    ("major", Severity::High),
];

impl FromStr for Severity {
    type Err = DraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        SEVERITY_ALIASES
            .iter()
            .find(|(alias, _)| *alias == key)
            .map(|(_, severity)| *severity)
            .ok_or_else(|| DraftError::UnknownEnumValue {
                kind: "severity",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        };
        f.write_str(s)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Caller-facing document
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub title: String,
    pub content: String,
    /// 1-based, contiguous across the document.
    pub number: u32,
    pub subsections: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskItem {
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub location: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAnalysis {
    pub overall_risk: Severity,
    pub summary: String,
    /// Never empty.
    pub items: Vec<RiskItem>,
}

/// The fully populated draft returned to callers. Every string field is non-blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDocument {
    pub title: String,
    pub contract_type: String,
    pub party_a: String,
    pub party_b: String,
    pub generated_at: DateTime<Utc>,
    pub preamble: String,
    pub sections: Vec<Section>,
    pub conclusion: String,
    pub jurisdiction: String,
    pub governing_law: String,
    pub effective_date: String,
    pub expiration_date: String,
    pub risk_analysis: RiskAnalysis,
}

// ────────────────────────────────────────────────────────────────────────────
// Partial document (pre-defaulting)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialRiskItem {
    pub severity: Option<Severity>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub recommendation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialRiskAnalysis {
    pub overall_risk: Option<Severity>,
    pub summary: Option<String>,
    pub items: Vec<PartialRiskItem>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialDocument {
    pub title: Option<String>,
    pub contract_type: Option<String>,
    pub party_a: Option<String>,
    pub party_b: Option<String>,
    pub generated_at: Option<DateTime<Utc>>,
    pub preamble: Option<String>,
    pub sections: Vec<Section>,
    pub conclusion: Option<String>,
    pub jurisdiction: Option<String>,
    pub governing_law: Option<String>,
    pub effective_date: Option<String>,
    pub expiration_date: Option<String>,
    pub risk_analysis: Option<PartialRiskAnalysis>,
}

impl From<RiskItem> for PartialRiskItem {
    fn from(item: RiskItem) -> Self {
        Self {
            severity: Some(item.severity),
            title: Some(item.title),
            description: Some(item.description),
            location: Some(item.location),
            recommendation: Some(item.recommendation),
        }
    }
}

impl From<RiskAnalysis> for PartialRiskAnalysis {
    fn from(analysis: RiskAnalysis) -> Self {
        Self {
            overall_risk: Some(analysis.overall_risk),
            summary: Some(analysis.summary),
            items: analysis.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Lets a finished document go back through the defaulter unchanged.
impl From<ContractDocument> for PartialDocument {
    fn from(doc: ContractDocument) -> Self {
        Self {
            title: Some(doc.title),
            contract_type: Some(doc.contract_type),
            party_a: Some(doc.party_a),
            party_b: Some(doc.party_b),
            generated_at: Some(doc.generated_at),
            preamble: Some(doc.preamble),
            sections: doc.sections,
            conclusion: Some(doc.conclusion),
            jurisdiction: Some(doc.jurisdiction),
            governing_law: Some(doc.governing_law),
            effective_date: Some(doc.effective_date),
            expiration_date: Some(doc.expiration_date),
            risk_analysis: Some(doc.risk_analysis.into()),
        }
    }
}
