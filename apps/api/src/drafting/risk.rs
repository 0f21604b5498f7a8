//! Risk annotation: adopts model-supplied risk data or synthesizes it from the contract type.

use crate::drafting::models::{PartialRiskAnalysis, PartialRiskItem, RiskAnalysis, RiskItem, Severity};

pub const DEFAULT_RISK_SUMMARY: &str = "The contract contains standard terms with moderate risk levels. \
    Review recommended sections before execution.";

const DEFAULT_ITEM_TITLE: &str = "Unspecified Risk";
const DEFAULT_ITEM_DESCRIPTION: &str = "No description was provided for this risk.";
const DEFAULT_ITEM_LOCATION: &str = "General";
const DEFAULT_ITEM_RECOMMENDATION: &str =
    "Review this provision with legal counsel before execution.";

/// Contract type that receives the confidentiality-specific risk items. Exact, case-sensitive.
const NDA_CONTRACT_TYPE: &str = "NDA";

/// Adopts `parsed` field by field, or synthesizes a full analysis when it is absent.
///
/// An adopted analysis with no usable items gets the synthesized items for the
/// contract type, so `items` is never empty.
pub fn annotate_risk(parsed: Option<PartialRiskAnalysis>, contract_type: &str) -> RiskAnalysis {
    let Some(parsed) = parsed else {
        return synthesize_risk_analysis(contract_type);
    };

    let mut items: Vec<RiskItem> = parsed.items.into_iter().map(adopt_item).collect();
    if items.is_empty() {
        items = synthesize_risk_items(contract_type);
    }

    RiskAnalysis {
        overall_risk: parsed.overall_risk.unwrap_or_default(),
        summary: parsed
            .summary
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_RISK_SUMMARY.to_string()),
        items,
    }
}

fn adopt_item(item: PartialRiskItem) -> RiskItem {
    RiskItem {
        severity: item.severity.unwrap_or_default(),
        title: text_or(item.title, DEFAULT_ITEM_TITLE),
        description: text_or(item.description, DEFAULT_ITEM_DESCRIPTION),
        location: text_or(item.location, DEFAULT_ITEM_LOCATION),
        recommendation: text_or(item.recommendation, DEFAULT_ITEM_RECOMMENDATION),
    }
}

fn text_or(value: Option<String>, default: &str) -> String {
    value
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Deterministic analysis used when the model supplied none. Overall risk is always medium.
pub fn synthesize_risk_analysis(contract_type: &str) -> RiskAnalysis {
    RiskAnalysis {
        overall_risk: Severity::Medium,
        summary: DEFAULT_RISK_SUMMARY.to_string(),
        items: synthesize_risk_items(contract_type),
    }
}

/// Two confidentiality items for `"NDA"`, plus the jurisdiction item for every type.
pub fn synthesize_risk_items(contract_type: &str) -> Vec<RiskItem> {
    let mut items = Vec::new();

    if contract_type == NDA_CONTRACT_TYPE {
        items.push(RiskItem {
            severity: Severity::Medium,
            title: "Broad Definition of Confidential Information".to_string(),
            description: "The definition of confidential information may be too broad, \
                potentially restricting normal business operations."
                .to_string(),
            location: "Definitions Section".to_string(),
            recommendation: "Consider narrowing the scope of confidential information \
                to specific categories."
                .to_string(),
        });
        items.push(RiskItem {
            severity: Severity::Low,
            title: "Term Duration".to_string(),
            description: "The confidentiality obligations may extend beyond the \
                business relationship."
                .to_string(),
            location: "Term Section".to_string(),
            recommendation: "Ensure the term is reasonable for the type of information \
                being protected."
                .to_string(),
        });
    }

    items.push(RiskItem {
        severity: Severity::Medium,
        title: "Jurisdiction and Governing Law".to_string(),
        description: "Contract specifies governing law and jurisdiction which may impact \
            enforceability."
            .to_string(),
        location: "Governing Law Section".to_string(),
        recommendation: "Ensure the chosen jurisdiction is favorable and accessible to \
            both parties."
            .to_string(),
    });

    items
}
