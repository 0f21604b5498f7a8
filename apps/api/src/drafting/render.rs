//! Plain-text rendering of a drafted contract.

use crate::drafting::models::ContractDocument;

const HEAVY_RULE: &str = "═══════════════════════════════════════════════════════════════";
const LIGHT_RULE: &str = "───────────────────────────────────────────────────────────────";

pub fn render_plain_text(doc: &ContractDocument) -> String {
    let mut out = String::new();

    out.push_str(&format!("{HEAVY_RULE}\n"));
    out.push_str(&format!("         {}\n", doc.title.to_uppercase()));
    out.push_str(&format!("{HEAVY_RULE}\n\n"));

    out.push_str(&format!("Contract Type: {}\n", doc.contract_type));
    out.push_str(&format!("Effective Date: {}\n", doc.effective_date));
    out.push_str(&format!("Expiration Date: {}\n", doc.expiration_date));
    out.push_str(&format!("Jurisdiction: {}\n", doc.jurisdiction));
    out.push_str(&format!("Governing Law: {}\n\n", doc.governing_law));

    out.push_str("PARTIES TO THIS AGREEMENT:\n");
    out.push_str(&format!("{LIGHT_RULE}\n"));
    out.push_str(&format!("First Party (Party A):  {}\n", doc.party_a));
    out.push_str(&format!("Second Party (Party B): {}\n\n", doc.party_b));

    out.push_str(&format!("{}\n\n", doc.preamble));

    out.push_str("CONTRACT CLAUSES:\n");
    out.push_str(&format!("{HEAVY_RULE}\n\n"));
    for section in &doc.sections {
        out.push_str(&format!(
            "Clause {}: {}\n",
            section.number,
            section.title.to_uppercase()
        ));
        out.push_str(&format!("{LIGHT_RULE}\n"));
        out.push_str(&format!("{}\n", section.content));
        for sub in &section.subsections {
            out.push_str(&format!("  - {sub}\n"));
        }
        out.push('\n');
    }

    out.push_str(&format!("{HEAVY_RULE}\n"));
    out.push_str("                         SIGNATURES\n");
    out.push_str(&format!("{HEAVY_RULE}\n\n"));
    out.push_str(&format!("{}\n\n", doc.conclusion));

    let risk = &doc.risk_analysis;
    out.push_str(&format!("RISK ANALYSIS (overall: {}):\n", risk.overall_risk));
    out.push_str(&format!("{LIGHT_RULE}\n"));
    out.push_str(&format!("{}\n", risk.summary));
    for item in &risk.items {
        out.push_str(&format!(
            "  [{}] {} ({}): {}\n",
            item.severity, item.title, item.location, item.recommendation
        ));
    }

    out
}
