//! Drafting pipeline: prompt, model call, normalization, defaulting.
//!
//! `draft_contract` never fails: every error is absorbed by a later stage and shows
//! up only as degraded content (fallback sections, boilerplate, an error title).

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::FutureExt;
use tracing::{debug, error, info, warn};

use crate::drafting::defaults::{
    boilerplate_sections, fill_defaults, one_year_after, validate, DEFAULT_GOVERNING_LAW,
    DEFAULT_JURISDICTION, SIGNATURE_BOILERPLATE,
};
use crate::drafting::error::DraftError;
use crate::drafting::extractor::extract_sections;
use crate::drafting::fallback::generate_fallback;
use crate::drafting::models::{ContractDocument, DraftRequest, PartialDocument};
use crate::drafting::parser::parse_structured;
use crate::drafting::prompts::build_draft_prompt;
use crate::drafting::risk::synthesize_risk_analysis;
use crate::drafting::sanitizer::sanitize_response;
use crate::llm_client::ModelInvoker;

pub const ERROR_TITLE: &str = "Error: Contract Could Not Be Generated";

const ERROR_RISK_SUMMARY: &str = "Risk analysis could not be completed because contract \
    generation failed. The clauses below are generic boilerplate and must be reviewed.";

/// Drafts a contract for `request`. The model call is bounded by `timeout`.
///
/// Dropping the returned future cancels the in-flight model request.
pub async fn draft_contract(
    invoker: &dyn ModelInvoker,
    request: &DraftRequest,
    timeout: Duration,
) -> ContractDocument {
    draft_contract_at(invoker, request, timeout, Utc::now()).await
}

/// Runs the pipeline and turns a panic in any stage, the invoker included, into the
/// error document.
async fn draft_contract_at(
    invoker: &dyn ModelInvoker,
    request: &DraftRequest,
    timeout: Duration,
    now: DateTime<Utc>,
) -> ContractDocument {
    let request = request.clone().normalized();
    match AssertUnwindSafe(run_pipeline(invoker, &request, timeout, now))
        .catch_unwind()
        .await
    {
        Ok(document) => document,
        Err(payload) => {
            let cause = DraftError::CatastrophicFailure(panic_message(payload.as_ref()));
            catastrophic_document(&request, &cause, now)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "pipeline panicked".to_string()
    }
}

async fn run_pipeline(
    invoker: &dyn ModelInvoker,
    request: &DraftRequest,
    timeout: Duration,
    now: DateTime<Utc>,
) -> ContractDocument {
    let prompt = build_draft_prompt(request);
    debug!("Draft prompt built ({} chars)", prompt.len());

    let partial = match invoke(invoker, &prompt, timeout).await {
        Ok(raw) => interpret_response(&raw),
        Err(e) => {
            warn!("{e}; using fallback template");
            match parse_structured(&generate_fallback(request)) {
                Ok(partial) => partial,
                Err(e) => {
                    let cause = DraftError::CatastrophicFailure(e.to_string());
                    return catastrophic_document(request, &cause, now);
                }
            }
        }
    };

    let document = fill_defaults(partial, request, now);
    match validate(&document) {
        Ok(()) => {
            info!(
                "Drafted '{}' with {} sections, {} risk items",
                document.title,
                document.sections.len(),
                document.risk_analysis.items.len()
            );
            document
        }
        Err(gap) => {
            let cause = DraftError::CatastrophicFailure(gap.to_string());
            catastrophic_document(request, &cause, now)
        }
    }
}

async fn invoke(
    invoker: &dyn ModelInvoker,
    prompt: &str,
    timeout: Duration,
) -> Result<String, DraftError> {
    match tokio::time::timeout(timeout, invoker.generate(prompt)).await {
        Ok(result) => Ok(result?),
        Err(_) => Err(DraftError::UpstreamUnavailable(format!(
            "no response within {}s",
            timeout.as_secs()
        ))),
    }
}

/// Structured parse of the sanitized text, else heading extraction over the raw text.
fn interpret_response(raw: &str) -> PartialDocument {
    match parse_structured(sanitize_response(raw)) {
        Ok(partial) => partial,
        Err(e) => {
            warn!("{e}; falling back to text extraction");
            extract_sections(raw)
        }
    }
}

/// Minimal complete document returned when the pipeline itself breaks.
pub fn catastrophic_document(
    request: &DraftRequest,
    cause: &DraftError,
    now: DateTime<Utc>,
) -> ContractDocument {
    error!("{cause}");
    let today = now.date_naive();

    let mut risk_analysis = synthesize_risk_analysis(&request.contract_type);
    risk_analysis.summary = ERROR_RISK_SUMMARY.to_string();

    ContractDocument {
        title: ERROR_TITLE.to_string(),
        contract_type: request.contract_type.clone(),
        party_a: request.party_a.clone(),
        party_b: request.party_b.clone(),
        generated_at: now,
        preamble: format!("An error occurred during contract generation: {cause}"),
        sections: boilerplate_sections(),
        conclusion: SIGNATURE_BOILERPLATE.to_string(),
        jurisdiction: DEFAULT_JURISDICTION.to_string(),
        governing_law: DEFAULT_GOVERNING_LAW.to_string(),
        effective_date: today.to_string(),
        expiration_date: one_year_after(today).to_string(),
        risk_analysis,
    }
}
