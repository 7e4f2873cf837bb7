//! Measurement submission routes.

use crate::error::{run_blocking, WebError};
use crate::pages;
use crate::router::AppState;
use axum::{
    extract::State,
    response::{Html, Redirect},
    Form,
};
use plastrack_common::{parse_amount, UsageRecord};
use serde::Deserialize;
use tracing::info;

/// Submitted form fields. The amount arrives as text and is coerced here.
#[derive(Debug, Deserialize)]
pub struct AddRecordForm {
    /// Community name.
    pub community: String,
    /// Measurement date as entered.
    pub date: String,
    /// Amount in kilograms as entered.
    pub plastic_used_kg: String,
}

/// Shows the submission form.
pub async fn add_form() -> Html<String> {
    Html(pages::add_page())
}

/// Appends one record and redirects to the landing page.
pub async fn add_record(
    State(state): State<AppState>,
    Form(form): Form<AddRecordForm>,
) -> Result<Redirect, WebError> {
    let plastic_used_kg = parse_amount(&form.plastic_used_kg)?;
    let record = UsageRecord::new(form.community, form.date, plastic_used_kg);

    let store = state.store.clone();
    let community = record.community.clone();
    run_blocking(move || {
        store.initialize()?;
        store.append(record)
    })
    .await?;

    info!(%community, plastic_used_kg, "Recorded plastic usage");
    Ok(Redirect::to("/"))
}
