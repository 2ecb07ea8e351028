use crate::billing::{load_invoice_payments, record_payment, InvoicePayments, PaymentForm, ReceiptTemplate};
use crate::middleware::AccessToken;
use crate::AppState;
use askama::Template;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use chrono::Utc;
use console_core::error::AppError;

pub async fn show_payments(
    State(state): State<AppState>,
    token: AccessToken,
    Path(invoice_id): Path<i64>,
) -> Result<Json<InvoicePayments>, AppError> {
    let view = load_invoice_payments(&state.resources, &token, invoice_id).await?;
    Ok(Json(view))
}

#[tracing::instrument(skip(state, token, form))]
pub async fn create_payment(
    State(state): State<AppState>,
    token: AccessToken,
    Path(invoice_id): Path<i64>,
    Json(form): Json<PaymentForm>,
) -> Result<(StatusCode, Json<InvoicePayments>), AppError> {
    let view = record_payment(&state.resources, &token, invoice_id, form).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn receipt(
    State(state): State<AppState>,
    token: AccessToken,
    Path((invoice_id, payment_id)): Path<(i64, i64)>,
) -> Result<Html<String>, AppError> {
    let view = load_invoice_payments(&state.resources, &token, invoice_id).await?;

    let payment = view.payment(payment_id).ok_or_else(|| {
        AppError::NotFound(anyhow::anyhow!(
            "payment {} not found on invoice {}",
            payment_id,
            invoice_id
        ))
    })?;

    let html = ReceiptTemplate::new(&state.receipt, &view.invoice, payment, &view.summary, Utc::now())
        .render()
        .map_err(|e| AppError::InternalError(anyhow::anyhow!("receipt rendering failed: {}", e)))?;

    Ok(Html(html))
}
