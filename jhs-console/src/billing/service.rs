//! Payment history of one invoice and recording new payments against it.

use crate::billing::payment_form::PaymentForm;
use crate::billing::summary::PaymentSummary;
use crate::middleware::AccessToken;
use crate::models::{Invoice, Payment, Resource};
use crate::services::{ApiError, ResourceService};
use chrono::Utc;
use console_core::error::AppError;
use serde::Serialize;

/// Invoice, its payments, and the totals derived from them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePayments {
    pub invoice: Invoice,
    pub payments: Vec<Payment>,
    pub summary: PaymentSummary,
}

impl InvoicePayments {
    pub fn new(invoice: Invoice, payments: Vec<Payment>) -> Self {
        let summary = PaymentSummary::compute(&invoice, &payments);
        Self {
            invoice,
            payments,
            summary,
        }
    }

    pub fn payment(&self, payment_id: i64) -> Option<&Payment> {
        self.payments.iter().find(|p| p.id == payment_id)
    }
}

pub fn payments_path(invoice_id: i64) -> String {
    format!("{}/factura/{}", Resource::InvoicePayments, invoice_id)
}

/// Reads the invoice and its payments straight from the backend. The two
/// reads run concurrently and are not transactional.
pub async fn load_invoice_payments(
    resources: &ResourceService,
    token: &AccessToken,
    invoice_id: i64,
) -> Result<InvoicePayments, ApiError> {
    let api = resources.api();
    let invoice_path = Resource::Invoices.item_path(invoice_id);
    let payments_path = payments_path(invoice_id);

    let (invoice, payments) = tokio::try_join!(
        api.get::<Invoice>(token, &invoice_path),
        api.get_list::<Payment>(token, &payments_path),
    )?;

    Ok(InvoicePayments::new(invoice, payments))
}

/// Validates `form` against the invoice's current balance, posts it, and
/// returns the refetched view. No optimistic update, no retry.
pub async fn record_payment(
    resources: &ResourceService,
    token: &AccessToken,
    invoice_id: i64,
    form: PaymentForm,
) -> Result<InvoicePayments, AppError> {
    let current = load_invoice_payments(resources, token, invoice_id).await?;
    form.validate_against(&current.summary)?;

    let body = form.into_new_payment(invoice_id, Utc::now());
    let result: Result<serde_json::Value, ApiError> = resources
        .api()
        .post(token, &Resource::InvoicePayments.collection_path(), &body)
        .await;

    resources.cache().invalidate(Resource::InvoicePayments);
    resources.cache().invalidate(Resource::Invoices);
    result?;

    tracing::info!(
        invoice_id,
        amount = %body.amount,
        method = body.method.as_str(),
        "Payment recorded"
    );

    Ok(load_invoice_payments(resources, token, invoice_id).await?)
}
