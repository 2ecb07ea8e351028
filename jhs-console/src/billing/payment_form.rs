use crate::billing::summary::PaymentSummary;
use crate::models::{NewPayment, PaymentMethod};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

/// A payment as typed into the "new payment" form.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaymentForm {
    pub amount: Decimal,
    pub method: PaymentMethod,
    #[validate(length(max = 60, message = "La referencia no puede exceder 60 caracteres"))]
    #[serde(default)]
    pub reference: Option<String>,
    #[validate(length(max = 500, message = "Las notas no pueden exceder 500 caracteres"))]
    #[serde(default)]
    pub notes: Option<String>,
    /// Defaults to the submission time.
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
}

fn field_error(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message));
    error
}

impl PaymentForm {
    fn reference(&self) -> Option<&str> {
        self.reference
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
    }

    /// Field checks plus the checks that need the invoice's current totals:
    /// `0 < amount <= balance`, and a reference for non-cash methods.
    pub fn validate_against(&self, summary: &PaymentSummary) -> Result<(), ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        if !summary.accepts_payments() {
            errors.add(
                "amount",
                field_error(
                    "no_balance",
                    "La factura no tiene balance pendiente".to_string(),
                ),
            );
        } else if self.amount <= Decimal::ZERO {
            errors.add(
                "amount",
                field_error("positive", "El monto debe ser mayor que cero".to_string()),
            );
        } else if self.amount > summary.balance {
            errors.add(
                "amount",
                field_error(
                    "exceeds_balance",
                    format!(
                        "El monto no puede exceder el balance pendiente ({})",
                        summary.balance.round_dp(2)
                    ),
                ),
            );
        }

        if self.method.requires_reference() && self.reference().is_none() {
            errors.add(
                "reference",
                field_error(
                    "required",
                    format!("La referencia es requerida para pagos con {}", self.method.label().to_lowercase()),
                ),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn into_new_payment(self, invoice_id: i64, now: DateTime<Utc>) -> NewPayment {
        let reference = self.reference().map(str::to_string);
        let notes = self
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        NewPayment {
            invoice_id,
            amount: self.amount,
            method: self.method,
            paid_at: self.paid_at.unwrap_or(now),
            reference,
            notes,
        }
    }
}
