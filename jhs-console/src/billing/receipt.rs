//! Printable payment receipt.

use crate::billing::summary::PaymentSummary;
use crate::config::ReceiptSettings;
use crate::models::{Invoice, Payment};
use askama::Template;
use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

#[derive(Template)]
#[template(path = "receipt.html")]
pub struct ReceiptTemplate {
    pub business_name: String,
    pub receipt_number: String,
    pub invoice_number: String,
    pub client_name: Option<String>,
    pub paid_at: String,
    pub method: &'static str,
    pub reference: Option<String>,
    pub notes: Option<String>,
    pub amount: String,
    pub invoice_total: String,
    pub total_paid: String,
    pub balance: String,
    pub status: &'static str,
    pub printed_at: String,
}

/// `RD$ 1,234.50`. Amounts are rounded half away from zero to cents.
pub fn format_currency(symbol: &str, amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let plain = format!("{:.2}", rounded.abs());
    let (whole, cents) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{}{} {}.{}", sign, symbol, grouped, cents)
}

/// `19/10/2026`
pub fn format_date(at: DateTime<Utc>) -> String {
    at.format("%d/%m/%Y").to_string()
}

pub fn format_datetime(at: DateTime<Utc>) -> String {
    at.format("%d/%m/%Y %H:%M").to_string()
}

impl ReceiptTemplate {
    pub fn new(
        settings: &ReceiptSettings,
        invoice: &Invoice,
        payment: &Payment,
        summary: &PaymentSummary,
        printed_at: DateTime<Utc>,
    ) -> Self {
        let money = |amount: Decimal| format_currency(&settings.currency_symbol, amount);

        Self {
            business_name: settings.business_name.clone(),
            receipt_number: format!("R-{:06}", payment.id),
            invoice_number: invoice
                .number
                .clone()
                .unwrap_or_else(|| format!("#{}", invoice.id)),
            client_name: invoice.client_name.clone(),
            paid_at: format_date(payment.paid_at),
            method: payment.method.label(),
            reference: payment.reference.clone(),
            notes: payment.notes.clone(),
            amount: money(payment.amount),
            invoice_total: money(summary.total),
            total_paid: money(summary.total_paid),
            balance: money(summary.balance),
            status: summary.status.label(),
            printed_at: format_datetime(printed_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BillingType, PaymentMethod, PaymentStatus};

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency("RD$", dec("1234.5")), "RD$ 1,234.50");
        assert_eq!(format_currency("RD$", dec("1000000")), "RD$ 1,000,000.00");
        assert_eq!(format_currency("RD$", dec("999.999")), "RD$ 1,000.00");
        assert_eq!(format_currency("RD$", dec("0")), "RD$ 0.00");
        assert_eq!(format_currency("RD$", dec("-20")), "-RD$ 20.00");
    }

    #[test]
    fn dates_are_day_first() {
        let at: DateTime<Utc> = "2026-10-01T14:30:00Z".parse().unwrap();
        assert_eq!(format_date(at), "01/10/2026");
        assert_eq!(format_datetime(at), "01/10/2026 14:30");
    }

    #[test]
    fn renders_payment_and_balance() {
        let invoice = Invoice {
            id: 7,
            number: Some("F-0007".into()),
            client_name: Some("Taller & Hijos".into()),
            total: dec("1000.00"),
            billing_type: BillingType::Credit,
            issued_at: None,
        };
        let payment = Payment {
            id: 12,
            invoice_id: 7,
            amount: dec("250.00"),
            method: PaymentMethod::Transfer,
            paid_at: "2026-10-01T14:30:00Z".parse().unwrap(),
            reference: Some("TRX-991".into()),
            notes: None,
        };
        let summary = PaymentSummary {
            total: dec("1000.00"),
            total_paid: dec("250.00"),
            balance: dec("750.00"),
            status: PaymentStatus::PartiallyPaid,
        };

        let html = ReceiptTemplate::new(
            &ReceiptSettings::default(),
            &invoice,
            &payment,
            &summary,
            "2026-10-19T09:00:00Z".parse().unwrap(),
        )
        .render()
        .unwrap();

        assert!(html.contains("R-000012"));
        assert!(html.contains("F-0007"));
        assert!(html.contains("Taller &amp; Hijos"));
        assert!(html.contains("RD$ 250.00"));
        assert!(html.contains("RD$ 750.00"));
        assert!(html.contains("TRX-991"));
        assert!(html.contains("Pago parcial"));
    }
}
