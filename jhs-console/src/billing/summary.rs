//! Payment totals of an invoice, derived from its payment list.

use crate::models::{BillingType, Invoice, Payment, PaymentStatus};
use rust_decimal::Decimal;
use serde::Serialize;

/// Sum of the payments that belong to `invoice_id`.
pub fn total_paid(invoice_id: i64, payments: &[Payment]) -> Decimal {
    payments
        .iter()
        .filter(|p| p.invoice_id == invoice_id)
        .map(|p| p.amount)
        .sum()
}

pub fn compute_invoice_status(invoice: &Invoice, payments: &[Payment]) -> PaymentStatus {
    status_for(invoice, total_paid(invoice.id, payments))
}

fn status_for(invoice: &Invoice, paid: Decimal) -> PaymentStatus {
    match invoice.billing_type {
        BillingType::Cash => PaymentStatus::Paid,
        BillingType::Credit if paid.is_zero() => PaymentStatus::Pending,
        BillingType::Credit if paid >= invoice.total => PaymentStatus::Settled,
        BillingType::Credit => PaymentStatus::PartiallyPaid,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSummary {
    pub total: Decimal,
    pub total_paid: Decimal,
    /// `total - total_paid`; negative when the backend holds an overpayment.
    pub balance: Decimal,
    pub status: PaymentStatus,
}

impl PaymentSummary {
    pub fn compute(invoice: &Invoice, payments: &[Payment]) -> Self {
        let paid = total_paid(invoice.id, payments);
        Self {
            total: invoice.total,
            total_paid: paid,
            balance: invoice.total - paid,
            status: status_for(invoice, paid),
        }
    }

    /// Whether another payment can be recorded against the invoice.
    pub fn accepts_payments(&self) -> bool {
        self.status != PaymentStatus::Paid && self.balance > Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentMethod;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn invoice(total: &str, billing_type: BillingType) -> Invoice {
        Invoice {
            id: 7,
            number: Some("F-0007".into()),
            client_name: None,
            total: dec(total),
            billing_type,
            issued_at: None,
        }
    }

    fn payments(invoice_id: i64, amounts: &[&str]) -> Vec<Payment> {
        amounts
            .iter()
            .enumerate()
            .map(|(i, amount)| Payment {
                id: i as i64 + 1,
                invoice_id,
                amount: dec(amount),
                method: PaymentMethod::Cash,
                paid_at: "2026-10-01T10:00:00Z".parse().unwrap(),
                reference: None,
                notes: None,
            })
            .collect()
    }

    #[test]
    fn two_payments_settle_the_invoice() {
        let invoice = invoice("1000.00", BillingType::Credit);
        let summary = PaymentSummary::compute(&invoice, &payments(7, &["400.00", "600.00"]));

        assert_eq!(summary.total_paid, dec("1000.00"));
        assert_eq!(summary.balance, dec("0.00"));
        assert_eq!(summary.status, PaymentStatus::Settled);
        assert!(!summary.accepts_payments());
    }

    #[test]
    fn one_partial_payment_leaves_balance() {
        let invoice = invoice("1000.00", BillingType::Credit);
        let summary = PaymentSummary::compute(&invoice, &payments(7, &["250.00"]));

        assert_eq!(summary.balance, dec("750.00"));
        assert_eq!(summary.status, PaymentStatus::PartiallyPaid);
        assert!(summary.accepts_payments());
    }

    #[test]
    fn no_payments_is_pending() {
        let invoice = invoice("1000.00", BillingType::Credit);
        assert_eq!(compute_invoice_status(&invoice, &[]), PaymentStatus::Pending);
    }

    #[test]
    fn overpayment_is_settled() {
        let invoice = invoice("100.00", BillingType::Credit);
        let summary = PaymentSummary::compute(&invoice, &payments(7, &["60.00", "60.00"]));

        assert_eq!(summary.status, PaymentStatus::Settled);
        assert_eq!(summary.balance, dec("-20.00"));
    }

    #[test]
    fn cash_invoice_is_always_paid() {
        let invoice = invoice("1000.00", BillingType::Cash);
        for amounts in [&[][..], &["10.00"][..], &["1000.00"][..], &["2000.00"][..]] {
            assert_eq!(
                compute_invoice_status(&invoice, &payments(7, amounts)),
                PaymentStatus::Paid
            );
        }
    }

    #[test]
    fn payments_of_other_invoices_are_ignored() {
        let invoice = invoice("1000.00", BillingType::Credit);
        let mut list = payments(7, &["100.00"]);
        list.extend(payments(8, &["900.00"]));

        let summary = PaymentSummary::compute(&invoice, &list);
        assert_eq!(summary.total_paid, dec("100.00"));
        assert_eq!(summary.status, PaymentStatus::PartiallyPaid);
    }

    #[test]
    fn cent_precision_is_exact() {
        let invoice = invoice("0.30", BillingType::Credit);
        let summary = PaymentSummary::compute(&invoice, &payments(7, &["0.10", "0.20"]));
        assert_eq!(summary.status, PaymentStatus::Settled);
        assert!(summary.balance.is_zero());
    }
}
