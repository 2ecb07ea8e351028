//! Invoice payment history, partial payments and receipts.

pub mod payment_form;
pub mod receipt;
pub mod service;
pub mod summary;

pub use payment_form::PaymentForm;
pub use receipt::ReceiptTemplate;
pub use service::{load_invoice_payments, record_payment, InvoicePayments};
pub use summary::{compute_invoice_status, PaymentSummary};
