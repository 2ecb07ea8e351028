pub mod app;
pub mod invoices;
pub mod locations;
pub mod metrics;
pub mod resources;
