pub mod invoice;
pub mod location;
pub mod resource;

pub use invoice::{BillingType, Invoice, NewPayment, Payment, PaymentMethod, PaymentStatus};
pub use location::{District, Municipality, Neighborhood, Province, Sector};
pub use resource::Resource;
