//! Form state and validation for the CRUD screens.

pub mod entities;
pub mod validators;

pub use entities::{ClientForm, EmployeeForm, SupplierForm, VehicleForm};

use crate::models::Resource;
use console_core::error::AppError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::Validate;

/// What happened when the user tried to close a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardOutcome {
    /// Nothing was edited, or the discard was forced.
    Discarded,
    /// There are unsaved edits; ask before throwing them away.
    NeedsConfirmation,
}

/// A form's initial value next to its edited value.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState<T> {
    initial: T,
    current: T,
}

impl<T: Clone + PartialEq> FormState<T> {
    pub fn new(initial: T) -> Self {
        Self {
            current: initial.clone(),
            initial,
        }
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn edit(&mut self, f: impl FnOnce(&mut T)) {
        f(&mut self.current);
    }

    pub fn is_dirty(&self) -> bool {
        self.current != self.initial
    }

    pub fn reset(&mut self) {
        self.current = self.initial.clone();
    }

    /// Drops unsaved edits unless there are some and `force` is false.
    pub fn discard(&mut self, force: bool) -> DiscardOutcome {
        if self.is_dirty() && !force {
            return DiscardOutcome::NeedsConfirmation;
        }
        self.reset();
        DiscardOutcome::Discarded
    }

    /// Call after a successful save: the saved value becomes the baseline.
    pub fn mark_saved(&mut self) {
        self.initial = self.current.clone();
    }
}

impl<T: Validate> FormState<T> {
    pub fn validate(&self) -> Result<(), validator::ValidationErrors> {
        self.current.validate()
    }
}

fn check<T: DeserializeOwned + Validate>(body: &Value) -> Result<(), AppError> {
    let form: T = serde_json::from_value(body.clone())?;
    form.validate()?;
    Ok(())
}

/// Validates a create/update body for resources that have a form model.
/// Other resources go to the backend as sent.
pub fn validate_resource_payload(resource: Resource, body: &Value) -> Result<(), AppError> {
    match resource {
        Resource::Clients => check::<ClientForm>(body),
        Resource::Vehicles => check::<VehicleForm>(body),
        Resource::Employees => check::<EmployeeForm>(body),
        Resource::Suppliers => check::<SupplierForm>(body),
        _ => Ok(()),
    }
}
