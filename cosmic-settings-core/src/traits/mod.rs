//! Host abstraction traits

mod confirmer;

pub use confirmer::{AutoConfirm, ConfirmationRequest, Confirmer};
