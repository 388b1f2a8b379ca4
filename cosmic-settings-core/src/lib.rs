//! Cosmic Settings Core Library
//!
//! Drives the "Global Settings" section of the cloud management console:
//! - Panel descriptors for global settings, LDAP configuration and hypervisor capabilities
//! - Panel service (list, detail, edit, add, remove) with input validation and confirmation
//! - Message catalog used to localize labels and notices
//!
//! Rendering and prompting are left to the host, which plugs in through [`traits::Confirmer`]
//! and reacts to the [`types::HostSignal`]s carried by each [`types::ActionOutcome`].

pub mod error;
pub mod i18n;
pub mod panels;
pub mod registry;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult, ValidationReason};
pub use i18n::{localizer_for, Language, Localizer};
pub use panels::ResourcePanel;
pub use registry::{SectionRegistry, GLOBAL_SETTINGS_SECTION};
pub use services::{LatestResponse, PanelService, Sequenced, ServiceContext};
pub use traits::{AutoConfirm, ConfirmationRequest, Confirmer};
