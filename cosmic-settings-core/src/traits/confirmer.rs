//! Confirmation prompt abstraction Trait

use async_trait::async_trait;

use crate::types::{ActionSpec, PanelDescriptor};

/// What the user is asked to confirm.
#[derive(Debug, Clone, Copy)]
pub struct ConfirmationRequest<'a> {
    pub panel: &'a PanelDescriptor,
    pub action: &'a ActionSpec,
    /// Message key of the prompt.
    pub prompt: &'static str,
    /// Identifier of the row the action targets, if any.
    pub target: Option<&'a str>,
}

/// Asks the user to accept or decline an action.
///
/// Implemented by the host; the core never dispatches an action that declares a prompt
/// without a `true` from here.
#[async_trait]
pub trait Confirmer: Send + Sync {
    async fn confirm(&self, request: &ConfirmationRequest<'_>) -> bool;
}

/// Accepts every prompt, for hosts where the user already agreed up front.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoConfirm;

#[async_trait]
impl Confirmer for AutoConfirm {
    async fn confirm(&self, request: &ConfirmationRequest<'_>) -> bool {
        log::debug!(
            "Auto-confirmed {} on {}",
            request.action.name,
            request.panel.id
        );
        true
    }
}
