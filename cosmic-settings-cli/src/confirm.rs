//! Terminal confirmation prompt

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use async_trait::async_trait;
use cosmic_settings_core::{ConfirmationRequest, Confirmer, Localizer};

/// Asks on stderr, reads the answer from stdin. Anything but `y`/`yes` declines.
pub struct TerminalConfirmer {
    l10n: Arc<dyn Localizer>,
}

impl TerminalConfirmer {
    pub fn new(l10n: Arc<dyn Localizer>) -> Self {
        Self { l10n }
    }

    fn question(&self, request: &ConfirmationRequest<'_>) -> String {
        let mut question = format!(
            "{}: {}",
            self.l10n.text(request.action.label),
            self.l10n.text(request.prompt)
        );
        if let Some(target) = request.target {
            question.push_str(&format!(" ({target})"));
        }
        question.push_str(" [y/N] ");
        question
    }
}

#[async_trait]
impl Confirmer for TerminalConfirmer {
    async fn confirm(&self, request: &ConfirmationRequest<'_>) -> bool {
        let question = self.question(request);
        match tokio::task::spawn_blocking(move || ask(&question)).await {
            Ok(Ok(answer)) => is_yes(&answer),
            Ok(Err(e)) => {
                tracing::warn!("Failed to read confirmation: {e}");
                false
            }
            Err(e) => {
                tracing::warn!("Confirmation prompt aborted: {e}");
                false
            }
        }
    }
}

fn ask(question: &str) -> io::Result<String> {
    let mut stderr = io::stderr();
    stderr.write_all(question.as_bytes())?;
    stderr.flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(answer)
}

pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
