//! Business logic service layer

mod panel_service;
mod sequence;

pub use panel_service::PanelService;
pub use sequence::{LatestResponse, RequestSequence, Sequenced};

use std::sync::Arc;

use cosmic_settings_api::{PaginationParams, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

use crate::error::{CoreError, CoreResult};
use crate::panels::ResourcePanel;
use crate::registry::SectionRegistry;
use crate::types::NavigationContext;

/// Service context - holds all dependencies
///
/// The host creates this once, after building the registry.
pub struct ServiceContext {
    /// Panels of the section
    pub registry: Arc<SectionRegistry>,
    /// Rows per list page, shared by every panel
    page_size: u32,
    /// Numbers list and detail requests
    sequence: RequestSequence,
}

impl ServiceContext {
    /// Create a context. `page_size` is clamped to `1..=MAX_PAGE_SIZE`.
    #[must_use]
    pub fn new(registry: Arc<SectionRegistry>, page_size: u32) -> Self {
        let clamped = PaginationParams::new(1, page_size)
            .validated(MAX_PAGE_SIZE)
            .page_size;
        if clamped != page_size {
            log::warn!("Page size {page_size} out of range, using {clamped}");
        }
        Self {
            registry,
            page_size: clamped,
            sequence: RequestSequence::new(),
        }
    }

    /// Context with the default page size.
    #[must_use]
    pub fn with_default_page_size(registry: Arc<SectionRegistry>) -> Self {
        Self::new(registry, DEFAULT_PAGE_SIZE)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub(crate) fn next_seq(&self) -> u64 {
        self.sequence.next()
    }

    /// Panel selected in `nav`.
    pub fn selected_panel(&self, nav: &NavigationContext) -> CoreResult<&Arc<dyn ResourcePanel>> {
        if nav.section != self.registry.id() {
            return Err(CoreError::UnknownPanel(nav.section.clone()));
        }
        let resource = nav
            .selection
            .ok_or_else(|| CoreError::MissingSelection(nav.section.clone()))?;
        self.registry.get(resource)
    }
}
