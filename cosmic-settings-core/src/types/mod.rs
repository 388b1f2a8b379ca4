//! Type definition module

mod navigation;
mod outcome;
mod panel;

pub use navigation::NavigationContext;
pub use outcome::{ActionOutcome, HostSignal, ListQuery, Notice, NoticeLevel, RowPage};
pub use panel::{
    ActionName, ActionSpec, FieldSpec, FieldValues, InputField, InputKind, PanelDescriptor,
    ResourceType,
};

// Re-export public types of the api crate
pub use cosmic_settings_api::{ListPage, PaginationParams, Row};
