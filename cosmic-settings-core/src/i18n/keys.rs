//! Message keys
//!
//! Descriptors carry keys, never display text. Hosts resolve them through a
//! [`Localizer`](super::Localizer).

// ===== Section =====
pub const LABEL_GLOBAL_SETTINGS: &str = "label.menu.global.settings";
pub const LABEL_SELECT_VIEW: &str = "label.select-view";

// ===== Global settings =====
pub const LABEL_NAME: &str = "label.name";
pub const LABEL_DESCRIPTION: &str = "label.description";
pub const LABEL_VALUE: &str = "label.value";
pub const LABEL_CHANGE_VALUE: &str = "label.change.value";
pub const MESSAGE_RESTART_MGMT_SERVER: &str = "message.restart.mgmt.server";
pub const MESSAGE_RESTART_USAGE_SERVER: &str = "message.restart.mgmt.usage.server";

// ===== LDAP =====
pub const LABEL_LDAP_CONFIGURATION: &str = "label.ldap.configuration";
pub const LABEL_HOST_NAME: &str = "label.host.name";
pub const LABEL_LDAP_PORT: &str = "label.ldap.port";
pub const LABEL_PORT: &str = "label.port";
pub const LABEL_CONFIGURE_LDAP: &str = "label.configure.ldap";
pub const LABEL_REMOVE_LDAP: &str = "label.remove.ldap";
pub const MESSAGE_CONFIGURE_LDAP: &str = "message.configure.ldap";
pub const MESSAGE_REMOVE_LDAP: &str = "message.remove.ldap";

// ===== Hypervisor capabilities =====
pub const LABEL_HYPERVISOR_CAPABILITIES: &str = "label.hypervisor.capabilities";
pub const LABEL_ID: &str = "label.id";
pub const LABEL_HYPERVISOR: &str = "label.hypervisor";
pub const LABEL_HYPERVISOR_VERSION: &str = "label.hypervisor.version";
pub const LABEL_MAX_GUESTS_LIMIT: &str = "label.max.guest.limit";
pub const LABEL_EDIT: &str = "label.edit";

// ===== Host =====
pub const LABEL_NO_ITEMS: &str = "label.no.items";
pub const LABEL_ACTION_CANCELLED: &str = "label.action.cancelled";
pub const LABEL_PAGE: &str = "label.page";
pub const MESSAGE_REFRESH_ALL: &str = "message.refresh.all";
