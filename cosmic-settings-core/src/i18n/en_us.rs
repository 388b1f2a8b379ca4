//! English text (en-US)

use super::keys::*;

pub(super) fn lookup(key: &str) -> Option<&'static str> {
    let text = match key {
        // Section
        LABEL_GLOBAL_SETTINGS => "Global Settings",
        LABEL_SELECT_VIEW => "Select view",

        // Global settings
        LABEL_NAME => "Name",
        LABEL_DESCRIPTION => "Description",
        LABEL_VALUE => "Value",
        LABEL_CHANGE_VALUE => "Change value",
        MESSAGE_RESTART_MGMT_SERVER => {
            "Please restart your management server(s) for your new settings to take effect."
        }
        MESSAGE_RESTART_USAGE_SERVER => {
            "Please restart your management server(s) and usage server(s) \
             for your changes to take effect."
        }

        // LDAP
        LABEL_LDAP_CONFIGURATION => "LDAP Configuration",
        LABEL_HOST_NAME => "Host Name",
        LABEL_LDAP_PORT => "LDAP port",
        LABEL_PORT => "Port",
        LABEL_CONFIGURE_LDAP => "Configure LDAP",
        LABEL_REMOVE_LDAP => "Remove LDAP",
        MESSAGE_CONFIGURE_LDAP => "Please confirm you would like to configure LDAP.",
        MESSAGE_REMOVE_LDAP => "Are you sure you want to delete the LDAP configuration?",

        // Hypervisor capabilities
        LABEL_HYPERVISOR_CAPABILITIES => "Hypervisor capabilities",
        LABEL_ID => "ID",
        LABEL_HYPERVISOR => "Hypervisor",
        LABEL_HYPERVISOR_VERSION => "Hypervisor version",
        LABEL_MAX_GUESTS_LIMIT => "Max guest limit",
        LABEL_EDIT => "Edit",

        // Host
        LABEL_NO_ITEMS => "No Available Items",
        LABEL_ACTION_CANCELLED => "Cancelled",
        LABEL_PAGE => "Page",
        MESSAGE_REFRESH_ALL => "Other views in this section may have changed; refresh them.",

        _ => return None,
    };
    Some(text)
}
