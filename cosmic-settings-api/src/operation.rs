//! Remote procedures used by the settings console and the envelopes they answer with.

use serde::{Deserialize, Serialize};

/// Entity key `updateHypervisorCapabilities` nests its result under.
///
/// The server really sends the literal string `"null"` here, most likely a missing
/// response object name on the server side. It is reproduced as-is until upstream
/// clarifies the intended key; do not replace it with a guess.
pub const NULL_ENTITY_KEY_QUIRK: &str = "null";

/// A named remote procedure of the management API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    /// Paginated listing of global configuration settings.
    ListConfigurations,
    /// Change the value of one global configuration setting.
    UpdateConfiguration,
    /// Listing of configured LDAP servers.
    ListLdapConfigurations,
    /// Register an LDAP server.
    AddLdapConfiguration,
    /// Remove an LDAP server.
    DeleteLdapConfiguration,
    /// Listing of per-hypervisor capability limits.
    ListHypervisorCapabilities,
    /// Change the limits of one hypervisor capability entry.
    UpdateHypervisorCapabilities,
}

impl Operation {
    /// All operations, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::ListConfigurations,
        Self::UpdateConfiguration,
        Self::ListLdapConfigurations,
        Self::AddLdapConfiguration,
        Self::DeleteLdapConfiguration,
        Self::ListHypervisorCapabilities,
        Self::UpdateHypervisorCapabilities,
    ];

    /// Command name as sent in the `command` query parameter.
    pub const fn name(self) -> &'static str {
        match self {
            Self::ListConfigurations => "listConfigurations",
            Self::UpdateConfiguration => "updateConfiguration",
            Self::ListLdapConfigurations => "listLdapConfigurations",
            Self::AddLdapConfiguration => "addLdapConfiguration",
            Self::DeleteLdapConfiguration => "deleteLdapConfiguration",
            Self::ListHypervisorCapabilities => "listHypervisorCapabilities",
            Self::UpdateHypervisorCapabilities => "updateHypervisorCapabilities",
        }
    }

    /// Top-level key of the JSON response.
    ///
    /// Most commands answer under `<command lowercased>response`; the LDAP commands all
    /// share `ldapconfigurationresponse`.
    pub const fn envelope(self) -> &'static str {
        match self {
            Self::ListConfigurations => "listconfigurationsresponse",
            Self::UpdateConfiguration => "updateconfigurationresponse",
            Self::ListLdapConfigurations
            | Self::AddLdapConfiguration
            | Self::DeleteLdapConfiguration => "ldapconfigurationresponse",
            Self::ListHypervisorCapabilities => "listhypervisorcapabilitiesresponse",
            Self::UpdateHypervisorCapabilities => "updatehypervisorcapabilitiesresponse",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
