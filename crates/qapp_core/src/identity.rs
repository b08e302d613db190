pub const IDENTITY_LOADING_LABEL: &str = "Loading identity...";
pub const IDENTITY_ERROR_LABEL: &str = "Error loading identity";

/// Account details reported by the host bridge.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Identity {
    pub name: Option<String>,
    pub address: Option<String>,
}

impl Identity {
    /// Name when the account has one registered, otherwise the address.
    pub fn display_label(&self) -> Option<&str> {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .or_else(|| self.address.as_deref().filter(|addr| !addr.trim().is_empty()))
    }
}
