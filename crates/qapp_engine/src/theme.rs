use std::collections::BTreeMap;

use qapp_logging::qapp_debug;

use crate::BridgeError;

/// Resolved style of the embedding host.
pub trait ThemeSource: Send + Sync {
    fn property(&self, name: &str) -> Result<Option<String>, BridgeError>;
}

/// Theme values supplied up front, e.g. from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticThemeSource {
    values: BTreeMap<String, String>,
}

impl StaticThemeSource {
    pub fn new(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }
}

impl ThemeSource for StaticThemeSource {
    fn property(&self, name: &str) -> Result<Option<String>, BridgeError> {
        Ok(self.values.get(name).cloned())
    }
}

/// Reads every name independently; a failed read counts as absent.
pub fn read_theme<'a>(
    source: &dyn ThemeSource,
    names: impl IntoIterator<Item = &'a str>,
) -> Vec<(String, Option<String>)> {
    names
        .into_iter()
        .map(|name| {
            let value = match source.property(name) {
                Ok(value) => value,
                Err(err) => {
                    qapp_debug!("theme variable {} unreadable: {}", name, err);
                    None
                }
            };
            (name.to_string(), value)
        })
        .collect()
}
