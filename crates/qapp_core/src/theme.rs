use std::collections::BTreeMap;

/// Host theme variables mirrored into the local theme scope.
pub const THEME_VARIABLES: [&str; 8] = [
    "--mdc-theme-background",
    "--mdc-theme-on-background",
    "--mdc-theme-surface",
    "--mdc-theme-on-surface",
    "--mdc-theme-primary",
    "--mdc-theme-on-primary",
    "--mdc-theme-outline",
    "--mdc-theme-secondary-container",
];

/// One best-effort read of a host variable. `None` means the host had no
/// value or could not be reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeReading {
    pub name: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ThemeVars {
    values: BTreeMap<String, String>,
}

impl ThemeVars {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Copies present readings into `vars` and returns how many changed.
///
/// Absent or blank readings leave the local value alone. Names outside
/// [`THEME_VARIABLES`] are ignored.
pub fn apply_theme(vars: &mut ThemeVars, readings: &[ThemeReading]) -> usize {
    let mut changed = 0;
    for reading in readings {
        if !THEME_VARIABLES.contains(&reading.name.as_str()) {
            continue;
        }
        let Some(value) = reading.value.as_deref().map(str::trim) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        if vars.get(&reading.name) != Some(value) {
            vars.values.insert(reading.name.clone(), value.to_string());
            changed += 1;
        }
    }
    changed
}
