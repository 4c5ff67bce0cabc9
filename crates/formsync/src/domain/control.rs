//! Form controls and the single `name=value` pair they serialize to.

use std::fmt;

/// Content type sent with every control notification.
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Snapshot of a page control at the moment it fired.
///
/// `form_action` is `None` when the control does not belong to a form; the
/// handlers refuse to notify in that case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormControl {
    pub name: String,
    pub value: String,
    pub class_name: String,
    pub form_action: Option<String>,
}

impl FormControl {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            class_name: String::new(),
            form_action: None,
        }
    }

    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    pub fn in_form(mut self, action: impl Into<String>) -> Self {
        self.form_action = Some(action.into());
        self
    }

    /// Current toggle state as encoded in the class attribute.
    pub fn power_state(&self) -> PowerState {
        PowerState::from_class(&self.class_name)
    }

    /// Flip the toggle state, keeping class and label in step.
    pub fn toggle_power(&mut self) -> PowerState {
        let next = self.power_state().toggled();
        self.class_name = next.class_name().to_string();
        self.value = next.label().to_string();
        next
    }

    pub fn value_pair(&self) -> FormPair {
        FormPair::new(&self.name, &self.value)
    }

    pub fn class_pair(&self) -> FormPair {
        FormPair::new(&self.name, &self.class_name)
    }
}

/// A single urlencoded `name=value` pair.
///
/// Values are written verbatim; no percent-encoding is applied on top of
/// whatever the host already did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPair {
    pub name: String,
    pub value: String,
}

impl FormPair {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FormPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// Binary state of a power toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerState {
    On,
    Off,
}

impl PowerState {
    /// Anything other than exactly `on` reads as off.
    pub fn from_class(class_name: &str) -> Self {
        if class_name == "on" {
            Self::On
        } else {
            Self::Off
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::On => Self::Off,
            Self::Off => Self::On,
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::On => "On",
            Self::Off => "Off",
        }
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}
