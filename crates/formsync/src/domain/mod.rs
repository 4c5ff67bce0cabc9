//! Domain types for the form-sync bridge.
//!
//! Everything here is transient: a control snapshot lives for one interaction,
//! and the layout only names which page elements the bridge drives.

pub mod control;
pub mod layout;

pub use control::{FormControl, FormPair, PowerState, FORM_URLENCODED};
pub use layout::{Display, PageLayout, PlayersGroup, Visibility};
