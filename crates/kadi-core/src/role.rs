//! The community role catalog.
//!
//! A fixed, ordered list of role labels shared between the draft builder's
//! selection surface and the feed's display of existing cards. The catalog
//! constrains authoring only — a stored card title is free text.

use strum::{Display, EnumIter, IntoEnumIterator};

/// Reserved sentinel: selecting it switches the draft to a free-text role.
pub const CUSTOM_ROLE: &str = "custom";

/// Roles a member can hold in the community, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Role {
  #[strum(serialize = "Website Developer")]
  WebsiteDeveloper,
  #[strum(serialize = "Mobile Developer")]
  MobileDeveloper,
  #[strum(serialize = "Software Dev")]
  SoftwareDev,
  #[strum(serialize = "Web Lead")]
  WebLead,
  #[strum(serialize = "Flutter Lead")]
  FlutterLead,
  #[strum(serialize = "Arduino Lead")]
  ArduinoLead,
  #[strum(serialize = "Python Lead")]
  PythonLead,
  #[strum(serialize = "Management")]
  Management,
  #[strum(serialize = "Alumni Lead ⭐⭐⭐")]
  AlumniLead,
  #[strum(serialize = "Android Lead")]
  AndroidLead,
  #[strum(serialize = "Python Dev")]
  PythonDev,
  #[strum(serialize = "Java Dev")]
  JavaDev,
  #[strum(serialize = "NodeJs Dev")]
  NodeJsDev,
  #[strum(serialize = "Backend Developer")]
  BackendDeveloper,
  #[strum(serialize = "Data Analyst")]
  DataAnalyst,
  #[strum(serialize = "Junior Dev")]
  JuniorDev,
  #[strum(serialize = "UI/UX Designer")]
  UiUxDesigner,
}

impl Role {
  /// All labels in catalog order (excluding the [`CUSTOM_ROLE`] sentinel).
  pub fn labels() -> Vec<String> {
    Self::iter().map(|r| r.to_string()).collect()
  }
}
