//! Controller objects and requested settings

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Site role value that marks a hub (data center) site
pub const HUB_ROLE: &str = "HUB";

/// `bw_config_mode` value for manual bandwidth with monitoring on
pub const BWM_MANUAL: &str = "manual";

/// `bw_config_mode` value for manual bandwidth with monitoring off
pub const BWM_MANUAL_DISABLED: &str = "manual_bwm_disabled";

/// List envelope used by every collection endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// Authenticated user profile
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tenant {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub x_auth_token: Option<String>,
}

/// Site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub element_cluster_role: Option<String>,
}

impl Site {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// WAN interface label (circuit category)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WanInterfaceLabel {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// WAN interface (circuit).
///
/// Everything besides `id` stays in `fields` exactly as the controller sent
/// it, explicit nulls included, so the object can be written back whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WanInterface {
    pub id: String,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl WanInterface {
    /// Circuit name
    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    pub fn label_id(&self) -> Option<&str> {
        self.str_field("label_id")
    }

    pub fn bfd_mode(&self) -> Option<&str> {
        self.str_field("bfd_mode")
    }

    pub fn lqm_enabled(&self) -> Option<bool> {
        self.fields.get("lqm_enabled").and_then(serde_json::Value::as_bool)
    }

    pub fn bw_config_mode(&self) -> Option<&str> {
        self.str_field("bw_config_mode")
    }

    pub fn set(&mut self, key: &str, value: impl Into<serde_json::Value>) {
        self.fields.insert(key.to_string(), value.into());
    }

    pub fn bwm_state(&self) -> BwmState {
        match self.bw_config_mode() {
            Some(BWM_MANUAL) => BwmState::On,
            Some(BWM_MANUAL_DISABLED) => BwmState::Off,
            _ => BwmState::Unknown,
        }
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(serde_json::Value::as_str)
    }
}

/// BFD mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum BfdMode {
    Aggressive,
    #[value(name = "non-aggressive", alias = "non_aggressive")]
    NonAggressive,
}

impl BfdMode {
    /// Value the controller stores in `bfd_mode`
    pub fn as_api_str(&self) -> &'static str {
        match self {
            BfdMode::Aggressive => "aggressive",
            BfdMode::NonAggressive => "non_aggressive",
        }
    }
}

impl fmt::Display for BfdMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_api_str())
    }
}

/// Requested change for an on/off setting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    #[default]
    #[value(name = "nochange")]
    NoChange,
    On,
    Off,
}

impl Toggle {
    pub fn is_change(&self) -> bool {
        !matches!(self, Toggle::NoChange)
    }
}

impl fmt::Display for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Toggle::NoChange => "nochange",
            Toggle::On => "on",
            Toggle::Off => "off",
        })
    }
}

/// Bandwidth monitoring state as derived from `bw_config_mode`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BwmState {
    On,
    Off,
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wan_interface_keeps_unknown_fields() {
        let raw = json!({
            "id": "w1",
            "name": "LTE-Circuit-1",
            "bfd_mode": "aggressive",
            "lqm_enabled": true,
            "bw_config_mode": "manual",
            "link_bw_down": 50.0,
            "_etag": 3
        });
        let iface: WanInterface = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(iface.fields.get("_etag"), Some(&json!(3)));
        assert_eq!(iface.name(), Some("LTE-Circuit-1"));
        assert_eq!(iface.lqm_enabled(), Some(true));
        assert_eq!(serde_json::to_value(&iface).unwrap(), raw);
    }

    #[test]
    fn test_wan_interface_keeps_explicit_nulls() {
        let raw = json!({
            "id": "w1",
            "name": "LTE-1",
            "bfd_mode": "aggressive",
            "label_id": null,
            "lqm_enabled": null
        });
        let iface: WanInterface = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(iface.label_id(), None);
        assert_eq!(iface.lqm_enabled(), None);
        assert_eq!(serde_json::to_value(&iface).unwrap(), raw);
    }

    #[test]
    fn test_bwm_state() {
        let mut iface: WanInterface = serde_json::from_value(json!({ "id": "w1" })).unwrap();
        assert_eq!(iface.bwm_state(), BwmState::Unknown);
        iface.set("bw_config_mode", BWM_MANUAL);
        assert_eq!(iface.bwm_state(), BwmState::On);
        iface.set("bw_config_mode", BWM_MANUAL_DISABLED);
        assert_eq!(iface.bwm_state(), BwmState::Off);
        iface.set("bw_config_mode", "auto");
        assert_eq!(iface.bwm_state(), BwmState::Unknown);
    }

    #[test]
    fn test_bfd_mode_accepts_both_spellings() {
        assert_eq!(
            BfdMode::from_str("non-aggressive", true).unwrap(),
            BfdMode::NonAggressive
        );
        assert_eq!(
            BfdMode::from_str("non_aggressive", true).unwrap(),
            BfdMode::NonAggressive
        );
        assert_eq!(BfdMode::NonAggressive.as_api_str(), "non_aggressive");
        assert!(BfdMode::from_str("slow", true).is_err());
    }

    #[test]
    fn test_list_response_without_items() {
        let list: ListResponse<Site> = serde_json::from_value(json!({})).unwrap();
        assert!(list.items.is_empty());
    }
}
