//! Per-interface change computation

use crate::model::{BfdMode, BwmState, Toggle, WanInterface, BWM_MANUAL, BWM_MANUAL_DISABLED};

/// Interface payload to PUT plus the transitions to report before sending it
#[derive(Debug, Clone)]
pub struct PlannedChange {
    pub updated: WanInterface,
    pub notes: Vec<String>,
    /// Set when a BWM change was requested but the current state is unknown
    pub bwm_ignored: bool,
}

/// Apply the requested settings to a copy of `iface`.
///
/// BWM is only flipped when the current mode is one of the two manual modes;
/// any other mode is left as is.
pub fn plan_change(iface: &WanInterface, bfd: BfdMode, lqm: Toggle, bwm: Toggle) -> PlannedChange {
    let mut updated = iface.clone();
    let mut notes = Vec::new();
    let mut bwm_ignored = false;

    notes.push(format!(
        "Current BFD Mode {} changing to {}",
        iface.bfd_mode().unwrap_or("unset"),
        bfd
    ));
    updated.set("bfd_mode", bfd.as_api_str());

    if lqm.is_change() {
        notes.push(format!(
            "Current LQM Mode {} changing to {}",
            display_bool(iface.lqm_enabled()),
            lqm
        ));
        updated.set("lqm_enabled", lqm == Toggle::On);
    }

    if bwm.is_change() {
        let current = iface.bw_config_mode().unwrap_or("unset");
        match iface.bwm_state() {
            BwmState::Unknown => {
                notes.push(format!(
                    "Ignoring BWM Mode change due to unknown state: {}",
                    current
                ));
                bwm_ignored = true;
            }
            _ => {
                notes.push(format!("Current BWM Mode {} changing to {}", current, bwm));
                let mode = if bwm == Toggle::On {
                    BWM_MANUAL
                } else {
                    BWM_MANUAL_DISABLED
                };
                updated.set("bw_config_mode", mode);
            }
        }
    }

    PlannedChange {
        updated,
        notes,
        bwm_ignored,
    }
}

fn display_bool(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "true",
        Some(false) => "false",
        None => "unset",
    }
}
