//! Circuit name matching

use crate::model::{Site, WanInterface, HUB_ROLE};

/// Case-insensitive substring test
pub fn circuit_matches(name: &str, pattern: &str) -> bool {
    name.to_lowercase().contains(&pattern.to_lowercase())
}

/// True for hub (data center) sites
pub fn is_hub(site: &Site) -> bool {
    site.element_cluster_role.as_deref() == Some(HUB_ROLE)
}

/// Interfaces whose circuit name contains `pattern`, in input order.
/// Unnamed interfaces never match.
pub fn matching_interfaces<'a>(
    interfaces: &'a [WanInterface],
    pattern: &'a str,
) -> impl Iterator<Item = &'a WanInterface> + 'a {
    interfaces.iter().filter(move |iface| {
        iface
            .name()
            .is_some_and(|name| circuit_matches(name, pattern))
    })
}
