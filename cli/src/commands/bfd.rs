//! Bulk BFD mode change

use crate::client::ControllerClient;
use crate::error::{Error, Result};
use crate::matcher::{is_hub, matching_interfaces};
use crate::model::{BfdMode, Site, Toggle, WanInterface, WanInterfaceLabel};
use crate::output::{MatchRow, OutputFormat};
use crate::plan::plan_change;
use crate::prompt::Confirm;
use colored::Colorize;
use std::collections::HashMap;
use std::io::Write;

/// What to change and where
#[derive(Debug, Clone)]
pub struct BfdUpdate {
    pub pattern: String,
    pub bfd: BfdMode,
    pub lqm: Toggle,
    pub bwm: Toggle,
    pub include_hubs: bool,
    pub format: OutputFormat,
}

/// A matched circuit and the site it belongs to
#[derive(Debug, Clone)]
pub struct MatchedInterface {
    pub site: Site,
    pub iface: WanInterface,
}

/// Outcome of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub matched: usize,
    pub updated: usize,
    pub failed: usize,
    pub aborted: bool,
}

impl Summary {
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// Run the whole find / confirm / update flow against an authenticated client
pub async fn run<W: Write>(
    client: &ControllerClient,
    req: &BfdUpdate,
    confirm: &mut dyn Confirm,
    out: &mut W,
) -> Result<Summary> {
    let tenant = client.tenant().await?;
    writeln!(
        out,
        "======== TENANT NAME {} ========",
        tenant.name.as_deref().unwrap_or(&tenant.id)
    )?;

    let labels = load_labels(client).await;
    let matches = find_matches(client, req).await?;

    if matches.is_empty() {
        return Err(Error::NoMatches(req.pattern.clone()));
    }

    let rows: Vec<MatchRow> = matches.iter().map(|m| match_row(m, &labels)).collect();
    writeln!(out, "Found {} matching circuit(s):", matches.len())?;
    writeln!(out, "{}", req.format.render(&rows))?;
    writeln!(out)?;

    let mut summary = Summary {
        matched: matches.len(),
        ..Default::default()
    };

    if !confirm.confirm(&confirmation_question(req))? {
        writeln!(out, "CHANGES ABORTED!")?;
        summary.aborted = true;
        return Ok(summary);
    }

    writeln!(out, "Changing Sites:")?;
    writeln!(out)?;

    for matched in &matches {
        let plan = plan_change(&matched.iface, req.bfd, req.lqm, req.bwm);
        writeln!(
            out,
            "Site: {} ({}) Circuit: {}",
            matched.site.display_name(),
            matched.site.id,
            matched.iface.name().unwrap_or(&matched.iface.id)
        )?;
        for note in &plan.notes {
            writeln!(out, "      {}", note)?;
        }
        if plan.bwm_ignored {
            tracing::warn!(
                iface = %matched.iface.id,
                mode = ?matched.iface.bw_config_mode(),
                "BWM change skipped"
            );
        }

        match client.put_wan_interface(&matched.site.id, &plan.updated).await {
            Ok(_) => {
                summary.updated += 1;
                writeln!(out, " {}, BFD Mode now {}", "Success".green(), req.bfd)?;
            }
            Err(e) => {
                summary.failed += 1;
                tracing::warn!(iface = %matched.iface.id, error = %e, "update failed");
                writeln!(out, " {} to make change: {}", "Failed".red(), e)?;
            }
        }
        writeln!(out)?;
    }

    writeln!(
        out,
        "Updated {} of {} circuit(s), {} failed",
        summary.updated, summary.matched, summary.failed
    )?;
    Ok(summary)
}

/// Walk every site and collect matching WAN interfaces in discovery order.
/// Hub sites are skipped unless requested; a site whose interfaces cannot
/// be listed is skipped with a warning.
pub async fn find_matches(
    client: &ControllerClient,
    req: &BfdUpdate,
) -> Result<Vec<MatchedInterface>> {
    let sites = client.sites().await?;
    let mut matches = Vec::new();

    for site in &sites {
        if !req.include_hubs && is_hub(site) {
            tracing::debug!(site = %site.id, "skipping hub site");
            continue;
        }
        let interfaces = match client.wan_interfaces(&site.id).await {
            Ok(interfaces) => interfaces,
            Err(e) => {
                tracing::warn!(site = %site.id, error = %e, "cannot list WAN interfaces");
                continue;
            }
        };
        matches.extend(
            matching_interfaces(&interfaces, &req.pattern).map(|iface| MatchedInterface {
                site: site.clone(),
                iface: iface.clone(),
            }),
        );
    }

    tracing::info!(sites = sites.len(), matched = matches.len(), "scan complete");
    Ok(matches)
}

async fn load_labels(client: &ControllerClient) -> HashMap<String, WanInterfaceLabel> {
    match client.wan_interface_labels().await {
        Ok(labels) => labels.into_iter().map(|l| (l.id.clone(), l)).collect(),
        Err(e) => {
            tracing::warn!(error = %e, "cannot load WAN interface labels");
            HashMap::new()
        }
    }
}

fn match_row(m: &MatchedInterface, labels: &HashMap<String, WanInterfaceLabel>) -> MatchRow {
    let label = m.iface.label_id().and_then(|id| labels.get(id));
    MatchRow {
        site: m.site.display_name().to_string(),
        circuit: m.iface.name().unwrap_or_default().to_string(),
        category: or_dash(label.and_then(|l| l.name.clone())),
        label: or_dash(label.and_then(|l| l.label.clone())),
        description: or_dash(label.and_then(|l| l.description.clone())),
        bfd_mode: or_dash(m.iface.bfd_mode().map(String::from)),
        lqm_enabled: or_dash(m.iface.lqm_enabled().map(|v| v.to_string())),
        bwm_mode: or_dash(m.iface.bw_config_mode().map(String::from)),
    }
}

fn or_dash(value: Option<String>) -> String {
    value.unwrap_or_else(|| "-".into())
}

fn confirmation_question(req: &BfdUpdate) -> String {
    let mut question = format!(
        "This will change all circuits found above to a BFD Mode of {}",
        req.bfd
    );
    if req.lqm.is_change() {
        question.push_str(", change LQM");
    }
    if req.bwm.is_change() {
        question.push_str(", change BWM");
    }
    question.push_str(" are you sure");
    question
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(lqm: Toggle, bwm: Toggle) -> BfdUpdate {
        BfdUpdate {
            pattern: "lte".into(),
            bfd: BfdMode::NonAggressive,
            lqm,
            bwm,
            include_hubs: false,
            format: OutputFormat::Table,
        }
    }

    #[test]
    fn test_question_mentions_extra_changes() {
        assert_eq!(
            confirmation_question(&request(Toggle::NoChange, Toggle::NoChange)),
            "This will change all circuits found above to a BFD Mode of non_aggressive are you sure"
        );
        let q = confirmation_question(&request(Toggle::Off, Toggle::On));
        assert!(q.contains(", change LQM, change BWM are you sure"));
    }

    #[test]
    fn test_match_row_without_label() {
        let m = MatchedInterface {
            site: serde_json::from_value(serde_json::json!({ "id": "s1", "name": "Branch" })).unwrap(),
            iface: serde_json::from_value(serde_json::json!({
                "id": "w1", "name": "LTE-1", "label_id": "missing", "bfd_mode": "aggressive"
            }))
            .unwrap(),
        };
        let row = match_row(&m, &HashMap::new());
        assert_eq!(row.site, "Branch");
        assert_eq!(row.category, "-");
        assert_eq!(row.lqm_enabled, "-");
        assert_eq!(row.bfd_mode, "aggressive");
    }
}
