use crate::core::models::ids::HetId;
use crate::core::models::model::Model;
use crate::core::records::RemarkRecord;
use tracing::debug;

/// Site identifiers and het descriptions pulled out of a site remark.
///
/// The remark is laid out in blocks of three lines after a header line: a
/// site identifier, free text, and the het group the site binds. Entry `i` of
/// `het_lines` belongs to entry `i` of `site_ids`.
#[derive(Debug, Default, PartialEq, Eq)]
struct SiteRemark {
    site_ids: Vec<String>,
    het_lines: Vec<String>,
}

impl SiteRemark {
    fn parse(content: &str) -> Self {
        let lines: Vec<&str> = content.split('\n').collect();
        if lines.len() <= 3 {
            return Self::default();
        }
        Self {
            site_ids: lines.iter().skip(1).step_by(3).map(|l| field_value(l)).collect(),
            het_lines: lines.iter().skip(3).step_by(3).map(|l| field_value(l)).collect(),
        }
    }
}

/// `"KEY: value"` yields `value`; a line without a colon is kept whole.
fn field_value(line: &str) -> String {
    match line.split(':').nth(1) {
        Some(value) => value.trim().to_string(),
        None => line.to_string(),
    }
}

/// Links each het group to the site the structure's remark says it binds.
///
/// Only the first remark carrying `remark_number` is read. A het matches a
/// remark entry when `"{name} {chain} {number}"` appears, case-insensitively,
/// in the entry's het line; when several entries or sites match, the last one
/// wins. Malformed remarks simply produce no annotations.
pub(crate) fn resolve_site_annotations(
    model: &mut Model,
    remarks: &[RemarkRecord],
    remark_number: u16,
) {
    let Some(remark) = remarks.iter().find(|r| r.number == remark_number) else {
        return;
    };
    let parsed = SiteRemark::parse(&remark.content);
    let het_lines: Vec<String> = parsed.het_lines.iter().map(|l| l.to_lowercase()).collect();

    let mut assignments: Vec<(HetId, usize)> = Vec::new();
    for (het_id, het) in model.hets_iter() {
        let needle = format!("{} {} {}", het.name, het.chain_name, het.number).to_lowercase();
        let mut site_index = None;
        for (entry, het_line) in het_lines.iter().enumerate() {
            if !het_line.contains(&needle) {
                continue;
            }
            let Some(site_id) = parsed.site_ids.get(entry) else {
                continue;
            };
            if let Some(index) = model.sites().iter().rposition(|s| &s.name == site_id) {
                site_index = Some(index);
            }
        }
        if let Some(index) = site_index {
            assignments.push((het_id, index));
        }
    }

    debug!(
        "Site remark {} annotated {} het groups",
        remark_number,
        assignments.len()
    );
    for (het_id, index) in assignments {
        if let Some(het) = model.het_mut(het_id) {
            het.annotated_binding_site = Some(index);
        }
    }
}
