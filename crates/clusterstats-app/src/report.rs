use std::fmt;

use clusterstats_core::{ClusterDescriptor, ClusterReport, LargeObjectIndex};

pub const LARGE_OBJECTS_HEADER: &str = "=== ConfigMaps Name and Size ===";

/// One cluster's block of the report.
pub struct ReportView<'a> {
    pub descriptor: &'a ClusterDescriptor,
    pub report: &'a ClusterReport,
}

impl fmt::Display for ReportView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let totals = &self.report.totals;
        let (size, name, namespace) = match &self.report.census.largest {
            Some(largest) => (largest.size, largest.name.as_str(), largest.namespace.as_str()),
            None => (0, "", ""),
        };

        writeln!(f, "{}", self.descriptor)?;
        writeln!(f)?;
        writeln!(f, "- ClusterRoleBindings Total: {}", totals.cluster_role_bindings)?;
        writeln!(f, "- Secrets Total: {}", totals.secrets)?;
        writeln!(f, "- RoleBindings Total: {}", totals.role_bindings)?;
        writeln!(f, "- Largest ConfigMap Size: {size}")?;
        writeln!(f, "- Largest ConfigMap Name: {name}")?;
        writeln!(f, "- Namespace with largest ConfigMap : {namespace}")?;
        writeln!(f)?;
        writeln!(f, "{LARGE_OBJECTS_HEADER}")?;
        write_large_objects(f, &self.report.census.large_objects)?;
        writeln!(f)
    }
}

pub fn render(descriptor: &ClusterDescriptor, report: &ClusterReport) -> String {
    ReportView { descriptor, report }.to_string()
}

/// `name: <padding>size`, biggest first, sizes aligned after the widest name.
fn write_large_objects(f: &mut fmt::Formatter<'_>, index: &LargeObjectIndex) -> fmt::Result {
    if index.is_empty() {
        return Ok(());
    }

    let rows: Vec<(String, u64)> = index
        .ranked()
        .into_iter()
        .map(|(key, size)| {
            // qualify names that would otherwise be ambiguous
            let label = if index.is_name_shared(&key.name) {
                format!("{}/{}", key.namespace, key.name)
            } else {
                key.name.clone()
            };
            (label, size)
        })
        .collect();

    let width = rows.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
    for (label, size) in rows {
        let pad = width - label.chars().count();
        writeln!(f, "{label}: {}{size}", " ".repeat(pad))?;
    }
    Ok(())
}

/// Failed queries of one cluster, one per line, for stderr.
pub struct FailureSummary<'a> {
    pub descriptor: &'a ClusterDescriptor,
    pub report: &'a ClusterReport,
}

impl fmt::Display for FailureSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let failures = &self.report.failures;
        writeln!(f, "{}: {} queries failed, totals are partial", self.descriptor, failures.len())?;
        for failure in failures {
            writeln!(f, "  {failure}")?;
        }
        Ok(())
    }
}

/// `None` when every query succeeded.
pub fn render_failures(descriptor: &ClusterDescriptor, report: &ClusterReport) -> Option<String> {
    if report.is_complete() {
        return None;
    }
    Some(FailureSummary { descriptor, report }.to_string())
}
