use crate::aggregate::{aggregate, ResourceTotals};
use crate::api::{ClusterApi, QueryError};
use crate::census::{census, CensusResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InspectOptions {
    /// ConfigMaps strictly above this many bytes are indexed.
    pub large_size: u64,
    /// Namespaces queried at the same time.
    pub concurrency: usize,
}

/// Everything gathered from one cluster in one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterReport {
    pub namespaces: Vec<String>,
    pub totals: ResourceTotals,
    pub census: CensusResult,
    /// Queries that failed; their contribution is missing from the numbers.
    pub failures: Vec<QueryError>,
}

impl ClusterReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs the aggregation and the ConfigMap census against one cluster.
///
/// Namespaces are listed once; if that fails the pass continues with no
/// namespaces, so only the cluster role binding count is collected.
pub async fn inspect_cluster<C: ClusterApi>(api: &C, options: InspectOptions) -> ClusterReport {
    let mut failures = Vec::new();

    let namespaces = match api.list_namespaces().await {
        Ok(namespaces) => namespaces,
        Err(err) => {
            failures.push(err);
            Vec::new()
        }
    };
    tracing::debug!(count = namespaces.len(), "namespaces listed");

    let ((totals, aggregate_failures), (census, census_failures)) = futures::join!(
        aggregate(api, &namespaces, options.concurrency),
        census(api, &namespaces, options.large_size, options.concurrency),
    );
    failures.extend(aggregate_failures);
    failures.extend(census_failures);

    ClusterReport { namespaces, totals, census, failures }
}
