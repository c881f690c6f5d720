use futures::stream::{self, StreamExt};

use crate::api::{ClusterApi, QueryError};

/// Access-control and secret counts for one cluster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResourceTotals {
    pub cluster_role_bindings: usize,
    /// Summed over every namespace.
    pub role_bindings: usize,
    /// Summed over every namespace.
    pub secrets: usize,
}

/// Counts cluster role bindings once and role bindings and secrets per
/// namespace. Best effort: a failed list adds nothing and is returned.
pub async fn aggregate<C: ClusterApi>(
    api: &C,
    namespaces: &[String],
    concurrency: usize,
) -> (ResourceTotals, Vec<QueryError>) {
    let mut totals = ResourceTotals::default();
    let mut failures = Vec::new();

    match api.list_cluster_role_bindings().await {
        Ok(items) => totals.cluster_role_bindings = items.len(),
        Err(err) => failures.push(err),
    }

    let listings: Vec<_> = stream::iter(namespaces)
        .map(|ns| async move { futures::join!(api.list_role_bindings(ns), api.list_secrets(ns)) })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    for (ns, (role_bindings, secrets)) in namespaces.iter().zip(listings) {
        match role_bindings {
            Ok(items) => {
                tracing::debug!(namespace = %ns, count = items.len(), "rolebindings listed");
                totals.role_bindings += items.len();
            }
            Err(err) => failures.push(err),
        }
        match secrets {
            Ok(items) => {
                tracing::debug!(namespace = %ns, count = items.len(), "secrets listed");
                totals.secrets += items.len();
            }
            Err(err) => failures.push(err),
        }
    }

    (totals, failures)
}
