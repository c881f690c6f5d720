use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::api::{ClusterApi, QueryError, QueryErrorKind, QueryResult, QueryScope};
use crate::census::ConfigMapRecord;

/// In-memory cluster for exercising the aggregation without an API server.
#[derive(Default)]
pub(crate) struct FakeCluster {
    namespaces: Vec<String>,
    cluster_role_bindings: usize,
    role_bindings: HashMap<String, usize>,
    secrets: HashMap<String, usize>,
    config_maps: HashMap<String, Vec<(String, u64)>>,
    failing: HashSet<QueryScope>,
    calls: AtomicUsize,
}

impl FakeCluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn namespace(mut self, name: &str) -> Self {
        self.namespaces.push(name.to_string());
        self
    }

    pub fn cluster_role_bindings(mut self, count: usize) -> Self {
        self.cluster_role_bindings = count;
        self
    }

    pub fn role_bindings(mut self, namespace: &str, count: usize) -> Self {
        self.role_bindings.insert(namespace.to_string(), count);
        self
    }

    pub fn secrets(mut self, namespace: &str, count: usize) -> Self {
        self.secrets.insert(namespace.to_string(), count);
        self
    }

    pub fn config_map(mut self, namespace: &str, name: &str, size: u64) -> Self {
        self.config_maps.entry(namespace.to_string()).or_default().push((name.to_string(), size));
        self
    }

    pub fn failing(mut self, scope: QueryScope) -> Self {
        self.failing.insert(scope);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check(&self, scope: QueryScope) -> QueryResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(&scope) {
            return Err(QueryError::new(scope, QueryErrorKind::Rejected, "forbidden"));
        }
        Ok(())
    }

    fn names(prefix: &str, count: usize) -> Vec<String> {
        (0..count).map(|i| format!("{prefix}-{i}")).collect()
    }
}

impl ClusterApi for FakeCluster {
    async fn list_namespaces(&self) -> QueryResult<Vec<String>> {
        self.check(QueryScope::Namespaces)?;
        Ok(self.namespaces.clone())
    }

    async fn list_cluster_role_bindings(&self) -> QueryResult<Vec<String>> {
        self.check(QueryScope::ClusterRoleBindings)?;
        Ok(Self::names("crb", self.cluster_role_bindings))
    }

    async fn list_role_bindings(&self, namespace: &str) -> QueryResult<Vec<String>> {
        self.check(QueryScope::RoleBindings(namespace.to_string()))?;
        Ok(Self::names("rb", self.role_bindings.get(namespace).copied().unwrap_or(0)))
    }

    async fn list_secrets(&self, namespace: &str) -> QueryResult<Vec<String>> {
        self.check(QueryScope::Secrets(namespace.to_string()))?;
        Ok(Self::names("secret", self.secrets.get(namespace).copied().unwrap_or(0)))
    }

    async fn list_config_maps(&self, namespace: &str) -> QueryResult<Vec<ConfigMapRecord>> {
        self.check(QueryScope::ConfigMaps(namespace.to_string()))?;
        let records = self.config_maps.get(namespace).map(Vec::as_slice).unwrap_or_default();
        Ok(records.iter().map(|(name, size)| ConfigMapRecord::new(name.clone(), namespace, *size)).collect())
    }
}
