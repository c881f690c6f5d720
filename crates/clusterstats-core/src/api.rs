use std::fmt;
use std::future::Future;

use crate::census::ConfigMapRecord;

pub type QueryResult<T> = Result<T, QueryError>;

/// The list operations the statistics need from one cluster.
///
/// Every call is independent: a failure only loses that call's contribution.
/// An empty list is a valid `Ok` result.
pub trait ClusterApi: Sync {
    fn list_namespaces(&self) -> impl Future<Output = QueryResult<Vec<String>>> + Send;

    /// Names of the cluster-scoped role bindings.
    fn list_cluster_role_bindings(&self) -> impl Future<Output = QueryResult<Vec<String>>> + Send;

    fn list_role_bindings(&self, namespace: &str) -> impl Future<Output = QueryResult<Vec<String>>> + Send;

    fn list_secrets(&self, namespace: &str) -> impl Future<Output = QueryResult<Vec<String>>> + Send;

    fn list_config_maps(&self, namespace: &str) -> impl Future<Output = QueryResult<Vec<ConfigMapRecord>>> + Send;
}

/// Which list call failed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryScope {
    Namespaces,
    ClusterRoleBindings,
    RoleBindings(String),
    Secrets(String),
    ConfigMaps(String),
}

impl QueryScope {
    pub fn namespace(&self) -> Option<&str> {
        match self {
            Self::Namespaces | Self::ClusterRoleBindings => None,
            Self::RoleBindings(ns) | Self::Secrets(ns) | Self::ConfigMaps(ns) => Some(ns),
        }
    }
}

impl fmt::Display for QueryScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Namespaces => write!(f, "namespaces"),
            Self::ClusterRoleBindings => write!(f, "clusterrolebindings"),
            Self::RoleBindings(ns) => write!(f, "rolebindings in {ns}"),
            Self::Secrets(ns) => write!(f, "secrets in {ns}"),
            Self::ConfigMaps(ns) => write!(f, "configmaps in {ns}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryErrorKind {
    /// Credentials could not be obtained or were refused by the client.
    Auth,
    /// The API server answered with an error status.
    Rejected,
    /// The request never got a response.
    Transport,
}

impl fmt::Display for QueryErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auth => write!(f, "auth"),
            Self::Rejected => write!(f, "rejected"),
            Self::Transport => write!(f, "transport"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryError {
    pub scope: QueryScope,
    pub kind: QueryErrorKind,
    pub message: String,
}

impl QueryError {
    pub fn new(scope: QueryScope, kind: QueryErrorKind, message: impl Into<String>) -> Self {
        Self { scope, kind, message: message.into() }
    }

    pub fn from_kube(scope: QueryScope, err: kube::Error) -> Self {
        let kind = match &err {
            kube::Error::Api(_) => QueryErrorKind::Rejected,
            kube::Error::Auth(_) => QueryErrorKind::Auth,
            _ => QueryErrorKind::Transport,
        };
        Self::new(scope, kind, err.to_string())
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listing {} failed ({}): {}", self.scope, self.kind, self.message)
    }
}

impl std::error::Error for QueryError {}
