use std::fmt::Debug;

use k8s_openapi::api::core::v1::{ConfigMap, Namespace, Secret};
use k8s_openapi::api::rbac::v1::{ClusterRoleBinding, RoleBinding};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::api::ListParams;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Api, Client, Config};
use serde::de::DeserializeOwned;

use crate::api::{ClusterApi, QueryError, QueryResult, QueryScope};
use crate::census::ConfigMapRecord;
use crate::discovery::ClusterDescriptor;
use crate::error::StatsError;

/// Client for one cluster, built from that cluster's kubeconfig file.
#[derive(Clone)]
pub struct KubeClient {
    client: Client,
    context: String,
}

impl KubeClient {
    /// Uses the kubeconfig's current context.
    pub async fn from_descriptor(descriptor: &ClusterDescriptor) -> Result<Self, StatsError> {
        let path = descriptor.path();
        let kubeconfig = Kubeconfig::read_from(path).map_err(|e| StatsError::connection(path, e))?;
        let context = kubeconfig.current_context.clone().unwrap_or_else(|| "unknown".into());

        let config = Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
            .await
            .map_err(|e| StatsError::connection(path, e))?;
        let client = Client::try_from(config).map_err(|e| StatsError::connection(path, e))?;

        tracing::debug!(descriptor = %descriptor, %context, "client ready");
        Ok(Self { client, context })
    }

    pub fn context(&self) -> &str {
        &self.context
    }
}

/// Names only: bindings and secrets are counted, never read.
async fn list_names<K>(api: Api<K>, scope: QueryScope) -> QueryResult<Vec<String>>
where
    K: kube::Resource + Clone + DeserializeOwned + Debug,
{
    let list = api.list_metadata(&ListParams::default()).await.map_err(|e| QueryError::from_kube(scope, e))?;
    Ok(item_names(list.items.into_iter().map(|item| item.metadata)))
}

/// One entry per item, so the length is the item count even when a name is missing.
fn item_names(items: impl IntoIterator<Item = ObjectMeta>) -> Vec<String> {
    items.into_iter().map(|meta| meta.name.unwrap_or_default()).collect()
}

impl ClusterApi for KubeClient {
    async fn list_namespaces(&self) -> QueryResult<Vec<String>> {
        let api: Api<Namespace> = Api::all(self.client.clone());
        list_names(api, QueryScope::Namespaces).await
    }

    async fn list_cluster_role_bindings(&self) -> QueryResult<Vec<String>> {
        let api: Api<ClusterRoleBinding> = Api::all(self.client.clone());
        list_names(api, QueryScope::ClusterRoleBindings).await
    }

    async fn list_role_bindings(&self, namespace: &str) -> QueryResult<Vec<String>> {
        let api: Api<RoleBinding> = Api::namespaced(self.client.clone(), namespace);
        list_names(api, QueryScope::RoleBindings(namespace.to_string())).await
    }

    async fn list_secrets(&self, namespace: &str) -> QueryResult<Vec<String>> {
        let api: Api<Secret> = Api::namespaced(self.client.clone(), namespace);
        list_names(api, QueryScope::Secrets(namespace.to_string())).await
    }

    async fn list_config_maps(&self, namespace: &str) -> QueryResult<Vec<ConfigMapRecord>> {
        let api: Api<ConfigMap> = Api::namespaced(self.client.clone(), namespace);
        let list = api
            .list(&ListParams::default())
            .await
            .map_err(|e| QueryError::from_kube(QueryScope::ConfigMaps(namespace.to_string()), e))?;
        Ok(list.items.iter().map(|cm| ConfigMapRecord::from_config_map(cm, namespace)).collect())
    }
}
