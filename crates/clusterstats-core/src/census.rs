use std::collections::BTreeMap;

use futures::stream::{self, StreamExt};
use k8s_openapi::api::core::v1::ConfigMap;

use crate::api::{ClusterApi, QueryError};

/// One ConfigMap observed during a census.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigMapRecord {
    pub name: String,
    pub namespace: String,
    /// Encoded size in bytes.
    pub size: u64,
}

/// The single biggest ConfigMap of a cluster.
pub type LargestRecord = ConfigMapRecord;

impl ConfigMapRecord {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>, size: u64) -> Self {
        Self { name: name.into(), namespace: namespace.into(), size }
    }

    /// Builds a record for a ConfigMap listed in `namespace`.
    pub fn from_config_map(cm: &ConfigMap, namespace: &str) -> Self {
        let name = cm.metadata.name.clone().unwrap_or_default();
        Self { name, namespace: namespace.to_string(), size: encoded_size(cm) }
    }
}

/// Size of the object as it travels over the API, in bytes.
pub fn encoded_size(cm: &ConfigMap) -> u64 {
    serde_json::to_vec(cm).map(|bytes| bytes.len() as u64).unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectKey {
    pub namespace: String,
    pub name: String,
}

/// ConfigMaps above the size threshold, keyed by namespace and name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LargeObjectIndex {
    entries: BTreeMap<ObjectKey, u64>,
}

impl LargeObjectIndex {
    pub fn insert(&mut self, record: &ConfigMapRecord) {
        let key = ObjectKey { namespace: record.namespace.clone(), name: record.name.clone() };
        self.entries.insert(key, record.size);
    }

    pub fn get(&self, namespace: &str, name: &str) -> Option<u64> {
        let key = ObjectKey { namespace: namespace.to_string(), name: name.to_string() };
        self.entries.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ObjectKey, u64)> {
        self.entries.iter().map(|(k, v)| (k, *v))
    }

    /// Biggest first. Equal sizes are ordered by name, then namespace.
    pub fn ranked(&self) -> Vec<(&ObjectKey, u64)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|(ka, a), (kb, b)| {
            b.cmp(a).then_with(|| ka.name.cmp(&kb.name)).then_with(|| ka.namespace.cmp(&kb.namespace))
        });
        ranked
    }

    /// Whether more than one namespace holds a large ConfigMap called `name`.
    pub fn is_name_shared(&self, name: &str) -> bool {
        self.entries.keys().filter(|k| k.name == name).take(2).count() > 1
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CensusResult {
    pub largest: Option<LargestRecord>,
    pub large_objects: LargeObjectIndex,
}

impl CensusResult {
    /// Folds one namespace's ConfigMaps into the census.
    ///
    /// Namespaces must be observed in enumeration order: the largest record
    /// only moves when a strictly bigger object shows up.
    pub fn observe_namespace(&mut self, mut records: Vec<ConfigMapRecord>, threshold: u64) {
        records.sort_by(|a, b| b.size.cmp(&a.size));
        let Some(top) = records.first() else {
            return;
        };

        if self.largest.as_ref().map_or(true, |largest| top.size > largest.size) {
            self.largest = Some(top.clone());
        }

        for record in records.iter().filter(|r| r.size > threshold) {
            self.large_objects.insert(record);
        }
    }
}

/// Scans the ConfigMaps of every namespace.
///
/// Up to `concurrency` namespaces are listed at once; results are folded in
/// namespace order. A namespace whose listing fails is skipped and its error
/// returned alongside the result.
pub async fn census<C: ClusterApi>(
    api: &C,
    namespaces: &[String],
    threshold: u64,
    concurrency: usize,
) -> (CensusResult, Vec<QueryError>) {
    let listings: Vec<_> = stream::iter(namespaces)
        .map(|ns| api.list_config_maps(ns))
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let mut result = CensusResult::default();
    let mut failures = Vec::new();
    for (ns, listing) in namespaces.iter().zip(listings) {
        match listing {
            Ok(records) => {
                tracing::debug!(namespace = %ns, count = records.len(), "configmaps listed");
                result.observe_namespace(records, threshold);
            }
            Err(err) => failures.push(err),
        }
    }

    (result, failures)
}
