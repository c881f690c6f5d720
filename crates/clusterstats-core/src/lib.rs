pub mod aggregate;
pub mod api;
pub mod census;
pub mod client;
pub mod discovery;
pub mod error;
pub mod inspect;

#[cfg(test)]
mod fake;

pub use aggregate::{aggregate, ResourceTotals};
pub use api::{ClusterApi, QueryError, QueryErrorKind, QueryResult, QueryScope};
pub use census::{census, CensusResult, ConfigMapRecord, LargeObjectIndex, LargestRecord, ObjectKey};
pub use client::KubeClient;
pub use discovery::{discover_descriptors, ClusterDescriptor};
pub use error::StatsError;
pub use inspect::{inspect_cluster, ClusterReport, InspectOptions};
