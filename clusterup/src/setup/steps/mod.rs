pub mod charts;
pub mod cluster;
pub mod confirm;
pub mod ingress;
pub mod kubeconfig;
pub mod ports;
pub mod resolver;
pub mod tools;

pub use charts::{CertManager, ChartRepos, Rancher};
pub use cluster::Cluster;
pub use ingress::IngressManifest;
pub use kubeconfig::Kubeconfig;
pub use resolver::Resolver;
