use crate::error::InstallError;
use crate::setup::utils::exec::Executor;
use crate::setup::{Plan, SetupStep};
use std::{
	fs,
	path::{Path, PathBuf},
};
use tracing::info;

/// ingress-nginx HelmChart manifest, auto-deployed by k3s from its server
/// manifests directory in place of the disabled traefik.
pub struct IngressManifest;

impl IngressManifest {
	pub const FILE_NAME: &str = "helm-ingress-nginx.yaml";
	pub const NODE_PATH: &str = "/var/lib/rancher/k3s/server/manifests/helm-ingress-nginx.yaml";
	pub const MANIFEST: &str = include_str!("../../../manifests/helm-ingress-nginx.yaml");

	pub fn path(work_dir: &Path) -> PathBuf {
		work_dir.join(IngressManifest::FILE_NAME)
	}
}

impl SetupStep for IngressManifest {
	fn name(&self) -> &'static str {
		"IngressManifest"
	}

	fn set(&self, plan: &Plan, _exec: &dyn Executor) -> Result<(), InstallError> {
		let path = IngressManifest::path(&plan.ctx.work_dir);
		if path.exists() {
			info!("Using existing ingress manifest {}.", path.display());
			return Ok(());
		}
		fs::write(&path, IngressManifest::MANIFEST)?;
		info!("Wrote ingress manifest to {}.", path.display());
		Ok(())
	}
}
