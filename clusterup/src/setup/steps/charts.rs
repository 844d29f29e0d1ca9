use crate::error::InstallError;
use crate::setup::utils::exec::Executor;
use crate::setup::utils::{helm, kctl};
use crate::setup::{Plan, SetupStep};
use tracing::info;

/// Chart repositories, namespaces and cert-manager CRDs.
pub struct ChartRepos;

impl ChartRepos {
	pub const REPOS: &[(&str, &str)] = &[
		("jetstack", "https://charts.jetstack.io"),
		(
			"rancher-latest",
			"https://releases.rancher.com/server-charts/latest",
		),
	];
	pub const NAMESPACES: &[&str] = &[CertManager::NAMESPACE, Rancher::NAMESPACE];
}

impl SetupStep for ChartRepos {
	fn name(&self) -> &'static str {
		"ChartRepos"
	}

	fn set(&self, plan: &Plan, exec: &dyn Executor) -> Result<(), InstallError> {
		let kubeconfig = plan.ctx.kubeconfig_path();
		for (name, url) in ChartRepos::REPOS {
			helm::repo_add(exec, &kubeconfig, name, url)?;
		}
		helm::repo_update(exec, &kubeconfig)?;
		for namespace in ChartRepos::NAMESPACES {
			kctl::create_namespace(exec, &kubeconfig, namespace)?;
		}
		kctl::apply_url(exec, &kubeconfig, &CertManager::crds_url())?;
		info!("Chart repositories and CRDs are in place.");
		Ok(())
	}
}

pub struct CertManager;

impl CertManager {
	pub const VERSION: &str = "v1.13.3";
	pub const NAMESPACE: &str = "cert-manager";
	pub const CHART: &str = "jetstack/cert-manager";

	pub fn crds_url() -> String {
		format!(
			"https://github.com/cert-manager/cert-manager/releases/download/{}/cert-manager.crds.yaml",
			CertManager::VERSION
		)
	}
}

impl SetupStep for CertManager {
	fn name(&self) -> &'static str {
		"CertManager"
	}

	fn set(&self, plan: &Plan, exec: &dyn Executor) -> Result<(), InstallError> {
		let kubeconfig = plan.ctx.kubeconfig_path();
		helm::install(
			exec,
			&kubeconfig,
			"cert-manager",
			CertManager::CHART,
			CertManager::NAMESPACE,
			&["--version", CertManager::VERSION],
		)?;
		kctl::rollout_status(exec, &kubeconfig, CertManager::NAMESPACE, "cert-manager")?;
		info!("cert-manager {} is rolled out.", CertManager::VERSION);
		Ok(())
	}
}

/// Rancher management UI, only when `SETUP_RANCHER` is 1.
pub struct Rancher;

impl Rancher {
	pub const NAMESPACE: &str = "cattle-system";
	pub const CHART: &str = "rancher-latest/rancher";
	pub const HOSTNAME: &str = "rancher.localhost";
	pub const BOOTSTRAP_PASSWORD: &str = "admin";
}

impl SetupStep for Rancher {
	fn name(&self) -> &'static str {
		"Rancher"
	}

	fn enabled(&self, plan: &Plan) -> bool {
		plan.ctx.setup_rancher
	}

	fn set(&self, plan: &Plan, exec: &dyn Executor) -> Result<(), InstallError> {
		let kubeconfig = plan.ctx.kubeconfig_path();
		let hostname = format!("hostname={}", Rancher::HOSTNAME);
		let password = format!("bootstrapPassword={}", Rancher::BOOTSTRAP_PASSWORD);
		helm::install(
			exec,
			&kubeconfig,
			"rancher",
			Rancher::CHART,
			Rancher::NAMESPACE,
			&["--set", &hostname, "--set", &password],
		)?;
		kctl::rollout_status(exec, &kubeconfig, Rancher::NAMESPACE, "rancher")?;
		info!("Rancher is rolled out.");
		Ok(())
	}
}
