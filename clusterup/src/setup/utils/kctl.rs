use crate::error::InstallError;
use crate::setup::utils::exec::{Cmd, Executor};
use std::path::Path;

fn kubectl(kubeconfig: &Path, args: &[&str]) -> Cmd {
	Cmd::new("kubectl")
		.env("KUBECONFIG", kubeconfig.display().to_string())
		.args(args.iter().copied())
}

pub fn get_nodes(exec: &dyn Executor, kubeconfig: &Path) -> Result<(), InstallError> {
	exec.status(&kubectl(kubeconfig, &["get", "nodes"]))
}

pub fn create_namespace(
	exec: &dyn Executor,
	kubeconfig: &Path,
	namespace: &str,
) -> Result<(), InstallError> {
	exec.status(&kubectl(kubeconfig, &["create", "namespace", namespace]))
}

pub fn apply_url(exec: &dyn Executor, kubeconfig: &Path, url: &str) -> Result<(), InstallError> {
	exec.status(&kubectl(kubeconfig, &["apply", "-f", url]))
}

/// Blocks until the deployment's replicas report ready.
pub fn rollout_status(
	exec: &dyn Executor,
	kubeconfig: &Path,
	namespace: &str,
	deployment: &str,
) -> Result<(), InstallError> {
	let target = format!("deploy/{deployment}");
	exec.status(&kubectl(
		kubeconfig,
		&["-n", namespace, "rollout", "status", &target],
	))
}
