use crate::error::InstallError;
use crate::setup::utils::exec::{Cmd, Executor};
use std::path::Path;

fn helm(kubeconfig: &Path) -> Cmd {
	Cmd::new("helm").env("KUBECONFIG", kubeconfig.display().to_string())
}

pub fn repo_add(
	exec: &dyn Executor,
	kubeconfig: &Path,
	name: &str,
	url: &str,
) -> Result<(), InstallError> {
	exec.status(&helm(kubeconfig).args(["repo", "add", name, url]))
}

pub fn repo_update(exec: &dyn Executor, kubeconfig: &Path) -> Result<(), InstallError> {
	exec.status(&helm(kubeconfig).args(["repo", "update"]))
}

/// `helm install <release> <chart> --namespace <namespace>` followed by
/// `extra` verbatim.
pub fn install(
	exec: &dyn Executor,
	kubeconfig: &Path,
	release: &str,
	chart: &str,
	namespace: &str,
	extra: &[&str],
) -> Result<(), InstallError> {
	exec.status(
		&helm(kubeconfig)
			.args(["install", release, chart, "--namespace", namespace])
			.args(extra.iter().copied()),
	)
}
