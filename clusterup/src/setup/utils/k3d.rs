use crate::error::InstallError;
use crate::setup::utils::exec::{Cmd, Executor};

/// Creates the cluster and waits for k3d to report it ready.
pub fn cluster_create(exec: &dyn Executor, name: &str, args: &[String]) -> Result<(), InstallError> {
	exec.status(
		&Cmd::new("k3d")
			.args(["cluster", "create", name])
			.args(args.iter().cloned())
			.arg("--wait"),
	)
}

pub fn cluster_list(exec: &dyn Executor) -> Result<String, InstallError> {
	exec.output(&Cmd::new("k3d").args(["cluster", "list"]))
}

pub fn kubeconfig_get(exec: &dyn Executor, name: &str) -> Result<String, InstallError> {
	exec.output(&Cmd::new("k3d").args(["kubeconfig", "get", name]))
}
