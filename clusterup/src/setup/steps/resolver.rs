use crate::context::Context;
use crate::error::InstallError;
use crate::setup::utils::exec::Executor;
use crate::setup::{Plan, SetupStep};
use std::{fs, path::PathBuf};
use tracing::info;

/// Resolver config handed to k3s when DNS forwarders are configured.
pub struct Resolver;

impl Resolver {
	pub const FILE_NAME: &str = "k3d-resolv.conf";
	pub const NODE_PATH: &str = "/etc/k3d-resolv.conf";

	pub fn path(ctx: &Context) -> PathBuf {
		ctx.work_dir.join(Resolver::FILE_NAME)
	}

	pub fn contents(forwarders: &[String]) -> String {
		forwarders
			.iter()
			.map(|addr| format!("nameserver {addr}\n"))
			.collect()
	}

	/// Bind mount plus the k3s flag pointing at it; empty without forwarders.
	pub fn cluster_args(ctx: &Context) -> Vec<String> {
		if ctx.dns_forwarders.is_empty() {
			return Vec::new();
		}
		vec![
			"--volume".to_owned(),
			format!(
				"{}:{}@all",
				Resolver::path(ctx).display(),
				Resolver::NODE_PATH
			),
			format!("--k3s-arg=--resolv-conf={}@all", Resolver::NODE_PATH),
		]
	}
}

impl SetupStep for Resolver {
	fn name(&self) -> &'static str {
		"Resolver"
	}

	fn enabled(&self, plan: &Plan) -> bool {
		!plan.ctx.dns_forwarders.is_empty()
	}

	fn set(&self, plan: &Plan, _exec: &dyn Executor) -> Result<(), InstallError> {
		let path = Resolver::path(&plan.ctx);
		fs::write(&path, Resolver::contents(&plan.ctx.dns_forwarders))?;
		info!("Wrote DNS forwarders to {}.", path.display());
		Ok(())
	}
}
