use crate::error::InstallError;
use crate::setup::utils::exec::Executor;
use crate::setup::utils::{k3d, kctl};
use crate::setup::{Plan, SetupStep};
use std::{
	fs::{self, OpenOptions, Permissions},
	io::Write,
	os::unix::fs::{OpenOptionsExt, PermissionsExt},
};
use tracing::info;

pub struct Kubeconfig;

impl Kubeconfig {
	pub const MODE: u32 = 0o600;
}

impl SetupStep for Kubeconfig {
	fn name(&self) -> &'static str {
		"Kubeconfig"
	}

	fn set(&self, plan: &Plan, exec: &dyn Executor) -> Result<(), InstallError> {
		let ctx = &plan.ctx;
		let path = ctx.kubeconfig_path();
		let config_txt = k3d::kubeconfig_get(exec, &ctx.cluster_name)?;
		fs::create_dir_all(&ctx.kubeconfig_dir)?;
		let mut file = OpenOptions::new()
			.write(true)
			.create(true)
			.truncate(true)
			.mode(Kubeconfig::MODE)
			.open(&path)?;
		file.write_all(config_txt.as_bytes())?;
		fs::set_permissions(&path, Permissions::from_mode(Kubeconfig::MODE))?;
		info!("Kubeconfig written to {}.", path.display());
		kctl::get_nodes(exec, &path)?;
		Ok(())
	}
}
