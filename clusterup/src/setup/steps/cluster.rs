use crate::error::InstallError;
use crate::setup::steps::{IngressManifest, Resolver};
use crate::setup::utils::exec::Executor;
use crate::setup::utils::k3d;
use crate::setup::{Plan, SetupStep};
use std::fs;
use tracing::info;

pub struct Cluster;

impl Cluster {
	pub const STORAGE_PATH: &str = "/var/lib/rancher/k3s/storage";

	/// `k3d cluster create` arguments after the cluster name.
	pub fn create_args(plan: &Plan) -> Vec<String> {
		let ctx = &plan.ctx;
		let mut args = vec![
			"--api-port".to_owned(),
			format!("127.0.0.1:{}", plan.ports.api),
			"--image".to_owned(),
			ctx.image_ref(),
			"--servers".to_owned(),
			ctx.servers.to_string(),
			"--agents".to_owned(),
			ctx.agents.to_string(),
			"--port".to_owned(),
			format!("{}:80@loadbalancer", plan.ports.http),
			"--port".to_owned(),
			format!("{}:443@loadbalancer", plan.ports.https),
			"--k3s-arg=--disable=traefik@server:*".to_owned(),
			"--volume".to_owned(),
			format!(
				"{}:{}@server:*",
				IngressManifest::path(&ctx.work_dir).display(),
				IngressManifest::NODE_PATH
			),
			"--volume".to_owned(),
			format!(
				"{}:{}@all",
				ctx.agent_volume.display(),
				Cluster::STORAGE_PATH
			),
		];
		if ctx.setup_registry {
			args.push("--registry-create".to_owned());
			args.push(format!("{}-registry", ctx.cluster_name));
		}
		args.extend(Resolver::cluster_args(ctx));
		args
	}
}

impl SetupStep for Cluster {
	fn name(&self) -> &'static str {
		"Cluster"
	}

	fn set(&self, plan: &Plan, exec: &dyn Executor) -> Result<(), InstallError> {
		let ctx = &plan.ctx;
		fs::create_dir_all(&ctx.agent_volume)?;
		info!(
			"Creating cluster {} with {} server(s) and {} agent(s).",
			ctx.cluster_name, ctx.servers, ctx.agents
		);
		k3d::cluster_create(exec, &ctx.cluster_name, &Cluster::create_args(plan))?;
		info!("Cluster {} is ready.", ctx.cluster_name);
		for line in k3d::cluster_list(exec)?.lines() {
			info!("{line}");
		}
		Ok(())
	}
}
