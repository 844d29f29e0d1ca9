mod steps;
pub mod utils;

use crate::context::Context;
use crate::error::InstallError;
use crate::setup::steps::{
	CertManager, ChartRepos, Cluster, IngressManifest, Kubeconfig, Rancher, Resolver,
};
use crate::setup::utils::exec::Executor;
use std::io::{BufRead, Write};
use tracing::info;

/// Host ports handed to the cluster load balancer and API server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ports {
	pub api: u16,
	pub http: u16,
	pub https: u16,
}

/// Everything a step may read: the resolved context and allocated ports.
#[derive(Debug, Clone)]
pub struct Plan {
	pub ctx: Context,
	pub ports: Ports,
}

pub trait SetupStep {
	fn name(&self) -> &'static str;

	fn enabled(&self, _plan: &Plan) -> bool {
		true
	}

	fn set(&self, plan: &Plan, exec: &dyn Executor) -> Result<(), InstallError>;
}

const SETUP_STEPS: &[&dyn SetupStep] = &[
	&Resolver,
	&IngressManifest,
	&Cluster,
	&Kubeconfig,
	&ChartRepos,
	&CertManager,
	&Rancher,
];

/// Runs the whole bootstrap, halting at the first failing step. Nothing is
/// rolled back.
pub fn setup(
	ctx: Context,
	exec: &dyn Executor,
	input: &mut dyn BufRead,
	out: &mut dyn Write,
) -> Result<Plan, InstallError> {
	info!("Cluster setup started.");
	steps::tools::ensure(exec)?;
	let ports = steps::ports::allocate(&ctx, exec)?;
	let plan = Plan { ctx, ports };
	steps::confirm::gate(&plan, input, out)?;
	for step in SETUP_STEPS {
		if !step.enabled(&plan) {
			info!("Skipping {}.", step.name());
			continue;
		}
		info!("{} started.", step.name());
		step.set(&plan, exec)?;
	}
	info!("Kubeconfig: {}", plan.ctx.kubeconfig_path().display());
	info!("Ingress: http://localhost:{} https://localhost:{}", plan.ports.http, plan.ports.https);
	if plan.ctx.setup_rancher {
		info!("Rancher: https://{}:{}", Rancher::HOSTNAME, plan.ports.https);
	}
	info!("Cluster setup finished.");
	Ok(plan)
}
