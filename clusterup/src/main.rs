mod context;
mod error;
mod logging;
mod setup;
#[cfg(test)]
mod test_utils;

use crate::context::Context;
use crate::setup::utils::exec::SystemExecutor;
use std::io;
use tracing::{error, info};

fn main() {
	logging::init();
	info!("clusterup started.");
	let result = Context::from_env().and_then(|ctx| {
		setup::setup(ctx, &SystemExecutor, &mut io::stdin().lock(), &mut io::stdout())
	});
	if let Err(err) = result {
		error!("Installer failed: {}", err);
		std::process::exit(1);
	};
	info!("clusterup finished successfully.");
}
