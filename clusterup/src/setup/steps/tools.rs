use crate::error::InstallError;
use crate::setup::utils::exec::{Cmd, Executor};
use tracing::{debug, info};

pub const REQUIRED_TOOLS: &[&str] = &["k3d", "kubectl", "helm"];

/// Fails with every missing tool named, before anything is changed.
pub fn ensure(exec: &dyn Executor) -> Result<(), InstallError> {
	let mut missing = Vec::new();
	for tool in REQUIRED_TOOLS {
		match exec.output(&Cmd::new("which").arg(*tool)) {
			Ok(path) => debug!("Found {tool} at {}.", path.trim()),
			Err(InstallError::CommandFailed { .. }) => missing.push((*tool).to_owned()),
			Err(err) => return Err(err),
		}
	}
	if !missing.is_empty() {
		return Err(InstallError::MissingTools {
			missing,
			required: REQUIRED_TOOLS.iter().map(|tool| (*tool).to_owned()).collect(),
		});
	}
	info!("Required tools are installed.");
	Ok(())
}
