use std::{io, process::ExitStatus};

#[derive(Debug, thiserror::Error)]
pub enum InstallError {
	#[error("I/O error: {0}.")]
	Io(#[from] io::Error),

	#[error("Failed to execute command '{cmd}': {source}")]
	CommandLaunch {
		cmd: String,
		#[source]
		source: io::Error,
	},

	#[error("Command failed: {cmd} ({status}).")]
	CommandFailed {
		cmd: String,
		status: ExitStatus,
		stderr: Option<String>,
	},

	#[error(
		"Missing required tools: {}. Usage: install {} and make sure they are on PATH.",
		.missing.join(", "),
		.required.join(", ")
	)]
	MissingTools {
		missing: Vec<String>,
		required: Vec<String>,
	},

	#[error("Cluster setup declined by user.")]
	Declined,

	#[error("Neither ss nor netstat is available to inspect listening ports.")]
	PortInspectionUnavailable,

	#[error("Port allocation failed: {0}.")]
	PortAllocation(String),

	#[error("Invalid configuration: {0}.")]
	Config(String),
}
