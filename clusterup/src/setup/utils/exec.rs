use crate::error::InstallError;
use std::process::{Command, Output};
use tracing::debug;

/// A single external program invocation: program, arguments and the extra
/// environment it runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cmd {
	pub program: String,
	pub args: Vec<String>,
	pub env: Vec<(String, String)>,
}

impl Cmd {
	pub fn new(program: &str) -> Self {
		Cmd {
			program: program.to_owned(),
			args: Vec::new(),
			env: Vec::new(),
		}
	}

	pub fn arg(mut self, arg: impl Into<String>) -> Self {
		self.args.push(arg.into());
		self
	}

	pub fn args<I, S>(mut self, args: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.args.extend(args.into_iter().map(Into::into));
		self
	}

	pub fn env(mut self, key: &str, value: impl Into<String>) -> Self {
		self.env.push((key.to_owned(), value.into()));
		self
	}

	/// The command as an operator would type it, used in logs and errors.
	pub fn line(&self) -> String {
		if self.args.is_empty() {
			self.program.clone()
		} else {
			format!("{} {}", self.program, self.args.join(" "))
		}
	}

	fn command(&self) -> Command {
		let mut command = Command::new(&self.program);
		command.args(&self.args);
		command.envs(self.env.iter().map(|(key, value)| (key, value)));
		command
	}
}

/// Runs external commands. Every call blocks until the child exits.
pub trait Executor {
	/// Runs with inherited stdio and fails on a non-zero exit.
	fn status(&self, cmd: &Cmd) -> Result<(), InstallError>;

	/// Runs with captured stdout and fails on a non-zero exit.
	fn output(&self, cmd: &Cmd) -> Result<String, InstallError>;
}

pub struct SystemExecutor;

impl Executor for SystemExecutor {
	fn status(&self, cmd: &Cmd) -> Result<(), InstallError> {
		debug!("Running: {}", cmd.line());
		let status = cmd
			.command()
			.status()
			.map_err(|source| InstallError::CommandLaunch {
				cmd: cmd.line(),
				source,
			})?;
		if !status.success() {
			return Err(InstallError::CommandFailed {
				cmd: cmd.line(),
				status,
				stderr: None,
			});
		}
		Ok(())
	}

	fn output(&self, cmd: &Cmd) -> Result<String, InstallError> {
		debug!("Capturing: {}", cmd.line());
		let output: Output = cmd
			.command()
			.output()
			.map_err(|source| InstallError::CommandLaunch {
				cmd: cmd.line(),
				source,
			})?;
		if !output.status.success() {
			let stderr = if output.stderr.is_empty() {
				None
			} else {
				Some(String::from_utf8_lossy(&output.stderr).trim().to_owned())
			};
			return Err(InstallError::CommandFailed {
				cmd: cmd.line(),
				status: output.status,
				stderr,
			});
		}
		Ok(String::from_utf8_lossy(&output.stdout).to_string())
	}
}
