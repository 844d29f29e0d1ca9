use crate::context::Context;
use crate::error::InstallError;
use crate::setup::utils::exec::{Cmd, Executor};
use std::{
	cell::RefCell, collections::HashMap, os::unix::process::ExitStatusExt, path::Path,
	process::ExitStatus,
};

/// Records every command and answers from scripted prefixes instead of
/// spawning processes. Unscripted commands succeed with empty stdout.
#[derive(Default)]
pub struct FakeExecutor {
	calls: RefCell<Vec<Cmd>>,
	outputs: Vec<(String, String)>,
	failures: Vec<String>,
}

impl FakeExecutor {
	pub fn new() -> Self {
		FakeExecutor::default()
	}

	pub fn with_output(mut self, prefix: &str, stdout: &str) -> Self {
		self.outputs.push((prefix.to_owned(), stdout.to_owned()));
		self
	}

	pub fn failing(mut self, prefix: &str) -> Self {
		self.failures.push(prefix.to_owned());
		self
	}

	pub fn calls(&self) -> Vec<Cmd> {
		self.calls.borrow().clone()
	}

	pub fn lines(&self) -> Vec<String> {
		self.calls.borrow().iter().map(Cmd::line).collect()
	}

	fn run(&self, cmd: &Cmd) -> Result<String, InstallError> {
		self.calls.borrow_mut().push(cmd.clone());
		let line = cmd.line();
		if self.failures.iter().any(|prefix| line.starts_with(prefix)) {
			return Err(InstallError::CommandFailed {
				cmd: line,
				status: ExitStatus::from_raw(1 << 8),
				stderr: None,
			});
		}
		Ok(self
			.outputs
			.iter()
			.find(|(prefix, _)| line.starts_with(prefix))
			.map(|(_, stdout)| stdout.clone())
			.unwrap_or_default())
	}
}

impl Executor for FakeExecutor {
	fn status(&self, cmd: &Cmd) -> Result<(), InstallError> {
		self.run(cmd).map(|_| ())
	}

	fn output(&self, cmd: &Cmd) -> Result<String, InstallError> {
		self.run(cmd)
	}
}

/// Builds a context from literal variables, resolving paths against `work_dir`.
pub fn context_in(work_dir: &Path, pairs: &[(&str, &str)]) -> Context {
	let vars = pairs
		.iter()
		.map(|(key, value)| (key.to_string(), value.to_string()))
		.collect::<HashMap<_, _>>();
	Context::from_lookup(|key| vars.get(key).cloned(), work_dir.to_path_buf())
		.expect("test context must be valid")
}
