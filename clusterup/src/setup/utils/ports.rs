use crate::error::InstallError;
use crate::setup::utils::exec::{Cmd, Executor};
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, info};

/// Utility used to read the host's listening TCP socket table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketTool {
	Ss,
	Netstat,
}

impl SocketTool {
	/// Picks `ss`, falling back to `netstat`.
	pub fn detect(exec: &dyn Executor) -> Result<Self, InstallError> {
		for (name, tool) in [("ss", SocketTool::Ss), ("netstat", SocketTool::Netstat)] {
			match exec.output(&Cmd::new("which").arg(name)) {
				Ok(_) => {
					debug!("Using {name} for socket inspection.");
					return Ok(tool);
				}
				Err(InstallError::CommandFailed { .. }) => continue,
				Err(err) => return Err(err),
			}
		}
		Err(InstallError::PortInspectionUnavailable)
	}

	fn table_cmd(self) -> Cmd {
		match self {
			SocketTool::Ss => Cmd::new("ss").arg("-Htln"),
			SocketTool::Netstat => Cmd::new("netstat").arg("-tln"),
		}
	}
}

/// Ports in LISTEN state, read from `ss -Htln` or `netstat -tln` output.
/// Both put the local address in the fourth column.
pub fn parse_listening(table: &str) -> BTreeSet<u16> {
	table
		.lines()
		.filter(|line| line.contains("LISTEN"))
		.filter_map(|line| line.split_whitespace().nth(3))
		.filter_map(|local| local.rsplit_once(':'))
		.filter_map(|(_, port)| port.parse().ok())
		.collect()
}

/// Hands out the lowest free port at or above a base. Ports already handed
/// out in this run count as taken. Nothing is reserved on the host, so
/// another process may still bind a returned port before it is used.
pub struct PortAllocator<'a> {
	exec: &'a dyn Executor,
	tool: SocketTool,
	claimed: HashSet<u16>,
}

impl<'a> PortAllocator<'a> {
	pub fn new(exec: &'a dyn Executor) -> Result<Self, InstallError> {
		Ok(PortAllocator {
			exec,
			tool: SocketTool::detect(exec)?,
			claimed: HashSet::new(),
		})
	}

	pub fn allocate(&mut self, name: &str, base: u16) -> Result<u16, InstallError> {
		let listening = parse_listening(&self.exec.output(&self.tool.table_cmd())?);
		let mut port = base;
		while listening.contains(&port) || self.claimed.contains(&port) {
			port = port.checked_add(1).ok_or_else(|| {
				InstallError::PortAllocation(format!("no free {name} port at or above {base}"))
			})?;
		}
		if port != base {
			info!("{name} port {base} is taken, using {port}.");
		}
		self.claimed.insert(port);
		Ok(port)
	}
}
