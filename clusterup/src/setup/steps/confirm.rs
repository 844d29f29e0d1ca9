use crate::error::InstallError;
use crate::setup::Plan;
use std::io::{BufRead, Write};
use tracing::info;

/// Resolved configuration as shown to the operator.
pub fn describe(plan: &Plan) -> String {
	let ctx = &plan.ctx;
	let forwarders = if ctx.dns_forwarders.is_empty() {
		"none".to_owned()
	} else {
		ctx.dns_forwarders.join(",")
	};
	[
		format!("Cluster name:    {}", ctx.cluster_name),
		format!("Image:           {}", ctx.image_ref()),
		format!("Servers:         {}", ctx.servers),
		format!("Agents:          {}", ctx.agents),
		format!("Agent volume:    {}", ctx.agent_volume.display()),
		format!("API port:        {}", plan.ports.api),
		format!("HTTP port:       {}", plan.ports.http),
		format!("HTTPS port:      {}", plan.ports.https),
		format!("DNS forwarders:  {forwarders}"),
		format!("Registry:        {}", ctx.setup_registry),
		format!("Rancher:         {}", ctx.setup_rancher),
		format!("Kubeconfig:      {}", ctx.kubeconfig_path().display()),
	]
	.join("\n")
}

/// Asks for a y/Y before anything is created, unless non-interactive.
pub fn gate(plan: &Plan, input: &mut dyn BufRead, out: &mut dyn Write) -> Result<(), InstallError> {
	if plan.ctx.noninteractive {
		info!("Non-interactive mode, skipping confirmation.");
		return Ok(());
	}
	writeln!(out, "{}", describe(plan))?;
	write!(out, "Create cluster with this configuration? [y/N] ")?;
	out.flush()?;
	let mut answer = String::new();
	input.read_line(&mut answer)?;
	match answer.chars().next() {
		Some('y' | 'Y') => Ok(()),
		_ => Err(InstallError::Declined),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::setup::Ports;
	use crate::test_utils::context_in;
	use std::{io::Cursor, path::Path};

	fn plan(pairs: &[(&str, &str)]) -> Plan {
		Plan {
			ctx: context_in(Path::new("/work"), pairs),
			ports: Ports {
				api: 6443,
				http: 8080,
				https: 8443,
			},
		}
	}

	#[test]
	fn yes_proceeds() {
		for answer in ["y\n", "Y\n", "yes\n"] {
			let mut out = Vec::new();
			gate(&plan(&[("HOME", "/h")]), &mut Cursor::new(answer), &mut out).unwrap();
			let shown = String::from_utf8(out).unwrap();
			assert!(shown.contains("API port:        6443"));
			assert!(shown.ends_with("[y/N] "));
		}
	}

	#[test]
	fn anything_else_declines() {
		for answer in ["n\n", "\n", "", " y\n", "q"] {
			let result = gate(
				&plan(&[("HOME", "/h")]),
				&mut Cursor::new(answer),
				&mut Vec::new(),
			);
			assert!(matches!(result, Err(InstallError::Declined)), "{answer:?}");
		}
	}

	#[test]
	fn noninteractive_skips_prompt() {
		let mut out = Vec::new();
		gate(
			&plan(&[("HOME", "/h"), ("NONINTERACTIVE", "1")]),
			&mut Cursor::new("n\n"),
			&mut out,
		)
		.unwrap();
		assert!(out.is_empty());
	}

	#[test]
	fn describe_lists_forwarders() {
		let shown = describe(&plan(&[("HOME", "/h"), ("DNS_FORWARDERS", "1.1.1.1,8.8.8.8")]));
		assert!(shown.contains("DNS forwarders:  1.1.1.1,8.8.8.8"));
		assert!(shown.contains("Kubeconfig:      /h/.kube/dev"));
	}
}
