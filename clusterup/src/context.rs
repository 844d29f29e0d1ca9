use crate::error::InstallError;
use std::{env, path::PathBuf, str::FromStr};

/// Value of `DNS_FORWARDERS` meaning no forwarders are configured.
pub const UNDEFINED: &str = "undefined";

/// Resolved run configuration. Built once at start and only read afterwards.
#[derive(Debug, Clone)]
pub struct Context {
	pub cluster_name: String,
	pub image: String,
	pub image_version: String,
	pub servers: u32,
	pub agents: u32,
	pub agent_volume: PathBuf,
	pub dns_forwarders: Vec<String>,
	pub setup_registry: bool,
	pub setup_rancher: bool,
	pub kubeconfig_dir: PathBuf,
	pub api_port: u16,
	pub http_port: u16,
	pub https_port: u16,
	pub noninteractive: bool,
	pub work_dir: PathBuf,
}

impl Context {
	pub const DEFAULT_CLUSTER_NAME: &str = "dev";
	pub const DEFAULT_IMAGE: &str = "rancher/k3s";
	pub const DEFAULT_IMAGE_VERSION: &str = "v1.28.5-k3s1";
	pub const DEFAULT_SERVERS: u32 = 1;
	pub const DEFAULT_AGENTS: u32 = 3;
	pub const DEFAULT_AGENT_VOLUME: &str = "/tmp/k3d-agent-volume";
	pub const DEFAULT_API_PORT: u16 = 6443;
	pub const DEFAULT_HTTP_PORT: u16 = 8080;
	pub const DEFAULT_HTTPS_PORT: u16 = 8443;

	pub fn from_env() -> Result<Self, InstallError> {
		let work_dir = env::current_dir()?;
		Context::from_lookup(|key| env::var(key).ok(), work_dir)
	}

	pub fn from_lookup<F>(lookup: F, work_dir: PathBuf) -> Result<Self, InstallError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
		let kubeconfig_dir = match var("KUBECONFIG_DIR") {
			Some(dir) => PathBuf::from(dir),
			None => {
				let home = var("HOME").ok_or_else(|| {
					InstallError::Config("neither KUBECONFIG_DIR nor HOME is set".to_owned())
				})?;
				PathBuf::from(home).join(".kube")
			}
		};
		let servers = parse_or(&var, "SERVERS", Context::DEFAULT_SERVERS)?;
		if servers == 0 {
			return Err(InstallError::Config(
				"SERVERS must be at least 1".to_owned(),
			));
		}
		let agent_volume = work_dir.join(
			var("AGENT_VOLUME").unwrap_or_else(|| Context::DEFAULT_AGENT_VOLUME.to_owned()),
		);
		Ok(Context {
			cluster_name: var("CLUSTER_NAME")
				.unwrap_or_else(|| Context::DEFAULT_CLUSTER_NAME.to_owned()),
			image: var("CLUSTER_IMAGE").unwrap_or_else(|| Context::DEFAULT_IMAGE.to_owned()),
			image_version: var("IMAGE_VERSION")
				.unwrap_or_else(|| Context::DEFAULT_IMAGE_VERSION.to_owned()),
			servers,
			agents: parse_or(&var, "AGENTS", Context::DEFAULT_AGENTS)?,
			agent_volume,
			dns_forwarders: parse_forwarders(var("DNS_FORWARDERS").as_deref()),
			setup_registry: var("SETUP_REGISTRY").is_none_or(|value| value == "1"),
			setup_rancher: var("SETUP_RANCHER").is_none_or(|value| value == "1"),
			kubeconfig_dir,
			api_port: parse_or(&var, "API_PORT", Context::DEFAULT_API_PORT)?,
			http_port: parse_or(&var, "HTTP_PORT", Context::DEFAULT_HTTP_PORT)?,
			https_port: parse_or(&var, "HTTPS_PORT", Context::DEFAULT_HTTPS_PORT)?,
			noninteractive: var("NONINTERACTIVE").is_some_and(|value| is_affirmative(&value)),
			work_dir,
		})
	}

	pub fn image_ref(&self) -> String {
		format!("{}:{}", self.image, self.image_version)
	}

	pub fn kubeconfig_path(&self) -> PathBuf {
		self.kubeconfig_dir.join(&self.cluster_name)
	}
}

fn parse_or<T, F>(var: &F, key: &str, default: T) -> Result<T, InstallError>
where
	T: FromStr,
	F: Fn(&str) -> Option<String>,
{
	match var(key) {
		None => Ok(default),
		Some(value) => value.trim().parse().map_err(|_| {
			InstallError::Config(format!("{key} has invalid value '{value}'"))
		}),
	}
}

fn parse_forwarders(value: Option<&str>) -> Vec<String> {
	match value {
		None | Some(UNDEFINED) => Vec::new(),
		Some(list) => list
			.split(',')
			.map(str::trim)
			.filter(|addr| !addr.is_empty())
			.map(str::to_owned)
			.collect(),
	}
}

fn is_affirmative(value: &str) -> bool {
	matches!(
		value.trim().to_ascii_lowercase().as_str(),
		"1" | "y" | "yes" | "true"
	)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	fn context_from(pairs: &[(&str, &str)]) -> Result<Context, InstallError> {
		let vars = pairs
			.iter()
			.map(|(key, value)| (key.to_string(), value.to_string()))
			.collect::<HashMap<_, _>>();
		Context::from_lookup(|key| vars.get(key).cloned(), PathBuf::from("/work"))
	}

	#[test]
	fn defaults_apply_when_unset() {
		let ctx = context_from(&[("HOME", "/home/dev")]).unwrap();
		assert_eq!(ctx.cluster_name, "dev");
		assert_eq!(ctx.image_ref(), "rancher/k3s:v1.28.5-k3s1");
		assert_eq!((ctx.servers, ctx.agents), (1, 3));
		assert_eq!(ctx.agent_volume, PathBuf::from("/tmp/k3d-agent-volume"));
		assert!(ctx.dns_forwarders.is_empty());
		assert!(ctx.setup_registry);
		assert!(ctx.setup_rancher);
		assert_eq!(ctx.kubeconfig_path(), PathBuf::from("/home/dev/.kube/dev"));
		assert_eq!((ctx.api_port, ctx.http_port, ctx.https_port), (6443, 8080, 8443));
		assert!(!ctx.noninteractive);
	}

	#[test]
	fn overrides_are_read() {
		let ctx = context_from(&[
			("CLUSTER_NAME", "lab"),
			("CLUSTER_IMAGE", "example/k3s"),
			("IMAGE_VERSION", "v1.30.0-k3s1"),
			("SERVERS", "3"),
			("AGENTS", "6"),
			("AGENT_VOLUME", "vol"),
			("KUBECONFIG_DIR", "/cfg"),
			("API_PORT", "7443"),
			("HTTP_PORT", "9080"),
			("HTTPS_PORT", "9443"),
			("NONINTERACTIVE", "yes"),
		])
		.unwrap();
		assert_eq!(ctx.image_ref(), "example/k3s:v1.30.0-k3s1");
		assert_eq!((ctx.servers, ctx.agents), (3, 6));
		assert_eq!(ctx.agent_volume, PathBuf::from("/work/vol"));
		assert_eq!(ctx.kubeconfig_path(), PathBuf::from("/cfg/lab"));
		assert_eq!((ctx.api_port, ctx.http_port, ctx.https_port), (7443, 9080, 9443));
		assert!(ctx.noninteractive);
	}

	#[test]
	fn toggles_only_enable_on_one() {
		let ctx = context_from(&[
			("HOME", "/h"),
			("SETUP_REGISTRY", "2"),
			("SETUP_RANCHER", "3"),
		])
		.unwrap();
		assert!(!ctx.setup_registry);
		assert!(!ctx.setup_rancher);
	}

	#[test]
	fn forwarder_sentinel_means_none() {
		let ctx = context_from(&[("HOME", "/h"), ("DNS_FORWARDERS", "undefined")]).unwrap();
		assert!(ctx.dns_forwarders.is_empty());
	}

	#[test]
	fn forwarder_list_keeps_order() {
		let ctx = context_from(&[("HOME", "/h"), ("DNS_FORWARDERS", "1.1.1.1, 8.8.8.8")]).unwrap();
		assert_eq!(ctx.dns_forwarders, vec!["1.1.1.1", "8.8.8.8"]);
	}

	#[test]
	fn noninteractive_values() {
		for value in ["1", "Y", "true", "YES"] {
			let ctx = context_from(&[("HOME", "/h"), ("NONINTERACTIVE", value)]).unwrap();
			assert!(ctx.noninteractive, "{value}");
		}
		for value in ["0", "n", "no", "later"] {
			let ctx = context_from(&[("HOME", "/h"), ("NONINTERACTIVE", value)]).unwrap();
			assert!(!ctx.noninteractive, "{value}");
		}
	}

	#[test]
	fn invalid_port_is_config_error() {
		let err = context_from(&[("HOME", "/h"), ("API_PORT", "70000")]).unwrap_err();
		assert!(matches!(err, InstallError::Config(msg) if msg.contains("API_PORT")));
	}

	#[test]
	fn zero_servers_rejected() {
		let err = context_from(&[("HOME", "/h"), ("SERVERS", "0")]).unwrap_err();
		assert!(matches!(err, InstallError::Config(_)));
	}

	#[test]
	fn missing_home_without_kubeconfig_dir_rejected() {
		assert!(matches!(
			context_from(&[]).unwrap_err(),
			InstallError::Config(_)
		));
	}
}
