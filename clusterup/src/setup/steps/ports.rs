use crate::context::Context;
use crate::error::InstallError;
use crate::setup::Ports;
use crate::setup::utils::exec::Executor;
use crate::setup::utils::ports::PortAllocator;
use tracing::info;

pub fn allocate(ctx: &Context, exec: &dyn Executor) -> Result<Ports, InstallError> {
	let mut allocator = PortAllocator::new(exec)?;
	let ports = Ports {
		api: allocator.allocate("API", ctx.api_port)?,
		http: allocator.allocate("HTTP", ctx.http_port)?,
		https: allocator.allocate("HTTPS", ctx.https_port)?,
	};
	info!(
		"Allocated ports api={} http={} https={}.",
		ports.api, ports.http, ports.https
	);
	Ok(ports)
}
