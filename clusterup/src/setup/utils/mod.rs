pub mod exec;
pub mod helm;
pub mod k3d;
pub mod kctl;
pub mod ports;
