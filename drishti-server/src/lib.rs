//! drishti-server: the owning process
//!
//! Builds the resource directory from a typed JSON config, wires the
//! cameras into the vision service, and exposes it over HTTP. All wiring
//! is explicit construction here; nothing registers itself at load time.

pub mod http;
pub mod startup;
