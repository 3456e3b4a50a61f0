//! Configuration structs for the promptfig demo application.
//!
//! The root [`DemoConfig`] mixes every shape the editor understands: scalars
//! of several widths, a nested struct, a list of strings, a list of structs
//! and a string-keyed map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root configuration for the demo application.
#[derive(Serialize, Deserialize, Debug)]
pub struct DemoConfig {
    /// Application name shown in the echo banner.
    pub name: String,

    /// Enable verbose output.
    pub verbose: bool,

    /// Sampling ratio for request logs.
    pub sample_rate: f64,

    /// Server settings.
    pub server: ServerConfig,

    /// Hostnames the server answers to.
    pub aliases: Vec<String>,

    /// Backends requests are spread across.
    pub backends: Vec<Backend>,

    /// Per-route request limits.
    pub limits: BTreeMap<String, u32>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ServerConfig {
    /// Hostname to bind to.
    pub host: String,

    /// Port number.
    pub port: u16,

    /// Maximum simultaneous connections.
    pub max_connections: u32,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct Backend {
    pub address: String,
    pub weight: u8,
}
