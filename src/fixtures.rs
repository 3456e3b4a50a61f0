#[cfg(test)]
pub mod test {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    pub struct AppConfig {
        /// Application name.
        pub name: String,

        /// Enable debug mode.
        pub debug: bool,

        /// Retries before giving up.
        pub retries: i16,

        /// Sampling ratio.
        pub ratio: f32,

        /// Server settings.
        pub server: ServerConfig,

        /// Free-form labels.
        pub tags: Vec<String>,

        /// Per-endpoint request limits.
        pub limits: BTreeMap<String, u32>,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    pub struct ServerConfig {
        /// Hostname to bind to.
        pub host: String,

        /// Port number.
        pub port: u16,
    }

    // -- Fixtures for shape rejection -------------------------------------------

    #[derive(Deserialize, Debug)]
    pub struct Cyclic {
        pub children: Vec<Cyclic>,
    }

    // -- Same struct name in two modules ---------------------------------------

    pub mod db {
        use serde::Deserialize;

        #[derive(Deserialize, Debug)]
        pub struct Config {
            pub url: String,
        }
    }

    #[derive(Deserialize, Debug)]
    #[serde(rename = "Config")]
    pub struct ServiceConfig {
        pub db: db::Config,
    }

    #[derive(Serialize, Deserialize, Debug)]
    pub struct WithOption {
        pub url: Option<String>,
    }

    #[derive(Deserialize, Debug)]
    #[serde(rename_all = "lowercase")]
    pub enum Mode {
        Fast,
        Slow,
    }

    #[derive(Deserialize, Debug)]
    pub struct WithEnum {
        pub mode: Mode,
    }

    #[derive(Deserialize, Debug)]
    pub struct WithIntKeys {
        pub ports: BTreeMap<u16, String>,
    }

    // -- Fixture for nested collections -----------------------------------------

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    pub struct Upstream {
        pub address: String,
        pub weight: u8,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    pub struct ProxyConfig {
        pub upstreams: Vec<Upstream>,
        pub headers: BTreeMap<String, Vec<String>>,
    }
}
