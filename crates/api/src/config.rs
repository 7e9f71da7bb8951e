use anyhow::Context;

const PORT_VAR: &str = "TIMETABLE__SERVER__PORT";
const BODY_LIMIT_VAR: &str = "TIMETABLE__SERVER__BODY_LIMIT";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Maximum request body in bytes.
    pub body_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            body_limit: 2 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut cfg = Self::default();
        if let Some(port) = get(PORT_VAR) {
            cfg.port = port
                .trim()
                .parse()
                .with_context(|| format!("{PORT_VAR}={port} is not a valid port"))?;
        }
        if let Some(limit) = get(BODY_LIMIT_VAR) {
            cfg.body_limit = limit
                .trim()
                .parse()
                .with_context(|| format!("{BODY_LIMIT_VAR}={limit} is not a byte count"))?;
        }
        Ok(cfg)
    }
}
