use core_config::{server::ServerConfig, FromEnv};
use resource_swagger::SwaggerConfig;

pub use core_config::Environment;

/// Service configuration composed from the shared config components
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: Environment,
    pub server: ServerConfig,
    pub swagger: SwaggerConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            environment: Environment::from_env(),
            server: ServerConfig::from_env()?, // HOST=0.0.0.0, PORT=5000
            swagger: SwaggerConfig::from_env()?,
        })
    }
}
