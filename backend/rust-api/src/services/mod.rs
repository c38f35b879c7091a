use crate::config::Config;

use self::oracle::OracleClient;

pub struct AppState {
    pub config: Config,
    pub oracle: OracleClient,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let oracle = OracleClient::new(&config)?;

        if !oracle.is_configured() {
            tracing::warn!("OPENAI_API_KEY is not set; oracle calls will fail");
        }

        Ok(Self { config, oracle })
    }
}

pub mod grading_service;
pub mod oracle;
pub mod question_service;
