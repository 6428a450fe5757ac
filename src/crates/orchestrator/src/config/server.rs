//! Settings the server binary needs at startup: where to listen, which LLM
//! to call, and which Redis instance backs task status/cancellation.
//!
//! Grounded in the same `${ENV:default}` expansion style as [`super::loader`],
//! but every value here is read straight from the environment since the
//! deployment surface is five variables, not a tree of YAML files.

use crate::OrchestratorError;

/// Server configuration loaded entirely from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub llm_model_id: String,
    pub llm_api_key: String,
    pub llm_base_url: String,
    pub redis_host: Option<String>,
    pub observability_library: Option<String>,
}

impl ServerConfig {
    /// Load configuration from the environment.
    ///
    /// `LLM_MODEL_ID`, `LLM_API_KEY`, and `LLM_BASE_URL` are required.
    /// `REDIS_HOST` is optional — absent means traversal status is tracked
    /// in-memory only, which is fine for local development but loses state
    /// across restarts. `LLM_OBSERVABILITY_LIBRARY` is optional and unused
    /// beyond being logged at startup.
    pub fn from_env() -> Result<Self, OrchestratorError> {
        let llm_model_id = required_env("LLM_MODEL_ID")?;
        let llm_api_key = required_env("LLM_API_KEY")?;
        let llm_base_url = required_env("LLM_BASE_URL")?;
        let redis_host = std::env::var("REDIS_HOST").ok();
        let observability_library = std::env::var("LLM_OBSERVABILITY_LIBRARY").ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8080);

        Ok(Self {
            host,
            port,
            llm_model_id,
            llm_api_key,
            llm_base_url,
            redis_host,
            observability_library,
        })
    }
}

fn required_env(key: &str) -> Result<String, OrchestratorError> {
    std::env::var(key).map_err(|_| OrchestratorError::General(format!("missing required environment variable {key}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn missing_required_var_is_reported_by_name() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::remove_var("LLM_MODEL_ID");
        let err = ServerConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("LLM_MODEL_ID"));
    }

    #[test]
    fn defaults_host_and_port_when_unset() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("LLM_MODEL_ID", "gpt-4o");
        std::env::set_var("LLM_API_KEY", "test-key");
        std::env::set_var("LLM_BASE_URL", "https://api.openai.com/v1");
        std::env::remove_var("HOST");
        std::env::remove_var("PORT");
        std::env::remove_var("REDIS_HOST");

        let config = ServerConfig::from_env().unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert!(config.redis_host.is_none());

        std::env::remove_var("LLM_MODEL_ID");
        std::env::remove_var("LLM_API_KEY");
        std::env::remove_var("LLM_BASE_URL");
    }
}
