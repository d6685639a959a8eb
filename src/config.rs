//! Process configuration read from the environment

use crate::error::{AppError, Result};
use crate::ports::llm::LlmConfig;
use crate::ports::synthesis::SynthesisConfig;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Optional file of `NAME=value` lines read from the working directory
pub const ENV_FILE: &str = ".env";

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_LISTEN_SECS: u64 = 8;
pub const DEFAULT_TTS_VOICE: &str = "en-US-Standard-C";

/// Credentials and tunables for one process
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Key for the Gemini chat API
    pub google_api_key: String,
    /// Key for speech and translation; falls back to `google_api_key`
    pub cloud_api_key: String,
    pub model: String,
    pub request_timeout: Duration,
    pub listen_timeout: Duration,
    pub tts_voice: String,
}

impl AppConfig {
    /// Read the process environment, falling back to `.env`
    pub fn from_env() -> Result<Self> {
        Self::from_env_and_file(Path::new(ENV_FILE))
    }

    /// Process variables win over the file's
    pub fn from_env_and_file(path: &Path) -> Result<Self> {
        let file_vars = read_env_file(path)?;
        Self::from_layers(|name| std::env::var(name).ok(), &file_vars)
    }

    fn from_layers<F>(env: F, file_vars: &HashMap<String, String>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_lookup(|name| env(name).or_else(|| file_vars.get(name).cloned()))
    }

    /// Build from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let google_api_key = non_empty("GOOGLE_API_KEY").ok_or_else(|| {
            AppError::Config("GOOGLE_API_KEY is not set. Export it or add it to .env.".to_string())
        })?;
        let cloud_api_key =
            non_empty("GOOGLE_CLOUD_API_KEY").unwrap_or_else(|| google_api_key.clone());

        let request_timeout = parse_secs(
            "GENIETALK_REQUEST_TIMEOUT_SECS",
            non_empty("GENIETALK_REQUEST_TIMEOUT_SECS"),
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;
        let listen_timeout = parse_secs(
            "GENIETALK_LISTEN_SECS",
            non_empty("GENIETALK_LISTEN_SECS"),
            DEFAULT_LISTEN_SECS,
        )?;

        Ok(Self {
            google_api_key,
            cloud_api_key,
            model: non_empty("GENIETALK_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            request_timeout,
            listen_timeout,
            tts_voice: non_empty("GENIETALK_TTS_VOICE")
                .unwrap_or_else(|| DEFAULT_TTS_VOICE.to_string()),
        })
    }

    pub fn llm_config(&self) -> LlmConfig {
        LlmConfig {
            model: self.model.clone(),
            ..LlmConfig::default()
        }
    }

    pub fn synthesis_config(&self) -> SynthesisConfig {
        SynthesisConfig {
            voice: self.tts_voice.clone(),
            ..SynthesisConfig::default()
        }
    }
}

/// Parse a dotenv file; a missing file yields no variables
pub fn read_env_file(path: &Path) -> Result<HashMap<String, String>> {
    let entries = match dotenvy::from_path_iter(path) {
        Ok(entries) => entries,
        Err(e) if e.not_found() => return Ok(HashMap::new()),
        Err(e) => {
            return Err(AppError::Config(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            )))
        }
    };

    let vars = entries
        .collect::<std::result::Result<HashMap<_, _>, _>>()
        .map_err(|e| AppError::Config(format!("Invalid line in {}: {}", path.display(), e)))?;

    log::info!("Loaded {} variable(s) from {}", vars.len(), path.display());
    Ok(vars)
}

fn parse_secs(name: &str, value: Option<String>, default: u64) -> Result<Duration> {
    let secs = match value {
        None => default,
        Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
            AppError::Config(format!("{} must be a whole number of seconds, got {:?}", name, raw))
        })?,
    };

    if secs == 0 {
        return Err(AppError::Config(format!("{} must be greater than zero", name)));
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_missing_key_is_fatal() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, AppError::Config(msg) if msg.contains("GOOGLE_API_KEY")));

        assert!(load(&[("GOOGLE_API_KEY", "  ")]).is_err());
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("GOOGLE_API_KEY", "key-1")]).unwrap();
        assert_eq!(config.cloud_api_key, "key-1");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert_eq!(config.listen_timeout, Duration::from_secs(8));
        assert_eq!(config.synthesis_config().voice, DEFAULT_TTS_VOICE);
        assert_eq!(config.llm_config().model, DEFAULT_MODEL);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("GOOGLE_API_KEY", "key-1"),
            ("GOOGLE_CLOUD_API_KEY", "key-2"),
            ("GENIETALK_MODEL", "gemini-1.5-pro"),
            ("GENIETALK_REQUEST_TIMEOUT_SECS", "15"),
            ("GENIETALK_LISTEN_SECS", "5"),
            ("GENIETALK_TTS_VOICE", "en-GB-Standard-A"),
        ])
        .unwrap();

        assert_eq!(config.cloud_api_key, "key-2");
        assert_eq!(config.model, "gemini-1.5-pro");
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert_eq!(config.listen_timeout, Duration::from_secs(5));
        assert_eq!(config.tts_voice, "en-GB-Standard-A");
    }

    #[test]
    fn test_env_file_supplies_missing_variables() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env");
        std::fs::write(
            &path,
            "# local keys\nGOOGLE_API_KEY=file-key\nGENIETALK_MODEL=gemini-1.5-pro\n",
        )
        .unwrap();

        let file_vars = read_env_file(&path).unwrap();
        assert_eq!(file_vars.get("GOOGLE_API_KEY").unwrap(), "file-key");

        let config = AppConfig::from_layers(|_| None, &file_vars).unwrap();
        assert_eq!(config.google_api_key, "file-key");
        assert_eq!(config.model, "gemini-1.5-pro");

        let config = AppConfig::from_layers(
            |name| (name == "GOOGLE_API_KEY").then(|| "process-key".to_string()),
            &file_vars,
        )
        .unwrap();
        assert_eq!(config.google_api_key, "process-key");
        assert_eq!(config.model, "gemini-1.5-pro");
    }

    #[test]
    fn test_missing_env_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let vars = read_env_file(&temp_dir.path().join(".env")).unwrap();
        assert!(vars.is_empty());
    }

    #[test]
    fn test_bad_timeouts_rejected() {
        assert!(load(&[("GOOGLE_API_KEY", "k"), ("GENIETALK_LISTEN_SECS", "soon")]).is_err());
        assert!(load(&[("GOOGLE_API_KEY", "k"), ("GENIETALK_REQUEST_TIMEOUT_SECS", "0")]).is_err());
    }
}
