use crate::forms::ProjectsForm;
use crate::models::TargetRegistry;
use config::ConfigError;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub telegram: TelegramSettings,
    pub render: RenderSettings,
    pub probe: ProbeSettings,
    pub schedule: ScheduleSettings,
    pub projects_path: ProjectsPath,
    #[serde(skip)]
    pub credentials: Credentials,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TelegramSettings {
    /// Bot API base URL, without the `/bot<token>` suffix
    pub api_url: String,
    /// Long-poll timeout passed to getUpdates
    pub poll_timeout_secs: u64,
}

impl Default for TelegramSettings {
    fn default() -> Self {
        Self {
            api_url: "https://api.telegram.org".to_string(),
            poll_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub api_url: String,
    /// Deploys acknowledge slowly, keep this above the probe timeout
    pub deploy_timeout_secs: u64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            api_url: "https://api.render.com".to_string(),
            deploy_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    pub timeout_secs: u64,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScheduleSettings {
    pub check_interval_minutes: u64,
    pub page_size: usize,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            check_interval_minutes: 60,
            page_size: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct ProjectsPath(pub String);

impl Default for ProjectsPath {
    fn default() -> Self {
        Self("projects.yaml".to_string())
    }
}

/// Secrets and chat identifiers. These only ever come from the environment.
#[derive(Clone, Default)]
pub struct Credentials {
    pub bot_token: String,
    pub owner_id: i64,
    pub status_channel_id: i64,
    pub status_message_id: i64,
    pub render_api_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("bot_token", &"***")
            .field("owner_id", &self.owner_id)
            .field("status_channel_id", &self.status_channel_id)
            .field("status_message_id", &self.status_message_id)
            .field("render_api_key", &"***")
            .finish()
    }
}

impl Credentials {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Credentials {
            bot_token: required(&lookup, "BOT_TOKEN")?,
            owner_id: required_id(&lookup, "OWNER_ID")?,
            status_channel_id: required_id(&lookup, "STATUS_CHANNEL_ID")?,
            status_message_id: required_id(&lookup, "STATUS_MESSAGE_ID")?,
            render_api_key: required(&lookup, "RENDER_API_KEY")?,
        })
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ConfigError::NotFound(key.to_string()))
}

fn required_id<F>(lookup: &F, key: &str) -> Result<i64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    required(lookup, key)?
        .parse::<i64>()
        .map_err(|err| ConfigError::Message(format!("{} must be an integer: {}", key, err)))
}

impl Settings {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe.timeout_secs)
    }

    pub fn deploy_timeout(&self) -> Duration {
        Duration::from_secs(self.render.deploy_timeout_secs)
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.schedule.check_interval_minutes * 60)
    }
}

/// Reads `{config_name}.yaml` (optional), `APP__*` overrides and the
/// required credentials from the environment.
pub fn get_configuration(config_name: &str) -> Result<Settings, ConfigError> {
    dotenvy::dotenv().ok();

    let settings = config::Config::builder()
        .add_source(config::File::with_name(config_name).required(false))
        .add_source(config::Environment::with_prefix("APP").separator("__"))
        .build()?;

    let mut config: Settings = settings.try_deserialize()?;
    if config.schedule.page_size == 0 {
        return Err(ConfigError::Message(
            "schedule.page_size must be positive".to_string(),
        ));
    }
    if config.schedule.check_interval_minutes == 0 {
        return Err(ConfigError::Message(
            "schedule.check_interval_minutes must be positive".to_string(),
        ));
    }

    config.credentials = Credentials::from_env()?;

    Ok(config)
}

pub fn load_targets(path: &str) -> Result<TargetRegistry, ConfigError> {
    let source = std::fs::read_to_string(path)
        .map_err(|err| ConfigError::Message(format!("Failed to read {}: {}", path, err)))?;

    ProjectsForm::from_yaml(&source)
        .and_then(ProjectsForm::into_registry)
        .map_err(ConfigError::Message)
}
