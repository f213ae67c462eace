use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub cwa: CwaSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CwaSettings {
    pub base_url: String,
    pub dataset: String,
    #[serde(default)]
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl CwaSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Defaults, then `config/app.*` if present, then `APP__SECTION__KEY`
/// variables, then the plain `PORT` and `CWA_API_KEY` variables. A `.env`
/// file in the working directory is read into the environment first.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    load_env_file(Path::new(".env"))?;
    build_app_config(
        config::Environment::with_prefix("APP").separator("__"),
        std::env::var("PORT").ok(),
        std::env::var("CWA_API_KEY").ok(),
    )
}

/// Variables already present in the environment take precedence over the file.
fn load_env_file(path: &Path) -> anyhow::Result<()> {
    match dotenvy::from_path(path) {
        Ok(()) => {
            tracing::debug!("Loaded environment from {}", path.display());
            Ok(())
        }
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn build_app_config(
    environment: config::Environment,
    port: Option<String>,
    api_key: Option<String>,
) -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000)?
        .set_default("cwa.base_url", "https://opendata.cwa.gov.tw/api")?
        .set_default("cwa.dataset", "F-C0032-001")?
        .set_default("cwa.timeout_secs", 10)?
        .add_source(config::File::with_name("config/app").required(false))
        .add_source(environment)
        .set_override_option("server.port", port)?
        .set_override_option("cwa.api_key", api_key)?
        .build()?;

    Ok(settings.try_deserialize()?)
}
