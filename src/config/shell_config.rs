use std::path::Path;

use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Yaml};
use snafu::prelude::*;
use tracing::debug;

use crate::ext::read_text_file;

pub const DEFAULT_PROMPT: &str = "[erf@host]: $ ";
pub const DEFAULT_GREETING: &str = "Starting terminal...";
pub const DEFAULT_FAREWELL: &str = "Program terminating normally";

/// Session settings, optionally loaded from a YAML file.
///
/// ```yaml
/// prompt: "[erf@host]: $ "
/// greeting: "Starting terminal..."
/// farewell: "Program terminating normally"
/// startup:
///   - mkdir docs
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub prompt: String,
    pub greeting: String,
    pub farewell: String,
    /// Commands replayed against the fresh tree before the session starts.
    pub startup: Vec<String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_owned(),
            greeting: DEFAULT_GREETING.to_owned(),
            farewell: DEFAULT_FAREWELL.to_owned(),
            startup: Vec::new(),
        }
    }
}

impl ShellConfig {
    pub async fn read(path: &Path) -> Result<Self, ShellConfigError> {
        let contents = read_text_file(path).await.context(ReadSnafu {
            file_path: path.display().to_string(),
        })?;
        contents.as_str().try_into()
    }

    fn apply_mapping(
        &mut self,
        top_level: &LinkedHashMap<Yaml, Yaml>,
    ) -> Result<(), ShellConfigError> {
        for (key, value) in top_level {
            let Some(key) = key.as_str() else {
                debug!("Skipping non-string config key: {:?}", key);
                continue;
            };
            match key {
                "prompt" => self.prompt = Self::text_value(key, value)?,
                "greeting" => self.greeting = Self::text_value(key, value)?,
                "farewell" => self.farewell = Self::text_value(key, value)?,
                "startup" => self.startup = Self::startup_commands(value)?,
                other => debug!("Skipping unknown config key '{}'", other),
            }
        }
        Ok(())
    }

    fn text_value(key: &str, value: &Yaml) -> Result<String, ShellConfigError> {
        value
            .as_str()
            .map(str::to_owned)
            .context(NotAStringSnafu { key })
    }

    fn startup_commands(value: &Yaml) -> Result<Vec<String>, ShellConfigError> {
        value
            .as_sequence()
            .context(StartupNotSequenceSnafu)?
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_owned)
                    .context(StartupNotSequenceSnafu)
            })
            .collect()
    }
}

impl TryFrom<&str> for ShellConfig {
    type Error = ShellConfigError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let document = documents.first().context(MalformedConfigSnafu)?;
        let top_level = document.as_mapping().context(TopLevelNotMapSnafu)?;

        let mut config = ShellConfig::default();
        config.apply_mapping(top_level)?;
        debug!("Parsed shell config: {:?}", config);
        Ok(config)
    }
}

#[derive(Debug, Snafu)]
pub enum ShellConfigError {
    #[snafu(display("Failed to read the config file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Failed to parse the config file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Improperly formatted config file"))]
    MalformedConfig,
    #[snafu(display("Top level of config should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Config key '{}' should be a string", key))]
    NotAString { key: String },
    #[snafu(display("Startup section should be a list of commands"))]
    StartupNotSequence,
}
