use super::env::EnvConfig;
use super::yaml::YamlConfig;
use super::{ConfigError, TtsConfig};

/// Merge YAML overrides onto the environment, falling back to defaults.
///
/// Priority: YAML > environment (including `.env`) > built-in defaults.
pub fn merge_config(yaml: Option<YamlConfig>) -> Result<TtsConfig, ConfigError> {
    let env = EnvConfig::load()?;
    Ok(merge(yaml.unwrap_or_default(), env))
}

pub(super) fn merge(yaml: YamlConfig, env: EnvConfig) -> TtsConfig {
    let defaults = TtsConfig::default();
    let server = yaml.server.unwrap_or_default();

    TtsConfig {
        host: server.host.or(env.host).unwrap_or(defaults.host),
        port: server.port.or(env.port).unwrap_or(defaults.port),
        speech_key: yaml
            .speech_key
            .filter(|key| !key.is_blank())
            .or(env.speech_key)
            .unwrap_or_default(),
        speech_region: yaml
            .speech_region
            .or(env.speech_region)
            .unwrap_or_default(),
        default_lang: yaml
            .default_lang
            .or(env.default_lang)
            .unwrap_or(defaults.default_lang),
        default_voice_name: yaml
            .default_voice_name
            .or(env.default_voice_name)
            .unwrap_or(defaults.default_voice_name),
        default_rate: yaml
            .default_rate
            .or(env.default_rate)
            .unwrap_or(defaults.default_rate),
        default_pitch: yaml
            .default_pitch
            .or(env.default_pitch)
            .unwrap_or(defaults.default_pitch),
        endpoint: yaml.endpoint.or(env.endpoint),
        request_timeout_seconds: yaml
            .request_timeout_seconds
            .or(env.request_timeout_seconds)
            .unwrap_or(defaults.request_timeout_seconds),
        escape_markup: yaml
            .escape_markup
            .or(env.escape_markup)
            .unwrap_or(defaults.escape_markup),
    }
}
