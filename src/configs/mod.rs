//! # Client Configuration
//!
//! `ClientConfig` holds the API key, API version, sandbox switch and the two
//! wire-dialect policies. It can be built in code or loaded with `figment`
//! from a JSON/TOML file layered with `HOTELSCOMBINED_` environment variables.

use crate::core::error::HcError;
use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized, Toml},
};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

pub const LIVE_API_ROOT: &str = "https://hotelscombined.com/api/";
pub const SANDBOX_API_ROOT: &str = "http://sandbox.hotelscombined.com/api/";
pub const AUTOCOMPLETE_ROOT: &str = "http://www.hotelscombined.com/";
pub const DEFAULT_VERSION: &str = "1.0";
pub const ENV_PREFIX: &str = "HOTELSCOMBINED_";

/// How optional caller parameters are cased before they go on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NormalizePolicy {
    /// Keys are sent exactly as given; autocomplete sends its term as `query`.
    #[serde(rename = "passthrough")]
    Passthrough,
    /// snake_case keys become camelCase; autocomplete sends its term as `search`.
    #[default]
    #[serde(rename = "camelCase")]
    CamelCase,
}

/// Numbering of the caller-facing `page` argument of hotel searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PageIndexBase {
    /// `page` is sent to the service unchanged.
    #[default]
    Zero,
    /// `page` starts at 1 and is shifted down by one on the wire.
    One,
}

impl TryFrom<u8> for PageIndexBase {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PageIndexBase::Zero),
            1 => Ok(PageIndexBase::One),
            other => Err(format!("page_index_base must be 0 or 1, got {}", other)),
        }
    }
}

impl From<PageIndexBase> for u8 {
    fn from(value: PageIndexBase) -> Self {
        match value {
            PageIndexBase::Zero => 0,
            PageIndexBase::One => 1,
        }
    }
}

/// Endpoint roots. Defaults point at the public service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub live: String,
    pub sandbox: String,
    /// Autocomplete ignores `debug` and `version` and always uses this root.
    pub autocomplete: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            live: LIVE_API_ROOT.to_string(),
            sandbox: SANDBOX_API_ROOT.to_string(),
            autocomplete: AUTOCOMPLETE_ROOT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API key sent as `apiKey` on every request.
    #[serde(deserialize_with = "string_or_number")]
    pub token: String,
    #[serde(deserialize_with = "string_or_number")]
    pub version: String,
    /// Route requests to the sandbox root instead of the live one.
    pub debug: bool,
    pub normalize_policy: NormalizePolicy,
    pub page_index_base: PageIndexBase,
    pub endpoints: Endpoints,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            version: DEFAULT_VERSION.to_string(),
            debug: false,
            normalize_policy: NormalizePolicy::default(),
            page_index_base: PageIndexBase::default(),
            endpoints: Endpoints::default(),
        }
    }
}

impl ClientConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Self::default()
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_normalize_policy(mut self, policy: NormalizePolicy) -> Self {
        self.normalize_policy = policy;
        self
    }

    pub fn with_page_index_base(mut self, base: PageIndexBase) -> Self {
        self.page_index_base = base;
        self
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// LOCAL: defaults + JSON/TOML file + `HOTELSCOMBINED_` env vars. Fails if file missing.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, HcError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(HcError::ConfigError(format!(
                "Local file not found: {}",
                path.display()
            )));
        }

        let figment = Figment::from(Serialized::defaults(ClientConfig::default()));
        let figment = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => figment.merge(Toml::file(path)),
            Some("json") => figment.merge(Json::file(path)),
            _ => {
                return Err(HcError::ConfigError(format!(
                    "Unsupported config format: {}",
                    path.display()
                )));
            }
        };

        let config: ClientConfig = figment
            .merge(env_provider())
            .extract()
            .map_err(|e| HcError::ConfigError(e.to_string()))?;
        Ok(config.with_raw_env_strings())
    }

    /// ENV: defaults + `HOTELSCOMBINED_` env vars only.
    pub fn from_env() -> Result<Self, HcError> {
        let config: ClientConfig = Figment::from(Serialized::defaults(ClientConfig::default()))
            .merge(env_provider())
            .extract()
            .map_err(|e| HcError::ConfigError(e.to_string()))?;
        Ok(config.with_raw_env_strings())
    }

    /// Takes `token` and `version` verbatim from the environment.
    ///
    /// `Env` would parse `0123` or `1.10` as numbers and lose their text.
    fn with_raw_env_strings(mut self) -> Self {
        for (key, value) in Env::prefixed(ENV_PREFIX).iter() {
            let key = key.as_str();
            if key.eq_ignore_ascii_case(RAW_ENV_KEYS[0]) {
                self.token = value;
            } else if key.eq_ignore_ascii_case(RAW_ENV_KEYS[1]) {
                self.version = value;
            }
        }
        self
    }
}

/// Keys read as raw strings instead of through figment's value parsing.
const RAW_ENV_KEYS: [&str; 2] = ["token", "version"];

fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX).split("__").ignore(&RAW_ENV_KEYS)
}

// Unquoted numbers in a TOML/JSON file, e.g. `version = 2.0`.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Int(i) => i.to_string(),
        Raw::Float(f) => format!("{:?}", f),
    })
}
