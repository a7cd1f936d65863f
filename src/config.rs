use anyhow::Result;
use clap::Parser;
use serde::Deserialize;
use serde_yaml;
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "triage")]
#[command(about = "Runs the triage reading-list gateway", long_about = None)]
pub struct Cli {
    #[arg(short = 'c', long = "config")]
    pub config_path: Option<String>,

    /// Log deletions instead of sending them to the provider.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Serve front-end assets from the local web/dist directory.
    #[arg(long = "live")]
    pub live: bool,
}

pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".triage")
}

pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.yaml")
}

/// The application's registration with the provider. A consumer key is a
/// public client identifier, not a rotating secret.
pub const DEFAULT_CONSUMER_KEY: &str = "51813-9210c4b043da8404cede46e2";

const DEFAULT_PROVIDER_URL: &str = "https://getpocket.com";
const DEFAULT_PUBLIC_URL: &str = "http://localhost:8080";
const DEFAULT_AUTH_REDIRECT: &str = "Triage:authorizationFinished";

fn default_port() -> i32 {
    8080
}

fn default_public_url() -> String {
    DEFAULT_PUBLIC_URL.to_string()
}

fn default_api_url() -> String {
    DEFAULT_PROVIDER_URL.to_string()
}

fn default_consumer_key() -> String {
    DEFAULT_CONSUMER_KEY.to_string()
}

fn default_redirect_uri() -> String {
    DEFAULT_AUTH_REDIRECT.to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct App {
    #[serde(default = "default_port")]
    port: i32,
    #[serde(default = "default_public_url")]
    public_url: String,
}

impl Default for App {
    fn default() -> Self {
        App {
            port: default_port(),
            public_url: default_public_url(),
        }
    }
}

impl App {
    pub fn get_port(&self) -> i32 {
        return self.port;
    }

    /// Externally visible base URL, used to build the OAuth redirect-back
    /// locations handed to the provider and the front-end.
    pub fn get_public_url(&self) -> &str {
        return self.public_url.trim_end_matches('/');
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Provider {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_consumer_key")]
    pub consumer_key: String,
    #[serde(default = "default_redirect_uri")]
    pub redirect_uri: String,
}

impl Default for Provider {
    fn default() -> Self {
        Provider {
            api_url: default_api_url(),
            consumer_key: default_consumer_key(),
            redirect_uri: default_redirect_uri(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub app: App,
    #[serde(default)]
    pub provider: Provider,
}

impl Config {
    pub fn new(path: &str) -> Result<Self> {
        let cfg = Config::load_config(path)?;
        Ok(cfg)
    }

    fn load_config(path: &str) -> Result<Config> {
        let yaml_str = fs::read_to_string(path)?;
        let yaml_with_env = Config::substitute_env_vars(&yaml_str)?;
        let config: Config = serde_yaml::from_str(&yaml_with_env)?;
        Ok(config)
    }

    fn substitute_env_vars(yaml_str: &str) -> Result<String> {
        let mut result = yaml_str.to_string();
        let mut offset = 0;

        while let Some(start) = result[offset..].find("${") {
            let actual_start = offset + start;
            if let Some(end) = result[actual_start..].find("}") {
                let var_name = &result[actual_start + 2..actual_start + end];

                // Handle default values like ${VAR:-default}
                let env_value = if let Some(default_start) = var_name.find(":-") {
                    let actual_var = &var_name[..default_start];
                    let default_val = &var_name[default_start + 2..];
                    env::var(actual_var).unwrap_or_else(|_| default_val.to_string())
                } else {
                    env::var(var_name).unwrap_or_else(|_| {
                        println!("Warning: Environment variable '{}' not found", var_name);
                        String::new()
                    })
                };

                result.replace_range(actual_start..actual_start + end + 1, &env_value);
                offset = actual_start + env_value.len();
            } else {
                break;
            }
        }

        Ok(result)
    }
}
