use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use sc_core::{Model3D, SamplingParams};
use sc_shape::DevicePreference;
use crate::error::ConfigError;

pub const DEFAULT_PORT: u16 = 8008;
pub const DEFAULT_UPLOADS_DIR: &str = "uploads/3d-models";
pub const DEFAULT_URL_PREFIX: &str = "/api/3d-models";
pub const DEFAULT_RUNTIME_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_RUNTIME_TIMEOUT_SECS: u64 = 600;

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub host: IpAddr,
    pub port: u16,
    pub uploads_dir: PathBuf,
    /// Prepended to filenames to build `modelUrl`
    pub url_prefix: String,
    pub runtime_url: String,
    pub runtime_timeout: Duration,
    pub model: Model3D,
    pub device: DevicePreference,
    pub sampling: SamplingParams,
}

impl ServiceConfig {
    /// Read `.env` if there is one, then the process environment
    pub fn load() -> Result<Self, ConfigError> {
        accept_missing(dotenvy::dotenv().map(|_| ()))?;
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let model = match lookup("SHAPE_MODEL") {
            Some(id) => Model3D::from_id(id.trim()).ok_or_else(|| ConfigError::Invalid {
                key: "SHAPE_MODEL",
                value: id.clone(),
                reason: "unknown model".to_string(),
            })?,
            None => Model3D::default(),
        };
        let defaults = model.default_sampling();

        Ok(Self {
            host: parse_or(&lookup, "SHAPE_HOST", IpAddr::from([0, 0, 0, 0]))?,
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            uploads_dir: lookup("SHAPE_UPLOADS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOADS_DIR)),
            url_prefix: lookup("SHAPE_MODEL_URL_PREFIX")
                .unwrap_or_else(|| DEFAULT_URL_PREFIX.to_string()),
            runtime_url: lookup("SHAPE_RUNTIME_URL")
                .unwrap_or_else(|| DEFAULT_RUNTIME_URL.to_string()),
            runtime_timeout: Duration::from_secs(parse_or(
                &lookup,
                "SHAPE_RUNTIME_TIMEOUT_SECS",
                DEFAULT_RUNTIME_TIMEOUT_SECS,
            )?),
            model,
            device: parse_or(&lookup, "SHAPE_DEVICE", DevicePreference::Auto)?,
            sampling: SamplingParams {
                guidance_scale: parse_or(&lookup, "SHAPE_GUIDANCE_SCALE", defaults.guidance_scale)?,
                num_inference_steps: parse_or(&lookup, "SHAPE_INFERENCE_STEPS", defaults.num_inference_steps)?,
                frame_size: parse_or(&lookup, "SHAPE_FRAME_SIZE", defaults.frame_size)?,
            },
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// A missing `.env` is normal outside development; a broken one is not
fn accept_missing(loaded: Result<(), dotenvy::Error>) -> Result<(), ConfigError> {
    match loaded {
        Ok(()) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(ConfigError::EnvFile(e)),
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
