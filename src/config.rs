//! Command line / environment configuration.

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::warn;

use crate::session::SessionPolicy;

/// Development fallbacks. Never used in production mode.
const DEV_PROXY_CODE: &str = "secure2025";
const DEV_CHAT_CODE: &str = "atlas-chat";
const DEV_ADMIN_PASSWORD: &str = "admin-atlas-2025";
const DEV_JWT_SECRET: &str = "temp-secret-key";

const DEFAULT_PROXY_URL: &str = "https://blue-sky-123.ddx.blocksi.lol.cdn.cloudflare.net";

/// Command line arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "access-gate")]
#[command(about = "Access-code gatekeeper issuing service sessions and admin tokens")]
pub struct Args {
    /// Access code granting the proxy service
    #[arg(long, env = "PROXY_CODE")]
    pub proxy_code: Option<String>,

    /// Access code granting the chat service
    #[arg(long, env = "CHAT_CODE")]
    pub chat_code: Option<String>,

    /// Admin login password
    #[arg(long, env = "ADMIN_PASSWORD")]
    pub admin_password: Option<String>,

    /// HS256 secret for admin tokens
    #[arg(long, env = "JWT_SECRET")]
    pub jwt_secret: Option<String>,

    /// URL handed to holders of a proxy session
    #[arg(long, default_value = DEFAULT_PROXY_URL, env = "PROXY_URL")]
    pub proxy_url: String,

    /// Listen port
    #[arg(long, default_value_t = 3000, env = "PORT")]
    pub port: u16,

    /// Listen address
    #[arg(long, default_value = "0.0.0.0", env = "BIND_ADDR")]
    pub bind: IpAddr,

    /// Runtime environment (development, production)
    #[arg(long, default_value = "development", env = "APP_ENV")]
    pub environment: String,

    /// Session resolution policy (strict, permissive)
    #[arg(long, default_value = "permissive", env = "SESSION_POLICY")]
    pub session_policy: String,

    /// Directory holding the front-end entry document
    #[arg(long, default_value = "public", env = "PUBLIC_DIR")]
    pub public_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, env = "GATE_VERBOSE")]
    pub verbose: bool,
}

/// Runtime environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(anyhow!("Unsupported environment: {}", s)),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Resolved gate configuration.
#[derive(Debug, Clone)]
pub struct GateConfig {
    pub environment: Environment,
    pub proxy_code: String,
    pub chat_code: String,
    pub admin_password: String,
    pub jwt_secret: String,
    pub proxy_url: String,
    pub bind: IpAddr,
    pub port: u16,
    pub session_policy: SessionPolicy,
    pub public_dir: PathBuf,
}

impl GateConfig {
    pub fn from_args(args: &Args) -> Result<Self> {
        let environment: Environment = args.environment.parse()?;
        let session_policy: SessionPolicy = args.session_policy.parse()?;

        let mut missing = Vec::new();
        let mut secret = |value: &Option<String>, var: &'static str, fallback: &str| -> String {
            match value {
                Some(v) => v.clone(),
                None if environment == Environment::Production => {
                    missing.push(var);
                    String::new()
                }
                None => {
                    warn!(variable = var, "Not set, using insecure development default");
                    fallback.to_string()
                }
            }
        };

        let proxy_code = secret(&args.proxy_code, "PROXY_CODE", DEV_PROXY_CODE);
        let chat_code = secret(&args.chat_code, "CHAT_CODE", DEV_CHAT_CODE);
        let admin_password = secret(&args.admin_password, "ADMIN_PASSWORD", DEV_ADMIN_PASSWORD);
        let jwt_secret = secret(&args.jwt_secret, "JWT_SECRET", DEV_JWT_SECRET);

        if !missing.is_empty() {
            bail!(
                "Missing required configuration in production: {}",
                missing.join(", ")
            );
        }

        let config = Self {
            environment,
            proxy_code,
            chat_code,
            admin_password,
            jwt_secret,
            proxy_url: args.proxy_url.clone(),
            bind: args.bind,
            port: args.port,
            session_policy,
            public_dir: args.public_dir.clone(),
        };

        config
            .validate()
            .map_err(|e| anyhow!(e))
            .context("Invalid configuration")?;

        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.proxy_code.is_empty() || self.chat_code.is_empty() {
            return Err("Access codes must not be empty".to_string());
        }

        if self.proxy_code == self.chat_code {
            return Err("PROXY_CODE and CHAT_CODE must differ".to_string());
        }

        if self.jwt_secret.is_empty() {
            return Err("JWT_SECRET must not be empty".to_string());
        }

        if self.admin_password.is_empty() {
            return Err("ADMIN_PASSWORD must not be empty".to_string());
        }

        if self.proxy_url.is_empty() {
            return Err("PROXY_URL must not be empty".to_string());
        }

        Ok(())
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}
