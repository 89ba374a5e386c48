use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use tracing_subscriber::EnvFilter;
use warden_core::AppError;

const MIN_SERVICE_TOKEN_LENGTH: usize = 32;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub database_url: String,
    pub database_max_connections: u32,
    pub api_host: String,
    pub api_port: u16,
    pub service_token: String,
    pub lookup_timeout: Duration,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

        let database_url = required_non_empty_env("DATABASE_URL")?;
        let database_max_connections = optional_env("DATABASE_MAX_CONNECTIONS")
            .map(|value| parse_positive::<u32>("DATABASE_MAX_CONNECTIONS", value.as_str()))
            .transpose()?
            .unwrap_or(10);

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = optional_env("API_PORT")
            .map(|value| {
                value
                    .parse::<u16>()
                    .map_err(|error| AppError::Validation(format!("invalid API_PORT: {error}")))
            })
            .transpose()?
            .unwrap_or(3001);

        let service_token = validate_service_token(required_env("WARDEN_SERVICE_TOKEN")?)?;

        let lookup_timeout = optional_env("AUTHZ_LOOKUP_TIMEOUT_MS")
            .map(|value| parse_positive::<u64>("AUTHZ_LOOKUP_TIMEOUT_MS", value.as_str()))
            .transpose()?
            .map_or(warden_application::DEFAULT_LOOKUP_TIMEOUT, Duration::from_millis);

        Ok(Self {
            migrate_only,
            database_url,
            database_max_connections,
            api_host,
            api_port,
            service_token,
            lookup_timeout,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Validation(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn validate_service_token(token: String) -> Result<String, AppError> {
    if token.trim().len() < MIN_SERVICE_TOKEN_LENGTH {
        return Err(AppError::Validation(format!(
            "WARDEN_SERVICE_TOKEN must be at least {MIN_SERVICE_TOKEN_LENGTH} characters"
        )));
    }

    Ok(token)
}

fn parse_positive<T>(name: &str, value: &str) -> Result<T, AppError>
where
    T: FromStr + PartialOrd + Default,
    T::Err: std::fmt::Display,
{
    let parsed = value
        .trim()
        .parse::<T>()
        .map_err(|error| AppError::Validation(format!("invalid {name}: {error}")))?;
    if parsed <= T::default() {
        return Err(AppError::Validation(format!(
            "{name} must be greater than zero"
        )));
    }

    Ok(parsed)
}

fn optional_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn required_non_empty_env(name: &str) -> Result<String, AppError> {
    let value = required_env(name)?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use warden_core::AppError;

    use super::{parse_positive, validate_service_token};

    #[test]
    fn short_service_token_is_rejected() {
        let result = validate_service_token("too-short".to_owned());
        assert!(matches!(result, Err(AppError::Validation(_))));

        let accepted = validate_service_token("x".repeat(32));
        assert!(accepted.is_ok());
    }

    #[test]
    fn lookup_timeout_must_be_positive() {
        assert!(matches!(
            parse_positive::<u64>("AUTHZ_LOOKUP_TIMEOUT_MS", "0"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            parse_positive::<u64>("AUTHZ_LOOKUP_TIMEOUT_MS", "abc"),
            Err(AppError::Validation(_))
        ));
        assert_eq!(
            parse_positive::<u64>("AUTHZ_LOOKUP_TIMEOUT_MS", " 1500 ").unwrap_or_default(),
            1500
        );
    }
}
