//! Startup configuration for both services.
//!
//! Values come from CLI flags / environment variables exactly once, are
//! validated together, and end up in the immutable [`ServiceConfig`] and
//! [`GatewayConfig`] structs handed to router construction.

pub mod model;
pub mod validation;

pub use model::{GatewayConfig, ServiceConfig};

use crate::cli::{GatewayArgs, OriginArgs};
use crate::error::{EchoChainError, ValidationError};

impl ServiceConfig {
    pub fn from_origin_args(args: &OriginArgs) -> Result<Self, EchoChainError> {
        let mut errors = Vec::new();
        let config = Self::collect(&args.service_name, &args.host, args.port, &mut errors);
        finish(config, errors)
    }

    fn collect(
        service_name: &str,
        host: &str,
        port: u16,
        errors: &mut Vec<ValidationError>,
    ) -> Self {
        if let Err(message) = validation::validate_service_name(service_name) {
            errors.push(ValidationError {
                field: "service_name".into(),
                message,
                suggestion: Some("set SERVICE_NAME or --service-name".into()),
            });
        }
        if let Err(message) = validation::validate_listen_addr(host) {
            errors.push(ValidationError {
                field: "host".into(),
                message,
                suggestion: Some("use an IP literal such as 0.0.0.0, 127.0.0.1 or ::1".into()),
            });
        }

        Self {
            service_name: service_name.trim().to_string(),
            host: host.to_string(),
            port,
        }
    }
}

impl GatewayConfig {
    pub fn from_args(args: &GatewayArgs) -> Result<Self, EchoChainError> {
        let mut errors = Vec::new();
        let service =
            ServiceConfig::collect(&args.service_name, &args.host, args.port, &mut errors);

        let echo_endpoint = match validation::validate_base_url(&args.echo_base_url) {
            Ok(base) => Some(validation::echo_endpoint(&base)),
            Err(message) => {
                errors.push(ValidationError {
                    field: "echo_base_url".into(),
                    message,
                    suggestion: Some("e.g. http://localhost:8080".into()),
                });
                None
            }
        };

        let echo_timeout = match validation::validate_timeout(args.echo_timeout_seconds) {
            Ok(timeout) => Some(timeout),
            Err(message) => {
                errors.push(ValidationError {
                    field: "echo_timeout_seconds".into(),
                    message,
                    suggestion: Some("the default is 1.0".into()),
                });
                None
            }
        };

        match (echo_endpoint, echo_timeout) {
            (Some(echo_endpoint), Some(echo_timeout)) if errors.is_empty() => Ok(Self {
                service,
                echo_endpoint,
                echo_timeout,
            }),
            _ => Err(EchoChainError::ConfigValidation { errors }),
        }
    }
}

fn finish<T>(value: T, errors: Vec<ValidationError>) -> Result<T, EchoChainError> {
    if errors.is_empty() {
        Ok(value)
    } else {
        Err(EchoChainError::ConfigValidation { errors })
    }
}
