/// Server configuration
///
/// # Environment variables
///
/// All settings can be overridden through environment variables:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | HTTP_PORT | 3000 | HTTP service port |
/// | ENVIRONMENT | development | Runtime environment |
/// | LOG_DIR | (unset) | Directory for daily-rolling log files |
/// | REQUEST_TIMEOUT_MS | 30000 | Per-request timeout (ms) |
/// | SHIPPING_FEE | 49.00 | Flat shipping fee |
/// | FREE_SHIPPING_THRESHOLD | 1000.00 | Subtotal at or above which shipping is free |
///
/// # Example
///
/// ```ignore
/// HTTP_PORT=8080 SHIPPING_FEE=79 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API service port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Optional log file directory
    pub log_dir: Option<String>,
    /// Per-request timeout (milliseconds)
    pub request_timeout_ms: u64,
    /// Flat shipping fee applied below the free-shipping threshold
    pub shipping_fee: f64,
    /// Cart subtotal at or above which shipping is free
    pub free_shipping_threshold: f64,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to defaults.
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            shipping_fee: std::env::var("SHIPPING_FEE")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(49.0),
            free_shipping_threshold: std::env::var("FREE_SHIPPING_THRESHOLD")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(1000.0),
        }
    }

    /// Shipping fee for a cart subtotal under the free-shipping policy
    pub fn shipping_fee_for(&self, subtotal: f64) -> f64 {
        if subtotal >= self.free_shipping_threshold {
            0.0
        } else {
            self.shipping_fee
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            http_port: 0,
            environment: "test".to_string(),
            log_dir: None,
            request_timeout_ms: 30000,
            shipping_fee: 49.0,
            free_shipping_threshold: 1000.0,
        }
    }

    #[test]
    fn test_shipping_fee_threshold() {
        let config = test_config();
        assert_eq!(config.shipping_fee_for(999.99), 49.0);
        assert_eq!(config.shipping_fee_for(1000.0), 0.0);
        assert_eq!(config.shipping_fee_for(2400.0), 0.0);
    }
}
