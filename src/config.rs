use std::env;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub max_radius_km: f64,
    pub rate_limit_per_ms: u64,
    pub rate_limit_burst: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 3000,
            max_radius_km: 500.0,
            rate_limit_per_ms: 60,
            rate_limit_burst: 1000,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Self {
            server_host: env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_var("SERVER_PORT", defaults.server_port),
            max_radius_km: check_radius(
                "MAX_RADIUS_KM",
                parse_var("MAX_RADIUS_KM", defaults.max_radius_km),
            ),
            rate_limit_per_ms: parse_var("RATE_LIMIT_PER_MS", defaults.rate_limit_per_ms),
            rate_limit_burst: parse_var("RATE_LIMIT_BURST", defaults.rate_limit_burst),
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    parse_value(name, env::var(name).ok(), default)
}

fn parse_value<T: FromStr>(name: &str, raw: Option<String>, default: T) -> T {
    match raw {
        Some(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{} must be a number, got {:?}", name, raw)),
        None => default,
    }
}

/// NaN would disable every `radius > max` comparison downstream
fn check_radius(name: &str, km: f64) -> f64 {
    if !km.is_finite() || km < 0.0 {
        panic!("{} must be a finite, non-negative number of km, got {}", name, km);
    }
    km
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_falls_back_to_default() {
        assert_eq!(parse_value("SERVER_PORT", None, 3000u16), 3000);
        assert_eq!(parse_value("SERVER_PORT", Some("8080".to_string()), 3000u16), 8080);
    }

    #[test]
    #[should_panic(expected = "SERVER_PORT must be a number")]
    fn test_parse_value_rejects_garbage() {
        parse_value("SERVER_PORT", Some("eighty".to_string()), 3000u16);
    }

    #[test]
    fn test_radius_accepts_finite_values() {
        assert_eq!(check_radius("MAX_RADIUS_KM", 0.0), 0.0);
        assert_eq!(check_radius("MAX_RADIUS_KM", 250.5), 250.5);
    }

    #[test]
    #[should_panic(expected = "MAX_RADIUS_KM must be a finite")]
    fn test_radius_rejects_nan() {
        // "NaN" parses as an f64, so it has to be caught after parsing
        let km = parse_value("MAX_RADIUS_KM", Some("NaN".to_string()), 500.0);
        check_radius("MAX_RADIUS_KM", km);
    }

    #[test]
    #[should_panic(expected = "MAX_RADIUS_KM must be a finite")]
    fn test_radius_rejects_negative() {
        check_radius("MAX_RADIUS_KM", -1.0);
    }
}
