use std::{env, time::Duration};

use market::board::DEFAULT_TRACKED_SYMBOLS;
use market::Currency;
use thiserror::Error;

const DEFAULT_CURRENCY: Currency = Currency::Usd;
const DEFAULT_FETCH_DELAY_MS: u64 = 350;
const DEFAULT_HTTP_TIMEOUT_MS: u64 = 10_000;

const ENV_CURRENCY: &str = "DASHBOARD_CURRENCY";
const ENV_SYMBOLS: &str = "DASHBOARD_SYMBOLS";
const ENV_FETCH_DELAY_MS: &str = "DASHBOARD_FETCH_DELAY_MS";
const ENV_HTTP_TIMEOUT_MS: &str = "DASHBOARD_HTTP_TIMEOUT_MS";
const ENV_FINNHUB_TOKEN: &str = "FINNHUB_TOKEN";
const ENV_COINGECKO_API_KEY: &str = "COINGECKO_API_KEY";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub currency: Currency,
    pub symbols: Vec<String>,
    pub fetch_delay: Duration,
    pub http_timeout: Duration,
    pub finnhub_token: Option<String>,
    pub coingecko_api_key: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("DASHBOARD_CURRENCY must be one of: usd, eur, inr")]
    InvalidCurrency,
    #[error("DASHBOARD_SYMBOLS must list at least one comma-separated symbol")]
    InvalidSymbols,
    #[error("DASHBOARD_FETCH_DELAY_MS must be a whole number of milliseconds")]
    InvalidFetchDelay,
    #[error("DASHBOARD_HTTP_TIMEOUT_MS must be a positive whole number of milliseconds")]
    InvalidHttpTimeout,
    #[error("{0} contains non-unicode data")]
    NonUnicode(&'static str),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let currency = match read_env(ENV_CURRENCY)? {
            Some(value) => Currency::parse(&value).ok_or(ConfigError::InvalidCurrency)?,
            None => DEFAULT_CURRENCY,
        };

        let symbols = match read_env(ENV_SYMBOLS)? {
            Some(value) => parse_symbols(&value).ok_or(ConfigError::InvalidSymbols)?,
            None => DEFAULT_TRACKED_SYMBOLS
                .iter()
                .map(|symbol| symbol.to_string())
                .collect(),
        };

        let fetch_delay_ms = match read_env(ENV_FETCH_DELAY_MS)? {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidFetchDelay)?,
            None => DEFAULT_FETCH_DELAY_MS,
        };

        let http_timeout_ms = match read_env(ENV_HTTP_TIMEOUT_MS)? {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|millis| *millis > 0)
                .ok_or(ConfigError::InvalidHttpTimeout)?,
            None => DEFAULT_HTTP_TIMEOUT_MS,
        };

        Ok(Self {
            currency,
            symbols,
            fetch_delay: Duration::from_millis(fetch_delay_ms),
            http_timeout: Duration::from_millis(http_timeout_ms),
            finnhub_token: read_secret(ENV_FINNHUB_TOKEN)?,
            coingecko_api_key: read_secret(ENV_COINGECKO_API_KEY)?,
        })
    }
}

fn read_env(key: &'static str) -> Result<Option<String>, ConfigError> {
    match env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::NonUnicode(key)),
    }
}

fn read_secret(key: &'static str) -> Result<Option<String>, ConfigError> {
    Ok(read_env(key)?
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty()))
}

fn parse_symbols(value: &str) -> Option<Vec<String>> {
    let symbols: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|symbol| !symbol.is_empty())
        .map(str::to_uppercase)
        .collect();

    (!symbols.is_empty()).then_some(symbols)
}

#[cfg(test)]
mod tests {
    use std::{env, sync::Mutex, time::Duration};

    use market::Currency;

    use super::{
        Config, ConfigError, ENV_COINGECKO_API_KEY, ENV_CURRENCY, ENV_FETCH_DELAY_MS,
        ENV_FINNHUB_TOKEN, ENV_HTTP_TIMEOUT_MS, ENV_SYMBOLS,
    };

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct EnvVarGuard {
        key: &'static str,
        previous: Option<std::ffi::OsString>,
    }

    impl EnvVarGuard {
        fn set(key: &'static str, value: &str) -> Self {
            let previous = env::var_os(key);
            env::set_var(key, value);
            Self { key, previous }
        }

        fn unset(key: &'static str) -> Self {
            let previous = env::var_os(key);
            env::remove_var(key);
            Self { key, previous }
        }

        #[cfg(unix)]
        fn set_os(key: &'static str, value: std::ffi::OsString) -> Self {
            let previous = env::var_os(key);
            env::set_var(key, value);
            Self { key, previous }
        }
    }

    impl Drop for EnvVarGuard {
        fn drop(&mut self) {
            match self.previous.take() {
                Some(value) => env::set_var(self.key, value),
                None => env::remove_var(self.key),
            }
        }
    }

    fn reset_config_env_baseline() -> [EnvVarGuard; 6] {
        [
            EnvVarGuard::unset(ENV_CURRENCY),
            EnvVarGuard::unset(ENV_SYMBOLS),
            EnvVarGuard::unset(ENV_FETCH_DELAY_MS),
            EnvVarGuard::unset(ENV_HTTP_TIMEOUT_MS),
            EnvVarGuard::unset(ENV_FINNHUB_TOKEN),
            EnvVarGuard::unset(ENV_COINGECKO_API_KEY),
        ]
    }

    #[test]
    fn defaults_when_env_is_unset() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();

        let config = Config::from_env().unwrap();

        assert_eq!(config.currency, Currency::Usd);
        assert_eq!(config.symbols.len(), 20);
        assert_eq!(config.symbols[0], "AAPL");
        assert_eq!(config.symbols[19], "ORCL");
        assert_eq!(config.fetch_delay, Duration::from_millis(350));
        assert_eq!(config.http_timeout, Duration::from_secs(10));
        assert_eq!(config.finnhub_token, None);
        assert_eq!(config.coingecko_api_key, None);
    }

    #[test]
    fn uses_currency_override_from_env() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _guard = EnvVarGuard::set(ENV_CURRENCY, "INR");

        let config = Config::from_env().unwrap();

        assert_eq!(config.currency, Currency::Inr);
    }

    #[test]
    fn returns_error_for_unknown_currency() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _guard = EnvVarGuard::set(ENV_CURRENCY, "gbp");

        let err = Config::from_env().unwrap_err();

        assert_eq!(err, ConfigError::InvalidCurrency);
    }

    #[test]
    fn parses_symbol_list_override() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _guard = EnvVarGuard::set(ENV_SYMBOLS, " aapl, ,brk.b,NVDA ");

        let config = Config::from_env().unwrap();

        assert_eq!(config.symbols, vec!["AAPL", "BRK.B", "NVDA"]);
    }

    #[test]
    fn returns_error_for_empty_symbol_list() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _guard = EnvVarGuard::set(ENV_SYMBOLS, " , ");

        let err = Config::from_env().unwrap_err();

        assert_eq!(err, ConfigError::InvalidSymbols);
    }

    #[test]
    fn zero_fetch_delay_is_allowed() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _guard = EnvVarGuard::set(ENV_FETCH_DELAY_MS, "0");

        let config = Config::from_env().unwrap();

        assert_eq!(config.fetch_delay, Duration::ZERO);
    }

    #[test]
    fn returns_error_for_invalid_fetch_delay() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _guard = EnvVarGuard::set(ENV_FETCH_DELAY_MS, "-5");

        let err = Config::from_env().unwrap_err();

        assert_eq!(err, ConfigError::InvalidFetchDelay);
    }

    #[test]
    fn returns_error_for_zero_http_timeout() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _guard = EnvVarGuard::set(ENV_HTTP_TIMEOUT_MS, "0");

        let err = Config::from_env().unwrap_err();

        assert_eq!(err, ConfigError::InvalidHttpTimeout);
    }

    #[test]
    fn blank_credentials_are_treated_as_unset() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _token = EnvVarGuard::set(ENV_FINNHUB_TOKEN, "   ");
        let _key = EnvVarGuard::set(ENV_COINGECKO_API_KEY, " demo-key ");

        let config = Config::from_env().unwrap();

        assert_eq!(config.finnhub_token, None);
        assert_eq!(config.coingecko_api_key.as_deref(), Some("demo-key"));
    }

    #[cfg(unix)]
    #[test]
    fn returns_error_for_non_unicode_currency() {
        use std::os::unix::ffi::OsStringExt;

        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _guard = EnvVarGuard::set_os(
            ENV_CURRENCY,
            std::ffi::OsString::from_vec(vec![0x66, 0x6f, 0x80]),
        );

        let err = Config::from_env().unwrap_err();

        assert_eq!(err, ConfigError::NonUnicode(ENV_CURRENCY));
        assert_eq!(
            err.to_string(),
            "DASHBOARD_CURRENCY contains non-unicode data"
        );
    }
}
