use thiserror::Error;

pub const DEFAULT_TAPE_SIZE: usize = 30_000;
pub const DEFAULT_EOF: u8 = 0;

pub const TAPE_SIZE_ENV: &str = "BRAINTWIST_TAPE_SIZE";
pub const EOF_ENV: &str = "BRAINTWIST_EOF";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for env var {var}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("tape size must be at least one cell")]
    ZeroTapeSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VmConfig {
    /// Number of tape cells. Fixed for the lifetime of an interpreter.
    pub tape_size: usize,
    /// Byte stored by a read once the input is exhausted.
    pub eof: u8,
}

impl Default for VmConfig {
    fn default() -> Self {
        Self {
            tape_size: DEFAULT_TAPE_SIZE,
            eof: DEFAULT_EOF,
        }
    }
}

impl VmConfig {
    /// Defaults overridden by `BRAINTWIST_TAPE_SIZE` and `BRAINTWIST_EOF` when set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(TAPE_SIZE_ENV) {
            config.tape_size = parse_env(TAPE_SIZE_ENV, &raw)?;
            tracing::debug!(tape_size = config.tape_size, "tape size overridden from env");
        }
        if let Some(raw) = lookup(EOF_ENV) {
            config.eof = parse_env(EOF_ENV, &raw)?;
            tracing::debug!(eof = config.eof, "eof value overridden from env");
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tape_size == 0 {
            return Err(ConfigError::ZeroTapeSize);
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(var: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        var,
        value: raw.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let config = VmConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, VmConfig::default());
        assert_eq!(config.tape_size, 30_000);
        assert_eq!(config.eof, 0);
    }

    #[test]
    fn env_overrides_defaults() {
        let config =
            VmConfig::from_lookup(lookup(&[(TAPE_SIZE_ENV, "64"), (EOF_ENV, " 255 ")])).unwrap();
        assert_eq!(
            config,
            VmConfig {
                tape_size: 64,
                eof: 255
            }
        );
    }

    #[test]
    fn eof_out_of_byte_range_is_rejected() {
        let err = VmConfig::from_lookup(lookup(&[(EOF_ENV, "256")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidEnv {
                var: EOF_ENV,
                value: "256".into()
            }
        );
    }

    #[test]
    fn zero_tape_size_is_rejected() {
        let err = VmConfig::from_lookup(lookup(&[(TAPE_SIZE_ENV, "0")])).unwrap_err();
        assert_eq!(err, ConfigError::ZeroTapeSize);
    }
}
