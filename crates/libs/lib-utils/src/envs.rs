//! # Environment Variables
//!
//! Read and parse configuration from the process environment.

use std::env;
use std::str::FromStr;

/// Get a required environment variable by name.
pub fn get_env(name: &'static str) -> Result<String, Error> {
    env::var(name).map_err(|_| Error::MissingEnv(name))
}

/// Get an environment variable, falling back to `default` when it is unset.
pub fn get_env_or(name: &'static str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to `default` when it is unset.
///
/// A value that is present but does not parse is an error, not a fallback.
pub fn get_env_parse_or<T: FromStr>(name: &'static str, default: T) -> Result<T, Error> {
    match env::var(name) {
        Ok(val) => val.trim().parse::<T>().map_err(|_| Error::WrongFormat(name)),
        Err(_) => Ok(default),
    }
}

// region:    --- Error
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    MissingEnv(&'static str),
    WrongFormat(&'static str),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::MissingEnv(name) => write!(fmt, "{name} must be set in environment"),
            Error::WrongFormat(name) => write!(fmt, "{name} has an invalid value"),
        }
    }
}

impl std::error::Error for Error {}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_uses_default_when_unset() {
        let val: u64 = get_env_parse_or("LIB_UTILS_TEST_UNSET_VAR", 10).unwrap();
        assert_eq!(val, 10);
    }

    #[test]
    fn test_missing_env_names_variable() {
        let err = get_env("LIB_UTILS_TEST_UNSET_VAR").unwrap_err();
        assert_eq!(err, Error::MissingEnv("LIB_UTILS_TEST_UNSET_VAR"));
        assert_eq!(err.to_string(), "LIB_UTILS_TEST_UNSET_VAR must be set in environment");
    }
}
