//! Runtime configuration from the environment.

use thiserror::Error;

/// Environment variable holding the Telegram bot token.
pub const BOT_TOKEN_VAR: &str = "BOT_TOKEN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BOT_TOKEN environment variable is not set")]
    MissingToken,
    #[error("BOT_TOKEN environment variable is empty")]
    EmptyToken,
}

/// Read the bot token from the environment.
///
/// The process fails fast before serving any traffic if it is absent.
pub fn bot_token_from_env() -> Result<String, ConfigError> {
    match std::env::var(BOT_TOKEN_VAR) {
        Ok(token) if token.trim().is_empty() => Err(ConfigError::EmptyToken),
        Ok(token) => Ok(token),
        Err(_) => Err(ConfigError::MissingToken),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bot_token_from_env() {
        std::env::set_var(BOT_TOKEN_VAR, "");
        assert!(matches!(bot_token_from_env(), Err(ConfigError::EmptyToken)));

        std::env::set_var(BOT_TOKEN_VAR, "123456:token");
        assert_eq!(bot_token_from_env().unwrap(), "123456:token");

        std::env::remove_var(BOT_TOKEN_VAR);
        assert!(matches!(
            bot_token_from_env(),
            Err(ConfigError::MissingToken)
        ));
    }
}
