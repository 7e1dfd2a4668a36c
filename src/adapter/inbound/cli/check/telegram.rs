use std::path::Path;

use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::telegram::ChatTransport;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::credentials::{mask_token, resolve_telegram_token};
use serde_json::json;

const TEST_MESSAGE: &str = "rentwatch test message\nalerts will arrive in this chat";

/// Send the test message through `transport` to the operator chat.
///
/// # Errors
/// Returns [`ConfigError::MissingField`] if no operator chat is configured,
/// or the transport's error if delivery fails.
pub async fn send_test_message(config: &Config, transport: &dyn ChatTransport) -> Result<i64> {
    let chat_id = config
        .telegram
        .operator_chat_id
        .ok_or(ConfigError::MissingField {
            field: "telegram.operator_chat_id",
        })?;
    transport.send(chat_id, TEST_MESSAGE, false).await?;
    Ok(chat_id)
}

#[cfg(feature = "telegram")]
fn transport(token: &str) -> Result<Box<dyn ChatTransport>> {
    use crate::adapter::outbound::telegram::BotTransport;

    Ok(Box::new(BotTransport::new(token)))
}

#[cfg(not(feature = "telegram"))]
fn transport(_token: &str) -> Result<Box<dyn ChatTransport>> {
    Err(ConfigError::Other("rentwatch was built without Telegram support".to_string()).into())
}

/// Test Telegram delivery by sending a message to the operator chat.
pub async fn execute_telegram<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let config = Config::load(config_path.as_ref())?;
    let token = resolve_telegram_token(Path::new(&config.telegram.token_file))?;
    let masked = mask_token(&token);

    if !output::is_json() {
        output::section("Telegram Check");
        output::action("Sending", "Telegram test message");
    }

    let transport = transport(&token)?;
    let chat_id = send_test_message(&config, transport.as_ref()).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "check.telegram",
            "masked_token": masked,
            "chat_id": chat_id,
            "status": "sent",
        }));
        return Ok(());
    }

    output::field("Bot token", masked);
    output::field("Chat ID", chat_id);
    output::action_done("Sent", "Telegram test message");
    output::hint("check Telegram for the message");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::testkit::chat::RecordingTransport;
    use crate::testkit::config::{config, telegram};

    #[tokio::test]
    async fn sends_to_operator_chat() {
        let mut cfg = config();
        cfg.telegram = telegram();
        let transport = RecordingTransport::new();

        let chat_id = send_test_message(&cfg, &transport).await.unwrap();

        assert_eq!(chat_id, 7);
        let sent = transport.messages();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].chat_id, 7);
        assert!(sent[0].text.starts_with("rentwatch test message"));
    }

    #[tokio::test]
    async fn missing_operator_chat_is_config_error() {
        let transport = RecordingTransport::new();

        let err = send_test_message(&config(), &transport).await.unwrap_err();

        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingField {
                field: "telegram.operator_chat_id"
            })
        ));
        assert!(transport.is_empty());
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let mut cfg = config();
        cfg.telegram = telegram();
        let transport = RecordingTransport::new();
        transport.fail_on(TEST_MESSAGE);

        assert!(send_test_message(&cfg, &transport).await.is_err());
    }
}
