//! Wire shapes exchanged with the embedded login frame.

use serde::{Deserialize, Deserializer, Serialize, de};

const CLIENT_STRING: &str = "desktop-jupyter";

/// First message to the frame, sent once it has loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitMessage {
    event: &'static str,
    pub client_transaction_id: String,
    transaction_id: &'static str,
    release: &'static str,
    platform: &'static str,
    client_string: &'static str,
    #[serde(rename = "clientID")]
    client_id: &'static str,
    locale: &'static str,
    profile_tier: &'static str,
    show_create_account: bool,
    show_remember_me: bool,
    show_license_field: bool,
    license_no: &'static str,
    pub cached_username: String,
    cached_remember_me: bool,
}

impl InitMessage {
    pub fn new(client_transaction_id: impl Into<String>, cached_username: impl Into<String>) -> Self {
        Self {
            event: "init",
            client_transaction_id: client_transaction_id.into(),
            transaction_id: "",
            release: "",
            platform: "",
            client_string: CLIENT_STRING,
            client_id: "",
            locale: "",
            profile_tier: "",
            show_create_account: false,
            show_remember_me: false,
            show_license_field: false,
            license_no: "",
            cached_username: cached_username.into(),
            cached_remember_me: false,
        }
    }
}

/// Reply to the frame's nonce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadMessage {
    event: &'static str,
    pub client_transaction_id: String,
    pub transaction_id: String,
    release: &'static str,
    platform: &'static str,
    client_string: &'static str,
    client_id: &'static str,
    pub source_id: String,
    profile_tier: &'static str,
    show_create_account: bool,
    show_remember_me: bool,
    show_license_field: bool,
    entitlement_id: &'static str,
    show_privacy_policy: bool,
    contextual_text: &'static str,
    legal_text: &'static str,
    cached_identifier: &'static str,
    cached_remember_me: &'static str,
    token: &'static str,
    unauthorized: bool,
}

impl LoadMessage {
    pub fn new(
        client_transaction_id: impl Into<String>,
        transaction_id: impl Into<String>,
        source_id: impl Into<String>,
    ) -> Self {
        Self {
            event: "load",
            client_transaction_id: client_transaction_id.into(),
            transaction_id: transaction_id.into(),
            release: "",
            platform: "web",
            client_string: CLIENT_STRING,
            client_id: "",
            source_id: source_id.into(),
            profile_tier: "MINIMUM",
            show_create_account: false,
            show_remember_me: false,
            show_license_field: false,
            entitlement_id: "",
            show_privacy_policy: true,
            contextual_text: "",
            legal_text: "",
            cached_identifier: "",
            cached_remember_me: "",
            token: "",
            unauthorized: false,
        }
    }
}

/// Messages the frame sends to the page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum InboundMessage {
    #[serde(rename_all = "camelCase")]
    Nonce {
        #[serde(deserialize_with = "string_or_number")]
        client_transaction_id: String,
        #[serde(deserialize_with = "string_or_number")]
        transaction_id: String,
    },
    #[serde(rename_all = "camelCase")]
    Login {
        token: String,
        #[serde(default, deserialize_with = "string_or_number")]
        profile_id: String,
        #[serde(default)]
        email_address: String,
    },
    /// Any other event, like the frame resizing itself.
    #[serde(other)]
    Other,
}

/// Parses the JSON text of a frame message.
pub fn parse_inbound(data: &str) -> Result<InboundMessage, serde_json::Error> {
    serde_json::from_str(data)
}

/// Identifiers come back as numbers from some login builds.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!("expected a string or number, got {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_init_wire_shape() {
        let value = serde_json::to_value(InitMessage::new("12345", "user@example.com")).unwrap();
        assert_eq!(
            value,
            json!({
                "event": "init",
                "clientTransactionId": "12345",
                "transactionId": "",
                "release": "",
                "platform": "",
                "clientString": "desktop-jupyter",
                "clientID": "",
                "locale": "",
                "profileTier": "",
                "showCreateAccount": false,
                "showRememberMe": false,
                "showLicenseField": false,
                "licenseNo": "",
                "cachedUsername": "user@example.com",
                "cachedRememberMe": false
            })
        );
    }

    #[test]
    fn test_load_wire_shape() {
        let value = serde_json::to_value(LoadMessage::new("12345", "tx-9", "srcid")).unwrap();
        assert_eq!(
            value,
            json!({
                "event": "load",
                "clientTransactionId": "12345",
                "transactionId": "tx-9",
                "release": "",
                "platform": "web",
                "clientString": "desktop-jupyter",
                "clientId": "",
                "sourceId": "srcid",
                "profileTier": "MINIMUM",
                "showCreateAccount": false,
                "showRememberMe": false,
                "showLicenseField": false,
                "entitlementId": "",
                "showPrivacyPolicy": true,
                "contextualText": "",
                "legalText": "",
                "cachedIdentifier": "",
                "cachedRememberMe": "",
                "token": "",
                "unauthorized": false
            })
        );
    }

    #[test]
    fn test_parse_nonce() {
        let message = parse_inbound(r#"{"event":"nonce","clientTransactionId":"123","transactionId":"abc"}"#).unwrap();
        assert_eq!(
            message,
            InboundMessage::Nonce {
                client_transaction_id: "123".to_string(),
                transaction_id: "abc".to_string()
            }
        );
    }

    #[test]
    fn test_parse_nonce_with_numeric_ids() {
        let message = parse_inbound(r#"{"event":"nonce","clientTransactionId":123,"transactionId":456}"#).unwrap();
        assert_eq!(
            message,
            InboundMessage::Nonce {
                client_transaction_id: "123".to_string(),
                transaction_id: "456".to_string()
            }
        );
    }

    #[test]
    fn test_parse_login() {
        let message = parse_inbound(
            r#"{"event":"login","token":"t0k","profileId":"p1","emailAddress":"a@b.c","firstName":"A"}"#,
        )
        .unwrap();
        assert_eq!(
            message,
            InboundMessage::Login {
                token: "t0k".to_string(),
                profile_id: "p1".to_string(),
                email_address: "a@b.c".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_event_is_other() {
        assert_eq!(
            parse_inbound(r#"{"event":"resize","height":300}"#).unwrap(),
            InboundMessage::Other
        );
    }

    #[test]
    fn test_malformed_messages_fail_to_parse() {
        assert!(parse_inbound("not json").is_err());
        assert!(parse_inbound(r#"{"clientTransactionId":"1"}"#).is_err());
        assert!(parse_inbound(r#"{"event":"nonce","transactionId":"abc"}"#).is_err());
        assert!(parse_inbound(r#"{"event":"login","profileId":"p"}"#).is_err());
    }
}
