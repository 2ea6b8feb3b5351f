use serde::{Deserialize, Serialize};

/// Request body for both `/register` and `/login`. Fields are optional so
/// that a missing one is reported as a validation error, not a parse error.
#[derive(Debug, Default, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_deserialize_as_none() {
        let req: CredentialsRequest = serde_json::from_str(r#"{"username":"alice"}"#).unwrap();
        assert_eq!(req.username.as_deref(), Some("alice"));
        assert!(req.password.is_none());

        let req: CredentialsRequest =
            serde_json::from_str(r#"{"username":null,"password":"p"}"#).unwrap();
        assert!(req.username.is_none());
    }

    #[test]
    fn login_response_shape() {
        let json = serde_json::to_value(LoginResponse {
            message: "login ok".into(),
            token: "t".into(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"message": "login ok", "token": "t"}));
    }
}
