use serde::Serialize;

use crate::{
    error::{ApiError, ApiResult},
    payload::{take_string, Payload},
};

/// Body of `POST /api/register` and `DELETE /api/register`.
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    pub email: String,
    pub session_id: String,
}

impl TryFrom<Payload> for RegistrationRequest {
    type Error = ApiError;

    fn try_from(mut payload: Payload) -> ApiResult<Self> {
        let email = take_string(&mut payload, "email")?;
        let session_id = take_string(&mut payload, "session_id")?;
        match (email, session_id) {
            (Some(email), Some(session_id)) => Ok(Self { email, session_id }),
            _ => Err(ApiError::validation("Email and session_id are required")),
        }
    }
}

pub const ALREADY_REGISTERED: &str = "Already registered for this session";
pub const NOT_REGISTERED: &str = "Not registered for this session";

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RegisterResponse {
    Registered { registered: bool, session_id: String },
    Unchanged { message: &'static str },
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum UnregisterResponse {
    Unregistered { unregistered: bool, session_id: String },
    Unchanged { message: &'static str },
}
