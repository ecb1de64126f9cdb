use serde::Serialize;

use crate::{
    error::{ApiError, ApiResult},
    payload::{scalar_text, take_string, Payload},
};

/// Profile columns a client may write. Anything else in an upsert payload is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    FirstName,
    LastName,
    Phone,
    Institution,
    EducationLevel,
    MlExperience,
    Interests,
    Bio,
}

impl ProfileField {
    pub const ALL: [ProfileField; 8] = [
        ProfileField::FirstName,
        ProfileField::LastName,
        ProfileField::Phone,
        ProfileField::Institution,
        ProfileField::EducationLevel,
        ProfileField::MlExperience,
        ProfileField::Interests,
        ProfileField::Bio,
    ];

    pub fn column(self) -> &'static str {
        match self {
            ProfileField::FirstName => "first_name",
            ProfileField::LastName => "last_name",
            ProfileField::Phone => "phone",
            ProfileField::Institution => "institution",
            ProfileField::EducationLevel => "education_level",
            ProfileField::MlExperience => "ml_experience",
            ProfileField::Interests => "interests",
            ProfileField::Bio => "bio",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.column() == key)
    }
}

/// Decoded body of `POST /api/users`.
#[derive(Debug, Clone)]
pub struct UpsertUserRequest {
    pub email: String,
    pub fields: Vec<(ProfileField, Option<String>)>,
}

impl TryFrom<Payload> for UpsertUserRequest {
    type Error = ApiError;

    fn try_from(mut payload: Payload) -> ApiResult<Self> {
        let email = take_string(&mut payload, "email")?
            .ok_or_else(|| ApiError::validation("Email is required"))?;
        // server-generated; a client-supplied id is ignored
        payload.remove("id");

        let mut fields = Vec::with_capacity(payload.len());
        for (key, value) in payload {
            let field = ProfileField::from_key(&key)
                .ok_or_else(|| ApiError::validation(format!("Unknown field: {key}")))?;
            fields.push((field, scalar_text(&key, value)?));
        }
        Ok(Self { email, fields })
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum UpsertUserResponse {
    Created { id: String, created: bool },
    Updated { id: String, updated: bool },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::parse_object;

    fn decode(body: &str) -> ApiResult<UpsertUserRequest> {
        UpsertUserRequest::try_from(parse_object(body.as_bytes())?)
    }

    #[test]
    fn email_is_required() {
        let err = decode(r#"{"first_name":"A"}"#).unwrap_err();
        assert_eq!(err.to_string(), "Email is required");
        assert!(decode(r#"{"email":null}"#).is_err());
    }

    #[test]
    fn known_fields_are_mapped_and_id_dropped() {
        let req = decode(r#"{"email":"a@x.com","id":"forged","bio":"hi","phone":5551234}"#)
            .unwrap();
        assert_eq!(req.email, "a@x.com");
        assert!(req
            .fields
            .contains(&(ProfileField::Bio, Some("hi".to_string()))));
        assert!(req
            .fields
            .contains(&(ProfileField::Phone, Some("5551234".to_string()))));
        assert_eq!(req.fields.len(), 2);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = decode(r#"{"email":"a@x.com","is_admin":true}"#).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(err.to_string(), "Unknown field: is_admin");
    }

    #[test]
    fn column_names_round_trip() {
        for field in ProfileField::ALL {
            assert_eq!(ProfileField::from_key(field.column()), Some(field));
        }
        assert_eq!(ProfileField::from_key("created_at"), None);
    }

    #[test]
    fn response_shapes() {
        let created = serde_json::to_value(UpsertUserResponse::Created {
            id: "u1".into(),
            created: true,
        })
        .unwrap();
        assert_eq!(created, serde_json::json!({"id": "u1", "created": true}));

        let updated = serde_json::to_value(UpsertUserResponse::Updated {
            id: "u1".into(),
            updated: true,
        })
        .unwrap();
        assert_eq!(updated, serde_json::json!({"id": "u1", "updated": true}));
    }
}
