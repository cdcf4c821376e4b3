use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidateEmail, ValidationError};

use crate::error::{UserError, UserResult};

const FIRST_NAME_REQUIRED: &str = "First name must not be empty.";
const LAST_NAME_REQUIRED: &str = "Last name must not be empty.";
const EMAIL_REQUIRED: &str = "Email must not be empty.";
pub(crate) const BIRTH_DATE_REQUIRED: &str = "Birth date must not be empty.";

/// User record as held by the repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Identifier assigned by the repository
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Calendar date, serialized as `YYYY-MM-DD`
    pub birth_date: NaiveDate,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

/// Request body for creating or fully replacing a user.
///
/// Carries every field of [`User`] except `id`. Required fields are optional
/// here so that a missing key or an explicit `null` is reported by validation
/// with the field's own message rather than by the JSON parser.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    #[validate(
        required(message = "First name must not be empty."),
        custom(function = "not_blank", message = "First name must not be empty.")
    )]
    pub first_name: Option<String>,

    #[validate(
        required(message = "Last name must not be empty."),
        custom(function = "not_blank", message = "Last name must not be empty.")
    )]
    pub last_name: Option<String>,

    #[validate(
        required(message = "Email must not be empty."),
        custom(function = "email_address")
    )]
    pub email: Option<String>,

    #[validate(
        required(message = "Birth date must not be empty."),
        custom(
            function = "in_the_past",
            message = "Birth date must be earlier than current date."
        )
    )]
    pub birth_date: Option<NaiveDate>,

    pub address: Option<String>,
    pub phone_number: Option<String>,
}

impl UserPayload {
    /// Builds a full record carrying `id`.
    ///
    /// Fails with the field's message when a required field is absent.
    pub fn into_user(self, id: Uuid) -> UserResult<User> {
        Ok(User {
            id,
            first_name: present(self.first_name, FIRST_NAME_REQUIRED)?,
            last_name: present(self.last_name, LAST_NAME_REQUIRED)?,
            email: present(self.email, EMAIL_REQUIRED)?,
            birth_date: present(self.birth_date, BIRTH_DATE_REQUIRED)?,
            address: self.address,
            phone_number: self.phone_number,
        })
    }
}

fn present<T>(value: Option<T>, message: &str) -> UserResult<T> {
    value.ok_or_else(|| UserError::Validation(message.to_string()))
}

/// Query parameters for `PATCH /users/{id}`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RenameUser {
    #[validate(custom(function = "not_blank", message = "First name must not be empty."))]
    pub first_name: String,
    #[validate(custom(function = "not_blank", message = "Last name must not be empty."))]
    pub last_name: String,
}

/// Inclusive birth-date range for `GET /users/filter`
#[derive(Debug, Clone, Copy, Deserialize, Validate, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn email_address(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed(EMAIL_REQUIRED)));
    }
    if !value.validate_email() {
        return Err(ValidationError::new("email").with_message(Cow::Borrowed("Wrong email format")));
    }
    Ok(())
}

fn in_the_past(value: &NaiveDate) -> Result<(), ValidationError> {
    if *value >= Utc::now().date_naive() {
        return Err(ValidationError::new("past"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> UserPayload {
        UserPayload {
            first_name: Some("John".to_string()),
            last_name: Some("Doe".to_string()),
            email: Some("john.doe@example.com".to_string()),
            birth_date: NaiveDate::from_ymd_opt(2000, 11, 3),
            address: Some("Square".to_string()),
            phone_number: Some("12345678".to_string()),
        }
    }

    fn messages(payload: &UserPayload) -> Vec<String> {
        let errors = payload.validate().unwrap_err();
        let mut messages: Vec<String> = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter().filter_map(|e| e.message.as_ref().map(|m| m.to_string())))
            .collect();
        messages.sort();
        messages
    }

    #[test]
    fn test_valid_payload_passes() {
        assert!(payload().validate().is_ok());
    }

    #[test]
    fn test_blank_names_are_rejected() {
        let input = UserPayload {
            first_name: Some("   ".to_string()),
            last_name: Some(String::new()),
            ..payload()
        };

        assert_eq!(
            messages(&input),
            vec!["First name must not be empty.", "Last name must not be empty."]
        );
    }

    #[test]
    fn test_absent_names_are_rejected() {
        let input = UserPayload {
            first_name: None,
            last_name: None,
            ..payload()
        };

        assert_eq!(
            messages(&input),
            vec!["First name must not be empty.", "Last name must not be empty."]
        );
    }

    #[test]
    fn test_email_rules() {
        let absent = UserPayload {
            email: None,
            ..payload()
        };
        assert_eq!(messages(&absent), vec!["Email must not be empty."]);

        let blank = UserPayload {
            email: Some(String::new()),
            ..payload()
        };
        assert_eq!(messages(&blank), vec!["Email must not be empty."]);

        let malformed = UserPayload {
            email: Some("not-an-email".to_string()),
            ..payload()
        };
        assert_eq!(messages(&malformed), vec!["Wrong email format"]);
    }

    #[test]
    fn test_birth_date_rules() {
        let missing = UserPayload {
            birth_date: None,
            ..payload()
        };
        assert_eq!(messages(&missing), vec!["Birth date must not be empty."]);

        let today = UserPayload {
            birth_date: Some(Utc::now().date_naive()),
            ..payload()
        };
        assert_eq!(
            messages(&today),
            vec!["Birth date must be earlier than current date."]
        );
    }

    #[test]
    fn test_payload_accepts_missing_and_null_fields() {
        let input: UserPayload = serde_json::from_value(json!({
            "firstName": null,
            "lastName": "Doe",
            "birthDate": "2000-11-03",
            "phoneNumber": "12345678"
        }))
        .unwrap();

        assert!(input.first_name.is_none());
        assert!(input.email.is_none());
        assert_eq!(input.last_name.as_deref(), Some("Doe"));
        assert_eq!(input.birth_date, NaiveDate::from_ymd_opt(2000, 11, 3));
        assert_eq!(input.phone_number.as_deref(), Some("12345678"));
        assert!(input.address.is_none());

        assert_eq!(
            messages(&input),
            vec!["Email must not be empty.", "First name must not be empty."]
        );
    }

    #[test]
    fn test_into_user_requires_every_mandatory_field() {
        let id = Uuid::new_v4();
        let user = payload().into_user(id).unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.first_name, "John");
        assert_eq!(user.email, "john.doe@example.com");

        let err = UserPayload {
            birth_date: None,
            ..payload()
        }
        .into_user(id)
        .unwrap_err();
        assert!(matches!(err, UserError::Validation(msg) if msg == BIRTH_DATE_REQUIRED));

        let err = UserPayload {
            last_name: None,
            ..payload()
        }
        .into_user(id)
        .unwrap_err();
        assert!(matches!(err, UserError::Validation(msg) if msg == LAST_NAME_REQUIRED));
    }

    #[test]
    fn test_user_serializes_camel_case() {
        let user = payload().into_user(Uuid::nil()).unwrap();
        let value = serde_json::to_value(&user).unwrap();

        assert_eq!(value["firstName"], "John");
        assert_eq!(value["birthDate"], "2000-11-03");
        assert_eq!(value["phoneNumber"], "12345678");
        assert_eq!(value["id"], "00000000-0000-0000-0000-000000000000");
    }
}
