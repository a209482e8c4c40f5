use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error as ThisError;

/// URI stored for members without a profile picture.
pub const PROFILE_PICTURE_PLACEHOLDER: &str = "placeholder://profile";

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MemberFilter {
    pub id: Option<u32>,
    pub member_number: Option<u32>,
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Member {
    pub id: u32,
    pub name: String,
    /// Unique among stored members once assigned.
    /// Zero means no number has been assigned yet.
    pub member_number: u32,
    pub email: String,
    pub phone_number: String,
    pub occupation: String,
    pub country: String,
    pub address: String,
    pub zip_code: String,
    pub birth_date: Option<NaiveDate>,
    pub added_date: NaiveDate,
    /// Date of the last membership payment. Only set together
    /// with the paid-through year.
    pub paid_date: Option<NaiveDate>,
    /// Year the membership is paid through. None means unpaid.
    pub end_date: Option<i32>,
    pub profile_picture: String,
}

impl Default for Member {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            member_number: 0,
            email: String::new(),
            phone_number: String::new(),
            occupation: String::new(),
            country: String::new(),
            address: String::new(),
            zip_code: String::new(),
            birth_date: None,
            added_date: NaiveDate::default(),
            paid_date: None,
            end_date: None,
            profile_picture: PROFILE_PICTURE_PLACEHOLDER.to_string(),
        }
    }
}

/// Validation errors reported before a record is written.
#[derive(ThisError, Debug)]
pub enum ValidationError {
    #[error("member name must not be empty")]
    MissingName,
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
}

impl Member {
    pub fn has_number(&self) -> bool {
        self.member_number > 0
    }

    /// Check whether the membership is paid through the given year.
    pub fn is_paid_for(&self, year: i32) -> bool {
        match self.end_date {
            Some(end) => end >= year,
            None => false,
        }
    }

    /// Validate the record. An empty email is allowed, a present
    /// one has to look like an address.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        if !self.email.is_empty() && !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail(self.email.clone()));
        }
        Ok(())
    }
}

/// Minimal local@domain.tld shape check.
pub fn is_valid_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("eris@discordia.club"));
        assert!(is_valid_email("a.b@mail.example.org"));

        assert!(!is_valid_email("no-at-sign.example.org"));
        assert!(!is_valid_email("@example.org"));
        assert!(!is_valid_email("eris@discordia"));
        assert!(!is_valid_email("eris@.tld"));
        assert!(!is_valid_email("eris @discordia.club"));
    }

    #[test]
    fn test_validate() {
        let member = Member {
            name: "Test Member".to_string(),
            email: "mail@test-member.club".to_string(),
            ..Default::default()
        };
        assert!(member.validate().is_ok());

        let member = Member {
            name: "   ".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            member.validate(),
            Err(ValidationError::MissingName)
        ));

        let member = Member {
            name: "Test Member".to_string(),
            email: "not an address".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            member.validate(),
            Err(ValidationError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_is_paid_for() {
        let member = Member {
            end_date: Some(2024),
            ..Default::default()
        };
        assert!(member.is_paid_for(2023));
        assert!(member.is_paid_for(2024));
        assert!(!member.is_paid_for(2025));

        let unpaid = Member::default();
        assert!(!unpaid.is_paid_for(2024));
    }
}
