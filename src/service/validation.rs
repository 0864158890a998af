//! Input validation for request payloads.

use crate::error::AppError;
use crate::model::{CourseInput, StudentInput, TeacherInput};
use regex::Regex;

pub const MAX_TEXT_LENGTH: usize = 255;
pub const MIN_CREDITS: i32 = 0;
pub const MAX_CREDITS: i32 = 60;

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

/// Payloads that can check themselves before persistence.
pub trait Validate {
    fn validate(&self) -> Result<(), AppError>;
}

pub struct RequestValidator;

impl RequestValidator {
    /// Non-blank and at most `MAX_TEXT_LENGTH` characters.
    pub fn require_text(field: &str, value: &str) -> Result<(), AppError> {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("{} is required", field)));
        }
        if value.chars().count() > MAX_TEXT_LENGTH {
            return Err(AppError::Validation(format!(
                "{} must be at most {} characters",
                field, MAX_TEXT_LENGTH
            )));
        }
        Ok(())
    }

    pub fn require_email(field: &str, value: &str) -> Result<(), AppError> {
        Self::require_text(field, value)?;
        let re = Regex::new(EMAIL_PATTERN)
            .map_err(|_| AppError::Validation(format!("invalid pattern for {}", field)))?;
        if !re.is_match(value) {
            return Err(AppError::Validation(format!("{} must be a valid email", field)));
        }
        Ok(())
    }

    pub fn require_number(field: &str, value: Option<i32>) -> Result<i32, AppError> {
        value.ok_or_else(|| AppError::Validation(format!("{} is required", field)))
    }

    pub fn require_range(field: &str, value: i32, min: i32, max: i32) -> Result<(), AppError> {
        if value < min || value > max {
            return Err(AppError::Validation(format!(
                "{} must be between {} and {}",
                field, min, max
            )));
        }
        Ok(())
    }
}

impl Validate for TeacherInput {
    fn validate(&self) -> Result<(), AppError> {
        RequestValidator::require_text("name", &self.name)?;
        RequestValidator::require_email("email", &self.email)?;
        RequestValidator::require_text("department", &self.department)
    }
}

impl Validate for StudentInput {
    fn validate(&self) -> Result<(), AppError> {
        RequestValidator::require_text("name", &self.name)?;
        RequestValidator::require_email("email", &self.email)?;
        RequestValidator::require_text("studentId", &self.student_id)
    }
}

impl Validate for CourseInput {
    fn validate(&self) -> Result<(), AppError> {
        RequestValidator::require_text("title", &self.title)?;
        RequestValidator::require_text("courseCode", &self.course_code)?;
        let credits = RequestValidator::require_number("credits", self.credits)?;
        RequestValidator::require_range("credits", credits, MIN_CREDITS, MAX_CREDITS)
    }
}
