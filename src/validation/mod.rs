use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

pub const MSG_ALL_REQUIRED: &str = "Toate câmpurile sunt obligatorii!";
pub const MSG_LOGIN_REQUIRED: &str = "Email și parola sunt obligatorii!";
pub const MSG_BOOKING_REQUIRED: &str = "Profesorul și data sunt obligatorii!";
pub const MSG_NAME_TOO_SHORT: &str =
    "Numele și prenumele trebuie să aibă cel puțin 2 caractere!";
pub const MSG_INVALID_EMAIL: &str = "Adresa de email nu este validă!";
pub const MSG_PASSWORD_TOO_SHORT: &str = "Parola trebuie să aibă cel puțin 6 caractere!";
pub const MSG_PASSWORD_MISMATCH: &str = "Parolele nu se potrivesc!";

pub const MIN_NAME_CHARS: usize = 2;
pub const MIN_PASSWORD_CHARS: usize = 6;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

pub type FormValidationResult = Result<(), ValidationError>;

#[derive(Clone, Debug)]
pub enum Rule<'a> {
    Required {
        values: Vec<&'a str>,
        message: &'static str,
    },
    MinChars {
        values: Vec<&'a str>,
        min: usize,
        message: &'static str,
    },
    Email {
        value: &'a str,
        message: &'static str,
    },
    Equal {
        left: &'a str,
        right: &'a str,
        message: &'static str,
    },
}

impl Rule<'_> {
    fn check(&self) -> FormValidationResult {
        let ok = match self {
            Rule::Required { values, .. } => values.iter().all(|v| !v.is_empty()),
            Rule::MinChars { values, min, .. } => values.iter().all(|v| v.chars().count() >= *min),
            Rule::Email { value, .. } => is_valid_email(value),
            Rule::Equal { left, right, .. } => left == right,
        };
        if ok {
            Ok(())
        } else {
            Err(ValidationError::new(self.message()))
        }
    }

    fn message(&self) -> &'static str {
        match self {
            Rule::Required { message, .. }
            | Rule::MinChars { message, .. }
            | Rule::Email { message, .. }
            | Rule::Equal { message, .. } => *message,
        }
    }
}

/// Runs rules in order and stops at the first failure.
pub fn validate(rules: &[Rule<'_>]) -> FormValidationResult {
    rules.iter().try_for_each(Rule::check)
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .unwrap_or_else(|e| panic!("email pattern does not compile: {e}"))
    })
}

pub fn is_valid_email(value: &str) -> bool {
    email_regex().is_match(value)
}

pub fn validate_login(email: &str, password: &str) -> FormValidationResult {
    validate(&[
        Rule::Required {
            values: vec![email, password],
            message: MSG_LOGIN_REQUIRED,
        },
        Rule::Email {
            value: email,
            message: MSG_INVALID_EMAIL,
        },
    ])
}

pub fn validate_registration(
    first_name: &str,
    last_name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> FormValidationResult {
    validate(&[
        Rule::Required {
            values: vec![first_name, last_name, email, password, confirm_password],
            message: MSG_ALL_REQUIRED,
        },
        Rule::MinChars {
            values: vec![first_name, last_name],
            min: MIN_NAME_CHARS,
            message: MSG_NAME_TOO_SHORT,
        },
        Rule::Email {
            value: email,
            message: MSG_INVALID_EMAIL,
        },
        Rule::MinChars {
            values: vec![password],
            min: MIN_PASSWORD_CHARS,
            message: MSG_PASSWORD_TOO_SHORT,
        },
        Rule::Equal {
            left: password,
            right: confirm_password,
            message: MSG_PASSWORD_MISMATCH,
        },
    ])
}

pub fn validate_booking(professor_id: &str, meeting_date: &str) -> FormValidationResult {
    validate(&[Rule::Required {
        values: vec![professor_id, meeting_date],
        message: MSG_BOOKING_REQUIRED,
    }])
}

/// Leading-digit integer parse: `"12abc"` is 12, `"abc"` is nothing.
pub fn parse_leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}
