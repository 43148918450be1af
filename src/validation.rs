use lazy_static::lazy_static;
use regex::Regex;
use std::error::Error;
use std::fmt;

lazy_static! {
    // Alphanumeric groups joined by `.`, `-`, or `_`, then a domain with at least one TLD of 2+ letters
    static ref EMAIL_RE: Regex =
        Regex::new(r"^([A-Za-z0-9]+[._-])*[A-Za-z0-9]+@[A-Za-z0-9-]+(\.[A-Za-z]{2,})+$").unwrap();
}

/// Which address of a message failed validation
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    Sender,
    Receiver,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::Sender => "sender",
            Self::Receiver => "receiver",
        })
    }
}

#[derive(Debug, Eq, PartialEq)]
pub enum ValidationError {
    InvalidEmail { side: Side, address: String },
    FieldTooLong { field: &'static str, max: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidEmail { side, address } => {
                write!(f, "Invalid email address for {side}: {address}")
            }
            Self::FieldTooLong { field, max } => {
                write!(f, "Field {field} is longer than {max} characters")
            }
        }
    }
}

impl Error for ValidationError {}

/// Check that an address looks like an email address
/// This is only a syntax check, the address may still not exist.
pub fn validate_email(address: &str, side: Side) -> Result<(), ValidationError> {
    if EMAIL_RE.is_match(address) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail {
            side,
            address: address.to_owned(),
        })
    }
}

/// Check that a field fits in its column
pub fn validate_length(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        Err(ValidationError::FieldTooLong { field, max })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn test_valid_emails() {
        for address in [
            "c@example.org",
            "a.b@example.com",
            "first-last@example.co.uk",
            "under_score@mail-server.io",
            "A1.b2-c3_d4@Example.COM",
        ] {
            assert_eq!(validate_email(address, Side::Sender), Ok(()), "{address}");
        }
    }

    #[test]
    fn test_invalid_emails() {
        for address in [
            "",
            "plain",
            "@example.com",
            "user@",
            "user@example",
            "user@example.c",
            "user@example.c0m",
            ".user@example.com",
            "user.@example.com",
            "us..er@example.com",
            "us er@example.com",
            "user@@example.com",
            "user@example.com trailing",
            "user@.com",
        ] {
            assert!(validate_email(address, Side::Sender).is_err(), "{address}");
        }
    }

    #[test]
    fn test_invalid_email_names_side() {
        assert_matches!(
            validate_email("nope", Side::Receiver),
            Err(ValidationError::InvalidEmail { side: Side::Receiver, address }) => {
                assert_eq!(address, "nope");
            }
        );
        assert_eq!(
            validate_email("nope", Side::Sender)
                .unwrap_err()
                .to_string(),
            "Invalid email address for sender: nope"
        );
    }

    #[test]
    fn test_length() {
        assert_eq!(validate_length("subject", "hello", 5), Ok(()));
        assert_eq!(validate_length("subject", "", 0), Ok(()));
        // Counted in characters, not bytes
        assert_eq!(validate_length("subject", "héllo", 5), Ok(()));
        assert_eq!(
            validate_length("message", "hello!", 5),
            Err(ValidationError::FieldTooLong {
                field: "message",
                max: 5
            })
        );
    }
}
