use std::sync::LazyLock;

use nutype::nutype;
use regex::Regex;

pub static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

#[nutype(
    sanitize(trim),
    validate(len_char_max = 256, regex = EMAIL_REGEX),
    derive(Debug, Clone, PartialEq, Eq, Hash, Deref, Display, TryFrom, Serialize, Deserialize)
)]
pub struct EmailAddress(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid() {
        let email = EmailAddress::try_new(" max.mustermann@example.de ").unwrap();
        assert_eq!(*email, "max.mustermann@example.de");
    }

    #[test]
    fn invalid() {
        for input in ["", "max", "max@", "@example.de", "max@example", "max mustermann@example.de"] {
            assert!(EmailAddress::try_new(input).is_err(), "{input:?} was accepted");
        }
    }

    #[test]
    fn too_long() {
        let input = format!("{}@example.de", "a".repeat(256));
        assert!(EmailAddress::try_new(input).is_err());
    }
}
