use std::collections::BTreeMap;

use nutype::nutype;
use serde::{Deserialize, Serialize};

use crate::email_address::EmailAddress;

/// Name of the hidden input that only bots fill in.
pub const HONEYPOT_FIELD: &str = "bot-field";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FeedbackField {
    Name,
    Email,
    Message,
}

impl FeedbackField {
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }

    /// Label shown next to the input and used as prefix for its validation
    /// messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Message => "Message",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

/// Raw values as entered into the form, before any checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackFormValues {
    pub name: String,
    pub email: String,
    pub message: String,
    pub product: String,
    pub honeypot: Option<String>,
}

/// A submission that passed the form constraints and can be handed to a
/// form backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackSubmission {
    pub name: Option<FeedbackAuthorName>,
    pub email: EmailAddress,
    pub message: FeedbackMessage,
    pub product: Option<ProductName>,
    pub honeypot: Option<String>,
}

#[nutype(
    sanitize(trim),
    validate(len_char_max = 256),
    derive(Debug, Clone, PartialEq, Eq, Deref, Display, TryFrom, Serialize, Deserialize)
)]
pub struct FeedbackAuthorName(String);

impl FeedbackAuthorName {
    pub const MAX_LEN: usize = 256;
}

#[nutype(
    validate(len_char_min = 20, len_char_max = 4096),
    derive(Debug, Clone, PartialEq, Eq, Deref, Display, TryFrom, Serialize, Deserialize)
)]
pub struct FeedbackMessage(String);

impl FeedbackMessage {
    pub const MIN_LEN: usize = 20;
    pub const MAX_LEN: usize = 4096;
}

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 256),
    derive(Debug, Clone, PartialEq, Eq, Deref, Display, TryFrom, Serialize, Deserialize)
)]
pub struct ProductName(String);

impl ProductName {
    pub const MAX_LEN: usize = 256;

    /// Trim `product` and cut it to [`Self::MAX_LEN`] characters, so that
    /// the page title and the tag sent to the form backend agree.
    pub fn clamp(product: &str) -> &str {
        let product = product.trim();
        match product.char_indices().nth(Self::MAX_LEN) {
            Some((end, _)) => product[..end].trim_end(),
            None => product,
        }
    }
}

/// Validation messages keyed by field name, in the order they were reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }
}

impl<F: Into<String>, M: Into<String>> FromIterator<(F, M)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (F, M)>>(iter: I) -> Self {
        let mut errors = Self::default();
        for (field, message) in iter {
            errors.push(field, message);
        }
        errors
    }
}
