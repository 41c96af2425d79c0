use std::fmt;

use serde::Serialize;

use crate::form::ProductName;

pub const DEFAULT_TITLE: &str = "Feedback";

/// Value of a query parameter. Repeated parameters form a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Single(String),
    List(Vec<QueryValue>),
}

impl QueryValue {
    /// Collect all values of one parameter. Returns `None` if it is absent.
    pub fn from_values(values: impl IntoIterator<Item = String>) -> Option<Self> {
        let mut values = values.into_iter().map(Self::Single).collect::<Vec<_>>();
        match values.len() {
            0 => None,
            1 => values.pop(),
            _ => Some(Self::List(values)),
        }
    }
}

/// Reduce a query value to a single string. Lists use their first element,
/// anything else that is not a string becomes empty.
pub fn query_value_as_str(value: Option<&QueryValue>) -> &str {
    match value {
        Some(QueryValue::Single(value)) => value,
        Some(QueryValue::List(values)) => query_value_as_str(values.first()),
        None => "",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PageTitle(String);

impl PageTitle {
    pub fn for_product(product: &str) -> Self {
        match product.trim() {
            "" => Self(DEFAULT_TITLE.into()),
            product => Self(format!("{DEFAULT_TITLE} for {product}")),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Everything the page shell derives from the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackPage {
    pub title: PageTitle,
    /// Trimmed and clamped `product` parameter, passed back with the
    /// submission.
    pub product: String,
}

impl FeedbackPage {
    pub fn from_query(product: Option<&QueryValue>) -> Self {
        let product = ProductName::clamp(query_value_as_str(product));
        Self {
            title: PageTitle::for_product(product),
            product: product.into(),
        }
    }

    /// Contextual tag sent along with the submission, if there is one.
    pub fn product_name(&self) -> Option<ProductName> {
        ProductName::try_new(self.product.as_str()).ok()
    }
}
