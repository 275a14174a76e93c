//! Named-entity labels produced by recognizers

use serde::{Deserialize, Serialize};

/// Label assigned to a recognized entity mention
///
/// Serialized names follow the conventional NER tag set (`PERSON`, `ORG`,
/// `GPE`, ...) so label lists in configuration read the same as recognizer
/// output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityLabel {
    /// Person name
    Person,
    /// Organization or company
    Org,
    /// Geopolitical entity (country, city, state)
    Gpe,
    /// Monetary amount
    Money,
    /// Payment card number
    CreditCard,
    /// Social security number
    Ssn,
    /// Calendar date
    Date,
    /// Bare numeric quantity
    Quantity,
}

impl EntityLabel {
    /// Labels redacted by default
    pub const SENSITIVE: [EntityLabel; 6] = [
        EntityLabel::Person,
        EntityLabel::Org,
        EntityLabel::Gpe,
        EntityLabel::Money,
        EntityLabel::CreditCard,
        EntityLabel::Ssn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityLabel::Person => "PERSON",
            EntityLabel::Org => "ORG",
            EntityLabel::Gpe => "GPE",
            EntityLabel::Money => "MONEY",
            EntityLabel::CreditCard => "CREDIT_CARD",
            EntityLabel::Ssn => "SSN",
            EntityLabel::Date => "DATE",
            EntityLabel::Quantity => "QUANTITY",
        }
    }
}

impl std::fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
