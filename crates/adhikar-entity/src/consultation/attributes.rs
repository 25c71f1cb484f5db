//! Closed enumerations describing a consultation request.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Defines a snake_case string enum backed by a PostgreSQL enum type.
macro_rules! define_attribute {
    (
        $(#[$meta:meta])*
        $name:ident, $pg_type:literal, $label:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
        )]
        #[sqlx(type_name = $pg_type, rename_all = "snake_case")]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every accepted value, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Return the value as its wire string.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $text ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = adhikar_core::AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|value| value.as_str() == s)
                    .ok_or_else(|| {
                        let expected: Vec<&str> = Self::ALL.iter().map(Self::as_str).collect();
                        adhikar_core::AppError::validation(format!(
                            "Invalid {}: '{s}'. Expected one of: {}",
                            $label,
                            expected.join(", ")
                        ))
                    })
            }
        }
    };
}

define_attribute!(
    /// Area of law a consultation concerns.
    ConsultationCategory, "consultation_category", "category" {
        FamilyLaw => "family_law",
        PropertyDispute => "property_dispute",
        EmploymentIssue => "employment_issue",
        ConsumerComplaint => "consumer_complaint",
        CriminalMatter => "criminal_matter",
        CivilRights => "civil_rights",
        GovernmentServices => "government_services",
        Documentation => "documentation",
        #[default]
        Other => "other",
    }
);

define_attribute!(
    /// How soon the citizen needs an answer.
    UrgencyLevel, "urgency_level", "urgency level" {
        Low => "low",
        #[default]
        Medium => "medium",
        High => "high",
        Urgent => "urgent",
    }
);

define_attribute!(
    /// Channel the citizen prefers to be contacted on.
    ContactPreference, "contact_preference", "contact preference" {
        #[default]
        Email => "email",
        Phone => "phone",
        Both => "both",
    }
);

define_attribute!(
    /// Language the consultation should be answered in.
    ConsultationLanguage, "consultation_language", "language" {
        #[default]
        English => "english",
        Hindi => "hindi",
        Marathi => "marathi",
        Other => "other",
    }
);
