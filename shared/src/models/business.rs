//! Business and subscription models

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::DateRange;

/// Billing cadence of a subscription
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionType {
    #[serde(alias = "Anual", alias = "Annual")]
    Annual,
    #[serde(alias = "Mensual", alias = "Monthly")]
    Monthly,
}

impl SubscriptionType {
    pub const ALL: [SubscriptionType; 2] = [SubscriptionType::Annual, SubscriptionType::Monthly];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionType::Annual => "annual",
            SubscriptionType::Monthly => "monthly",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SubscriptionType::Annual => "Annual",
            SubscriptionType::Monthly => "Monthly",
        }
    }

    pub fn display_name_es(&self) -> &'static str {
        match self {
            SubscriptionType::Annual => "Anual",
            SubscriptionType::Monthly => "Mensual",
        }
    }
}

impl FromStr for SubscriptionType {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| {
                wanted.eq_ignore_ascii_case(t.as_str())
                    || wanted.eq_ignore_ascii_case(t.display_name_es())
            })
            .ok_or("Unknown subscription type")
    }
}

impl std::fmt::Display for SubscriptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Business categories offered by the registration form
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[serde(alias = "Comercio")]
    Trade,
    #[serde(alias = "Servicios")]
    Services,
    #[serde(alias = "Entretenimiento")]
    Entertainment,
    #[serde(alias = "Alojamiento")]
    Lodging,
    #[serde(alias = "Turismo")]
    Tourism,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Trade,
        Category::Services,
        Category::Entertainment,
        Category::Lodging,
        Category::Tourism,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Trade => "trade",
            Category::Services => "services",
            Category::Entertainment => "entertainment",
            Category::Lodging => "lodging",
            Category::Tourism => "tourism",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Trade => "Trade",
            Category::Services => "Services",
            Category::Entertainment => "Entertainment",
            Category::Lodging => "Lodging",
            Category::Tourism => "Tourism",
        }
    }

    pub fn display_name_es(&self) -> &'static str {
        match self {
            Category::Trade => "Comercio",
            Category::Services => "Servicios",
            Category::Entertainment => "Entretenimiento",
            Category::Lodging => "Alojamiento",
            Category::Tourism => "Turismo",
        }
    }
}

impl FromStr for Category {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| {
                wanted.eq_ignore_ascii_case(c.as_str())
                    || wanted.eq_ignore_ascii_case(c.display_name_es())
            })
            .ok_or("Unknown category")
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A registered business and its subscription
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Business {
    pub id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub amount_paid: Decimal,
    pub subscription_type: SubscriptionType,
    pub phone: String,
    /// Number of registrations under this name at insertion time, this one included
    pub subscription_count: u32,
    pub category: Category,
}

impl Business {
    pub fn period(&self) -> DateRange {
        DateRange {
            start: self.start_date,
            end: self.end_date,
        }
    }
}

/// Payload accepted by the store: a business without its generated fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewBusiness {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub amount_paid: Decimal,
    pub subscription_type: SubscriptionType,
    pub phone: String,
    pub category: Category,
}

impl NewBusiness {
    pub(crate) fn into_business(self, id: Uuid, subscription_count: u32) -> Business {
        Business {
            id,
            name: self.name,
            start_date: self.start_date,
            end_date: self.end_date,
            amount_paid: self.amount_paid,
            subscription_type: self.subscription_type,
            phone: self.phone,
            subscription_count,
            category: self.category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_type_from_str() {
        assert_eq!("annual".parse(), Ok(SubscriptionType::Annual));
        assert_eq!("Anual".parse(), Ok(SubscriptionType::Annual));
        assert_eq!(" MENSUAL ".parse(), Ok(SubscriptionType::Monthly));
        assert!("weekly".parse::<SubscriptionType>().is_err());
        assert!("".parse::<SubscriptionType>().is_err());
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("Comercio".parse(), Ok(Category::Trade));
        assert_eq!("lodging".parse(), Ok(Category::Lodging));
        assert_eq!("Turismo".parse(), Ok(Category::Tourism));
        assert!("Restaurantes".parse::<Category>().is_err());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Category::Entertainment.to_string(), "Entertainment");
        assert_eq!(Category::Services.display_name_es(), "Servicios");
        assert_eq!(SubscriptionType::Monthly.to_string(), "Monthly");
    }

    #[test]
    fn test_serde_uses_snake_case_and_accepts_spanish() {
        let json = serde_json::to_string(&Category::Trade).unwrap();
        assert_eq!(json, "\"trade\"");

        let parsed: SubscriptionType = serde_json::from_str("\"Mensual\"").unwrap();
        assert_eq!(parsed, SubscriptionType::Monthly);

        let parsed: Category = serde_json::from_str("\"Alojamiento\"").unwrap();
        assert_eq!(parsed, Category::Lodging);
    }
}
