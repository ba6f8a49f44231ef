use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::{AppError, AppResult};

/// A visited shop, with the optional review details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RamenLog {
    pub id: i64,
    pub shop_name: String,
    pub user_name: String,
    #[serde(default)]
    pub ordered_item: Option<String>,
    #[serde(default)]
    pub noodle_hardness: Option<String>,
    #[serde(default)]
    pub toppings: Option<String>,
    #[serde(default, deserialize_with = "decimal_rating")]
    pub rating: Option<f64>,
    #[serde(default)]
    pub visited_at: Option<DateTime<Utc>>,
}

/// Payload for a new entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewRamenLog {
    pub shop_name: String,
    pub user_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordered_item: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub noodle_hardness: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toppings: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visited_at: Option<DateTime<Utc>>,
}

impl NewRamenLog {
    /// Check the constraints the server enforces on the model.
    pub fn validate(&self) -> AppResult<()> {
        if self.shop_name.trim().is_empty() {
            return Err(AppError::Validation("shop name must not be empty".into()));
        }
        if self.shop_name.chars().count() > 100 {
            return Err(AppError::Validation(
                "shop name is limited to 100 characters".into(),
            ));
        }
        if let Some(r) = self.rating {
            if !(0.0..=5.0).contains(&r) {
                return Err(AppError::Validation(format!(
                    "rating {r} is out of range (0.0 - 5.0)"
                )));
            }
            if ((r * 10.0).round() - r * 10.0).abs() > 1e-9 {
                return Err(AppError::Validation(format!(
                    "rating {r} has more than one decimal place"
                )));
            }
        }
        Ok(())
    }
}

/// DRF renders decimals as strings ("4.5"); accept both shapes.
fn decimal_rating<'de, D>(de: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(de)? {
        None => Ok(None),
        Some(Raw::Num(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
