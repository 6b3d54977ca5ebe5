//! Request and response models for the cafe API

use serde::{Deserialize, Deserializer, Serialize};

/// Maximum length for short text columns (name, location, seats, price)
pub const SHORT_TEXT_MAX: usize = 250;
/// Maximum length for URL columns
pub const URL_MAX: usize = 500;

// ============================================================================
// Cafe
// ============================================================================

/// A cafe record as stored in the `cafe` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cafe {
    pub id: i64,
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    /// Free-text seat count, e.g. "10-20"
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: Option<String>,
}

/// Form payload for POST /add
///
/// The amenity flags use explicit parsing: "true", "1", "yes" or "on"
/// (case-insensitive) count as true, anything else (including the literal
/// string "false") counts as false. A missing flag is false.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCafe {
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    #[serde(default)]
    pub coffee_price: Option<String>,
    // The legacy form field for sockets is named "sockets", not "has_sockets"
    #[serde(default, rename = "sockets", deserialize_with = "de_flag")]
    pub has_sockets: bool,
    #[serde(default, deserialize_with = "de_flag")]
    pub has_toilet: bool,
    #[serde(default, deserialize_with = "de_flag")]
    pub has_wifi: bool,
    #[serde(default, deserialize_with = "de_flag")]
    pub can_take_calls: bool,
}

impl NewCafe {
    /// Validate required fields and column length limits.
    ///
    /// Returns the first violation as a human-readable message.
    pub fn validate(&self) -> Result<(), String> {
        let required = [
            ("name", &self.name, SHORT_TEXT_MAX),
            ("map_url", &self.map_url, URL_MAX),
            ("img_url", &self.img_url, URL_MAX),
            ("location", &self.location, SHORT_TEXT_MAX),
            ("seats", &self.seats, SHORT_TEXT_MAX),
        ];

        for (field, value, max) in required {
            if value.is_empty() {
                return Err(format!("Field '{}' cannot be empty", field));
            }
            if value.chars().count() > max {
                return Err(format!("Field '{}' exceeds {} characters", field, max));
            }
        }

        if let Some(price) = &self.coffee_price {
            if price.chars().count() > SHORT_TEXT_MAX {
                return Err(format!(
                    "Field 'coffee_price' exceeds {} characters",
                    SHORT_TEXT_MAX
                ));
            }
        }

        Ok(())
    }

    /// Coffee price with empty form values collapsed to NULL
    pub fn coffee_price(&self) -> Option<&str> {
        self.coffee_price.as_deref().filter(|p| !p.is_empty())
    }
}

/// Parse a form flag value into a boolean
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

fn de_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(parse_flag(&value))
}

// ============================================================================
// Query parameters
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    /// Location to match exactly (case-sensitive)
    pub loc: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePriceParams {
    pub new_price: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportClosedParams {
    pub api_key: Option<String>,
}

// ============================================================================
// Response wrappers
// ============================================================================

/// `{"cafe": {..}}` - single record wrapper used by /random and /search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CafeResponse {
    pub cafe: Cafe,
}

/// `{"cafe": [..]}` - list wrapper used by /all
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CafeListResponse {
    pub cafe: Vec<Cafe>,
}

/// `{"success": ".."}` - used by /update-price and /report-closed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessMessage {
    pub success: String,
}

/// `{"response": {"success": ".."}}` - used by /add
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddedResponse {
    pub response: SuccessMessage,
}

// ============================================================================
// Health check
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub database: DatabaseHealth,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseHealth {
    pub connected: bool,
    pub path: String,
    pub size_bytes: Option<u64>,
}
