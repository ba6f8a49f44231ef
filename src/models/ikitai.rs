use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::time_slot::TimeSlot;

/// A friend currently marked "ikitai", as returned by the directory endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IkitaiFriend {
    pub user_id: String,
    pub user_name: String,
    pub user_icon_url: String,
    pub time_slot: TimeSlot,
    pub municipality: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFlag {
    On,
    Off,
}

/// Body of the status endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub status: StatusFlag,
    pub time_slot: Option<TimeSlot>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl StatusUpdate {
    /// Opt in for `slot`, optionally with a fresh location fix.
    pub fn on(slot: TimeSlot, at: Option<Coordinates>) -> Self {
        Self {
            status: StatusFlag::On,
            time_slot: Some(slot),
            latitude: at.map(|c| c.latitude),
            longitude: at.map(|c| c.longitude),
        }
    }

    /// Opt out. Never carries a location or a time slot.
    pub fn off() -> Self {
        Self {
            status: StatusFlag::Off,
            time_slot: None,
            latitude: None,
            longitude: None,
        }
    }

    pub fn has_location(&self) -> bool {
        self.latitude.is_some() || self.longitude.is_some()
    }
}

/// The server's record of the local user's own status.
///
/// The backend model keeps only the position and the expiry, in snake_case;
/// the slot is present only when the server echoes it back.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnStatus {
    #[serde(default, alias = "time_slot")]
    pub time_slot: Option<TimeSlot>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default, alias = "expires_at")]
    pub expires_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn friend_uses_camel_case_fields() {
        let raw = r#"{"userId":"1","userName":"鈴木","userIconUrl":"icon_url","timeSlot":"lunch","municipality":"渋谷区"}"#;
        let f: IkitaiFriend = serde_json::from_str(raw).unwrap();
        assert_eq!(f.user_id, "1");
        assert_eq!(f.time_slot, TimeSlot::Lunch);
        assert_eq!(f.municipality, "渋谷区");
    }

    #[test]
    fn off_update_serializes_nulls() {
        let v = serde_json::to_value(StatusUpdate::off()).unwrap();
        assert_eq!(v["status"], "off");
        assert!(v["timeSlot"].is_null());
        assert!(v["latitude"].is_null());
        assert!(v["longitude"].is_null());
    }

    #[test]
    fn own_status_reads_backend_record_without_slot() {
        let raw = r#"{"id":1,"latitude":35.6,"longitude":139.7,"expires_at":"2025-10-03T14:00:00Z","created_at":"2025-10-03T13:00:00Z"}"#;
        let own: OwnStatus = serde_json::from_str(raw).unwrap();
        assert_eq!(own.time_slot, None);
        assert_eq!(own.latitude, Some(35.6));
        assert_eq!(
            own.expires_at.map(|t| t.to_rfc3339()),
            Some("2025-10-03T14:00:00+00:00".to_string())
        );
    }

    #[test]
    fn own_status_reads_camel_case_with_slot() {
        let raw = r#"{"timeSlot":"lunch","expiresAt":"2025-10-03T14:00:00Z"}"#;
        let own: OwnStatus = serde_json::from_str(raw).unwrap();
        assert_eq!(own.time_slot, Some(TimeSlot::Lunch));
        assert!(own.expires_at.is_some());
        assert_eq!(own.latitude, None);

        let mixed = r#"{"timeSlot":"night","expires_at":"2025-10-03T22:00:00Z"}"#;
        let own: OwnStatus = serde_json::from_str(mixed).unwrap();
        assert_eq!(own.time_slot, Some(TimeSlot::Night));
        assert!(own.expires_at.is_some());
    }

    #[test]
    fn on_update_carries_slot_and_location() {
        let at = Coordinates {
            latitude: 35.66,
            longitude: 139.70,
        };
        let v = serde_json::to_value(StatusUpdate::on(TimeSlot::Night, Some(at))).unwrap();
        assert_eq!(v["status"], "on");
        assert_eq!(v["timeSlot"], "night");
        assert_eq!(v["latitude"], 35.66);
    }
}
