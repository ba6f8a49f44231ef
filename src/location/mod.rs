//! Device location seam.
//!
//! A phone asks the OS for permission and then reads one position fix. On a
//! terminal the fix comes from the configuration file or the `--lat/--lon`
//! flags, and `location.allow: false` (or `--deny-location`) plays the part
//! of the user declining the permission prompt.

use tracing::debug;

use crate::config::LocationConfig;
use crate::errors::{AppError, AppResult};
use crate::models::ikitai::Coordinates;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

pub trait LocationProvider {
    /// Ask for foreground location access.
    fn request_permission(&self) -> AppResult<Permission>;

    /// Single-shot position read. Only valid after permission was granted.
    fn current_position(&self) -> AppResult<Coordinates>;
}

/// Location backed by configuration values.
#[derive(Debug, Clone)]
pub struct ConfiguredLocation {
    allow: bool,
    fix: Option<Coordinates>,
}

impl ConfiguredLocation {
    pub fn new(cfg: &LocationConfig) -> Self {
        let fix = match (cfg.latitude, cfg.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates {
                latitude,
                longitude,
            }),
            _ => None,
        };
        Self {
            allow: cfg.allow,
            fix,
        }
    }
}

impl LocationProvider for ConfiguredLocation {
    fn request_permission(&self) -> AppResult<Permission> {
        debug!(allow = self.allow, "location permission requested");
        Ok(if self.allow {
            Permission::Granted
        } else {
            Permission::Denied
        })
    }

    fn current_position(&self) -> AppResult<Coordinates> {
        if !self.allow {
            return Err(AppError::PermissionDenied);
        }
        let fix = self.fix.ok_or_else(|| {
            AppError::LocationUnavailable(
                "no position configured; pass --lat/--lon or set location.latitude/longitude"
                    .into(),
            )
        })?;
        validate(fix)?;
        Ok(fix)
    }
}

fn validate(c: Coordinates) -> AppResult<()> {
    if !(-90.0..=90.0).contains(&c.latitude) || !(-180.0..=180.0).contains(&c.longitude) {
        return Err(AppError::LocationUnavailable(format!(
            "coordinates out of range: {}, {}",
            c.latitude, c.longitude
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(allow: bool, lat: Option<f64>, lon: Option<f64>) -> LocationConfig {
        LocationConfig {
            allow,
            latitude: lat,
            longitude: lon,
        }
    }

    #[test]
    fn denied_when_sharing_disabled() {
        let loc = ConfiguredLocation::new(&cfg(false, Some(35.6), Some(139.7)));
        assert_eq!(loc.request_permission().unwrap(), Permission::Denied);
        assert!(matches!(loc.current_position(), Err(AppError::PermissionDenied)));
    }

    #[test]
    fn missing_fix_is_unavailable() {
        let loc = ConfiguredLocation::new(&cfg(true, Some(35.6), None));
        assert_eq!(loc.request_permission().unwrap(), Permission::Granted);
        assert!(matches!(
            loc.current_position(),
            Err(AppError::LocationUnavailable(_))
        ));
    }

    #[test]
    fn out_of_range_fix_is_rejected() {
        let loc = ConfiguredLocation::new(&cfg(true, Some(135.0), Some(35.0)));
        assert!(loc.current_position().is_err());
    }

    #[test]
    fn configured_fix_is_returned() {
        let loc = ConfiguredLocation::new(&cfg(true, Some(35.658), Some(139.701)));
        let c = loc.current_position().unwrap();
        assert_eq!(c.latitude, 35.658);
    }
}
