//! Shared query parameter types for API handlers.

use dealdash_core::geo::DEFAULT_RADIUS_KM;
use serde::Deserialize;
use validator::Validate;

use crate::error::AppError;

/// Raw query parameters for the nearby-search endpoints
/// (`?latitude=&longitude=&radius=`).
///
/// Coordinates are required; `radius` is optional and defaults to
/// [`DEFAULT_RADIUS_KM`]. Use [`NearbyParams::into_query`] to validate and
/// obtain the resolved [`NearbyQuery`].
#[derive(Debug, Deserialize, Validate)]
pub struct NearbyParams {
    #[validate(
        required(message = "The latitude parameter is required"),
        range(min = -90.0, max = 90.0, message = "latitude must be between -90 and 90")
    )]
    pub latitude: Option<f64>,
    #[validate(
        required(message = "The longitude parameter is required"),
        range(min = -180.0, max = 180.0, message = "longitude must be between -180 and 180")
    )]
    pub longitude: Option<f64>,
    #[validate(range(min = 0.0, message = "radius must not be negative"))]
    pub radius: Option<f64>,
}

/// A validated nearby-search query with the radius default applied.
#[derive(Debug, Clone, Copy)]
pub struct NearbyQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
}

impl NearbyParams {
    /// Validate the raw parameters and resolve defaults.
    ///
    /// Missing or out-of-range fields produce a 400 with field-level errors
    /// naming the offending parameter.
    pub fn into_query(self) -> Result<NearbyQuery, AppError> {
        self.validate()?;
        let (Some(latitude), Some(longitude)) = (self.latitude, self.longitude) else {
            // validate() already rejects missing coordinates.
            return Err(AppError::BadRequest(
                "latitude and longitude are required".into(),
            ));
        };
        Ok(NearbyQuery {
            latitude,
            longitude,
            radius_km: self.radius.unwrap_or(DEFAULT_RADIUS_KM),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_defaults_radius_to_ten_km() {
        let params = NearbyParams {
            latitude: Some(40.7128),
            longitude: Some(-74.0060),
            radius: None,
        };
        let query = params.into_query().expect("valid params");
        assert_eq!(query.radius_km, 10.0);
    }

    #[test]
    fn test_missing_latitude_names_the_field() {
        let params = NearbyParams {
            latitude: None,
            longitude: Some(-74.0060),
            radius: None,
        };
        let err = params.into_query().unwrap_err();
        assert_matches!(err, AppError::Validation(fields) => {
            assert!(fields.contains_key("latitude"));
            assert!(!fields.contains_key("longitude"));
        });
    }

    #[test]
    fn test_out_of_range_longitude_rejected() {
        let params = NearbyParams {
            latitude: Some(0.0),
            longitude: Some(240.0),
            radius: None,
        };
        let err = params.into_query().unwrap_err();
        assert_matches!(err, AppError::Validation(fields) => {
            assert!(fields.contains_key("longitude"));
        });
    }

    #[test]
    fn test_negative_radius_rejected() {
        let params = NearbyParams {
            latitude: Some(0.0),
            longitude: Some(0.0),
            radius: Some(-1.0),
        };
        assert_matches!(params.into_query(), Err(AppError::Validation(_)));
    }
}
