//! Route-of-administration records.
//!
//! Field order matches the upstream GraphQL selection so cached and emitted
//! JSON reads the same as the API response.

use serde::{Deserialize, Serialize};

/// One route of administration with its dose tiers and duration phases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteRecord {
    /// Route label as published, e.g. "Oral" or "Insufflated".
    pub name: String,
    pub dose: Option<Dose>,
    pub duration: Option<RouteDuration>,
}

impl RouteRecord {
    /// A route without duration data is incomplete and never emitted.
    #[must_use]
    pub fn has_duration(&self) -> bool {
        self.duration.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dose {
    pub units: Option<String>,
    pub threshold: Option<f64>,
    pub heavy: Option<f64>,
    pub common: Option<DoseRange>,
    pub light: Option<DoseRange>,
    pub strong: Option<DoseRange>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoseRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Named duration phases. Every phase is optional upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteDuration {
    pub afterglow: Option<DurationPhase>,
    pub comeup: Option<DurationPhase>,
    pub duration: Option<DurationPhase>,
    pub offset: Option<DurationPhase>,
    pub onset: Option<DurationPhase>,
    pub peak: Option<DurationPhase>,
    pub total: Option<DurationPhase>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DurationPhase {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub units: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_route() {
        let route: RouteRecord = serde_json::from_str(
            r#"{
                "name": "Oral",
                "dose": {"units": "µg", "threshold": 15, "heavy": null,
                         "common": {"min": 75, "max": 150}},
                "duration": {"total": {"min": 8, "max": 12, "units": "hours"}}
            }"#,
        )
        .expect("parse route");
        assert!(route.has_duration());
        let dose = route.dose.expect("dose");
        assert_eq!(dose.threshold, Some(15.0));
        assert_eq!(dose.common, Some(DoseRange { min: Some(75.0), max: Some(150.0) }));
        assert!(dose.light.is_none());
        let total = route.duration.and_then(|d| d.total).expect("total phase");
        assert_eq!(total.units.as_deref(), Some("hours"));
    }

    #[test]
    fn null_duration_marks_route_incomplete() {
        let route: RouteRecord =
            serde_json::from_str(r#"{"name": "Rectal", "dose": null, "duration": null}"#)
                .expect("parse route");
        assert!(!route.has_duration());
    }

    #[test]
    fn serializes_absent_fields_as_null() {
        let route = RouteRecord {
            name: "Oral".to_string(),
            dose: None,
            duration: Some(RouteDuration::default()),
        };
        let json = serde_json::to_value(&route).expect("serialize route");
        assert!(json["dose"].is_null());
        assert!(json["duration"]["onset"].is_null());
    }
}
