//! Body-tracking sensor feed
//!
//! The transport (a websocket to the sensor server) lives in the host page.
//! This side decides which event categories the session needs and turns
//! tracked-joint samples into basket positions.
//!
//! Subscribers declare the categories they want up front; the session config
//! sent to the server is the union of all live subscriptions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::consts::{SENSOR_MAX_DEPTH, SENSOR_OFFSET, SENSOR_SCALE};

/// Mapping from normalized depth-camera coordinates to the viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorCalibration {
    pub scale: f32,
    pub offset: f32,
    /// Bodies at or beyond this distance (meters) are ignored
    pub max_depth: f32,
}

impl Default for SensorCalibration {
    fn default() -> Self {
        Self {
            scale: SENSOR_SCALE,
            offset: SENSOR_OFFSET,
            max_depth: SENSOR_MAX_DEPTH,
        }
    }
}

impl SensorCalibration {
    /// Basket x for a joint sample, or None if the body is out of range or
    /// the reading is not a number
    pub fn to_viewport_x(&self, sample: &JointSample, viewport_width: f32) -> Option<f32> {
        if !(sample.camera_z < self.max_depth) || !sample.depth_x.is_finite() {
            return None;
        }
        let x = (sample.depth_x * self.scale - self.offset) * viewport_width;
        x.is_finite().then_some(x)
    }
}

/// One tracked-joint reading as reported by the sensor client
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JointSample {
    /// Horizontal position in the depth image, normalized to [0, 1]
    pub depth_x: f32,
    /// Distance from the camera in meters
    pub camera_z: f32,
}

impl JointSample {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Event categories a subscriber needs from the sensor server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeatureSet {
    pub bodies: bool,
    pub gestures: bool,
    pub depth: bool,
}

impl FeatureSet {
    pub const BODIES: Self = Self {
        bodies: true,
        gestures: false,
        depth: false,
    };

    pub fn union(self, other: Self) -> Self {
        Self {
            bodies: self.bodies || other.bodies,
            gestures: self.gestures || other.gestures,
            depth: self.depth || other.depth,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.bodies || self.gestures || self.depth)
    }
}

/// Session options sent to the sensor server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SessionConfig {
    #[serde(rename = "GestureEvents")]
    pub gesture_events: bool,
    #[serde(rename = "BodyEvents")]
    pub body_events: bool,
    #[serde(rename = "DepthEvents")]
    pub depth_events: bool,
}

/// Envelope for messages sent to the sensor server. `Data` carries the
/// payload as an embedded JSON string.
#[derive(Serialize)]
struct ServerEvent<'a> {
    #[serde(rename = "Type")]
    kind: &'a str,
    #[serde(rename = "Data")]
    data: String,
}

impl SessionConfig {
    /// Serialize as a `SessionConfig` server event
    pub fn to_message(&self) -> Result<String, serde_json::Error> {
        let event = ServerEvent {
            kind: "SessionConfig",
            data: serde_json::to_string(self)?,
        };
        serde_json::to_string(&event)
    }
}

impl From<FeatureSet> for SessionConfig {
    fn from(features: FeatureSet) -> Self {
        Self {
            gesture_events: features.gestures,
            body_events: features.bodies,
            depth_events: features.depth,
        }
    }
}

/// Handle returned by `SensorFeed::subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(pub u32);

/// Position source backed by the body-tracking sensor
#[derive(Debug, Clone, Default)]
pub struct SensorFeed {
    calibration: SensorCalibration,
    subscriptions: BTreeMap<SubscriptionId, FeatureSet>,
    next_id: u32,
}

impl SensorFeed {
    pub fn new(calibration: SensorCalibration) -> Self {
        Self {
            calibration,
            subscriptions: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn calibration(&self) -> &SensorCalibration {
        &self.calibration
    }

    pub fn subscribe(&mut self, features: FeatureSet) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.insert(id, features);
        log::debug!("Sensor subscription {:?}: {:?}", id, features);
        id
    }

    /// Returns false if `id` was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let removed = self.subscriptions.remove(&id).is_some();
        if removed {
            log::debug!("Sensor subscription {:?} removed", id);
        }
        removed
    }

    pub fn subscriptions(&self) -> usize {
        self.subscriptions.len()
    }

    /// Union of everything live subscribers asked for
    pub fn features(&self) -> FeatureSet {
        self.subscriptions
            .values()
            .fold(FeatureSet::default(), |acc, f| acc.union(*f))
    }

    pub fn session_config(&self) -> SessionConfig {
        self.features().into()
    }

    /// Basket x for a sample, if anyone wants body positions and the body is
    /// close enough
    pub fn position(&self, sample: &JointSample, viewport_width: f32) -> Option<f32> {
        if !self.features().bodies {
            return None;
        }
        self.calibration.to_viewport_x(sample, viewport_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(depth_x: f32, camera_z: f32) -> JointSample {
        JointSample { depth_x, camera_z }
    }

    #[test]
    fn test_calibrated_conversion() {
        let calibration = SensorCalibration::default();
        let x = calibration
            .to_viewport_x(&sample(0.5, 1.2), 1000.0)
            .unwrap();
        assert!((x - 350.0).abs() < 1e-3);

        // Left of the calibrated range maps off-screen; not clamped
        let x = calibration
            .to_viewport_x(&sample(0.0, 1.0), 1000.0)
            .unwrap();
        assert!((x + 400.0).abs() < 1e-3);
    }

    #[test]
    fn test_far_bodies_ignored() {
        let calibration = SensorCalibration::default();
        assert!(
            calibration
                .to_viewport_x(&sample(0.5, 2.0), 1000.0)
                .is_none()
        );
        assert!(
            calibration
                .to_viewport_x(&sample(0.5, 3.5), 1000.0)
                .is_none()
        );
        assert!(
            calibration
                .to_viewport_x(&sample(0.5, 1.99), 1000.0)
                .is_some()
        );
    }

    #[test]
    fn test_non_finite_samples_rejected() {
        let calibration = SensorCalibration::default();
        for bad in [
            sample(0.5, f32::NAN),
            sample(f32::NAN, 1.0),
            sample(f32::INFINITY, 1.0),
            sample(f32::NEG_INFINITY, 1.0),
        ] {
            assert!(calibration.to_viewport_x(&bad, 1000.0).is_none(), "{:?}", bad);
        }
        // Too close is still fine
        assert!(
            calibration
                .to_viewport_x(&sample(0.5, f32::NEG_INFINITY), 1000.0)
                .is_some()
        );
    }

    #[test]
    fn test_samples_dropped_without_body_subscription() {
        let mut feed = SensorFeed::new(SensorCalibration::default());
        assert!(feed.position(&sample(0.5, 1.0), 1000.0).is_none());

        let gestures = feed.subscribe(FeatureSet {
            gestures: true,
            ..Default::default()
        });
        assert!(feed.position(&sample(0.5, 1.0), 1000.0).is_none());

        let bodies = feed.subscribe(FeatureSet::BODIES);
        assert!(feed.position(&sample(0.5, 1.0), 1000.0).is_some());

        assert!(feed.unsubscribe(bodies));
        assert!(!feed.unsubscribe(bodies));
        assert!(feed.position(&sample(0.5, 1.0), 1000.0).is_none());
        assert!(feed.unsubscribe(gestures));
        assert_eq!(feed.subscriptions(), 0);
    }

    #[test]
    fn test_session_config_is_union_of_subscriptions() {
        let mut feed = SensorFeed::new(SensorCalibration::default());
        assert_eq!(feed.session_config(), SessionConfig::default());
        assert!(feed.features().is_empty());

        feed.subscribe(FeatureSet::BODIES);
        let depth = feed.subscribe(FeatureSet {
            depth: true,
            ..Default::default()
        });
        assert_eq!(
            feed.session_config(),
            SessionConfig {
                gesture_events: false,
                body_events: true,
                depth_events: true,
            }
        );

        feed.unsubscribe(depth);
        assert!(!feed.session_config().depth_events);
        assert!(feed.session_config().body_events);
    }

    #[test]
    fn test_session_config_message() {
        let config = SessionConfig::from(FeatureSet::BODIES);
        let message = config.to_message().unwrap();
        let value: serde_json::Value = serde_json::from_str(&message).unwrap();

        assert_eq!(value["Type"], "SessionConfig");
        let data: serde_json::Value =
            serde_json::from_str(value["Data"].as_str().unwrap()).unwrap();
        assert_eq!(data["BodyEvents"], true);
        assert_eq!(data["GestureEvents"], false);
        assert_eq!(data["DepthEvents"], false);
    }

    #[test]
    fn test_joint_sample_from_json() {
        let joint = JointSample::from_json(r#"{"depthX":0.25,"cameraZ":1.5,"depthY":0.1}"#)
            .unwrap();
        assert_eq!(joint, sample(0.25, 1.5));
        assert!(JointSample::from_json(r#"{"depthX":0.25}"#).is_err());
    }
}
