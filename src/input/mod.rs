//! Basket position sources
//!
//! Pointer input arrives as raw client x coordinates and needs no conversion.
//! The sensor feed is the external source: it is subscribed while the basket
//! is in `InputMode::External` and unsubscribed otherwise.

pub mod sensor;

pub use sensor::{
    FeatureSet, JointSample, SensorCalibration, SensorFeed, SessionConfig, SubscriptionId,
};
