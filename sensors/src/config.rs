use bevy::{
    asset::{io::Reader, Asset, AssetLoader, AsyncReadExt, LoadContext},
    prelude::*,
    reflect::TypePath,
};
use collisions::store::ALL_LAYERS;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    error::SensorError,
    surface::{ProbeDirection, RequiredHits, SurfaceId},
};

/// Boundary segment probes are spread along, relative to the owning entity.
#[derive(Debug, Default, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// Moves both ends from the owner's local space into world space. Translation,
    /// rotation and scale all apply, so a mirrored owner mirrors its probes too.
    pub fn to_world(&self, owner: &Transform) -> Self {
        Self {
            start: owner.transform_point(self.start.extend(0.0)).truncate(),
            end: owner.transform_point(self.end.extend(0.0)).truncate(),
        }
    }
}

/// Configuration of a single probe group. Attach it to a child of an entity carrying a
/// `CollisionAggregator` to have it discovered, or build a `ProbeGroup` from it directly.
#[derive(Debug, Clone, PartialEq, Component, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct ProbeGroupConfig {
    pub surface: SurfaceId,
    pub required_hits: RequiredHits,
    pub direction: ProbeDirection,
    pub bounds: Segment,
    /// Length of every probe.
    #[serde(default = "default_distance")]
    pub distance: f32,
    #[serde(default = "default_probe_count")]
    pub probe_count: usize,
    /// Layers the probes collide with. Defaults to all layers.
    #[serde(default = "default_collision_mask")]
    pub collision_mask: i32,
    /// Ignore hits on the entity owning the aggregator.
    #[serde(default = "default_filter_self")]
    pub filter_self: bool,
    #[serde(default)]
    pub show_debug_probes: bool,
    /// RGBA color of probes that did not hit anything.
    #[serde(default = "default_debug_color")]
    pub debug_color: [f32; 4],
}

fn default_distance() -> f32 {
    0.15
}

fn default_probe_count() -> usize {
    4
}

fn default_collision_mask() -> i32 {
    ALL_LAYERS
}

fn default_filter_self() -> bool {
    true
}

fn default_debug_color() -> [f32; 4] {
    [0.0, 1.0, 0.0, 1.0]
}

impl ProbeGroupConfig {
    pub fn new(
        surface: SurfaceId,
        direction: ProbeDirection,
        required_hits: RequiredHits,
        bounds: Segment,
    ) -> Self {
        Self {
            surface,
            required_hits,
            direction,
            bounds,
            distance: default_distance(),
            probe_count: default_probe_count(),
            collision_mask: default_collision_mask(),
            filter_self: default_filter_self(),
            show_debug_probes: false,
            debug_color: default_debug_color(),
        }
    }

    pub fn with_probe_count(mut self, probe_count: usize) -> Self {
        self.probe_count = probe_count;
        self
    }

    pub fn with_distance(mut self, distance: f32) -> Self {
        self.distance = distance;
        self
    }

    pub fn with_collision_mask(mut self, collision_mask: i32) -> Self {
        self.collision_mask = collision_mask;
        self
    }

    pub fn with_filter_self(mut self, filter_self: bool) -> Self {
        self.filter_self = filter_self;
        self
    }

    pub fn debug_color(&self) -> Color {
        let [r, g, b, a] = self.debug_color;
        Color::srgba(r, g, b, a)
    }

    pub fn validate(&self) -> Result<(), SensorError> {
        let invalid = |reason: String| SensorError::InvalidConfiguration {
            surface: self.surface,
            reason,
        };

        if self.probe_count < 2 {
            return Err(invalid(format!(
                "probe_count must be at least 2, got {}",
                self.probe_count
            )));
        }
        if !self.distance.is_finite() || self.distance <= 0.0 {
            return Err(invalid(format!(
                "distance must be a positive number, got {}",
                self.distance
            )));
        }
        if !self.bounds.start.is_finite() || !self.bounds.end.is_finite() {
            return Err(invalid("bounds must be finite".to_string()));
        }

        Ok(())
    }
}

/// A set of probe group configurations loaded from a `*.sensors.json` file.
#[derive(Debug, Asset, TypePath, Clone, Serialize, Deserialize)]
pub struct SensorRig {
    pub groups: Vec<ProbeGroupConfig>,
}

impl SensorRig {
    /// Parses and validates a rig. A group with a readable surface but otherwise bad fields
    /// (an unknown direction or policy name, a missing segment) is reported as
    /// `InvalidConfiguration` for that surface. Anything else that is not a list of groups
    /// is a `JsonError`.
    pub fn from_json(json: &str) -> Result<Self, SensorRigLoaderError> {
        let entries = serde_json::from_str::<Vec<serde_json::Value>>(json)?;

        let mut groups = Vec::with_capacity(entries.len());
        for entry in entries {
            let surface = entry
                .get("surface")
                .cloned()
                .and_then(|value| serde_json::from_value::<SurfaceId>(value).ok());

            let group = match (serde_json::from_value::<ProbeGroupConfig>(entry), surface) {
                (Ok(group), _) => group,
                (Err(err), Some(surface)) => {
                    return Err(SensorError::InvalidConfiguration {
                        surface,
                        reason: err.to_string(),
                    }
                    .into())
                }
                (Err(err), None) => return Err(err.into()),
            };
            group.validate()?;
            groups.push(group);
        }

        Ok(Self { groups })
    }
}

#[derive(Default)]
pub struct SensorRigLoader;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SensorRigLoaderError {
    #[error("Could not load sensor rig: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Invalid sensor rig: {0}")]
    Invalid(#[from] SensorError),
}

impl AssetLoader for SensorRigLoader {
    type Asset = SensorRig;
    type Settings = ();
    type Error = SensorRigLoaderError;

    async fn load<'a>(
        &'a self,
        reader: &'a mut Reader<'_>,
        _settings: &'a Self::Settings,
        load_context: &'a mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut json_str = String::new();
        reader.read_to_string(&mut json_str).await?;

        let rig = SensorRig::from_json(&json_str)?;
        info!(
            "Loaded sensor rig {:?} with {} probe groups",
            load_context.path(),
            rig.groups.len()
        );

        Ok(rig)
    }

    fn extensions(&self) -> &[&str] {
        &["sensors.json"]
    }
}
