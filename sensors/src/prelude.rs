pub use crate::aggregator::{CollisionAggregator, CollisionStates};
pub use crate::caster::{ProbeHit, RayCaster};
pub use crate::config::{ProbeGroupConfig, Segment, SensorRig, SensorRigLoader, SensorRigLoaderError};
pub use crate::error::SensorError;
pub use crate::plugin::{
    ProbeGroupDisabled, SensorRigAssetPlugin, SensorSet, SensorSettings, SensorsPlugin,
};
pub use crate::probe_group::{ProbeCast, ProbeGroup};
pub use crate::surface::{ProbeDirection, RequiredHits, SurfaceId};
