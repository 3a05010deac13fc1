use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Logical collision surface a probe group reports for. Used as key in the state map
/// returned by `CollisionAggregator::update_collisions`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SurfaceId {
    Ground,
    SpawnOrExit,
    Ceiling,
    EntityLeft,
    EntityRight,
    PlayerLeft,
    PlayerRight,
    PlayerDown,
    EntityAbove,
    Pow,
    PlayerAbove,
}

impl SurfaceId {
    pub fn name(self) -> &'static str {
        match self {
            SurfaceId::Ground => "GROUND",
            SurfaceId::SpawnOrExit => "SPAWN_OR_EXIT",
            SurfaceId::Ceiling => "CEILING",
            SurfaceId::EntityLeft => "ENTITY_LEFT",
            SurfaceId::EntityRight => "ENTITY_RIGHT",
            SurfaceId::PlayerLeft => "PLAYER_LEFT",
            SurfaceId::PlayerRight => "PLAYER_RIGHT",
            SurfaceId::PlayerDown => "PLAYER_DOWN",
            SurfaceId::EntityAbove => "ENTITY_ABOVE",
            SurfaceId::Pow => "POW",
            SurfaceId::PlayerAbove => "PLAYER_ABOVE",
        }
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Direction every probe of a group is cast in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProbeDirection {
    Right,
    Left,
    Down,
    Up,
}

impl ProbeDirection {
    pub fn vector(self) -> Vec2 {
        match self {
            ProbeDirection::Right => Vec2::X,
            ProbeDirection::Left => Vec2::NEG_X,
            ProbeDirection::Down => Vec2::NEG_Y,
            ProbeDirection::Up => Vec2::Y,
        }
    }

    /// Horizontal casts spread their origins along Y, vertical casts along X.
    pub fn is_horizontal(self) -> bool {
        matches!(self, ProbeDirection::Right | ProbeDirection::Left)
    }
}

/// How the hit pattern of a group reduces to a single boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequiredHits {
    /// At least one probe hit.
    One,
    /// Every probe hit, self hits included.
    Full,
    /// At least `probe_count / 2` probes hit.
    AnyHalf,
    /// Only probes in `[0, probe_count / 2)` hit.
    FirstHalf,
    /// Only probes in `[probe_count / 2, probe_count)` hit.
    SecondHalf,
}
