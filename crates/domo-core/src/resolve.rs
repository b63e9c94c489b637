//! Name-to-identifier resolution over the lights tree

use crate::action::ActId;
use crate::entities::LightFloor;
use crate::error::{DomoError, DomoResult};

/// Find the `act_id` of a light by floor, room and light name
///
/// Names are matched exactly and case-sensitively, in document order. The
/// first device whose whole path matches wins, even when an earlier floor or
/// room with the same name had no such light.
pub fn resolve_light_id(
    floors: &[LightFloor],
    floor: &str,
    room: &str,
    light: &str,
) -> DomoResult<ActId> {
    floors
        .iter()
        .filter(|f| f.name == floor)
        .flat_map(move |f| f.array.iter().filter(move |r| r.name == room))
        .flat_map(|r| r.array.iter())
        .find(|l| l.name == light)
        .map(|l| l.act_id)
        .ok_or_else(|| DomoError::LightNotFound {
            floor: floor.to_string(),
            room: room.to_string(),
            light: light.to_string(),
        })
}
