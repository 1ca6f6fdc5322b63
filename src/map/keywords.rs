//! World and map plane keywords
//!
//! Static registry of the planes the position assets exist for.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::MapError;

/// Worlds the planes belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum World {
    HertaSpaceStation,
    JariloVI,
    XianzhouLuofu,
    Penacony,
    Amphoreus,
}

impl World {
    /// Short name used in asset directories
    pub fn short_name(&self) -> &'static str {
        match self {
            World::HertaSpaceStation => "Herta",
            World::JariloVI => "Jarilo",
            World::XianzhouLuofu => "Luofu",
            World::Penacony => "Penacony",
            World::Amphoreus => "Amphoreus",
        }
    }
}

/// A named in-game map location
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct MapPlane {
    /// Plane name, such as `Jarilo_AdministrativeDistrict`
    pub name: &'static str,
    /// World this plane belongs to
    pub world: World,
    /// Floor labels from lowest to highest
    pub floors: &'static [&'static str],
}

macro_rules! plane {
    ($name:literal, $world:ident, [$($floor:literal),+ $(,)?]) => {
        MapPlane {
            name: $name,
            world: World::$world,
            floors: &[$($floor),+],
        }
    };
}

/// All known planes
pub static MAP_PLANES: &[MapPlane] = &[
    // Herta Space Station
    plane!("Herta_ParlorCar", HertaSpaceStation, ["F1"]),
    plane!("Herta_MasterControlZone", HertaSpaceStation, ["F1", "F2"]),
    plane!("Herta_BaseZone", HertaSpaceStation, ["B1", "F1"]),
    plane!("Herta_StorageZone", HertaSpaceStation, ["F1", "F2", "F3"]),
    plane!("Herta_SupplyZone", HertaSpaceStation, ["F1", "F2"]),
    plane!("Herta_SeclusionZone", HertaSpaceStation, ["F1", "F2"]),
    // Jarilo-VI
    plane!("Jarilo_AdministrativeDistrict", JariloVI, ["F1"]),
    plane!("Jarilo_OutlyingSnowPlains", JariloVI, ["F1"]),
    plane!("Jarilo_BackwaterPass", JariloVI, ["F1"]),
    plane!("Jarilo_SilvermaneGuardRestrictedZone", JariloVI, ["F1"]),
    plane!("Jarilo_CorridorofFadingEchoes", JariloVI, ["F1"]),
    plane!("Jarilo_EverwinterHill", JariloVI, ["F1"]),
    plane!("Jarilo_GreatMine", JariloVI, ["F1"]),
    plane!("Jarilo_RivetTown", JariloVI, ["F1"]),
    plane!("Jarilo_RobotSettlement", JariloVI, ["F1"]),
    // The Xianzhou Luofu
    plane!("Luofu_CentralStarskiff", XianzhouLuofu, ["F1"]),
    plane!("Luofu_StargazerNavalia", XianzhouLuofu, ["F1"]),
    plane!("Luofu_ExaltingSanctum", XianzhouLuofu, ["F1"]),
    plane!("Luofu_Cloudford", XianzhouLuofu, ["F1"]),
    plane!("Luofu_AlchemyCommission", XianzhouLuofu, ["F1", "F2"]),
    plane!("Luofu_ScalegorgeWaterscape", XianzhouLuofu, ["F1"]),
    plane!("Luofu_DivinationCommission", XianzhouLuofu, ["F1", "F2"]),
    plane!("Luofu_FyxestrollGarden", XianzhouLuofu, ["B1", "F1"]),
    // Penacony
    plane!("Penacony_TheReverieReality", Penacony, ["F1", "F2"]),
    plane!("Penacony_GoldenHour", Penacony, ["F1"]),
    plane!("Penacony_DreamEdge", Penacony, ["F1", "F2", "F3"]),
    plane!("Penacony_ClockStudiosThemePark", Penacony, ["F1"]),
    // Amphoreus
    plane!("Amphoreus_Okhema", Amphoreus, ["F1", "F2"]),
    plane!("Amphoreus_BloodbathedBattlefrontCastrumKremnos", Amphoreus, ["F1"]),
    plane!("Amphoreus_StrifeRuinsCastrumKremnos", Amphoreus, ["F1"]),
];

static PLANES_BY_NAME: Lazy<HashMap<&'static str, &'static MapPlane>> =
    Lazy::new(|| MAP_PLANES.iter().map(|plane| (plane.name, plane)).collect());

/// A plane given either directly or by name
#[derive(Debug, Clone, Copy)]
pub enum PlaneQuery<'a> {
    Plane(&'static MapPlane),
    Name(&'a str),
}

impl From<&'static MapPlane> for PlaneQuery<'_> {
    fn from(plane: &'static MapPlane) -> Self {
        PlaneQuery::Plane(plane)
    }
}

impl<'a> From<&'a str> for PlaneQuery<'a> {
    fn from(name: &'a str) -> Self {
        PlaneQuery::Name(name)
    }
}

impl<'a> From<&'a String> for PlaneQuery<'a> {
    fn from(name: &'a String) -> Self {
        PlaneQuery::Name(name.as_str())
    }
}

impl MapPlane {
    /// Look up a plane by value or by name
    pub fn find<'a>(query: impl Into<PlaneQuery<'a>>) -> Result<&'static MapPlane, MapError> {
        match query.into() {
            PlaneQuery::Plane(plane) => Ok(plane),
            PlaneQuery::Name(name) => PLANES_BY_NAME
                .get(name)
                .copied()
                .ok_or_else(|| MapError::PlaneNotFound(name.to_string())),
        }
    }

    /// Whether the plane spans more than one floor
    pub fn has_multiple_floors(&self) -> bool {
        self.floors.len() > 1
    }

    /// Normalize a floor label for this plane
    ///
    /// Accepts labels case-insensitively (`f2` -> `F2`) and signed floor
    /// numbers (`2` -> `F2`, `-1` -> `B1`). Single floor planes always
    /// resolve to their only floor.
    pub fn convert_to_floor_name(&self, floor: &str) -> Result<String, MapError> {
        if let [only] = self.floors {
            return Ok((*only).to_string());
        }

        let floor = floor.trim();
        let label = match floor.parse::<i32>() {
            Ok(n) if n > 0 => format!("F{n}"),
            Ok(n) if n < 0 => format!("B{}", -n),
            _ => floor.to_ascii_uppercase(),
        };

        self.floors
            .iter()
            .find(|f| **f == label)
            .map(|f| (*f).to_string())
            .ok_or_else(|| MapError::FloorNotFound {
                plane: self.name.to_string(),
                floor: floor.to_string(),
            })
    }
}

impl fmt::Display for MapPlane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_by_name_and_value() {
        let plane = MapPlane::find("Jarilo_AdministrativeDistrict").unwrap();
        assert_eq!(plane.world, World::JariloVI);
        assert_eq!(plane.world.short_name(), "Jarilo");

        let same = MapPlane::find(plane).unwrap();
        assert!(std::ptr::eq(plane, same));
    }

    #[test]
    fn test_find_unknown_plane() {
        let result = MapPlane::find("Herta_Nowhere");
        assert!(matches!(result, Err(MapError::PlaneNotFound(name)) if name == "Herta_Nowhere"));
    }

    #[test]
    fn test_plane_names_are_unique() {
        assert_eq!(PLANES_BY_NAME.len(), MAP_PLANES.len());
    }

    #[test]
    fn test_multiple_floors() {
        assert!(!MapPlane::find("Herta_ParlorCar").unwrap().has_multiple_floors());
        assert!(MapPlane::find("Herta_BaseZone").unwrap().has_multiple_floors());
    }

    #[test]
    fn test_convert_floor_name() {
        let plane = MapPlane::find("Herta_BaseZone").unwrap();
        assert_eq!(plane.convert_to_floor_name("F1").unwrap(), "F1");
        assert_eq!(plane.convert_to_floor_name("b1").unwrap(), "B1");
        assert_eq!(plane.convert_to_floor_name("1").unwrap(), "F1");
        assert_eq!(plane.convert_to_floor_name("-1").unwrap(), "B1");
        assert!(matches!(
            plane.convert_to_floor_name("F3"),
            Err(MapError::FloorNotFound { .. })
        ));
    }

    #[test]
    fn test_single_floor_plane_ignores_label() {
        let plane = MapPlane::find("Jarilo_AdministrativeDistrict").unwrap();
        assert_eq!(plane.convert_to_floor_name("F1").unwrap(), "F1");
        assert_eq!(plane.convert_to_floor_name("F2").unwrap(), "F1");
    }
}
