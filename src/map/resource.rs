//! Per-floor map resources
//!
//! [`MapResource`] owns the current plane and floor, lazily loads the assets
//! for that floor and keeps the minimap helpers (circle masks and the
//! rotation remap table) around for the tracking loop.

use image::{GenericImageView, GrayImage, RgbImage, SubImage};
use ndarray::Array2;
use once_cell::unsync::OnceCell;
use std::collections::HashMap;

use super::assets::AssetRoots;
use super::debug::{self, MinimapViewer, TrackingState};
use super::geometry::{self, Area};
use super::keywords::{MapPlane, PlaneQuery};
use super::mask;
use super::rotation::RotationRemap;
use super::MapError;
use crate::config::{DebugSettings, MinimapSettings, Settings};

/// Floor used when the caller has no better guess
pub const DEFAULT_FLOOR: &str = "F1";

/// Plane and floor pairs whose assets carry the floor suffix as given,
/// even when the plane itself has a single floor
pub const SPECIAL_PLANES: &[(&str, &str)] = &[
    ("Herta_SupplyZone", "F2Rogue"),
    ("Herta_SupplyZone", "F2RogueX151Y245"),
    ("Herta_StorageZone", "F2Rogue"),
    ("Jarilo_GreatMine", "F1RogueOcc"),
    ("Luofu_Cloudford", "F1Rogue"),
    ("Luofu_StargazerNavalia", "F1Rogue"),
    ("Luofu_StargazerNavalia", "F2Rogue"),
    ("Amphoreus_BloodbathedBattlefrontCastrumKremnos", "F1OE"),
    ("Amphoreus_StrifeRuinsCastrumKremnos", "F1OE"),
];

/// Assets derived from the current floor, cleared together on floor change
#[derive(Debug, Default)]
struct FloorAssets {
    basename: Option<String>,
    floor: Option<RgbImage>,
    floor_feat: Option<GrayImage>,
    outside_mask: Option<Array2<bool>>,
}

/// Map resources for the plane the player is currently on
pub struct MapResource {
    roots: AssetRoots,
    minimap: MinimapSettings,
    debug: DebugSettings,

    plane: &'static MapPlane,
    /// Floor name in game (B1, F1, F2, ...)
    floor: String,
    is_special_plane: bool,

    assets: FloorAssets,
    circle_masks: HashMap<(u32, u32), GrayImage>,
    rotation_remap: OnceCell<RotationRemap>,
    arrow_rotate_map: Option<GrayImage>,
    arrow_rotate_map_all: Option<GrayImage>,
}

impl MapResource {
    /// Create resources positioned on the parlor car
    pub fn new(settings: &Settings) -> Result<Self, MapError> {
        Ok(Self {
            roots: AssetRoots::resolve(settings)?,
            minimap: settings.minimap,
            debug: settings.debug.clone(),
            plane: MapPlane::find("Herta_ParlorCar")?,
            floor: DEFAULT_FLOOR.to_string(),
            is_special_plane: false,
            assets: FloorAssets::default(),
            circle_masks: HashMap::new(),
            rotation_remap: OnceCell::new(),
            arrow_rotate_map: None,
            arrow_rotate_map_all: None,
        })
    }

    /// Current plane
    pub fn plane(&self) -> &'static MapPlane {
        self.plane
    }

    /// Current floor label
    pub fn floor(&self) -> &str {
        &self.floor
    }

    /// Whether the current plane and floor are in [`SPECIAL_PLANES`]
    pub fn is_special_plane(&self) -> bool {
        self.is_special_plane
    }

    /// Asset roots in use
    pub fn roots(&self) -> &AssetRoots {
        &self.roots
    }

    /// Move to another plane and floor
    ///
    /// `plane` is a [`MapPlane`] or its name, such as
    /// `Jarilo_AdministrativeDistrict`. Special floors are kept verbatim,
    /// other floors are normalized by the plane. Floor assets are dropped and
    /// reloaded on next access.
    pub fn set_plane<'a>(
        &mut self,
        plane: impl Into<PlaneQuery<'a>>,
        floor: &str,
    ) -> Result<(), MapError> {
        let plane = MapPlane::find(plane)?;
        let is_special_plane = SPECIAL_PLANES
            .iter()
            .any(|&(name, special)| name == plane.name && special == floor);
        let floor = if is_special_plane {
            floor.to_string()
        } else {
            plane.convert_to_floor_name(floor)?
        };

        log::info!("Set plane: {plane}, floor: {floor}, special: {is_special_plane}");
        self.plane = plane;
        self.floor = floor;
        self.is_special_plane = is_special_plane;
        self.invalidate_assets();
        Ok(())
    }

    /// Drop every asset derived from the current floor
    pub fn invalidate_assets(&mut self) {
        self.assets = FloorAssets::default();
    }

    /// Path stem shared by the floor image, feature map and area mask
    pub fn assets_file_basename(&mut self) -> &str {
        self.assets.basename.get_or_insert_with(|| {
            let world = self.plane.world.short_name();
            if self.plane.has_multiple_floors() || self.is_special_plane {
                format!("./position/{world}/{}_{}", self.plane.name, self.floor)
            } else {
                format!("./position/{world}/{}", self.plane.name)
            }
        })
    }

    /// Floor reference image from the srcmap package
    pub fn assets_floor(&mut self) -> Result<&RgbImage, MapError> {
        let image = match self.assets.floor.take() {
            Some(image) => image,
            None => {
                let file = format!("{}.png", self.assets_file_basename());
                self.roots.load_image(&file)?
            }
        };
        Ok(self.assets.floor.insert(image))
    }

    /// Feature map of the floor
    pub fn assets_floor_feat(&mut self) -> Result<&GrayImage, MapError> {
        let image = match self.assets.floor_feat.take() {
            Some(image) => image,
            None => {
                let file = format!("{}.feat.png", self.assets_file_basename());
                self.roots.load_image_local(&file)?
            }
        };
        Ok(self.assets.floor_feat.insert(image))
    }

    /// Pixels outside of the walkable area, indexed `[y, x]`
    pub fn assets_floor_outside_mask(&mut self) -> Result<&Array2<bool>, MapError> {
        let mask = match self.assets.outside_mask.take() {
            Some(mask) => mask,
            None => {
                let file = format!("{}.area.png", self.assets_file_basename());
                let area = self.roots.load_image_local(&file)?;
                outside_mask(&area)
            }
        };
        Ok(self.assets.outside_mask.insert(mask))
    }

    /// Arrow template for direction detection
    pub fn arrow_rotate_map(&mut self) -> Result<&GrayImage, MapError> {
        let image = match self.arrow_rotate_map.take() {
            Some(image) => image,
            None => self
                .roots
                .load_image_local("./direction/ArrowRotateMap.png")?,
        };
        Ok(self.arrow_rotate_map.insert(image))
    }

    /// Arrow template covering every rotation step
    pub fn arrow_rotate_map_all(&mut self) -> Result<&GrayImage, MapError> {
        let image = match self.arrow_rotate_map_all.take() {
            Some(image) => image,
            None => self
                .roots
                .load_image_local("./direction/ArrowRotateMapAll.png")?,
        };
        Ok(self.arrow_rotate_map_all.insert(image))
    }

    /// Crop the minimap area on a screenshot
    ///
    /// The result borrows `image`, nothing is copied.
    pub fn get_minimap<'a, I: GenericImageView>(
        &self,
        image: &'a I,
        radius: u32,
    ) -> Result<SubImage<&'a I>, MapError> {
        let (width, height) = geometry::image_size(image);
        let Ok(r) = i32::try_from(radius) else {
            return Err(MapError::CropOutOfBounds {
                area: Area::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX),
                width,
                height,
            });
        };
        let area = Area::new(-r, -r, r, r).offset(self.minimap.center);
        geometry::crop(image, area)
    }

    /// Circle mask with the shape of the given image, cached by size
    pub fn get_circle_mask<I: GenericImageView>(&mut self, image: &I) -> &GrayImage {
        let (w, h) = geometry::image_size(image);
        self.circle_masks
            .entry((w, h))
            .or_insert_with(|| mask::mask_to_image(&mask::create_circular_mask(w, h)))
    }

    #[cfg(test)]
    fn circle_mask_count(&self) -> usize {
        self.circle_masks.len()
    }

    /// Polar unwrap table for the configured minimap radius
    pub fn rotation_remap_data(&self) -> &RotationRemap {
        self.rotation_remap
            .get_or_init(|| RotationRemap::new(self.minimap.radius))
    }

    /// Draw the tracking state on the floor image and show it
    pub fn show_minimap<V: MinimapViewer>(
        &mut self,
        viewer: &mut V,
        tracking: &TrackingState,
    ) -> Result<(), MapError> {
        let settings = self.debug.clone();
        let floor = self.assets_floor()?;
        let image = debug::render_minimap(floor, tracking, &settings);
        viewer.show(&settings.window_name, &image)?;
        viewer.poll()
    }
}

fn outside_mask(area: &GrayImage) -> Array2<bool> {
    let (width, height) = area.dimensions();
    Array2::from_shape_fn((height as usize, width as usize), |(y, x)| {
        area.get_pixel(x as u32, y as u32)[0] == 0
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma, Rgb};
    use std::path::Path;
    use tempfile::TempDir;

    fn write_floor(dir: &Path, basename: &str, shade: u8) {
        let srcmap = dir.join("srcmap").join(basename);
        let local = dir.join("local").join(basename);
        std::fs::create_dir_all(srcmap.parent().unwrap()).unwrap();
        std::fs::create_dir_all(local.parent().unwrap()).unwrap();

        RgbImage::from_pixel(40, 30, Rgb([shade, shade, shade]))
            .save(srcmap.with_extension("png"))
            .unwrap();
        GrayImage::from_pixel(40, 30, Luma([shade]))
            .save(local.with_extension("feat.png"))
            .unwrap();
        // Columns left of shade / 10 are outside of the floor area
        let edge = shade as u32 / 10;
        let area: GrayImage =
            ImageBuffer::from_fn(40, 30, |x, _| Luma([if x < edge { 0 } else { 255 }]));
        area.save(local.with_extension("area.png")).unwrap();
    }

    fn resource() -> (TempDir, MapResource) {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            srcmap: Some(dir.path().join("srcmap")),
            local_assets_dir: dir.path().join("local"),
            ..Default::default()
        };
        let resource = MapResource::new(&settings).unwrap();
        (dir, resource)
    }

    #[test]
    fn test_initial_state() {
        let (_dir, mut resource) = resource();
        assert_eq!(resource.plane().name, "Herta_ParlorCar");
        assert_eq!(resource.floor(), "F1");
        assert!(!resource.is_special_plane());
        assert_eq!(
            resource.assets_file_basename(),
            "./position/Herta/Herta_ParlorCar"
        );
    }

    #[test]
    fn test_new_requires_srcmap() {
        let result = MapResource::new(&Settings::default());
        assert!(matches!(result, Err(MapError::SrcmapMissing)));
    }

    #[test]
    fn test_set_plane_normalizes_floor() {
        let (_dir, mut resource) = resource();
        resource.set_plane("Herta_BaseZone", "b1").unwrap();
        assert_eq!(resource.floor(), "B1");
        assert!(!resource.is_special_plane());
        assert_eq!(
            resource.assets_file_basename(),
            "./position/Herta/Herta_BaseZone_B1"
        );

        resource
            .set_plane("Jarilo_AdministrativeDistrict", DEFAULT_FLOOR)
            .unwrap();
        assert_eq!(
            resource.assets_file_basename(),
            "./position/Jarilo/Jarilo_AdministrativeDistrict"
        );
    }

    #[test]
    fn test_set_plane_special_floor() {
        let (_dir, mut resource) = resource();
        resource.set_plane("Herta_SupplyZone", "F2Rogue").unwrap();
        assert!(resource.is_special_plane());
        assert_eq!(resource.floor(), "F2Rogue");
        assert!(resource.assets_file_basename().ends_with("_F2Rogue"));

        // Special floors on single floor planes still get the suffix
        resource.set_plane("Jarilo_GreatMine", "F1RogueOcc").unwrap();
        assert_eq!(
            resource.assets_file_basename(),
            "./position/Jarilo/Jarilo_GreatMine_F1RogueOcc"
        );
    }

    #[test]
    fn test_every_special_plane_keeps_floor() {
        let (_dir, mut resource) = resource();
        for &(plane, floor) in SPECIAL_PLANES {
            resource.set_plane(plane, floor).unwrap();
            assert!(resource.is_special_plane(), "{plane} {floor}");
            assert_eq!(resource.floor(), floor);
        }
    }

    #[test]
    fn test_set_plane_by_value() {
        let (_dir, mut resource) = resource();
        let plane = MapPlane::find("Luofu_AlchemyCommission").unwrap();
        resource.set_plane(plane, "2").unwrap();
        assert_eq!(resource.floor(), "F2");
    }

    #[test]
    fn test_set_plane_errors_keep_state() {
        let (_dir, mut resource) = resource();
        resource.set_plane("Herta_BaseZone", "B1").unwrap();

        assert!(matches!(
            resource.set_plane("Herta_Unknown", "F1"),
            Err(MapError::PlaneNotFound(_))
        ));
        assert!(matches!(
            resource.set_plane("Herta_BaseZone", "F9"),
            Err(MapError::FloorNotFound { .. })
        ));
        assert_eq!(resource.plane().name, "Herta_BaseZone");
        assert_eq!(resource.floor(), "B1");
    }

    #[test]
    fn test_floor_assets_load_and_invalidate() {
        let (dir, mut resource) = resource();
        write_floor(dir.path(), "position/Herta/Herta_ParlorCar", 10);
        write_floor(dir.path(), "position/Herta/Herta_BaseZone_B1", 200);

        assert_eq!(*resource.assets_floor().unwrap().get_pixel(0, 0), Rgb([10, 10, 10]));
        assert_eq!(*resource.assets_floor_feat().unwrap().get_pixel(0, 0), Luma([10]));
        let mask = resource.assets_floor_outside_mask().unwrap();
        assert_eq!(mask.dim(), (30, 40));
        assert!(mask[[0, 0]]);
        assert!(!mask[[0, 10]]);

        resource.set_plane("Herta_BaseZone", "B1").unwrap();
        assert_eq!(*resource.assets_floor().unwrap().get_pixel(0, 0), Rgb([200, 200, 200]));
        assert_eq!(*resource.assets_floor_feat().unwrap().get_pixel(0, 0), Luma([200]));
        let mask = resource.assets_floor_outside_mask().unwrap();
        assert!(mask[[0, 10]]);
        assert!(!mask[[0, 20]]);
    }

    #[test]
    fn test_floor_assets_are_cached() {
        let (dir, mut resource) = resource();
        write_floor(dir.path(), "position/Herta/Herta_ParlorCar", 10);
        resource.assets_floor().unwrap();

        // Once loaded, the file is no longer needed
        std::fs::remove_dir_all(dir.path().join("srcmap")).unwrap();
        assert!(resource.assets_floor().is_ok());

        resource.invalidate_assets();
        assert!(matches!(
            resource.assets_floor(),
            Err(MapError::ImageLoad { .. })
        ));
    }

    #[test]
    fn test_arrow_maps_survive_plane_change() {
        let (dir, mut resource) = resource();
        let direction = dir.path().join("local/direction");
        std::fs::create_dir_all(&direction).unwrap();
        GrayImage::from_pixel(8, 8, Luma([1]))
            .save(direction.join("ArrowRotateMap.png"))
            .unwrap();
        GrayImage::from_pixel(16, 8, Luma([2]))
            .save(direction.join("ArrowRotateMapAll.png"))
            .unwrap();

        assert_eq!(resource.arrow_rotate_map().unwrap().dimensions(), (8, 8));
        assert_eq!(resource.arrow_rotate_map_all().unwrap().dimensions(), (16, 8));

        std::fs::remove_dir_all(&direction).unwrap();
        resource.set_plane("Herta_BaseZone", "F1").unwrap();
        assert!(resource.arrow_rotate_map().is_ok());
        assert!(resource.arrow_rotate_map_all().is_ok());
    }

    #[test]
    fn test_get_minimap() {
        let (_dir, resource) = resource();
        let screen: GrayImage =
            ImageBuffer::from_fn(1280, 720, |x, y| Luma([((x + y) % 256) as u8]));

        let minimap = resource.get_minimap(&screen, 57).unwrap();
        assert_eq!(minimap.dimensions(), (114, 114));
        // Top-left of the crop is center - radius
        assert_eq!(minimap.get_pixel(0, 0), *screen.get_pixel(135 - 57, 186 - 57));
        assert_eq!(minimap.get_pixel(57, 57), *screen.get_pixel(135, 186));

        assert!(matches!(
            resource.get_minimap(&screen, 200),
            Err(MapError::CropOutOfBounds { .. })
        ));
        assert!(matches!(
            resource.get_minimap(&screen, u32::MAX),
            Err(MapError::CropOutOfBounds { width: 1280, height: 720, .. })
        ));
        assert!(matches!(
            resource.get_minimap(&screen, i32::MAX as u32),
            Err(MapError::CropOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_circle_mask_cache() {
        let (_dir, mut resource) = resource();
        let a = GrayImage::new(114, 114);
        let b = RgbImage::new(114, 114);

        let first = resource.get_circle_mask(&a) as *const GrayImage;
        let second = resource.get_circle_mask(&b) as *const GrayImage;
        assert!(std::ptr::eq(first, second));
        assert_eq!(resource.circle_mask_count(), 1);

        let small = resource.get_circle_mask(&GrayImage::new(30, 20)).clone();
        let expected = mask::mask_to_image(&mask::create_circular_mask(30, 20));
        assert_eq!(small, expected);
        assert_eq!(resource.circle_mask_count(), 2);
    }

    #[test]
    fn test_show_minimap() {
        let (dir, mut resource) = resource();
        write_floor(dir.path(), "position/Herta/Herta_ParlorCar", 0);
        let mut viewer = debug::PngViewer::new(dir.path().join("debug"));
        let tracking = TrackingState {
            position: (20.0, 15.0),
            direction: 90.0,
            rotation: 270.0,
        };

        resource.show_minimap(&mut viewer, &tracking).unwrap();

        assert_eq!(viewer.frame_count(), 1);
        let frame = image::open(viewer.frame_path("MinimapTracking"))
            .unwrap()
            .to_rgb8();
        assert_eq!(frame.dimensions(), (40, 30));
        assert_ne!(*frame.get_pixel(20, 15), Rgb([0, 0, 0]));
        // The cached floor image is not drawn on
        assert_eq!(*resource.assets_floor().unwrap().get_pixel(20, 15), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_rotation_remap_is_memoized() {
        let (_dir, mut resource) = resource();
        let first = resource.rotation_remap_data() as *const RotationRemap;
        resource.set_plane("Herta_BaseZone", "B1").unwrap();
        let second = resource.rotation_remap_data();

        assert!(std::ptr::eq(first, second));
        assert_eq!(second.diameter(), 114);
        assert_eq!(second.map_x[[0, 0]], 57.0);
        assert_eq!(second.map_y[[0, 0]], 57.0);
    }
}
