#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::workout::Workout;

pub const DEFAULT_ZOOM: f64 = 13.;
pub const OSM_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const OSM_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub map: MapConfig,
    pub popup: PopupConfig,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    pub zoom: f64,
    pub tile_url: String,
    pub attribution: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            tile_url: OSM_TILE_URL.into(),
            attribution: OSM_ATTRIBUTION.into(),
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct PopupConfig {
    pub max_width: f64,
    pub min_width: f64,
    pub auto_close: bool,
    pub close_on_click: bool,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            max_width: 250.,
            min_width: 100.,
            auto_close: false,
            close_on_click: false,
        }
    }
}

/// Everything needed to draw the popup attached to one workout marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPopup {
    pub content: String,
    pub class_name: String,
    pub max_width: f64,
    pub min_width: f64,
    pub auto_close: bool,
    pub close_on_click: bool,
}

impl PopupConfig {
    pub fn for_workout(&self, workout: &Workout) -> MarkerPopup {
        let workout_type = workout.workout_type();
        MarkerPopup {
            content: workout_type.as_str().to_owned(),
            class_name: format!("{workout_type}-popup"),
            max_width: self.max_width,
            min_width: self.min_width,
            auto_close: self.auto_close,
            close_on_click: self.close_on_click,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workout::{Coords, KindField};

    #[test]
    fn popup_stays_open_and_is_styled_per_type() {
        let workout = Workout::new(Coords::new(0., 0.), 10., 30., KindField::Elevation(120.));
        let popup = PopupConfig::default().for_workout(&workout);

        assert_eq!(popup.content, "cycling");
        assert_eq!(popup.class_name, "cycling-popup");
        assert!(!popup.auto_close);
        assert!(!popup.close_on_click);
        assert_eq!((popup.min_width, popup.max_width), (100., 250.));
    }

    #[test]
    fn defaults_match_the_osm_map() {
        let config = Config::default();
        assert_eq!(config.map.zoom, 13.);
        assert!(config.map.tile_url.contains("openstreetmap"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_overrides_only_named_values() {
        let config: Config = serde_json::from_str(r#"{ "map": { "zoom": 15 }, "popup": { "max_width": 300 } }"#).unwrap();

        assert_eq!(config.map.zoom, 15.);
        assert_eq!(config.map.tile_url, OSM_TILE_URL);
        assert_eq!(config.popup.max_width, 300.);
        assert_eq!(config.popup.min_width, 100.);
    }
}
