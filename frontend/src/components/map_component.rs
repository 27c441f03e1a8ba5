use gloo_console::info;
use gloo_utils::document;
use leaflet::{LatLng, Map, MapOptions, Marker, MouseEvent, Popup, PopupOptions, TileLayer, TileLayerOptions};
use mapty_lib::{
    config::{MapConfig, MarkerPopup},
    workout::Coords,
};
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, Node};
use yew::prelude::*;

/// The leaflet map and the detached container it draws into.
pub struct MapHandle {
    map: Map,
    container: HtmlElement,
    on_click: Callback<Coords>,
    markers: Vec<Marker>,
}

impl MapHandle {
    pub fn new(on_click: Callback<Coords>) -> Self {
        let container: HtmlElement = document()
            .create_element("div")
            .expect("div is a valid tag name")
            .unchecked_into();
        container.set_class_name("map");

        let map = Map::new_with_element(&container, &MapOptions::default());

        Self {
            map,
            container,
            on_click,
            markers: Vec::new(),
        }
    }

    pub fn render(&self) -> Html {
        let node: &Node = &self.container.clone().into();
        Html::VRef(node.clone())
    }

    pub fn invalidate_size(&self) {
        self.map.invalidate_size(false);
    }

    /// Centers the map, adds the tile layer and starts forwarding clicks.
    pub fn load(&mut self, center: Coords, config: &MapConfig) {
        self.map.set_view(&to_lat_lng(center), config.zoom);
        add_tile_layer(&self.map, config);

        let on_click = self.on_click.clone();
        self.map.on_mouse_click(Box::new(move |event: MouseEvent| {
            let lat_lng = event.lat_lng();
            on_click.emit(Coords::new(lat_lng.lat(), lat_lng.lng()));
        }));

        self.map.invalidate_size(false);
    }

    pub fn add_marker(&mut self, coords: Coords, popup: &MarkerPopup) {
        let options = PopupOptions::default();
        options.set_max_width(popup.max_width);
        options.set_min_width(popup.min_width);
        options.set_auto_close(popup.auto_close);
        options.set_close_on_click(popup.close_on_click);
        options.set_class_name(popup.class_name.clone());

        let leaflet_popup = Popup::new(&options, None);
        leaflet_popup.set_content(&popup.content.clone().into());

        let marker = Marker::new(&to_lat_lng(coords));
        marker.add_to(&self.map);
        marker.bind_popup(&leaflet_popup);
        marker.open_popup();

        info!(format!("Added marker at {}", coords));
        self.markers.push(marker);
    }
}

fn to_lat_lng(coords: Coords) -> LatLng {
    LatLng::new(coords.lat, coords.lng)
}

fn add_tile_layer(map: &Map, config: &MapConfig) {
    let opts = TileLayerOptions::new();
    opts.set_attribution(config.attribution.clone());
    opts.set_update_when_idle(true);
    TileLayer::new_options(&config.tile_url, &opts).add_to(map);
}
