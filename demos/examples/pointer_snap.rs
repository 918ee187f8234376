// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drive a snap session with a scripted pointer path.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_snap_demos --example pointer_snap`
//!
//! The host here is a toy map with a fixed pan offset and a zoom expressed as
//! pixels per map unit. Two vector layers hold a road polyline, a parcel
//! polygon and a couple of survey points; layer 9 stands in for a raster
//! layer and is refused as a snap layer.

use kurbo::{Point, Vec2};
use understory_snap::{
    Boundary, Feature, HostMap, LayerId, MapView, SnapConfig, SnapResult, SnapSession,
};

const ROADS: LayerId = LayerId(1);
const PARCELS: LayerId = LayerId(2);
const RASTER: LayerId = LayerId(9);

struct DemoMap {
    pan: Vec2,
    zoom: f64,
    features: Vec<Feature>,
    listening: bool,
}

impl MapView for DemoMap {
    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn coordinate_to_screen(&self, coordinate: Point, zoom: f64) -> Point {
        let p = coordinate - self.pan;
        Point::new(p.x * zoom, -p.y * zoom)
    }

    fn screen_to_coordinate(&self, point: Point, zoom: f64) -> Point {
        Point::new(point.x / zoom, -point.y / zoom) + self.pan
    }
}

impl HostMap for DemoMap {
    type Geometry = Feature;

    fn list_geometries(&self, layer: Option<LayerId>) -> Vec<Feature> {
        self.features
            .iter()
            .filter(|f| layer.is_none_or(|l| f.layer == l))
            .cloned()
            .collect()
    }

    fn is_vector_layer(&self, layer: LayerId) -> bool {
        layer == ROADS || layer == PARCELS
    }

    fn listen_pointer_move(&mut self) {
        self.listening = true;
        log::info!("pointer-move hook registered");
    }

    fn unlisten_pointer_move(&mut self) {
        self.listening = false;
        log::info!("pointer-move hook removed");
    }

    fn publish_snap(&mut self, cursor: Point, snap: Option<&SnapResult>) {
        match snap {
            Some(s) => log::info!(
                "marker at ({:.2}, {:.2}) on {} [{}], {:.3} units from cursor",
                s.point.x,
                s.point.y,
                s.geometry,
                s.layer,
                s.distance
            ),
            None => log::info!("marker follows cursor at ({:.2}, {:.2})", cursor.x, cursor.y),
        }
    }

    fn clear_snap_marker(&mut self) {
        log::info!("marker removed");
    }
}

fn main() {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::Builder::from_env(env).init();

    let map = DemoMap {
        pan: Vec2::new(1000.0, 2000.0),
        zoom: 2.0,
        features: vec![
            Feature::new(
                10,
                ROADS.0,
                Boundary::line([(1000.0, 2000.0), (1040.0, 2000.0), (1040.0, 2030.0)]),
            ),
            Feature::new(
                20,
                PARCELS.0,
                Boundary::polygon([
                    (1050.0, 2010.0),
                    (1080.0, 2010.0),
                    (1080.0, 2040.0),
                    (1050.0, 2040.0),
                ]),
            ),
            Feature::new(30, PARCELS.0, Boundary::point((1020.0, 2020.0))),
            // Broken import: skipped at enable.
            Feature::new(31, PARCELS.0, Boundary::point((f64::NAN, 2020.0))),
        ],
        listening: false,
    };

    let mut session = SnapSession::new(SnapConfig::with_tolerance(8.0));
    session.attach(map);
    let summary = session.enable().expect("map is attached");
    log::info!("{} indexed, {} skipped", summary.indexed, summary.skipped);

    let path = [
        Point::new(1010.0, 2002.0),
        Point::new(1039.0, 2015.0),
        Point::new(1045.0, 2025.0),
        Point::new(1021.0, 2019.0),
        Point::new(1100.0, 2100.0),
    ];
    for cursor in path {
        session.on_pointer_move(cursor).expect("map is attached");
    }

    if !session.set_snap_layer(RASTER).expect("map is attached") {
        log::info!("{RASTER} is not a vector layer; snapping stays on all layers");
    }
    session.set_snap_layer(PARCELS).expect("map is attached");
    session.refresh().expect("map is attached");
    session
        .on_pointer_move(Point::new(1010.0, 2002.0))
        .expect("map is attached");

    session.disable();
    let map = session.detach().expect("map is attached");
    assert!(!map.listening);
}
