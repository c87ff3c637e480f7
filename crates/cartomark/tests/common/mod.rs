//! A minimal in-memory host for integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};

use cartomark_core::entity::{
    Address, Category, City, CityId, Direction, FeatureId, Hazard, HazardId, Modification, NodeId,
    ParkingLotType, RoadType, Segment, SegmentFlags, SegmentId, SpeedLimit, Street, StreetId,
    Venue, VenueId,
};
use cartomark_core::{
    ChangeRepository, Color, DashPattern, DisplayElement, DisplaySurface, ElementStyle,
    EntityKind, Geometry, HostEvents, LayerError, LayerKind, LayerSpec, MapDataModel, MapEvent,
    ModelEvent, OverlayFeature, RawRepositoryEvent, Signal, StylePatch, TrackError,
};

/// Route engine tracing through the test harness.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// The rest style the host draws unhighlighted segments with.
pub fn neutral_segment_style() -> ElementStyle {
    ElementStyle {
        stroke: Color::from_hex("#dd7700").unwrap(),
        stroke_opacity: 0.001,
        stroke_width: 6.0,
        dash: DashPattern::Solid,
        fill: Color::TRANSPARENT,
    }
}

/// The neutral style the host draws venues with.
pub fn neutral_venue_style() -> ElementStyle {
    ElementStyle {
        stroke: Color::from_hex("#ca9ace").unwrap(),
        stroke_opacity: 1.0,
        stroke_width: 2.0,
        dash: DashPattern::Solid,
        fill: Color::from_hex("#c290c6").unwrap(),
    }
}

#[derive(Debug, Clone)]
pub struct FakeElement {
    pub style: ElementStyle,
    pub writes: u32,
}

impl DisplayElement for FakeElement {
    fn style(&self) -> ElementStyle {
        self.style
    }

    fn apply(&mut self, patch: &StylePatch) {
        patch.apply_to(&mut self.style);
        self.writes += 1;
    }
}

#[derive(Default)]
pub struct FakeSurface {
    pub zoom: u8,
    pub layers: Vec<LayerKind>,
    pub elements: HashMap<(LayerKind, FeatureId), FakeElement>,
    pub geometries: HashMap<FeatureId, Geometry>,
}

impl FakeSurface {
    pub fn new() -> Self {
        Self {
            zoom: 5,
            ..Default::default()
        }
    }

    pub fn insert_element(
        &mut self,
        layer: LayerKind,
        id: impl Into<FeatureId>,
        style: ElementStyle,
    ) {
        self.elements
            .insert((layer, id.into()), FakeElement { style, writes: 0 });
    }

    pub fn element(&self, layer: LayerKind, id: impl Into<FeatureId>) -> &FakeElement {
        &self.elements[&(layer, id.into())]
    }

    pub fn has_feature(&self, layer: LayerKind, id: impl Into<FeatureId>) -> bool {
        self.elements.contains_key(&(layer, id.into()))
    }
}

impl DisplaySurface for FakeSurface {
    fn zoom(&self) -> u8 {
        self.zoom
    }

    fn add_layer(&mut self, spec: &LayerSpec) -> Result<(), LayerError> {
        if self.layers.contains(&spec.kind) {
            return Err(LayerError::AlreadyExists(spec.kind));
        }
        self.layers.push(spec.kind);
        Ok(())
    }

    fn add_feature(&mut self, layer: LayerKind, feature: OverlayFeature) {
        self.elements.insert(
            (layer, feature.id),
            FakeElement {
                style: ElementStyle::default(),
                writes: 0,
            },
        );
    }

    fn remove_feature(&mut self, layer: LayerKind, id: FeatureId) {
        self.elements.remove(&(layer, id));
    }

    fn element_mut(
        &mut self,
        layer: LayerKind,
        id: FeatureId,
    ) -> Option<&mut dyn DisplayElement> {
        self.elements
            .get_mut(&(layer, id))
            .map(|e| e as &mut dyn DisplayElement)
    }

    fn feature_geometry(&self, id: FeatureId) -> Option<Geometry> {
        self.geometries.get(&id).cloned()
    }
}

#[derive(Default)]
pub struct FakeModel {
    pub segments: Vec<Segment>,
    pub streets: Vec<Street>,
    pub cities: Vec<City>,
    pub venues: Vec<Venue>,
    pub hazards: Vec<Hazard>,
    pub toll: HashSet<SegmentId>,
    pub no_permission: HashSet<SegmentId>,
    pub addresses: HashMap<VenueId, Address>,
    pub parking: HashMap<VenueId, ParkingLotType>,
    pub main_categories: Vec<Category>,
    pub user: Option<String>,
}

impl MapDataModel for FakeModel {
    fn segments(&self) -> Vec<Segment> {
        self.segments.clone()
    }
    fn streets(&self) -> Vec<Street> {
        self.streets.clone()
    }
    fn cities(&self) -> Vec<City> {
        self.cities.clone()
    }
    fn venues(&self) -> Vec<Venue> {
        self.venues.clone()
    }
    fn hazards(&self) -> Vec<Hazard> {
        self.hazards.clone()
    }
    fn is_toll_segment(&self, id: SegmentId) -> bool {
        self.toll.contains(&id)
    }
    fn has_edit_permission(&self, id: SegmentId) -> bool {
        !self.no_permission.contains(&id)
    }
    fn venue_address(&self, id: VenueId) -> Option<Address> {
        self.addresses.get(&id).cloned()
    }
    fn parking_lot_type(&self, id: VenueId) -> Option<ParkingLotType> {
        self.parking.get(&id).copied()
    }
    fn venue_main_categories(&self) -> Vec<Category> {
        self.main_categories.clone()
    }
    fn current_user(&self) -> Option<String> {
        self.user.clone()
    }
}

#[derive(Default)]
pub struct FakeRepository {
    handlers: Vec<Box<dyn Fn(RawRepositoryEvent) + Send + Sync>>,
}

impl FakeRepository {
    pub fn emit(&self, event: RawRepositoryEvent) {
        for handler in &self.handlers {
            handler(event.clone());
        }
    }
}

impl ChangeRepository for FakeRepository {
    fn subscribe(&mut self, handler: Box<dyn Fn(RawRepositoryEvent) + Send + Sync>) {
        self.handlers.push(handler);
    }
}

#[derive(Default)]
pub struct FakeEvents {
    pub map: Signal<MapEvent>,
    pub model: Signal<ModelEvent>,
    pub native_kinds: HashSet<EntityKind>,
    pub repositories: HashMap<EntityKind, FakeRepository>,
}

impl HostEvents for FakeEvents {
    fn map_events(&self) -> Signal<MapEvent> {
        self.map.clone()
    }
    fn model_events(&self) -> Signal<ModelEvent> {
        self.model.clone()
    }
    fn track(&mut self, kind: EntityKind) -> Result<(), TrackError> {
        if self.native_kinds.contains(&kind) {
            Ok(())
        } else {
            Err(TrackError::UnsupportedKind(kind))
        }
    }
    fn repository(&mut self, kind: EntityKind) -> Option<&mut dyn ChangeRepository> {
        self.repositories
            .get_mut(&kind)
            .map(|r| r as &mut dyn ChangeRepository)
    }
}

/// A plain named street segment with sensible defaults.
pub fn basic_segment(id: u64, street: Option<u64>) -> Segment {
    Segment {
        id: SegmentId(id),
        road_type: RoadType::STREET,
        direction: Direction::TwoWay,
        lock_rank: 0,
        has_restrictions: false,
        primary_street: street.map(StreetId),
        alternate_streets: vec![],
        junction: None,
        from_node: Some(NodeId(id * 10)),
        to_node: Some(NodeId(id * 10 + 1)),
        has_house_numbers: true,
        fwd_speed_limit: SpeedLimit {
            value: Some(50),
            verified: true,
        },
        rev_speed_limit: SpeedLimit {
            value: Some(50),
            verified: true,
        },
        flags: SegmentFlags::empty(),
        elevation: 0,
        routing_preference: None,
        modification: Modification::default(),
    }
}

pub fn basic_street(id: u64, name: &str, city: Option<u64>) -> Street {
    Street {
        id: StreetId(id),
        name: name.to_owned(),
        city: city.map(CityId),
    }
}

pub fn basic_city(id: u64, name: &str) -> City {
    City {
        id: CityId(id),
        name: name.to_owned(),
        state: None,
        country: None,
    }
}

pub fn basic_venue(id: u64, geometry: cartomark_core::entity::GeometryKind) -> Venue {
    Venue {
        id: VenueId(id),
        geometry,
        name: "Corner Shop".to_owned(),
        residential: false,
        lock_rank: 0,
        categories: vec![Category::Other("SHOPPING".to_owned())],
        external_providers: vec!["prov:1".to_owned()],
        being_edited: false,
        selected: false,
        modification: Modification::default(),
    }
}

pub fn basic_hazard(id: u64, updated_by: &str) -> Hazard {
    Hazard {
        id: HazardId(id),
        modification: Modification {
            updated_on: Some(chrono::Utc::now()),
            updated_by: Some(updated_by.to_owned()),
            ..Default::default()
        },
    }
}
