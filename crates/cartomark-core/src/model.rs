//! Read-only access to the host data model.

use crate::entity::{
    Address, Category, City, Hazard, ParkingLotType, Segment, SegmentId, Street, Venue, VenueId,
};

/// The host data model, as the styling engine sees it.
///
/// Accessors return snapshots of the currently loaded entities (the host
/// typically holds only what the viewport covers). Derived queries expose
/// host-computed attributes that are not stored on the entities themselves.
pub trait MapDataModel {
    fn segments(&self) -> Vec<Segment>;
    fn streets(&self) -> Vec<Street>;
    fn cities(&self) -> Vec<City>;
    fn venues(&self) -> Vec<Venue>;
    fn hazards(&self) -> Vec<Hazard>;

    /// Whether the segment is part of a toll road.
    fn is_toll_segment(&self, id: SegmentId) -> bool;

    /// Whether the current user may edit the segment.
    fn has_edit_permission(&self, id: SegmentId) -> bool;

    /// Resolve a venue's address.
    fn venue_address(&self, id: VenueId) -> Option<Address>;

    /// The parking-lot access subtype, when one has been set.
    fn parking_lot_type(&self, id: VenueId) -> Option<ParkingLotType>;

    /// The host's list of category groups (main categories).
    fn venue_main_categories(&self) -> Vec<Category>;

    /// The logged-in user's name, if known.
    fn current_user(&self) -> Option<String>;
}
