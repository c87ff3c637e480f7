//! Road segment snapshot and its attribute types.

use bitflags::bitflags;

use super::{JunctionId, Modification, NodeId, SegmentId, StreetId};

/// A road-type code, ordered by importance.
///
/// The host assigns numeric codes; the ranges those codes fall into drive
/// several styling rules, so the code itself is kept rather than an
/// exhaustive enum. Unknown codes degrade to "no rule matches".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoadType(pub u8);

impl RoadType {
    pub const STREET: Self = Self(1);
    pub const PRIMARY_STREET: Self = Self(2);
    pub const FREEWAY: Self = Self(3);
    pub const RAMP: Self = Self(4);
    pub const WALKING_TRAIL: Self = Self(5);
    pub const MAJOR_HIGHWAY: Self = Self(6);
    pub const MINOR_HIGHWAY: Self = Self(7);
    pub const OFF_ROAD: Self = Self(8);
    pub const PEDESTRIAN_BOARDWALK: Self = Self(10);
    pub const FERRY: Self = Self(14);
    pub const STAIRWAY: Self = Self(16);
    pub const PRIVATE_ROAD: Self = Self(17);
    pub const RAILROAD: Self = Self(18);
    pub const RUNWAY: Self = Self(19);
    pub const PARKING_LOT_ROAD: Self = Self(20);
    pub const NARROW_STREET: Self = Self(22);

    /// The raw host code.
    #[inline]
    pub const fn code(self) -> u8 {
        self.0
    }

    /// Whether the type sits in the major-roads range that stays visible at
    /// coarse zoom levels.
    #[inline]
    pub const fn in_major_range(self) -> bool {
        self.0 >= 2 && self.0 <= 7
    }

    /// Whether the type belongs to the standard street/highway network.
    #[inline]
    pub const fn is_standard(self) -> bool {
        self.0 < 8
    }

    /// Whether the type is one of the special types outside the road
    /// network proper.
    #[inline]
    pub const fn is_special(self) -> bool {
        self.0 >= 9
    }

    /// Drivable types excluded from routing.
    #[inline]
    pub const fn in_non_routable_class(self) -> bool {
        matches!(self.0, 8 | 20 | 17)
    }

    /// Types that cannot be driven at all.
    #[inline]
    pub const fn in_non_drivable_class(self) -> bool {
        matches!(self.0, 5 | 10 | 16 | 18 | 19 | 14)
    }
}

/// Travel direction of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Both directions drivable.
    #[default]
    TwoWay,
    /// One-way, A to B.
    Forward,
    /// One-way, B to A.
    Reverse,
}

impl Direction {
    #[inline]
    pub const fn is_two_way(self) -> bool {
        matches!(self, Self::TwoWay)
    }

    /// Whether travel in the forward (A to B) direction is allowed.
    #[inline]
    pub const fn allows_forward(self) -> bool {
        matches!(self, Self::TwoWay | Self::Forward)
    }

    /// Whether travel in the reverse (B to A) direction is allowed.
    #[inline]
    pub const fn allows_reverse(self) -> bool {
        matches!(self, Self::TwoWay | Self::Reverse)
    }
}

/// A per-direction speed limit record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpeedLimit {
    /// Posted limit, if one has been entered.
    pub value: Option<u16>,
    /// Whether an editor has confirmed the value.
    pub verified: bool,
}

impl SpeedLimit {
    /// A limit counts as unset until a value is present and verified.
    #[inline]
    pub const fn is_unset(&self) -> bool {
        self.value.is_none() || !self.verified
    }
}

bitflags! {
    /// Per-segment boolean attribute flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SegmentFlags: u16 {
        const FWD_SPEED_CAMERA = 1 << 0;
        const REV_SPEED_CAMERA = 1 << 1;
        const FWD_LANES = 1 << 2;
        const REV_LANES = 1 << 3;
        const TUNNEL = 1 << 4;
        const UNPAVED = 1 << 5;
        const HEADLIGHTS = 1 << 6;
        const BEACONS = 1 << 7;
        const NEARBY_HOV = 1 << 8;
    }
}

impl SegmentFlags {
    /// Whether a speed camera covers either direction.
    #[inline]
    pub const fn has_speed_camera(&self) -> bool {
        self.intersects(Self::FWD_SPEED_CAMERA.union(Self::REV_SPEED_CAMERA))
    }

    /// Whether lane guidance is present for either direction.
    #[inline]
    pub const fn has_lane_guidance(&self) -> bool {
        self.intersects(Self::FWD_LANES.union(Self::REV_LANES))
    }
}

/// A per-segment routing-preference category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoutingPreference {
    Street,
    PrimaryStreet,
    Freeway,
    MajorHighway,
    MinorHighway,
}

impl RoutingPreference {
    /// The host wire code for this category.
    pub const fn code(self) -> u8 {
        match self {
            Self::Street => 1,
            Self::PrimaryStreet => 2,
            Self::Freeway => 3,
            Self::MajorHighway => 6,
            Self::MinorHighway => 7,
        }
    }

    /// Decode a host wire code.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Street),
            2 => Some(Self::PrimaryStreet),
            3 => Some(Self::Freeway),
            6 => Some(Self::MajorHighway),
            7 => Some(Self::MinorHighway),
            _ => None,
        }
    }
}

/// A read-only snapshot of a road segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub id: SegmentId,
    pub road_type: RoadType,
    pub direction: Direction,
    /// Edit restriction rank; 0 means unlocked.
    pub lock_rank: u8,
    pub has_restrictions: bool,
    pub primary_street: Option<StreetId>,
    pub alternate_streets: Vec<StreetId>,
    /// Present when the segment belongs to a roundabout.
    pub junction: Option<JunctionId>,
    pub from_node: Option<NodeId>,
    pub to_node: Option<NodeId>,
    pub has_house_numbers: bool,
    pub fwd_speed_limit: SpeedLimit,
    pub rev_speed_limit: SpeedLimit,
    pub flags: SegmentFlags,
    /// Grade level; negative values are below grade.
    pub elevation: i8,
    pub routing_preference: Option<RoutingPreference>,
    pub modification: Modification,
}

impl Segment {
    #[inline]
    pub fn is_one_way(&self) -> bool {
        !self.direction.is_two_way()
    }

    #[inline]
    pub fn is_roundabout(&self) -> bool {
        self.junction.is_some()
    }

    /// Whether both end nodes are absent (a freshly drawn, unsaved road).
    #[inline]
    pub fn is_edgeless(&self) -> bool {
        self.from_node.is_none() && self.to_node.is_none()
    }
}
