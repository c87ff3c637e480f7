//! Permanent hazard snapshot.

use super::{HazardId, Modification};

/// A read-only snapshot of a permanent hazard.
///
/// Hazards carry no geometry of their own; their display geometry is
/// borrowed from the host's hazard rendering layers when the mirror
/// feature is created.
#[derive(Debug, Clone, PartialEq)]
pub struct Hazard {
    pub id: HazardId,
    pub modification: Modification,
}
