//! The fourteen custody phases and their display labels.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A product's current station in the custody pipeline.
///
/// The discriminants are the wire values used by the ledger adapter. Use
/// [`Phase::try_from`] to turn a raw value into a phase at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Phase {
    Init = 0,
    ExtractionStarted = 1,
    ExtractionFailed = 2,
    ExtractionCompleted = 3,
    SupplyStarted = 4,
    SupplyFailed = 5,
    SupplyCompleted = 6,
    ManufacturingStarted = 7,
    ManufacturingCompleted = 8,
    DistributionStarted = 9,
    DistributionFailed = 10,
    DistributionCompleted = 11,
    Retail = 12,
    Sold = 13,
}

/// Human-readable label of every phase, indexed by its wire value.
pub const PHASE_LABELS: [&str; 14] = [
    "Init",
    "Resource Extraction Started",
    "Resource Extraction Failed",
    "Resource Extraction Completed",
    "Resource Supply Started",
    "Resource Supply Failed",
    "Resource Supply Completed",
    "Manufacturing Started",
    "Manufacturing Completed",
    "Distribution Started",
    "Distribution Failed",
    "Distribution Completed",
    "Retail",
    "Sold",
];

impl Phase {
    /// All phases in pipeline order.
    pub const ALL: [Phase; 14] = [
        Phase::Init,
        Phase::ExtractionStarted,
        Phase::ExtractionFailed,
        Phase::ExtractionCompleted,
        Phase::SupplyStarted,
        Phase::SupplyFailed,
        Phase::SupplyCompleted,
        Phase::ManufacturingStarted,
        Phase::ManufacturingCompleted,
        Phase::DistributionStarted,
        Phase::DistributionFailed,
        Phase::DistributionCompleted,
        Phase::Retail,
        Phase::Sold,
    ];

    pub fn label(self) -> &'static str {
        PHASE_LABELS[self as usize]
    }

    pub fn is_terminal(self) -> bool {
        self == Phase::Sold
    }
}

impl TryFrom<u8> for Phase {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Phase::ALL.get(value as usize).copied().ok_or(value)
    }
}

impl Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
