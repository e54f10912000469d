//! Display data pools for generated vessels

use rand::Rng;

use crate::components::VesselKind;

/// Pick a random entry from a non-empty pool
pub fn pick<'a, T>(pool: &'a [T], rng: &mut impl Rng) -> &'a T {
    &pool[rng.gen_range(0..pool.len())]
}

/// Ambient kinds, weighted towards merchant traffic
pub static KIND_BAG: &[VesselKind] = &[
    VesselKind::Cargo,
    VesselKind::Cargo,
    VesselKind::Cargo,
    VesselKind::Tanker,
    VesselKind::Tanker,
    VesselKind::Passenger,
    VesselKind::Fishing,
    VesselKind::Fishing,
    VesselKind::Military,
];

pub static VESSEL_NAMES: &[&str] = &[
    "Atlantic Pioneer",
    "Sea Falcon",
    "Nordic Star",
    "Pacific Trader",
    "Ocean Dream",
    "Baltic Sun",
    "Mediterranean Spirit",
    "Caribbean Breeze",
    "Gulf Endeavour",
    "Arctic Venture",
    "Victoria Maru",
    "Horizon Quest",
    "Coral Prince",
    "Blue Marlin",
    "Iron Hawk",
    "Silver Wave",
    "Thunder Bay",
    "Cape Agulhas",
    "Grand Voyager",
    "Sea Phoenix",
    "Nordic Carrier",
    "Baltic Trader",
    "Aegean Star",
    "Black Sea Express",
    "Gulf Pioneer",
    "Amazon Spirit",
    "Congo Trader",
    "Ivory Coast Runner",
    "Sahara Wind",
    "Benguela Current",
    "North Sea Giant",
    "Channel Trader",
    "Bay of Biscay",
    "Canary Current",
    "Guinea Gulf",
];

/// Flag states (ISO 3166 alpha-2)
pub static FLAGS: &[&str] = &[
    "CA", "FR", "GB", "DE", "NL", "NO", "GR", "PA", "BS", "SG", "CN", "US", "IT", "ES", "BR",
    "CI", "DK", "RU", "TR", "IN",
];

pub static PORTS: &[&str] = &[
    "Rotterdam",
    "Marseille",
    "Dakar",
    "Lagos",
    "Le Havre",
    "Hamburg",
    "Barcelona",
    "Casablanca",
    "Montreal",
    "New York",
];

pub static CARGOES: &[&str] = &[
    "Containers",
    "Crude oil",
    "LNG",
    "Ore",
    "Chemicals",
    "Dry bulk",
];

/// Hull lengths in meters
pub static LENGTHS_M: &[u32] = &[180, 210, 250, 320, 145];

/// Gross tonnages
pub static TONNAGES_GT: &[u32] = &[18_000, 32_500, 55_000, 78_000, 12_000];
