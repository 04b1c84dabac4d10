//! Canonical anchor table: where each chakra sits on the figure's spine.
//!
//! Coordinates are normalized to the spine rectangle. Every anchor sits on
//! the centre line (`x == 0.5`) and `y` strictly increases from crown to
//! root. The layout engine depends on that ordering; it is checked at
//! compile time below.

use serde::{Deserialize, Serialize};

use crate::chakra::ChakraId;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChakraAnchor {
    pub id: ChakraId,
    pub x: f64,
    pub y: f64,
}

/// Vertical extent of the anchors, in normalized spine coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpineRange {
    pub top: f64,
    pub bottom: f64,
}

const ANCHORS: [ChakraAnchor; 7] = [
    ChakraAnchor { id: ChakraId::Crown, x: 0.5, y: 0.06 },
    ChakraAnchor { id: ChakraId::ThirdEye, x: 0.5, y: 0.17 },
    ChakraAnchor { id: ChakraId::Throat, x: 0.5, y: 0.31 },
    ChakraAnchor { id: ChakraId::Heart, x: 0.5, y: 0.5 },
    ChakraAnchor { id: ChakraId::SolarPlexus, x: 0.5, y: 0.62 },
    ChakraAnchor { id: ChakraId::Sacral, x: 0.5, y: 0.74 },
    ChakraAnchor { id: ChakraId::Root, x: 0.5, y: 0.86 },
];

const fn anchors_well_formed(table: &[ChakraAnchor]) -> bool {
    let mut i = 0;
    while i < table.len() {
        let a = &table[i];
        if a.x != 0.5 || a.y < 0.0 || a.y > 1.0 {
            return false;
        }
        if i > 0 && table[i - 1].y >= a.y {
            return false;
        }
        i += 1;
    }
    true
}

const _: () = assert!(
    anchors_well_formed(&ANCHORS),
    "chakra anchors must sit on x = 0.5 with y strictly increasing crown to root"
);

/// A copy of the anchor table, crown first.
pub fn chakra_positions() -> Vec<ChakraAnchor> {
    ANCHORS.to_vec()
}

pub fn anchor(id: ChakraId) -> ChakraAnchor {
    ANCHORS[id as usize]
}

pub fn spine_range() -> SpineRange {
    SpineRange {
        top: ANCHORS[0].y,
        bottom: ANCHORS[ANCHORS.len() - 1].y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_crown_to_root() {
        let positions = chakra_positions();
        assert_eq!(positions.len(), 7);
        assert_eq!(positions[0].id, ChakraId::Crown);
        assert_eq!(positions[6].id, ChakraId::Root);
        for pair in positions.windows(2) {
            assert!(pair[0].y < pair[1].y, "{:?} must sit above {:?}", pair[0].id, pair[1].id);
        }
        assert!(positions.iter().all(|a| a.x == 0.5));
    }

    #[test]
    fn test_table_matches_enum_order() {
        for id in ChakraId::ALL {
            assert_eq!(anchor(id).id, id);
        }
    }

    #[test]
    fn test_copy_is_defensive() {
        let mut positions = chakra_positions();
        positions[0].y = 0.99;
        assert_eq!(chakra_positions()[0].y, 0.06);
    }

    #[test]
    fn test_spine_range() {
        let range = spine_range();
        assert_eq!(range.top, anchor(ChakraId::Crown).y);
        assert_eq!(range.bottom, anchor(ChakraId::Root).y);
        assert!(range.top < range.bottom);
    }

    #[test]
    fn test_rejects_misordered_table() {
        let mut table = ANCHORS;
        table.swap(2, 3);
        assert!(!anchors_well_formed(&table));
        let mut off_axis = ANCHORS;
        off_axis[4].x = 0.4;
        assert!(!anchors_well_formed(&off_axis));
    }
}
