//! Size-selection parsing and merging.
//!
//! Two input formats reach the engine: a structured list of
//! `{size, quantity}` pairs, and the legacy free-text form
//! `"M (Men's) x2, L (Men's) x1"` still present in persisted rows and older
//! clients. Both must produce the same internal map, and duplicate sizes
//! inside a single input sum before any merge with an existing entry.

use serde::{Deserialize, Serialize};

use raze_core::SizeMap;

/// Structured size request as sent by the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeSelection {
    pub size: String,
    pub quantity: i64,
}

/// Collapse structured selections into a map, summing repeated sizes.
/// Blank labels and non-positive quantities are dropped.
pub fn selections_to_map(selections: &[SizeSelection]) -> SizeMap {
    let mut map = SizeMap::new();
    for sel in selections {
        let size = sel.size.trim();
        if size.is_empty() || sel.quantity <= 0 {
            continue;
        }
        *map.entry(size.to_string()).or_insert(0) += sel.quantity;
    }
    map
}

/// Parse the legacy `"<size> x<qty>, <size> x<qty>"` string.
///
/// A part without an ` x<qty>` suffix (or with an unparsable one) counts as
/// one unit of that size. Repeated sizes sum.
pub fn parse_size_string(input: &str) -> SizeMap {
    let mut map = SizeMap::new();
    for part in input.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (size, qty) = match part.rsplit_once(" x") {
            Some((size, qty_str)) => match qty_str.trim().parse::<i64>() {
                Ok(qty) if qty > 0 => (size.trim(), qty),
                _ => (part, 1),
            },
            None => (part, 1),
        };
        *map.entry(size.to_string()).or_insert(0) += qty;
    }
    map
}

/// Merge an incoming request into an existing entry's sizes: quantities sum
/// per size key, new sizes are added, nothing is ever replaced or lowered.
pub fn merge_sizes(existing: &SizeMap, incoming: &SizeMap) -> SizeMap {
    let mut merged = existing.clone();
    for (size, qty) in incoming {
        *merged.entry(size.clone()).or_insert(0) += qty;
    }
    merged
}

/// Display form stored alongside the map for legacy readers: `"L x2, M x1"`.
pub fn size_map_to_string(sizes: &SizeMap) -> String {
    sizes
        .iter()
        .map(|(size, qty)| format!("{size} x{qty}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sel(size: &str, quantity: i64) -> SizeSelection {
        SizeSelection {
            size: size.to_string(),
            quantity,
        }
    }

    #[test]
    fn structured_and_legacy_inputs_parse_identically() {
        let structured = selections_to_map(&[sel("M", 2), sel("L", 1)]);
        let legacy = parse_size_string("M x2, L x1");
        assert_eq!(structured, legacy);
    }

    #[test]
    fn duplicate_sizes_within_one_input_sum() {
        assert_eq!(
            selections_to_map(&[sel("M", 1), sel("M", 2)]),
            SizeMap::from([("M".to_string(), 3)])
        );
        assert_eq!(
            parse_size_string("M x1, M x2"),
            SizeMap::from([("M".to_string(), 3)])
        );
    }

    #[test]
    fn bare_legacy_token_counts_as_one() {
        assert_eq!(
            parse_size_string("M, L x2"),
            SizeMap::from([("M".to_string(), 1), ("L".to_string(), 2)])
        );
    }

    #[test]
    fn size_labels_may_contain_spaces() {
        // The label itself can contain " x"-free spaces, e.g. gendered cuts.
        assert_eq!(
            parse_size_string("M (Men's) x2, L (Women's) x1"),
            SizeMap::from([("M (Men's)".to_string(), 2), ("L (Women's)".to_string(), 1)])
        );
    }

    #[test]
    fn junk_quantities_fall_back_to_one_unit() {
        assert_eq!(
            parse_size_string("M xtwo"),
            SizeMap::from([("M xtwo".to_string(), 1)])
        );
    }

    #[test]
    fn empty_inputs_parse_to_empty_maps() {
        assert!(parse_size_string("").is_empty());
        assert!(selections_to_map(&[]).is_empty());
        assert!(selections_to_map(&[sel("  ", 2), sel("M", 0)]).is_empty());
    }

    #[test]
    fn merge_adds_and_accumulates_without_replacing() {
        let existing = SizeMap::from([("M".to_string(), 1), ("L".to_string(), 2)]);
        let incoming = SizeMap::from([("M".to_string(), 1), ("XS".to_string(), 1)]);

        let merged = merge_sizes(&existing, &incoming);
        assert_eq!(
            merged,
            SizeMap::from([
                ("M".to_string(), 2),
                ("L".to_string(), 2),
                ("XS".to_string(), 1),
            ])
        );
    }

    #[test]
    fn display_string_round_trips_through_the_parser() {
        let sizes = SizeMap::from([("M".to_string(), 2), ("L".to_string(), 1)]);
        assert_eq!(parse_size_string(&size_map_to_string(&sizes)), sizes);
    }
}
