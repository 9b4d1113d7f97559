//! First-boot inventory catalog.

use chrono::Utc;

use raze_core::ProductId;
use raze_store::VariantRecord;

const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

fn variant(product_id: ProductId, name: &str, color: &str, size: &str, quantity: i64) -> VariantRecord {
    VariantRecord {
        product_id,
        product_name: name.to_string(),
        color: color.to_string(),
        size: size.to_string(),
        quantity,
        reserved: 0,
        low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        updated_at: Utc::now(),
    }
}

/// The launch catalog, inserted once into an empty store.
///
/// Shorts ship with zero stock until the photo shoot lands; the variants
/// exist so the admin dashboard can top them up without a schema change.
pub fn default_inventory() -> Vec<VariantRecord> {
    let mut records = Vec::new();

    for (color, sizes) in [
        ("Black", [("XS", 15), ("S", 20), ("M", 25), ("L", 20)]),
        ("White", [("XS", 15), ("S", 20), ("M", 25), ("L", 20)]),
    ] {
        for (size, quantity) in sizes {
            records.push(variant(1, "Performance T-Shirt", color, size, quantity));
        }
    }

    for (product_id, name) in [(2, "Performance Shorts (Men)"), (3, "Performance Shorts (Women)")] {
        for size in ["XS", "S", "M", "L"] {
            records.push(variant(product_id, name, "Black", size, 0));
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_no_duplicate_variants() {
        let records = default_inventory();
        let mut keys: Vec<_> = records.iter().map(VariantRecord::key).collect();
        keys.sort_by(|a, b| (a.product_id, &a.color, &a.size).cmp(&(b.product_id, &b.color, &b.size)));
        keys.dedup();
        assert_eq!(keys.len(), records.len());
    }

    #[test]
    fn seeded_records_start_with_no_holds() {
        assert!(default_inventory().iter().all(|r| r.reserved == 0));
    }
}
