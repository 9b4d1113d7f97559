//! Waitlist webhook payload construction.

use chrono::Utc;
use serde_json::{json, Value};

use raze_core::SizeMap;

const PRODUCTION_URL: &str = "https://razetraining.com";
const DROP_DATE: &str = "Feb 20";

/// Variants with a dedicated email-optimized render; anything else falls
/// back to the storefront image normalized to an absolute URL.
fn email_image_for_variant(variant: &str) -> Option<String> {
    let file = match variant {
        "Black / Cyan" => "shirt_black_cyan.jpg",
        "Black / Silver" => "shirt_black_silver.jpg",
        "Grey / Cyan" => "shirt_grey_cyan.jpg",
        "Grey / White" => "shirt_grey_white.jpg",
        _ => return None,
    };
    Some(format!("{PRODUCTION_URL}/images/email/{file}"))
}

fn normalize_image(variant: &str, image: Option<&str>) -> String {
    if let Some(url) = email_image_for_variant(variant) {
        return url;
    }
    match image {
        Some(path) if path.starts_with('/') => format!("{PRODUCTION_URL}{path}"),
        Some(url) if url.starts_with("http") => url.to_string(),
        Some(file) if !file.is_empty() => {
            // Bare filename: assume the email-render directory, jpg variant.
            format!("{PRODUCTION_URL}/images/email/{}", file.replace(".png", ".jpg"))
        }
        _ => String::new(),
    }
}

/// `"M - 1 item, L - 2 items"` — the form the email template interpolates.
fn sizes_display(sizes: &SizeMap) -> String {
    sizes
        .iter()
        .map(|(size, qty)| {
            let noun = if *qty == 1 { "item" } else { "items" };
            format!("{size} - {qty} {noun}")
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build the join/update notification payload.
pub fn waitlist_payload(
    email: &str,
    product_name: &str,
    product_variant: &str,
    product_image: Option<&str>,
    sizes: &SizeMap,
    access_code: &str,
    is_update: bool,
) -> Value {
    json!({
        "event_type": if is_update { "waitlist_update" } else { "waitlist_join" },
        "is_update": is_update,
        "email": email,
        "product_name": product_name,
        "product_variant": product_variant,
        "product_image": normalize_image(product_variant, product_image),
        "logo_url": format!("{PRODUCTION_URL}/images/logo/raze_logo.png"),
        "sizes": sizes,
        "sizes_display": sizes_display(sizes),
        "access_code": access_code,
        "drop_date": DROP_DATE,
        "timestamp": Utc::now().to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_variants_use_the_email_render() {
        let img = normalize_image("Black / Cyan", Some("/images/products/anything.png"));
        assert_eq!(img, "https://razetraining.com/images/email/shirt_black_cyan.jpg");
    }

    #[test]
    fn relative_paths_become_absolute() {
        assert_eq!(
            normalize_image("Red / Gold", Some("/images/products/p.png")),
            "https://razetraining.com/images/products/p.png"
        );
        assert_eq!(
            normalize_image("Red / Gold", Some("shorts.png")),
            "https://razetraining.com/images/email/shorts.jpg"
        );
        assert_eq!(normalize_image("Red / Gold", None), "");
    }

    #[test]
    fn sizes_display_pluralizes_per_line() {
        let sizes = SizeMap::from([("M".to_string(), 1), ("L".to_string(), 2)]);
        assert_eq!(sizes_display(&sizes), "L - 2 items, M - 1 item");
    }

    #[test]
    fn payload_distinguishes_join_from_update() {
        let sizes = SizeMap::from([("M".to_string(), 1)]);
        let join = waitlist_payload("k@raze.dev", "Tee", "Black / Cyan", None, &sizes, "RAZE-AB12CD34", false);
        assert_eq!(join["event_type"], "waitlist_join");
        assert_eq!(join["access_code"], "RAZE-AB12CD34");

        let update = waitlist_payload("k@raze.dev", "Tee", "Black / Cyan", None, &sizes, "RAZE-AB12CD34", true);
        assert_eq!(update["event_type"], "waitlist_update");
        assert_eq!(update["is_update"], true);
    }
}
