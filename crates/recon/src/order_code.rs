//! Order-code display formatting.

use std::sync::OnceLock;

use regex::Regex;

static POWDER: OnceLock<Regex> = OnceLock::new();

fn powder_re() -> &'static Regex {
    // Whole word only: "Protein Powerhouse" must not trigger the powder
    // label while "Whey Powder 1kg" must.
    POWDER.get_or_init(|| Regex::new(r"(?i)\bpowder\b").unwrap())
}

/// Render the operator-facing label for one matched row.
///
/// Returns `None` when no code is mapped for the SKU. Precedence:
/// fixed-SKU exception, powder products, variation, plain quantity.
pub fn format_order_code(
    order_code: Option<&str>,
    parent_sku: &str,
    product_name: &str,
    variation: &str,
    quantity: u32,
) -> Option<String> {
    let code = order_code?;
    let quantity = quantity.max(1);

    if parent_sku == "PFFB-2B" {
        // Fixed exception: this SKU keeps its SKU visible on the label.
        return Some(format!("{code} ({parent_sku}) - {quantity}"));
    }
    if powder_re().is_match(product_name) {
        return Some(format!("{code} Powder - {quantity}"));
    }
    if !variation.is_empty() {
        return Some(format!("{code} - {variation} x {quantity}"));
    }
    Some(format!("{code} - {quantity}"))
}
