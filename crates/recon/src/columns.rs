//! Schema resolution: map arbitrary export headers to semantic fields.
//!
//! Each marketplace names the same column differently ("Tracking Number*",
//! "trackingCode", "Tracking ID"). Resolution is a fixed table of ordered
//! synonym lists consulted through one two-pass matcher; extending coverage
//! means adding a keyword, never touching the matching logic.

/// Semantic fields the resolver can locate in an export sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    OrderId,
    TrackingNumber,
    ProductName,
    ParentSku,
    VariationName,
    Quantity,
    DealPrice,
    Username,
    ReceiverName,
    PhoneNumber,
    DeliveryAddress,
    SkuWeight,
    ShippingCourier,
}

impl Field {
    pub const ALL: [Field; 13] = [
        Field::OrderId,
        Field::TrackingNumber,
        Field::ProductName,
        Field::ParentSku,
        Field::VariationName,
        Field::Quantity,
        Field::DealPrice,
        Field::Username,
        Field::ReceiverName,
        Field::PhoneNumber,
        Field::DeliveryAddress,
        Field::SkuWeight,
        Field::ShippingCourier,
    ];

    /// Ordered synonym list. Order encodes priority among synonymous
    /// names across the Shopee, Lazada, and TikTok vocabularies; the
    /// specific ones come first so generic substrings ("sku", "shipping")
    /// only catch what nothing else claimed.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Field::OrderId => &[
                "order id",
                "orderid",
                "order_id",
                "order sn",
                "order no",
                "order number",
                "ordernumber",
            ],
            Field::TrackingNumber => &[
                "tracking number",
                "tracking id",
                "tracking no",
                "tracking code",
                "trackingcode",
                "tracking_number",
                "tracking",
                "awb",
                "waybill",
            ],
            Field::ProductName => &[
                "product name",
                "productname",
                "product_name",
                "item name",
                "item",
                "product",
            ],
            Field::ParentSku => &[
                "parent sku",
                "sku reference",
                "sku ref",
                "parent_sku",
                "seller sku",
                "sellersku",
                "sku",
            ],
            Field::VariationName => &["variation name", "variation", "variant", "option"],
            Field::Quantity => &["quantity", "qty", "quantity ordered"],
            Field::DealPrice => &["deal price", "price", "unit price", "selling price"],
            Field::Username => &["username", "buyer", "customer", "username (buyer)"],
            Field::ReceiverName => &["receiver name", "recipient", "receiver", "ship to name"],
            Field::PhoneNumber => &["phone number", "phone", "contact", "mobile", "tel"],
            Field::DeliveryAddress => &[
                "delivery address",
                "address",
                "shipping address",
                "ship to address",
            ],
            Field::SkuWeight => &["sku total weight", "weight", "total weight", "item weight"],
            Field::ShippingCourier => &[
                "shipping option",
                "courier",
                "shipping provider",
                "shippingprovider",
                "shipping",
                "carrier",
                "logistics",
                "shipment method",
            ],
        }
    }
}

/// Find the header a keyword list refers to, or `None` when the field is
/// absent from this sheet (not a failure — the caller treats it as such).
///
/// Two passes, case-insensitive on trimmed headers. Pass 1 requires exact
/// equality, pass 2 accepts substring containment; exact matches go first
/// so that field names which are substrings of others ("sku" inside
/// "seller sku") cannot shadow a precise hit. Within a pass, keywords win
/// in list order, and within a keyword, headers win in column order.
pub fn resolve_column<'a>(headers: &'a [String], keywords: &[&str]) -> Option<&'a str> {
    let folded: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();

    for keyword in keywords {
        if let Some(idx) = folded.iter().position(|h| h == keyword) {
            return Some(&headers[idx]);
        }
    }
    for keyword in keywords {
        if let Some(idx) = folded.iter().position(|h| h.contains(keyword)) {
            return Some(&headers[idx]);
        }
    }
    None
}

/// Every semantic field resolved against one sheet's headers.
///
/// Fields hold the original header name so later cell lookups go through
/// the sheet's own spelling, not the keyword that matched it.
#[derive(Debug, Clone, Default)]
pub struct ResolvedColumns {
    pub order_id: Option<String>,
    pub tracking_number: Option<String>,
    pub product_name: Option<String>,
    pub parent_sku: Option<String>,
    pub variation_name: Option<String>,
    pub quantity: Option<String>,
    pub deal_price: Option<String>,
    pub username: Option<String>,
    pub receiver_name: Option<String>,
    pub phone_number: Option<String>,
    pub delivery_address: Option<String>,
    pub sku_weight: Option<String>,
    pub shipping_courier: Option<String>,
}

impl ResolvedColumns {
    pub fn resolve(headers: &[String]) -> Self {
        let find = |field: Field| resolve_column(headers, field.keywords()).map(str::to_string);
        ResolvedColumns {
            order_id: find(Field::OrderId),
            tracking_number: find(Field::TrackingNumber),
            product_name: find(Field::ProductName),
            parent_sku: find(Field::ParentSku),
            variation_name: find(Field::VariationName),
            quantity: find(Field::Quantity),
            deal_price: find(Field::DealPrice),
            username: find(Field::Username),
            receiver_name: find(Field::ReceiverName),
            phone_number: find(Field::PhoneNumber),
            delivery_address: find(Field::DeliveryAddress),
            sku_weight: find(Field::SkuWeight),
            shipping_courier: find(Field::ShippingCourier),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn exact_match_beats_earlier_substring_candidate() {
        let h = headers(&["orderid2", "Order ID"]);
        assert_eq!(resolve_column(&h, &["order id"]), Some("Order ID"));
    }

    #[test]
    fn exact_wins_even_when_substring_comes_first_in_column_order() {
        let h = headers(&["Order ID", "orderid2"]);
        assert_eq!(resolve_column(&h, &["order id"]), Some("Order ID"));
    }

    #[test]
    fn substring_pass_catches_decorated_headers() {
        let h = headers(&["Tracking Number*"]);
        assert_eq!(
            resolve_column(&h, Field::TrackingNumber.keywords()),
            Some("Tracking Number*")
        );
    }

    #[test]
    fn keyword_order_encodes_priority() {
        // "seller sku" is listed before the bare "sku" fallback, so a sheet
        // carrying both resolves to the specific column.
        let h = headers(&["sku count", "Seller SKU"]);
        assert_eq!(
            resolve_column(&h, Field::ParentSku.keywords()),
            Some("Seller SKU")
        );
    }

    #[test]
    fn column_order_breaks_ties_within_a_keyword() {
        let h = headers(&["Parent SKU Reference No.", "Parent SKU (old)"]);
        assert_eq!(
            resolve_column(&h, Field::ParentSku.keywords()),
            Some("Parent SKU Reference No.")
        );
    }

    #[test]
    fn unresolvable_field_is_absent_not_an_error() {
        let h = headers(&["totally", "unrelated"]);
        assert_eq!(resolve_column(&h, Field::Quantity.keywords()), None);
    }

    #[test]
    fn every_field_covers_at_least_three_synonyms() {
        for field in Field::ALL {
            assert!(
                field.keywords().len() >= 3,
                "{field:?} has too few synonyms to span the platform vocabularies"
            );
        }
    }

    #[test]
    fn camel_case_lazada_headers_resolve() {
        let h = headers(&["orderNumber", "trackingCode", "sellerSku", "shippingAddress"]);
        let cols = ResolvedColumns::resolve(&h);
        assert_eq!(cols.order_id.as_deref(), Some("orderNumber"));
        assert_eq!(cols.tracking_number.as_deref(), Some("trackingCode"));
        assert_eq!(cols.parent_sku.as_deref(), Some("sellerSku"));
        assert_eq!(cols.delivery_address.as_deref(), Some("shippingAddress"));
    }

    #[test]
    fn shopee_headers_resolve() {
        let h = headers(&[
            "Order SN",
            "Tracking Number*",
            "Product Name",
            "Parent SKU Reference No.",
            "Variation Name",
            "Quantity",
            "Deal Price",
            "Username (Buyer)",
            "Receiver Name",
            "Phone Number",
            "Delivery Address",
            "SKU Total Weight",
            "Shipping Option",
        ]);
        let cols = ResolvedColumns::resolve(&h);
        assert_eq!(cols.order_id.as_deref(), Some("Order SN"));
        assert_eq!(cols.shipping_courier.as_deref(), Some("Shipping Option"));
        assert_eq!(cols.sku_weight.as_deref(), Some("SKU Total Weight"));
        assert_eq!(cols.variation_name.as_deref(), Some("Variation Name"));
    }
}
