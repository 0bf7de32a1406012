use crate::domain::Sku;

pub const PRODUCT_NAME: &str = "Gaming Mouse";

const PRODUCT_TYPE: &str = "Electronics";
const PRODUCT_IMAGE_URL: &str = "https://example.com/mouse.jpg";
const PRODUCT_DESCRIPTION: &str = "A high-performance gaming mouse.";
const INITIAL_QUANTITY: i64 = 50;
const PRICE: f64 = 79.99;

/// The fixed-shape payload the suite creates; only the SKU varies per run.
#[derive(Debug, serde::Serialize)]
pub struct NewProduct {
    name: &'static str,
    #[serde(rename = "type")]
    product_type: &'static str,
    sku: String,
    image_url: &'static str,
    description: &'static str,
    quantity: i64,
    price: f64,
}

impl NewProduct {
    pub fn gaming_mouse(sku: Sku) -> Self {
        Self {
            name: PRODUCT_NAME,
            product_type: PRODUCT_TYPE,
            sku: sku.as_ref().to_string(),
            image_url: PRODUCT_IMAGE_URL,
            description: PRODUCT_DESCRIPTION,
            quantity: INITIAL_QUANTITY,
            price: PRICE,
        }
    }
}

/// A product as observed through the listing endpoint.
///
/// The server returns full rows; only the fields the final assertion needs
/// are deserialized, everything else is ignored.
#[derive(Debug, serde::Deserialize)]
pub struct ProductRecord {
    pub name: String,
    pub quantity: i64,
}
