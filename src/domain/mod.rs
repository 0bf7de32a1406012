mod new_product;
mod product_id;
mod session_token;
mod sku;
mod test_identity;

pub use new_product::{NewProduct, PRODUCT_NAME, ProductRecord};
pub use product_id::ProductId;
pub use session_token::{SessionToken, TokenError};
pub use sku::Sku;
pub use test_identity::TestIdentity;
