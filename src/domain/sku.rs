use rand::Rng;
use rand::distributions::Uniform;

const SKU_PREFIX: &str = "GM-";
const SKU_SUFFIX_LENGTH: usize = 6;

/// A stock-keeping unit of the form `GM-XXXXXX` (six uppercase ASCII letters).
///
/// A fresh suffix is generated for every run so that repeated runs against the
/// same server never collide on the SKU column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sku(String);

impl Sku {
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let uppercase = Uniform::new_inclusive(b'A', b'Z');
        let suffix: String = (0..SKU_SUFFIX_LENGTH)
            .map(|_| rng.sample(uppercase) as char)
            .collect();
        Self(format!("{SKU_PREFIX}{suffix}"))
    }
}

impl AsRef<str> for Sku {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Sku {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
