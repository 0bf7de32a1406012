/// Identifier of the product created during the run.
///
/// The server is free to hand back a JSON number or a JSON string; either way
/// the id is only ever interpolated back into a URL, so it is normalised to
/// its textual form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductId(String);

impl ProductId {
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) if !s.is_empty() => Some(Self(s.clone())),
            serde_json::Value::Number(n) => Some(Self(n.to_string())),
            _ => None,
        }
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
