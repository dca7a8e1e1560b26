use uuid::Uuid;

/// Generates a human readable identifier such as `SLOT-9F0A3B12`.
///
/// The prefix names the entity kind (`STD`, `CRS`, `ROM`, ...); the tail is
/// the first eight hex digits of a fresh v4 UUID, uppercased.
pub fn new_id(prefix: &str) -> String {
    let uuid = Uuid::new_v4().simple().to_string();
    format!("{}-{}", prefix, uuid[..8].to_uppercase())
}
