use uuid::Uuid;

/// Generate a note identifier.
///
/// UUID v7: millisecond timestamp plus randomness, so identifiers are
/// globally unique without any cross-instance coordination and sort
/// roughly by creation time. Nothing downstream relies on the ordering.
pub fn generate() -> String {
    Uuid::now_v7().to_string()
}
