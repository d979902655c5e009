use crate::models::AddressComponent;

/// Component types that carry a postal code (or a part of one).
pub const POSTAL_CODE_TYPES: [&str; 3] = ["postal_code", "postal_code_prefix", "postal_code_suffix"];

/// Returns the `long_name` of the first component tagged with any postal-code type.
pub fn extract_postal_code(components: &[AddressComponent]) -> Option<&str> {
    components
        .iter()
        .find(|c| {
            c.types
                .iter()
                .any(|t| POSTAL_CODE_TYPES.contains(&t.as_str()))
        })
        .map(|c| c.long_name.as_str())
}
