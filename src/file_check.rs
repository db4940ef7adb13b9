/// Extensions the upload input accepts. Advisory only; nothing sniffs
/// the file content.
pub(crate) const ALLOWED_EXTENSIONS: [&str; 8] =
    ["stl", "3mf", "obj", "amf", "png", "jpg", "jpeg", "pdf"];

pub(crate) const REJECT_ALERT: &str =
    "Invalid file type. Allowed: STL, 3MF, OBJ, AMF, PNG, JPEG, PDF.";

/// Lowercased segment after the last dot. A name with no dot yields the
/// whole name, matching `name.split(".").pop()` in the original.
pub(crate) fn extension_of(filename: &str) -> String {
    filename
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

pub(crate) fn is_allowed(filename: &str) -> bool {
    let ext = extension_of(filename);
    ALLOWED_EXTENSIONS.contains(&ext.as_str())
}
