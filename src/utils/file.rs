use rand::Rng;
use std::path::{Component, Path};

/// Public URL prefix under which stored uploads are served.
pub const UPLOADS_PREFIX: &str = "/uploads/";

/// Builds `<field>-<epoch-ms>-<random>.<ext>` (no trailing dot when `ext` is empty).
/// The random component is the only collision guard.
pub fn generate_upload_filename(field_name: &str, extension: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: u32 = rand::thread_rng().gen_range(0..=1_000_000_000);
    if extension.is_empty() {
        format!("{}-{}-{}", field_name, millis, suffix)
    } else {
        format!("{}-{}-{}.{}", field_name, millis, suffix, extension)
    }
}

/// Extension for a stored upload: taken from the client's filename when it has a
/// usable one, otherwise guessed from the MIME type.
pub fn resolve_extension(original_filename: Option<&str>, mime_type: &mime::Mime) -> String {
    let from_name = original_filename
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()));

    if let Some(ext) = from_name {
        return ext.to_ascii_lowercase();
    }

    if let Some(ext) = get_file_extension(mime_type.essence_str()) {
        return ext.to_string();
    }

    // Guessed lists are alphabetical, so prefer the subtype when it is one of them.
    let guessed = mime_guess::get_mime_extensions(mime_type).unwrap_or_default();
    let subtype = mime_type.subtype().as_str();
    guessed
        .iter()
        .find(|ext| **ext == subtype)
        .or_else(|| guessed.first())
        .map(|ext| ext.to_string())
        .unwrap_or_default()
}

fn get_file_extension(mime_type: &str) -> Option<&'static str> {
    match mime_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/gif" => Some("gif"),
        _ => None,
    }
}

pub fn public_url(filename: &str) -> String {
    format!("{}{}", UPLOADS_PREFIX, filename)
}

/// Inverse of [`public_url`]; `None` for anything that is not a plain file name
/// inside the uploads directory.
pub fn filename_from_url(photo_url: &str) -> Option<&str> {
    let name = photo_url.strip_prefix(UPLOADS_PREFIX)?;
    is_plain_filename(name).then_some(name)
}

/// True when `name` is a single normal path component (no separators, no `..`).
pub fn is_plain_filename(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
