use crate::Variant;

/// Name for a thumbnail saved to the device:
/// `youtube-thumbnail-{id}[-upscaled[-{label}]].jpg`.
///
/// `fallback_stamp` replaces an empty video id.
pub fn download_filename(
    video_id: &str,
    fallback_stamp: i64,
    variant: Variant,
    resolution_label: Option<&str>,
) -> String {
    let stem = if video_id.is_empty() {
        fallback_stamp.to_string()
    } else {
        video_id.to_string()
    };
    let suffix = match (variant, resolution_label) {
        (Variant::Original, _) => String::new(),
        (Variant::Upscaled, Some(label)) if !label.is_empty() => format!("-upscaled-{label}"),
        (Variant::Upscaled, _) => "-upscaled".to_string(),
    };
    format!("youtube-thumbnail-{stem}{suffix}.jpg")
}
