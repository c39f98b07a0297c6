use notemark_syntax::TagAttributes;

/// Final pixel size of an embedded image or video.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaSize {
    pub width: f64,
    pub height: f64,
}

/// Reads a dimension attribute such as `300` or `300px`.
pub fn parse_dimension(value: &str) -> Option<f64> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    number
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

/// Sizes media with the given aspect ratio (width / height) to fit in
/// `max_width`.
///
/// An explicit `width` that fits wins, then an explicit `height` that fits,
/// then both when both fit. Anything else fills the available width.
pub fn compute_media_size(attributes: &TagAttributes, aspect_ratio: f64, max_width: f64) -> MediaSize {
    let width = attributes.get("width").and_then(parse_dimension);
    let height = attributes.get("height").and_then(parse_dimension);
    let max_height = max_width / aspect_ratio;

    let (width, height) = match (width, height) {
        (Some(w), None) if w <= max_width => (w, w / aspect_ratio),
        (None, Some(h)) if h <= max_height => (h * aspect_ratio, h),
        (Some(w), Some(h)) if w <= max_width && h <= max_height => (w, h),
        _ => (max_width, max_height),
    };
    MediaSize { width, height }
}

/// Formats a pixel value for an HTML attribute: at most three decimals,
/// no trailing zeros.
pub fn format_dimension(value: f64) -> String {
    let fixed = format!("{value:.3}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() { "0".to_string() } else { trimmed.to_string() }
}
