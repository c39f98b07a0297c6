use std::sync::OnceLock;

use regex::Regex;

/// `\youtube{https://youtu.be/dQw4w9WgXcQ}`
pub struct YouTube;

impl YouTube {
    pub const TAG: &'static str = "youtube";
    pub const EMBED_URL: &'static str = "https://www.youtube-nocookie.com/embed/";
    pub const ASPECT_RATIO: f64 = 16.0 / 9.0;
    /// Horizontal space kept free around the player.
    pub const SIDE_MARGIN: f64 = 30.0;
    pub const ALLOW: &'static str =
        "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture";

    /// Extracts the 11-character video id from a video URL or a bare id.
    pub fn video_id(content: &str) -> Option<String> {
        static URL_REGEX: OnceLock<Regex> = OnceLock::new();
        static ID_REGEX: OnceLock<Regex> = OnceLock::new();

        let content = content.trim();
        let url_regex = URL_REGEX.get_or_init(|| {
            Regex::new(r"^.*(youtu\.be/|youtube(-nocookie)?\.com/(v/|.*u/\w/|embed/|.*v=))([\w-]{11}).*")
                .expect("Invalid YouTube URL regex")
        });
        if let Some(caps) = url_regex.captures(content) {
            return caps.get(4).map(|m| m.as_str().to_string());
        }

        let id_regex =
            ID_REGEX.get_or_init(|| Regex::new(r"^[\w-]{11}$").expect("Invalid YouTube id regex"));
        id_regex.is_match(content).then(|| content.to_string())
    }

    pub fn embed_url(video_id: &str) -> String {
        format!("{}{video_id}", Self::EMBED_URL)
    }

    pub fn max_width(content_width: u32) -> f64 {
        f64::from(content_width) - Self::SIDE_MARGIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://youtu.be/dQw4w9WgXcQ")]
    #[case("https://www.youtube.com/watch?v=dQw4w9WgXcQ")]
    #[case("https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ&t=10")]
    #[case("https://www.youtube.com/embed/dQw4w9WgXcQ")]
    #[case("https://www.youtube-nocookie.com/embed/dQw4w9WgXcQ?rel=0")]
    #[case("http://youtube.com/v/dQw4w9WgXcQ")]
    #[case("https://www.youtube.com/user/Someone#p/u/1/dQw4w9WgXcQ")]
    #[case("dQw4w9WgXcQ")]
    #[case("  dQw4w9WgXcQ\n")]
    fn finds_video_id(#[case] content: &str) {
        assert_eq!(YouTube::video_id(content).as_deref(), Some("dQw4w9WgXcQ"));
    }

    #[rstest]
    #[case("https://vimeo.com/123456789")]
    #[case("short")]
    #[case("https://youtu.be/short")]
    fn rejects_other_content(#[case] content: &str) {
        assert_eq!(YouTube::video_id(content), None);
    }

    #[test]
    fn player_fits_inside_content_column() {
        assert_eq!(YouTube::max_width(588), 558.0);
        assert_eq!(
            YouTube::embed_url("dQw4w9WgXcQ"),
            "https://www.youtube-nocookie.com/embed/dQw4w9WgXcQ"
        );
    }
}
