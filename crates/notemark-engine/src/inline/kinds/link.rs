/// `\link{Title -> https://example.com}`
pub struct Link;

impl Link {
    pub const TAG: &'static str = "link";
    pub const ARROW: &'static str = "->";

    /// Splits link content into `(title, url)`.
    ///
    /// The split happens at the last `->`; without one the whole content is
    /// both title and url. Line breaks become spaces in the title and are
    /// dropped from the url.
    pub fn split(content: &str) -> (String, String) {
        let (title, url) = match content.rfind('>') {
            Some(i) if content[..i].ends_with('-') => (&content[..i - 1], &content[i + 1..]),
            _ => (content, content),
        };
        (title.trim().replace('\n', " "), url.trim().replace('\n', ""))
    }
}
