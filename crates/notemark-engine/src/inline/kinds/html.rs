/// `\html{...}` and `\html|N|...` raw markup passthrough.
pub struct Html;

impl Html {
    pub const TAG: &'static str = "html";

    /// Wraps markup in a length-prefixed `\html|N|...` invocation so it
    /// survives another trip through the inline parser byte for byte,
    /// braces and backslashes included.
    pub fn passthrough(markup: &str) -> String {
        format!("\\{}|{}|{markup}", Self::TAG, markup.len())
    }
}
