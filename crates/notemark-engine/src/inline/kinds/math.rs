use super::Html;
use crate::env::MathTypesetter;

/// `\math{...}` and the display-mode `\Math{...}`.
pub struct Math;

impl Math {
    pub const INLINE_TAG: &'static str = "math";
    pub const DISPLAY_TAG: &'static str = "Math";

    pub fn is_display(tag: &str) -> bool {
        tag == Self::DISPLAY_TAG
    }

    /// Typesets an expression and wraps the result as a length-prefixed
    /// `\html|N|...` invocation.
    pub fn to_html_tag(expression: &str, display: bool, math: &dyn MathTypesetter) -> String {
        let expression = expression.replace('\n', " ");
        Html::passthrough(&math.typeset(&expression, display))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PlaceholderMath;

    #[test]
    fn typeset_output_is_wrapped_and_escaped() {
        assert_eq!(
            Math::to_html_tag("x^2\n+ 1", false, &PlaceholderMath),
            "\\html|35|<span>{inline math: x^2 + 1}</span>"
        );
    }

    #[test]
    fn display_variant_is_capitalised() {
        assert!(Math::is_display("Math"));
        assert!(!Math::is_display("math"));
    }
}
