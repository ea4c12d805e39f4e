//! Small layout helpers.

/// Approximate advance width of a Helvetica string. The built-in faces
/// average close to half an em per glyph, which is accurate enough for
/// right-aligning and centering short runs of digits and labels.
pub fn approx_text_width(content: &str, font_size: f32) -> f32 {
    content.chars().count() as f32 * font_size * 0.5
}

/// Truncates `content` to `budget` characters, appending a two-dot
/// marker when anything was cut. Operates on chars, not bytes.
pub fn truncate_with_ellipsis(content: &str, budget: usize) -> String {
    if content.chars().count() <= budget {
        return content.to_string();
    }
    let kept: String = content.chars().take(budget.saturating_sub(2)).collect();
    format!("{kept}..")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_strings_pass_through() {
        assert_eq!(truncate_with_ellipsis("Stylo", 24), "Stylo");
    }

    #[test]
    fn long_strings_get_the_marker_within_budget() {
        let long = "Un intitulé de produit vraiment interminable";
        let out = truncate_with_ellipsis(long, 24);
        assert_eq!(out.chars().count(), 24);
        assert!(out.ends_with(".."));
    }

    #[test]
    fn truncation_respects_multibyte_chars() {
        let s = "ééééééééééééééééééééééééééééé";
        let out = truncate_with_ellipsis(s, 10);
        assert_eq!(out.chars().count(), 10);
    }

    #[test]
    fn width_estimate_scales_with_size() {
        assert_eq!(approx_text_width("1234", 10.0), 20.0);
        assert_eq!(approx_text_width("", 10.0), 0.0);
    }
}
