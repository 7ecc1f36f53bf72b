//! HTML minifier backed by `minify-html`, with embedded CSS and JS minified too.

use super::backend::{Minifier, MinifyOptions, TransformError};

pub struct HtmlMinifier;

impl HtmlMinifier {
    pub fn new() -> Self {
        Self
    }

    fn cfg(options: &MinifyOptions) -> minify_html::Cfg {
        let mut cfg = minify_html::Cfg::new();
        cfg.minify_css = options.minify_css;
        cfg.minify_js = options.minify_js;
        cfg.keep_comments = options.keep_comments;
        cfg
    }
}

impl Default for HtmlMinifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Minifier for HtmlMinifier {
    fn minify(&self, html: &str, options: &MinifyOptions) -> Result<String, TransformError> {
        let minified = minify_html::minify(html.as_bytes(), &Self::cfg(options));
        String::from_utf8(minified)
            .map_err(|e| TransformError::Minify(format!("minifier produced invalid UTF-8: {e}")))
    }
}
