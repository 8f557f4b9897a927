/// Output settings for [`to_text`](crate::text::to_text).
///
/// The default is compact output with every non-ASCII character escaped.
///
/// ```
/// use objson_reflect::text::TextOptions;
///
/// let options = TextOptions::new().with_pretty(true).with_ascii_only(false);
/// assert!(options.pretty);
/// assert!(!options.ascii_only);
/// assert!(TextOptions::default().ascii_only);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextOptions {
    /// Break lines and indent nested structures by two spaces.
    pub pretty: bool,
    /// Write non-ASCII characters as `\uXXXX` escapes.
    pub ascii_only: bool,
}

impl TextOptions {
    #[inline]
    pub const fn new() -> Self {
        Self {
            pretty: false,
            ascii_only: true,
        }
    }

    #[inline]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    #[inline]
    pub const fn with_ascii_only(mut self, ascii_only: bool) -> Self {
        self.ascii_only = ascii_only;
        self
    }
}

impl Default for TextOptions {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
