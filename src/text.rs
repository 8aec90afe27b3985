use encoding_rs::{Encoding, WINDOWS_1251};

/// Single-byte legacy code page used to decode the hostname, gamemode and
/// language fields of an info response.
///
/// Servers never announce their encoding, so this defaults to windows-1251
/// like the reference client. Rule names/values and player nicks are not
/// affected; those are decoded as UTF-8 with replacement.
#[derive(Clone, Copy, Debug)]
pub struct TextCodePage(&'static Encoding);

impl Default for TextCodePage {
    fn default() -> Self {
        TextCodePage(WINDOWS_1251)
    }
}

impl TextCodePage {
    /// Looks up a code page by WHATWG label, e.g. `"windows-1251"` or
    /// `"koi8-r"`. Returns `None` for labels no encoding answers to.
    pub fn from_label(label: &str) -> Option<Self> {
        Encoding::for_label(label.as_bytes()).map(TextCodePage)
    }

    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    pub(crate) fn decode(&self, bytes: &[u8]) -> String {
        let (text, _, _) = self.0.decode(bytes);
        text.into_owned()
    }
}
