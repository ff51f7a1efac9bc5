//! Term decoration for chat replies.
//!
//! The command processor only asks for a token to be wrapped; the rendering
//! scheme lives behind [`TermFormatter`].

/// Wraps a matched token with display decoration.
pub trait TermFormatter {
    fn decorate(&self, token: &str) -> String;
}

const IRC_BOLD: char = '\x02';
const IRC_COLOR: char = '\x03';
const IRC_RESET: char = '\x0f';
const IRC_REVERSE: char = '\x16';
const IRC_ITALIC: char = '\x1d';
const IRC_UNDERLINE: char = '\x1f';

/// Named mIRC palette, indexed by color number.
const IRC_COLOR_NAMES: [&str; 16] = [
    "white",
    "black",
    "blue",
    "green",
    "red",
    "brown",
    "purple",
    "orange",
    "yellow",
    "light_green",
    "cyan",
    "light_cyan",
    "light_blue",
    "pink",
    "grey",
    "light_grey",
];

/// Decoration options for highlighted terms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TermStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub reverse: bool,
    pub fg: Option<u8>,
    pub bg: Option<u8>,
}

impl TermStyle {
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }

    /// Applies one named flag from the `format` list. Returns `false` for
    /// unknown names.
    pub fn set_flag(&mut self, name: &str) -> bool {
        match name.trim().to_ascii_lowercase().as_str() {
            "bold" => self.bold = true,
            "italic" => self.italic = true,
            "underline" => self.underline = true,
            "reverse" => self.reverse = true,
            _ => return false,
        }
        true
    }
}

/// Parses an IRC color given as a number (0-15) or a palette name.
pub fn parse_irc_color(value: &str) -> Option<u8> {
    let value = value.trim().to_ascii_lowercase().replace([' ', '-'], "_");
    if let Ok(number) = value.parse::<u8>() {
        return (usize::from(number) < IRC_COLOR_NAMES.len()).then_some(number);
    }
    IRC_COLOR_NAMES
        .iter()
        .position(|name| *name == value)
        .and_then(|index| u8::try_from(index).ok())
}

/// Wraps tokens in IRC control codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrcTermFormatter {
    prefix: String,
}

impl IrcTermFormatter {
    pub fn new(style: TermStyle) -> Self {
        let mut prefix = String::new();
        if style.bold {
            prefix.push(IRC_BOLD);
        }
        if style.italic {
            prefix.push(IRC_ITALIC);
        }
        if style.underline {
            prefix.push(IRC_UNDERLINE);
        }
        if style.reverse {
            prefix.push(IRC_REVERSE);
        }
        match (style.fg, style.bg) {
            (Some(fg), Some(bg)) => prefix.push_str(&format!("{IRC_COLOR}{fg:02},{bg:02}")),
            (Some(fg), None) => prefix.push_str(&format!("{IRC_COLOR}{fg:02}")),
            // a background needs a foreground slot; keep the default text color
            (None, Some(bg)) => prefix.push_str(&format!("{IRC_COLOR}99,{bg:02}")),
            (None, None) => {}
        }
        Self { prefix }
    }
}

impl TermFormatter for IrcTermFormatter {
    fn decorate(&self, token: &str) -> String {
        if self.prefix.is_empty() {
            return token.to_string();
        }
        format!("{}{token}{IRC_RESET}", self.prefix)
    }
}
