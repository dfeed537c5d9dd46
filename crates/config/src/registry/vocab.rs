//! Closed vocabularies for enumerated settings.
//!
//! Matching is case-insensitive; the canonical spelling is what gets stored.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident, $what:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every member of the vocabulary, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Canonical spelling, as stored in the environment.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = ConfigError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|member| member.as_str().eq_ignore_ascii_case(s))
                    .ok_or_else(|| ConfigError::invalid($what, s))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

vocabulary! {
    /// Border and separator preset used when drawing a table.
    #[derive(Default)]
    TableFormat, "table format name" {
        AsciiFull => "ASCII_FULL",
        AsciiFullCondensed => "ASCII_FULL_CONDENSED",
        AsciiNoBorders => "ASCII_NO_BORDERS",
        AsciiBordersOnly => "ASCII_BORDERS_ONLY",
        AsciiBordersOnlyCondensed => "ASCII_BORDERS_ONLY_CONDENSED",
        AsciiHorizontalOnly => "ASCII_HORIZONTAL_ONLY",
        AsciiMarkdown => "ASCII_MARKDOWN",
        Markdown => "MARKDOWN",
        Nothing => "NOTHING",
        Utf8Full => "UTF8_FULL",
        #[default]
        Utf8FullCondensed => "UTF8_FULL_CONDENSED",
        Utf8NoBorders => "UTF8_NO_BORDERS",
        Utf8BordersOnly => "UTF8_BORDERS_ONLY",
        Utf8HorizontalOnly => "UTF8_HORIZONTAL_ONLY",
    }
}

impl TableFormat {
    /// Whether the preset draws with plain ASCII characters only.
    pub fn is_ascii(self) -> bool {
        self.as_str().starts_with("ASCII")
    }

    /// Placeholder used for truncated rows, columns, and long values.
    pub fn ellipsis(self) -> &'static str {
        if self.is_ascii() { "..." } else { "\u{2026}" }
    }
}

vocabulary! {
    /// Horizontal alignment of cell content.
    CellAlignment, "alignment" {
        Left => "LEFT",
        Center => "CENTER",
        Right => "RIGHT",
    }
}

vocabulary! {
    /// Preferred execution engine.
    #[derive(Default)]
    EngineAffinity, "engine" {
        #[default]
        Auto => "auto",
        InMemory => "in-memory",
        Streaming => "streaming",
        Gpu => "gpu",
    }
}

vocabulary! {
    /// How floating point values are printed.
    #[derive(Default)]
    FloatFormat, "float format" {
        /// Print every significant digit.
        Full => "full",
        #[default]
        /// Trim trailing zeros but keep one decimal place; switch to scientific notation for extremes.
        Mixed => "mixed",
    }
}
