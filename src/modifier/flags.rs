use super::{ModifierError, ModifierResult};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

bitflags! {
    /// Engine flags applied alongside the pattern text.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Modifiers: u8 {
        const GLOBAL = 0b00000001;
        const IGNORE_CASE = 0b00000010;
        const MULTILINE = 0b00000100;
        const DOT_ALL = 0b00001000;
        const STICKY = 0b00010000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Modifiers::GLOBAL | Modifiers::MULTILINE
    }
}

impl Modifiers {
    pub fn enable(&mut self, modifier: Modifier) {
        self.insert(modifier.flag());
    }

    pub fn disable(&mut self, modifier: Modifier) {
        self.remove(modifier.flag());
    }

    pub fn toggle_to(&mut self, modifier: Modifier, enabled: bool) {
        self.set(modifier.flag(), enabled);
    }

    pub fn has(&self, modifier: Modifier) -> bool {
        self.contains(modifier.flag())
    }

    pub fn iter_modifiers(&self) -> impl Iterator<Item = Modifier> + '_ {
        Modifier::ALL.into_iter().filter(|m| self.has(*m))
    }

    /// Flag string in engine notation, e.g. `gm`.
    pub fn to_flag_string(&self) -> String {
        self.iter_modifiers().map(Modifier::as_char).collect()
    }

    /// Parses engine notation such as `gim`. Repeated characters collapse.
    pub fn from_flag_str(s: &str) -> ModifierResult<Self> {
        let mut out = Modifiers::empty();
        for c in s.chars() {
            out.enable(Modifier::try_from(c)?);
        }
        Ok(out)
    }
}

/// A single member of the flag alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modifier {
    Global,
    IgnoreCase,
    Multiline,
    DotAll,
    Sticky,
}

impl Modifier {
    pub const ALL: [Modifier; 5] = [
        Modifier::Global,
        Modifier::IgnoreCase,
        Modifier::Multiline,
        Modifier::DotAll,
        Modifier::Sticky,
    ];

    pub fn as_char(self) -> char {
        match self {
            Modifier::Global => 'g',
            Modifier::IgnoreCase => 'i',
            Modifier::Multiline => 'm',
            Modifier::DotAll => 's',
            Modifier::Sticky => 'y',
        }
    }

    pub fn flag(self) -> Modifiers {
        match self {
            Modifier::Global => Modifiers::GLOBAL,
            Modifier::IgnoreCase => Modifiers::IGNORE_CASE,
            Modifier::Multiline => Modifiers::MULTILINE,
            Modifier::DotAll => Modifiers::DOT_ALL,
            Modifier::Sticky => Modifiers::STICKY,
        }
    }
}

impl TryFrom<char> for Modifier {
    type Error = ModifierError;

    fn try_from(c: char) -> ModifierResult<Self> {
        match c {
            'g' => Ok(Modifier::Global),
            'i' => Ok(Modifier::IgnoreCase),
            'm' => Ok(Modifier::Multiline),
            's' => Ok(Modifier::DotAll),
            'y' => Ok(Modifier::Sticky),
            found => Err(ModifierError::Unknown { found }),
        }
    }
}

impl FromStr for Modifier {
    type Err = ModifierError;

    fn from_str(s: &str) -> ModifierResult<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Modifier::try_from(c),
            _ => Err(ModifierError::NotSingleCharacter {
                len: s.chars().count(),
            }),
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
