
use std::fmt;
use std::str::FromStr;

use strum::IntoEnumIterator;
use strum_macros::{EnumIter, EnumString};

use crate::{HotkeyError, KbdKey};


/// The four hotkey modifiers .. left/right physical variants collapse into these
# [ derive (Debug, Eq, PartialEq, Hash, Copy, Clone, EnumIter, EnumString) ]
# [ strum (ascii_case_insensitive) ]
pub enum ModKey {
    #[strum(serialize="control", serialize="ctrl")]  Ctrl,
    #[strum(serialize="alt")]                        Alt,
    #[strum(serialize="shift")]                      Shift,
    #[strum(serialize="win",     serialize="windows")] Win,
}

impl ModKey {
    fn mask (self) -> u8 { 1 << (self as u8) }

    /// canonical token used when rendering a combination back to a string
    pub fn token (self) -> &'static str {
        match self {
            ModKey::Ctrl  => "control",
            ModKey::Alt   => "alt",
            ModKey::Shift => "shift",
            ModKey::Win   => "win",
    }  }
}



/// Set of held/required modifiers as a bitmask .. unordered and duplicate-free by construction,
/// so Eq/Hash are token-order independent for free
# [ derive (Debug, Default, Eq, PartialEq, Hash, Copy, Clone) ]
pub struct ModKeySet (u8);

impl ModKeySet {

    pub const fn empty() -> ModKeySet { ModKeySet (0) }

    pub fn insert (&mut self, mk: ModKey) { self.0 |= mk.mask() }

    pub fn remove (&mut self, mk: ModKey) { self.0 &= !mk.mask() }

    pub fn contains (&self, mk: ModKey) -> bool { self.0 & mk.mask() != 0 }

    pub fn is_empty (&self) -> bool { self.0 == 0 }

    /// iterates the contained modifiers in canonical (ctrl, alt, shift, win) order
    pub fn iter (self) -> impl Iterator <Item = ModKey> {
        ModKey::iter() .filter (move |mk| self.contains(*mk))
    }
}

impl FromIterator <ModKey> for ModKeySet {
    fn from_iter <T: IntoIterator<Item=ModKey>> (iter: T) -> ModKeySet {
        let mut mods = ModKeySet::empty();
        iter .into_iter() .for_each (|mk| mods.insert(mk));
        mods
    }
}



/// A normalized hotkey combination : a set of modifiers plus exactly one (non-modifier) main key.
/// Eq/Hash are defined purely on normalized content, so "alt+control+h" == "control+alt+h".
/// Immutable once constructed.
# [ derive (Debug, Eq, PartialEq, Hash, Copy, Clone) ]
pub struct KeyCombination {
    pub mods : ModKeySet,
    pub key  : KbdKey,
}

impl KeyCombination {

    pub fn new (mods: ModKeySet, key: KbdKey) -> KeyCombination { KeyCombination { mods, key } }

    /// Parses a combination string of `+`-separated, case-insensitive tokens, e.g. "control+alt+h".
    /// Any number of modifier tokens (control/ctrl, alt, shift, win/windows) is allowed, duplicates
    /// collapse into the set; everything else must resolve to exactly one main key.
    pub fn parse (combination: &str) -> Result <KeyCombination, HotkeyError> {
        let invalid = |reason: String| HotkeyError::InvalidCombination { combo: combination.to_string(), reason };

        let mut mods = ModKeySet::empty();
        let mut main : Option <KbdKey> = None;

        for token in combination .split ('+') .map (str::trim) {
            if token.is_empty() {
                return Err ( invalid ("empty token".to_string()) )
            }
            if let Ok(mk) = ModKey::from_str (token) {
                mods.insert (mk);
                continue
            }
            match KbdKey::from_token (token) {
                None => return Err ( invalid (format! ("unrecognized token '{}'", token)) ),
                Some (key) => {
                    if key.mod_key().is_some() {
                        return Err ( invalid (format! ("'{}' is a modifier key, not a valid main key", token)) )
                    }
                    if let Some (prior) = main {
                        return Err ( invalid (format! ("more than one main key ('{}' and '{}')", prior, key)) )
                    }
                    main = Some (key);
            }  }
        }

        match main {
            Some (key) => Ok ( KeyCombination { mods, key } ),
            None => Err ( invalid ("no main key".to_string()) ),
    }  }

}

impl fmt::Display for KeyCombination {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for mk in self.mods.iter() {
            write! (f, "{}+", mk.token())?
        }
        write! (f, "{}", self.key)
    }
}



#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_token_order_independent() {
        let a = KeyCombination::parse ("control+alt+h") .unwrap();
        let b = KeyCombination::parse ("alt+control+h") .unwrap();
        assert_eq! (a, b);
        let mut hasher_input = std::collections::HashSet::new();
        hasher_input.insert (a);
        assert! (hasher_input.contains (&b));
    }

    #[test]
    fn parse_render_parse_is_stable() {
        for s in ["control+alt+h", "shift+ctrl+f12", "win+space", "h", "alt+shift+control+win+9"] {
            let combo = KeyCombination::parse (s) .unwrap();
            let rendered = combo.to_string();
            assert_eq! (KeyCombination::parse (&rendered) .unwrap(), combo);
        }
    }

    #[test]
    fn canonical_render_order() {
        let combo = KeyCombination::parse ("shift+win+alt+control+h") .unwrap();
        assert_eq! (combo.to_string(), "control+alt+shift+win+h");
    }

    #[test]
    fn tokens_are_case_insensitive_and_trimmed() {
        let a = KeyCombination::parse ("Control + Alt + H") .unwrap();
        let b = KeyCombination::parse ("CTRL+ALT+h") .unwrap();
        assert_eq! (a, b);
        assert_eq! (a.key, KbdKey::H);
        assert! (a.mods.contains (ModKey::Ctrl) && a.mods.contains (ModKey::Alt));
    }

    #[test]
    fn modifier_aliases() {
        let a = KeyCombination::parse ("ctrl+windows+f5") .unwrap();
        let b = KeyCombination::parse ("control+win+f5") .unwrap();
        assert_eq! (a, b);
    }

    #[test]
    fn bare_main_key_is_valid() {
        let combo = KeyCombination::parse ("f24") .unwrap();
        assert! (combo.mods.is_empty());
        assert_eq! (combo.key, KbdKey::F24);
    }

    #[test]
    fn duplicate_modifier_tokens_collapse() {
        let a = KeyCombination::parse ("ctrl+control+h") .unwrap();
        let b = KeyCombination::parse ("ctrl+h") .unwrap();
        assert_eq! (a, b);
    }

    #[test]
    fn rejects_missing_main_key() {
        assert! (matches! (
            KeyCombination::parse ("control+alt"),
            Err (HotkeyError::InvalidCombination {..})
        ));
    }

    #[test]
    fn rejects_multiple_main_keys() {
        assert! (matches! (
            KeyCombination::parse ("a+b"),
            Err (HotkeyError::InvalidCombination {..})
        ));
        assert! (matches! (
            KeyCombination::parse ("control+h+j"),
            Err (HotkeyError::InvalidCombination {..})
        ));
    }

    #[test]
    fn rejects_unrecognized_tokens() {
        assert! (matches! (
            KeyCombination::parse ("control+banana"),
            Err (HotkeyError::InvalidCombination {..})
        ));
        assert! (matches! (
            KeyCombination::parse (""),
            Err (HotkeyError::InvalidCombination {..})
        ));
    }

    #[test]
    fn rejects_modifier_key_as_main_key() {
        assert! (matches! (
            KeyCombination::parse ("control+lshift"),
            Err (HotkeyError::InvalidCombination {..})
        ));
    }
}
