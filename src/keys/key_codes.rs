
// allow non camel-case names for this entire file
#![allow(non_camel_case_types)]

use std::fmt;

use strum_macros::EnumString;

use crate::ModKey;


/// Enum representation of the keyboard keys we recognize.
/// Token names parse case-insensitively ("H", "Esc", "F12" all work), and the common
/// aliases from typical hotkey strings are accepted (esc, del, ins, return, pgup, pgdn).
# [ derive (Debug, Eq, PartialEq, Hash, Copy, Clone, EnumString) ]
# [ strum (ascii_case_insensitive, serialize_all = "lowercase") ]
pub enum KbdKey {
    Backspace,
    Tab,
    #[strum(serialize="enter",    serialize="return")] Enter,
    Shift,
    Ctrl,
    Alt,
    CapsLock,
    #[strum(serialize="escape",   serialize="esc")]    Escape,
    Space,
    #[strum(serialize="pageup",   serialize="pgup")]   PageUp,
    #[strum(serialize="pagedown", serialize="pgdn")]   PageDown,
    End,
    Home,
    Left,
    Up,
    Right,
    Down,
    #[strum(serialize="insert",   serialize="ins")]    Insert,
    #[strum(serialize="delete",   serialize="del")]    Delete,
    #[strum(serialize="0")] Numrow_0,
    #[strum(serialize="1")] Numrow_1,
    #[strum(serialize="2")] Numrow_2,
    #[strum(serialize="3")] Numrow_3,
    #[strum(serialize="4")] Numrow_4,
    #[strum(serialize="5")] Numrow_5,
    #[strum(serialize="6")] Numrow_6,
    #[strum(serialize="7")] Numrow_7,
    #[strum(serialize="8")] Numrow_8,
    #[strum(serialize="9")] Numrow_9,
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    LWin,
    RWin,
    Apps,
    #[strum(serialize="numpad0")] Numpad_0,
    #[strum(serialize="numpad1")] Numpad_1,
    #[strum(serialize="numpad2")] Numpad_2,
    #[strum(serialize="numpad3")] Numpad_3,
    #[strum(serialize="numpad4")] Numpad_4,
    #[strum(serialize="numpad5")] Numpad_5,
    #[strum(serialize="numpad6")] Numpad_6,
    #[strum(serialize="numpad7")] Numpad_7,
    #[strum(serialize="numpad8")] Numpad_8,
    #[strum(serialize="numpad9")] Numpad_9,
    F1,  F2,  F3,  F4,  F5,  F6,  F7,  F8,
    F9,  F10, F11, F12, F13, F14, F15, F16,
    F17, F18, F19, F20, F21, F22, F23, F24,
    NumLock,
    ScrollLock,
    LShift,
    RShift,
    LControl,
    RControl,
    LAlt,
    RAlt,

    #[strum(disabled)]
    OtherKey(u32),
}



impl From <KbdKey> for u32 {

    fn from (key: KbdKey) -> u32 {
        use KbdKey::*;
        match key {
            Backspace  => 0x08,
            Tab        => 0x09,
            Enter      => 0x0D,
            Shift      => 0x10,
            Ctrl       => 0x11,
            Alt        => 0x12,
            CapsLock   => 0x14,
            Escape     => 0x1B,
            Space      => 0x20,
            PageUp     => 0x21,
            PageDown   => 0x22,
            End        => 0x23,
            Home       => 0x24,
            Left       => 0x25,
            Up         => 0x26,
            Right      => 0x27,
            Down       => 0x28,
            Insert     => 0x2D,
            Delete     => 0x2E,
            Numrow_0   => 0x30,
            Numrow_1   => 0x31,
            Numrow_2   => 0x32,
            Numrow_3   => 0x33,
            Numrow_4   => 0x34,
            Numrow_5   => 0x35,
            Numrow_6   => 0x36,
            Numrow_7   => 0x37,
            Numrow_8   => 0x38,
            Numrow_9   => 0x39,
            A => 0x41,  B => 0x42,  C => 0x43,  D => 0x44,  E => 0x45,  F => 0x46,  G => 0x47,
            H => 0x48,  I => 0x49,  J => 0x4A,  K => 0x4B,  L => 0x4C,  M => 0x4D,  N => 0x4E,
            O => 0x4F,  P => 0x50,  Q => 0x51,  R => 0x52,  S => 0x53,  T => 0x54,  U => 0x55,
            V => 0x56,  W => 0x57,  X => 0x58,  Y => 0x59,  Z => 0x5A,
            LWin       => 0x5B,
            RWin       => 0x5C,
            Apps       => 0x5D,
            Numpad_0   => 0x60,
            Numpad_1   => 0x61,
            Numpad_2   => 0x62,
            Numpad_3   => 0x63,
            Numpad_4   => 0x64,
            Numpad_5   => 0x65,
            Numpad_6   => 0x66,
            Numpad_7   => 0x67,
            Numpad_8   => 0x68,
            Numpad_9   => 0x69,
            F1  => 0x70,  F2  => 0x71,  F3  => 0x72,  F4  => 0x73,  F5  => 0x74,  F6  => 0x75,
            F7  => 0x76,  F8  => 0x77,  F9  => 0x78,  F10 => 0x79,  F11 => 0x7A,  F12 => 0x7B,
            F13 => 0x7C,  F14 => 0x7D,  F15 => 0x7E,  F16 => 0x7F,  F17 => 0x80,  F18 => 0x81,
            F19 => 0x82,  F20 => 0x83,  F21 => 0x84,  F22 => 0x85,  F23 => 0x86,  F24 => 0x87,
            NumLock    => 0x90,
            ScrollLock => 0x91,
            LShift     => 0xA0,
            RShift     => 0xA1,
            LControl   => 0xA2,
            RControl   => 0xA3,
            LAlt       => 0xA4,
            RAlt       => 0xA5,
            OtherKey (code) => code,
    } }

}


impl From <u32> for KbdKey {

    fn from (code: u32) -> KbdKey {
        use KbdKey::*;
        match code {
            0x08 => Backspace,
            0x09 => Tab,
            0x0D => Enter,
            0x10 => Shift,
            0x11 => Ctrl,
            0x12 => Alt,
            0x14 => CapsLock,
            0x1B => Escape,
            0x20 => Space,
            0x21 => PageUp,
            0x22 => PageDown,
            0x23 => End,
            0x24 => Home,
            0x25 => Left,
            0x26 => Up,
            0x27 => Right,
            0x28 => Down,
            0x2D => Insert,
            0x2E => Delete,
            0x30 => Numrow_0,
            0x31 => Numrow_1,
            0x32 => Numrow_2,
            0x33 => Numrow_3,
            0x34 => Numrow_4,
            0x35 => Numrow_5,
            0x36 => Numrow_6,
            0x37 => Numrow_7,
            0x38 => Numrow_8,
            0x39 => Numrow_9,
            0x41 => A,  0x42 => B,  0x43 => C,  0x44 => D,  0x45 => E,  0x46 => F,  0x47 => G,
            0x48 => H,  0x49 => I,  0x4A => J,  0x4B => K,  0x4C => L,  0x4D => M,  0x4E => N,
            0x4F => O,  0x50 => P,  0x51 => Q,  0x52 => R,  0x53 => S,  0x54 => T,  0x55 => U,
            0x56 => V,  0x57 => W,  0x58 => X,  0x59 => Y,  0x5A => Z,
            0x5B => LWin,
            0x5C => RWin,
            0x5D => Apps,
            0x60 => Numpad_0,
            0x61 => Numpad_1,
            0x62 => Numpad_2,
            0x63 => Numpad_3,
            0x64 => Numpad_4,
            0x65 => Numpad_5,
            0x66 => Numpad_6,
            0x67 => Numpad_7,
            0x68 => Numpad_8,
            0x69 => Numpad_9,
            0x70 => F1,   0x71 => F2,   0x72 => F3,   0x73 => F4,   0x74 => F5,   0x75 => F6,
            0x76 => F7,   0x77 => F8,   0x78 => F9,   0x79 => F10,  0x7A => F11,  0x7B => F12,
            0x7C => F13,  0x7D => F14,  0x7E => F15,  0x7F => F16,  0x80 => F17,  0x81 => F18,
            0x82 => F19,  0x83 => F20,  0x84 => F21,  0x85 => F22,  0x86 => F23,  0x87 => F24,
            0x90 => NumLock,
            0x91 => ScrollLock,
            0xA0 => LShift,
            0xA1 => RShift,
            0xA2 => LControl,
            0xA3 => RControl,
            0xA4 => LAlt,
            0xA5 => RAlt,
            c => OtherKey (c),
    } }

}



impl KbdKey {

    /// Parses a (case-insensitive) token name like "h", "3", "f12", "escape" into a key
    pub fn from_token (token: &str) -> Option <KbdKey> {
        use std::str::FromStr;
        KbdKey::from_str (token) .ok()
    }

    /// The modifier this key counts toward when tracking modifier state (None for regular keys)
    pub fn mod_key (self) -> Option <ModKey> {
        use KbdKey::*;
        match self {
            Ctrl  | LControl | RControl => Some (ModKey::Ctrl),
            Alt   | LAlt     | RAlt     => Some (ModKey::Alt),
            Shift | LShift   | RShift   => Some (ModKey::Shift),
            LWin  | RWin                => Some (ModKey::Win),
            _ => None,
    }  }

}


impl fmt::Display for KbdKey {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use KbdKey::*;
        if let OtherKey (code) = *self {
            return write! (f, "0x{:02x}", code)
        }
        match u32::from (*self) {
            vk @ 0x30..=0x39 => write! (f, "{}", vk - 0x30),
            vk @ 0x41..=0x5A => write! (f, "{}", char::from ((vk - 0x41) as u8 + b'a')),
            vk @ 0x60..=0x69 => write! (f, "numpad{}", vk - 0x60),
            vk @ 0x70..=0x87 => write! (f, "f{}", vk - 0x70 + 1),
            _ => f.write_str ( match *self {
                Backspace  => "backspace",
                Tab        => "tab",
                Enter      => "enter",
                Shift      => "shift",
                Ctrl       => "ctrl",
                Alt        => "alt",
                CapsLock   => "capslock",
                Escape     => "escape",
                Space      => "space",
                PageUp     => "pageup",
                PageDown   => "pagedown",
                End        => "end",
                Home       => "home",
                Left       => "left",
                Up         => "up",
                Right      => "right",
                Down       => "down",
                Insert     => "insert",
                Delete     => "delete",
                Apps       => "apps",
                NumLock    => "numlock",
                ScrollLock => "scrolllock",
                LWin       => "lwin",
                RWin       => "rwin",
                LShift     => "lshift",
                RShift     => "rshift",
                LControl   => "lcontrol",
                RControl   => "rcontrol",
                LAlt       => "lalt",
                RAlt       => "ralt",
                _ => "unknown",
            } ),
    }  }
}



#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vk_code_conversions_roundtrip() {
        for key in [KbdKey::A, KbdKey::Z, KbdKey::Numrow_0, KbdKey::F1, KbdKey::F24, KbdKey::Enter, KbdKey::LWin, KbdKey::RAlt] {
            assert_eq! (KbdKey::from (u32::from (key)), key);
        }
    }

    #[test]
    fn unknown_vk_codes_map_to_other_key() {
        assert_eq! (KbdKey::from (0xFF), KbdKey::OtherKey(0xFF));
        assert_eq! (u32::from (KbdKey::OtherKey(0xFF)), 0xFF);
    }

    #[test]
    fn token_parsing() {
        assert_eq! (KbdKey::from_token ("h"),      Some (KbdKey::H));
        assert_eq! (KbdKey::from_token ("H"),      Some (KbdKey::H));
        assert_eq! (KbdKey::from_token ("7"),      Some (KbdKey::Numrow_7));
        assert_eq! (KbdKey::from_token ("f24"),    Some (KbdKey::F24));
        assert_eq! (KbdKey::from_token ("Escape"), Some (KbdKey::Escape));
        assert_eq! (KbdKey::from_token ("esc"),    Some (KbdKey::Escape));
        assert_eq! (KbdKey::from_token ("return"), Some (KbdKey::Enter));
        assert_eq! (KbdKey::from_token ("pgdn"),   Some (KbdKey::PageDown));
        assert_eq! (KbdKey::from_token ("numpad4"), Some (KbdKey::Numpad_4));
        assert_eq! (KbdKey::from_token ("not-a-key"), None);
    }

    #[test]
    fn modifier_key_classification() {
        assert_eq! (KbdKey::LControl.mod_key(), Some (ModKey::Ctrl));
        assert_eq! (KbdKey::RControl.mod_key(), Some (ModKey::Ctrl));
        assert_eq! (KbdKey::Alt.mod_key(),      Some (ModKey::Alt));
        assert_eq! (KbdKey::RShift.mod_key(),   Some (ModKey::Shift));
        assert_eq! (KbdKey::LWin.mod_key(),     Some (ModKey::Win));
        assert_eq! (KbdKey::H.mod_key(),        None);
        assert_eq! (KbdKey::CapsLock.mod_key(), None);
    }

    #[test]
    fn display_matches_primary_token() {
        for (key, name) in [
            (KbdKey::H, "h"), (KbdKey::Numrow_7, "7"), (KbdKey::F12, "f12"),
            (KbdKey::Escape, "escape"), (KbdKey::Enter, "enter"), (KbdKey::Numpad_4, "numpad4"),
        ] {
            assert_eq! (key.to_string(), name);
            assert_eq! (KbdKey::from_token (name), Some (key));
        }
    }
}
