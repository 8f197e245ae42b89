
use thiserror::Error;

use crate::KeyCombination;


/// Everything that can go wrong registering and running hotkeys.
/// Invalid combinations and duplicates are recoverable by the caller; a refused hook
/// install is environmental (privilege, hook-chain exhaustion) and is not retried.
# [ derive (Debug, Error) ]
pub enum HotkeyError {

    #[error ("invalid hotkey combination '{combo}': {reason}")]
    InvalidCombination { combo: String, reason: String },

    #[error ("hotkey '{0}' is already registered and active")]
    DuplicateActiveHotkey (KeyCombination),

    #[error ("the OS refused to install the low-level keyboard hook (os error {code})")]
    HookInstall { code: u32 },
}
