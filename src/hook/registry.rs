
// allow non camel-case names for this entire file
#![allow(non_camel_case_types)]

use std::sync::{Arc, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};

use derive_deref::Deref;
use once_cell::sync::OnceCell;
use rustc_hash::FxHashMap;

use crate::{HotkeyError, KbdKey, KeyCombination, ModKeySet};


/// Zero-arg hotkey callback type .. the registry stores and invokes it, never inspects it
pub type HotkeyCbFn_T = Arc <dyn Fn() + Send + Sync + 'static>;


/// Unique id minted per registration .. lets unregister be idempotent without ever being able
/// to tear down a successor registration for the same combination
# [ derive (Debug, Eq, PartialEq, Hash, Copy, Clone) ]
pub struct RegistrationToken (u64);

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

impl RegistrationToken {
    fn next() -> RegistrationToken {
        RegistrationToken ( NEXT_TOKEN.fetch_add (1, Ordering::Relaxed) )
    }
}


/// Returned from register() .. needed to unregister later
# [ derive (Debug, Clone) ]
pub struct RegistrationHandle {
    pub(crate) combo : KeyCombination,
    pub(crate) token : RegistrationToken,
}

impl RegistrationHandle {
    pub fn combination (&self) -> KeyCombination { self.combo }
}


/// The registry map value : callback, suppress flag, and the minting token
# [ derive (Clone) ]
pub struct HotkeyCallbackEntry {
    pub(crate) token : RegistrationToken,
    pub cb           : HotkeyCbFn_T,
    pub suppress     : bool,
}

pub type HotkeyCbMap = FxHashMap <KeyCombination, HotkeyCallbackEntry>;



/// Combination -> callback-entry map, Arc/RwLock wrapped for sharing between caller threads
/// (register/unregister) and the hook thread (lookup on every key-down).
/// Only *active* registrations live here, so presence of a key doubles as the duplicate check.
# [ derive (Clone, Deref) ]
pub struct HotkeyRegistry ( Arc <RwLock <HotkeyCbMap>> );

impl HotkeyRegistry {

    /// The process-wide registry the public handler API rides on
    pub fn instance() -> HotkeyRegistry {
        static INSTANCE: OnceCell <HotkeyRegistry> = OnceCell::new();
        INSTANCE .get_or_init (HotkeyRegistry::new) .clone()
    }

    pub(crate) fn new() -> HotkeyRegistry {
        HotkeyRegistry ( Arc::new ( RwLock::new ( FxHashMap::default() ) ) )
    }

    /// Inserts an active registration .. errors if an equal combination is already active
    pub fn register (&self, combo: KeyCombination, cb: HotkeyCbFn_T, suppress: bool) -> Result <RegistrationHandle, HotkeyError> {
        let mut map = self .write().unwrap();
        if map.contains_key (&combo) {
            return Err ( HotkeyError::DuplicateActiveHotkey (combo) )
        }
        let token = RegistrationToken::next();
        map .insert (combo, HotkeyCallbackEntry { token, cb, suppress });
        tracing::debug! (%combo, suppress, "hotkey registered");
        Ok ( RegistrationHandle { combo, token } )
    }

    /// Idempotent removal .. a stale handle (already removed, or superseded by a fresh
    /// registration of the same combination) is a no-op
    pub fn unregister (&self, handle: &RegistrationHandle) {
        let mut map = self .write().unwrap();
        if map .get (&handle.combo) .map_or (false, |entry| entry.token == handle.token) {
            map .remove (&handle.combo);
            tracing::debug! (combo = %handle.combo, "hotkey unregistered");
        }
    }

    /// Hot-path lookup run on every key-down .. a short read-lock and an Arc clone, nothing
    /// is held while the callback later runs
    pub fn get_entry (&self, mods: ModKeySet, key: KbdKey) -> Option <HotkeyCallbackEntry> {
        self .read().unwrap() .get (&KeyCombination { mods, key }) .cloned()
    }

    pub fn active_count (&self) -> usize { self .read().unwrap() .len() }

}
