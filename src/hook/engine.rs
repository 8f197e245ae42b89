
// allow non camel-case names for this entire file
#![allow(non_camel_case_types)]

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, RwLock};
use std::sync::atomic::{AtomicIsize, AtomicU32, AtomicU8, AtomicUsize, Ordering};
use std::thread;

use derive_deref::Deref;
use once_cell::sync::OnceCell;
use rustc_hash::FxHashSet;

use crate::*;


/// Synchronous verdict returned to the OS for each intercepted key event ..
/// Stop swallows the event (suppression), Continue forwards it down the hook chain
# [ derive (Debug, Eq, PartialEq, Hash, Copy, Clone) ]
pub enum EventPropagationDirective {
    EventProp_Continue,
    EventProp_Stop,
}


/// The OS provided key event types (the sys- variants fire while Alt is held etc)
# [ derive (Debug, Eq, PartialEq, Copy, Clone) ]
pub enum KbdEventType {
    KbdEvent_KeyDown,
    KbdEvent_SysKeyDown,
    KbdEvent_KeyUp,
    KbdEvent_SysKeyUp,
}

impl KbdEventType {
    pub fn is_key_down (self) -> bool {
        matches! (self, KbdEventType::KbdEvent_KeyDown | KbdEventType::KbdEvent_SysKeyDown)
    }
}


/// A single intercepted keyboard event as seen by the hook
# [ derive (Debug, Eq, PartialEq, Copy, Clone) ]
pub struct KbdEvent {
    pub ev_t    : KbdEventType,
    pub key     : KbdKey,
    pub vk_code : u32,
}

impl KbdEvent {
    pub fn key_down (key: KbdKey) -> KbdEvent {
        KbdEvent { ev_t: KbdEventType::KbdEvent_KeyDown, key, vk_code: u32::from(key) }
    }
    pub fn key_up (key: KbdKey) -> KbdEvent {
        KbdEvent { ev_t: KbdEventType::KbdEvent_KeyUp, key, vk_code: u32::from(key) }
    }
}


/// What to do when a matched combination stays held and the OS auto-repeats its key-down
# [ derive (Debug, Eq, PartialEq, Copy, Clone) ]
pub enum RepeatPolicy {
    /// fire the callback on every OS-reported key-down, auto-repeats included (hold-to-repeat
    /// behavior, the default)
    RefireOnRepeat,
    /// fire once per physical down transition, ignoring auto-repeats until the key comes back up
    FireOncePerPress,
}


// per-physical-key bits of the modifier-state byte .. L/R are tracked separately so that e.g.
// pressing RCtrl while LCtrl is already down and releasing one of them keeps the state right
const MS_LCTRL  : u8 = 0x01;
const MS_RCTRL  : u8 = 0x02;
const MS_LALT   : u8 = 0x04;
const MS_RALT   : u8 = 0x08;
const MS_LSHIFT : u8 = 0x10;
const MS_RSHIFT : u8 = 0x20;
const MS_LWIN   : u8 = 0x40;
const MS_RWIN   : u8 = 0x80;

fn mod_state_bit (key: KbdKey) -> Option <u8> {
    use KbdKey::*;
    match key {
        // the LL hook reports L/R vk-codes, but we map the generic codes to the left bit anyway
        LControl | Ctrl  => Some (MS_LCTRL),
        RControl         => Some (MS_RCTRL),
        LAlt     | Alt   => Some (MS_LALT),
        RAlt             => Some (MS_RALT),
        LShift   | Shift => Some (MS_LSHIFT),
        RShift           => Some (MS_RSHIFT),
        LWin             => Some (MS_LWIN),
        RWin             => Some (MS_RWIN),
        _ => None,
}  }


/// a matched firing handed off for off-thread callback invocation
pub(crate) struct HotkeyFiring {
    pub(crate) combo : KeyCombination,
    pub(crate) cb    : HotkeyCbFn_T,
}



pub struct _HookEngine {
    // handle to the OS hook while installed, and the id of the thread running its message loop
    pub(crate) hook_handle : AtomicIsize,
    pub(crate) hook_thread : AtomicU32,
    // count of active acquisitions .. the OS hook installs on 0->1 and uninstalls on 1->0
    install_count : AtomicUsize,
    // serializes the 0<->1 OS transitions so a concurrent last-stop and first-start can never
    // pair a fresh install with a stale remove .. queries stay on the atomic count
    transition_lock : Mutex <()>,
    // live snapshot of physically held modifier keys, one bit per L/R key
    mod_state     : AtomicU8,
    // vk-codes of matched main keys currently held .. drives per-key repeat-policy dedup
    held_keys     : Mutex <FxHashSet <u32>>,
    repeat_policy : RwLock <RepeatPolicy>,
    registry      : HotkeyRegistry,
}

# [ derive (Clone, Deref) ]
pub struct HookEngine ( Arc <_HookEngine> );



impl HookEngine {

    /// Creates or returns the process-wide engine .. this is the one the OS hook procedure
    /// routes through, and the one the public handler API uses
    pub fn instance() -> HookEngine {
        static INSTANCE: OnceCell <HookEngine> = OnceCell::new();
        INSTANCE .get_or_init ( || HookEngine::new (HotkeyRegistry::instance()) ) .clone()
    }

    /// (used directly by tests to get isolated engines against isolated registries)
    pub(crate) fn new (registry: HotkeyRegistry) -> HookEngine {
        HookEngine ( Arc::new ( _HookEngine {
            hook_handle     : AtomicIsize::default(),
            hook_thread     : AtomicU32::default(),
            install_count   : AtomicUsize::default(),
            transition_lock : Mutex::new (()),
            mod_state       : AtomicU8::default(),
            held_keys       : Mutex::new (FxHashSet::default()),
            repeat_policy   : RwLock::new (RepeatPolicy::RefireOnRepeat),
            registry,
        } ) )
    }


    pub fn set_repeat_policy (&self, policy: RepeatPolicy) {
        *self.repeat_policy.write().unwrap() = policy;
    }
    pub fn repeat_policy (&self) -> RepeatPolicy {
        *self.repeat_policy.read().unwrap()
    }

    pub fn is_installed (&self) -> bool {
        self.install_count.load (Ordering::SeqCst) > 0
    }
    pub fn install_count (&self) -> usize {
        self.install_count.load (Ordering::SeqCst)
    }


    /// Reference-counted acquisition of the system hook .. only the 0->1 transition touches
    /// the OS, and the count only moves once the install is known good, so a failed install
    /// (or a concurrent one still in flight) can never leave a caller counted-in hookless
    pub fn ensure_installed (&self) -> Result <(), HotkeyError> {
        let _transition_guard = self.transition_lock.lock().unwrap();
        if self.install_count.load (Ordering::SeqCst) == 0 {
            if let Err(err) = self.install_os_hook() {
                tracing::error! (%err, "keyboard hook install failed");
                return Err(err)
            }
            tracing::info! ("keyboard hook installed");
        }
        self.install_count.fetch_add (1, Ordering::SeqCst);
        Ok(())
    }

    /// Reference-counted release .. the 1->0 transition removes the OS hook and clears the
    /// modifier/held-key state; extra calls (or calls with nothing installed) are no-ops
    pub fn ensure_uninstalled (&self) {
        let _transition_guard = self.transition_lock.lock().unwrap();
        match self.install_count.load (Ordering::SeqCst) {
            0 => return,
            1 => {
                self.uninstall_os_hook();
                self.mod_state.store (0, Ordering::SeqCst);
                self.held_keys.lock().unwrap().clear();
                tracing::info! ("keyboard hook uninstalled");
            }
            _ => {}
        }
        self.install_count.fetch_sub (1, Ordering::SeqCst);
    }


    /// The synchronous per-event decision procedure .. runs on the hook thread for every
    /// key event system-wide, so it must stay O(1): an atomic update or a short map access,
    /// never a callback invocation (the OS force-unregisters hooks that blow their timeout)
    pub fn process_event (&self, event: KbdEvent) -> EventPropagationDirective {
        use EventPropagationDirective::*;

        // modifier keys only update the state snapshot .. they always pass through
        if let Some(bit) = mod_state_bit (event.key) {
            if event.ev_t.is_key_down() {
                self.mod_state.fetch_or (bit, Ordering::SeqCst);
            } else {
                self.mod_state.fetch_and (!bit, Ordering::SeqCst);
            }
            return EventProp_Continue
        }

        if !event.ev_t.is_key_down() {
            // releasing a held main key re-arms once-per-press dedup .. key-ups never fire
            self.held_keys.lock().unwrap().remove (&event.vk_code);
            return EventProp_Continue
        }

        let mods = self.mod_snapshot();
        let Some(entry) = self.registry.get_entry (mods, event.key) else {
            return EventProp_Continue
        };

        // held state is tracked per key, so several held combinations auto-repeating in
        // interleaved order each keep their own physical-press bookkeeping
        let is_repeat = ! self.held_keys.lock().unwrap().insert (event.vk_code);
        if !is_repeat || self.repeat_policy() == RepeatPolicy::RefireOnRepeat {
            self.dispatch ( HotkeyFiring { combo: KeyCombination { mods, key: event.key }, cb: entry.cb } );
        }
        // the suppress decision returns synchronously either way .. it never waits on the callback
        if entry.suppress { EventProp_Stop } else { EventProp_Continue }
    }


    /// collapses the per-physical-key bits into the four-way modifier set used for lookup
    fn mod_snapshot (&self) -> ModKeySet {
        let bits = self.mod_state.load (Ordering::SeqCst);
        let mut mods = ModKeySet::empty();
        if bits & (MS_LCTRL  | MS_RCTRL)  != 0 { mods.insert (ModKey::Ctrl)  }
        if bits & (MS_LALT   | MS_RALT)   != 0 { mods.insert (ModKey::Alt)   }
        if bits & (MS_LSHIFT | MS_RSHIFT) != 0 { mods.insert (ModKey::Shift) }
        if bits & (MS_LWIN   | MS_RWIN)   != 0 { mods.insert (ModKey::Win)   }
        mods
    }

    /// spawns the firing out to its own worker thread .. per-firing decoupling, so a slow
    /// callback delays neither the hook thread nor other hotkeys' callbacks
    fn dispatch (&self, firing: HotkeyFiring) {
        thread::spawn ( move || {
            // user callbacks are panic-isolated so one bad callback cant break dispatch
            // for other hotkeys or for future firings of the same one
            if catch_unwind (AssertUnwindSafe (|| (firing.cb)())) .is_err() {
                tracing::error! (combo = %firing.combo, "hotkey callback panicked");
            }
        } );
    }

}



#[cfg(windows)]
impl HookEngine {
    fn install_os_hook (&self) -> Result <(), HotkeyError> { super::win_hook::install (self) }
    fn uninstall_os_hook (&self) { super::win_hook::uninstall (self) }
}

#[cfg(not(windows))]
impl HookEngine {
    // no OS delivery off windows .. the handle slot stands in for the hook so tests can pin
    // that installs and removes stay strictly paired; the decision core runs the same anywhere
    fn install_os_hook (&self) -> Result <(), HotkeyError> {
        let prior = self.hook_handle.swap (1, Ordering::SeqCst);
        debug_assert! (prior == 0, "hook install without matching remove");
        Ok(())
    }
    fn uninstall_os_hook (&self) {
        let prior = self.hook_handle.swap (0, Ordering::SeqCst);
        debug_assert! (prior != 0, "hook remove without matching install");
    }
}
