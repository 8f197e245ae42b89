
use std::sync::{Arc, Mutex};

use crate::*;


/// Per-hotkey lifecycle facade over the shared engine and registry.
///
/// States run created -> started -> stopped; start() after stop() is permitted and makes a
/// fresh registration. The combination string is validated at start(), not construction.
/// Dropping a started handler releases its registration and its hold on the OS hook.
pub struct HotkeyHandler {
    combination  : String,
    cb           : HotkeyCbFn_T,
    suppress     : bool,
    engine       : HookEngine,
    registry     : HotkeyRegistry,
    registration : Mutex <Option <RegistrationHandle>>,
}


impl HotkeyHandler {

    /// Creates a handler bound to the process-wide engine/registry
    pub fn new <F> (combination: &str, callback: F, suppress: bool) -> HotkeyHandler
        where F: Fn() + Send + Sync + 'static,
    {
        HotkeyHandler::with_parts (HookEngine::instance(), HotkeyRegistry::instance(), combination, Arc::new(callback), suppress)
    }

    pub(crate) fn with_parts (
        engine: HookEngine, registry: HotkeyRegistry, combination: &str, cb: HotkeyCbFn_T, suppress: bool,
    ) -> HotkeyHandler {
        HotkeyHandler {
            combination: combination.to_string(), cb, suppress,
            engine, registry,
            registration: Mutex::new (None),
        }
    }

    pub fn combination (&self) -> &str { &self.combination }

    pub fn is_started (&self) -> bool { self.registration.lock().unwrap().is_some() }


    /// Parses and validates the combination, registers it, and acquires the OS hook.
    /// A hook-install failure rolls the fresh registration back before surfacing.
    pub fn start (&self) -> Result <(), HotkeyError> {
        let mut registration = self.registration.lock().unwrap();
        if let Some(handle) = registration.as_ref() {
            return Err ( HotkeyError::DuplicateActiveHotkey (handle.combination()) )
        }
        let combo = KeyCombination::parse (&self.combination)?;
        let handle = self.registry.register (combo, self.cb.clone(), self.suppress)?;
        if let Err(err) = self.engine.ensure_installed() {
            self.registry.unregister (&handle);
            return Err(err)
        }
        tracing::info! (%combo, suppress = self.suppress, "hotkey started");
        *registration = Some (handle);
        Ok(())
    }

    /// Unregisters and releases one hold on the OS hook (the last release uninstalls it).
    /// Idempotent; only prevents future firings, a callback already dispatched runs out.
    pub fn stop (&self) {
        let mut registration = self.registration.lock().unwrap();
        if let Some(handle) = registration.take() {
            self.registry.unregister (&handle);
            self.engine.ensure_uninstalled();
            tracing::info! (combo = %handle.combination(), "hotkey stopped");
        }
    }

}


impl Drop for HotkeyHandler {
    fn drop (&mut self) { self.stop() }
}
