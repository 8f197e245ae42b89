
// module organization note ..
//.. modules with folders are declared as mostly-empty wrappers here that re-export their
//.. submodules wholesale, so users (and our own code via 'use crate::*') get everything
//.. at the top level without deep import paths


/// key representations .. key-codes, modifier sets, and the parsed key-combination model
pub mod keys {
    pub mod key_codes;
    pub mod combo;

    pub use self::key_codes::*;
    pub use self::combo::*;
}


/// the hook core .. registration registry, the hook engine with its dispatch loop, and the
/// windows-only OS seam that feeds it
pub mod hook {
    pub mod registry;
    pub mod engine;
    #[cfg(windows)]
    pub mod win_hook;

    pub use self::registry::*;
    pub use self::engine::*;
}


/// the per-hotkey start/stop facade
pub mod handler;

/// error taxonomy
pub mod error;


// and our lib level re-exports
pub use crate::keys::*;
pub use crate::hook::*;
pub use crate::handler::*;
pub use crate::error::*;
