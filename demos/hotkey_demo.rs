
// Minimal usage demo .. registers a passthrough hotkey and a suppressed one, listens for
// half a minute, then exits (handlers release the hook on drop).
// Only actually intercepts keys on windows; elsewhere it just exercises the API surface.

use std::thread::sleep;
use std::time::Duration;

use winhotkeys::HotkeyHandler;


fn main() -> Result <(), Box<dyn std::error::Error>> {

    tracing_subscriber::fmt()
        .with_env_filter (tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let hello = HotkeyHandler::new ("control+alt+h", || println! ("control+alt+h pressed"), false);
    hello.start()?;

    // suppressed .. the keystroke never reaches whatever app has focus
    let grabbed = HotkeyHandler::new ("control+shift+f12", || println! ("control+shift+f12 swallowed"), true);
    grabbed.start()?;

    println! ("hotkeys active for 30s .. control+alt+h passes through, control+shift+f12 is suppressed");
    sleep (Duration::from_secs (30));

    Ok(())
}
