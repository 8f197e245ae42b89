
use std::os::raw::c_int;
use std::sync::atomic::Ordering;
use std::sync::mpsc::sync_channel;
use std::thread;

use windows::Win32::Foundation::{GetLastError, BOOL, HINSTANCE, HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::WindowsAndMessaging::*;

use crate::*;


// posted to the hook thread to terminate its message loop on uninstall
pub(crate) const MSG_LOOP_KILL_MSG: u32 = WM_USER + 1;


/// Installs the WH_KEYBOARD_LL hook on a dedicated thread and parks that thread in a message
/// loop (LL hook callbacks only get delivered to a thread that pumps messages). The install
/// outcome is reported back synchronously so callers see HookInstall errors at the call site.
pub(crate) fn install (engine: &HookEngine) -> Result <(), HotkeyError> {

    let (result_sender, result_receiver) = sync_channel::<Result <(), HotkeyError>> (1);
    let engine = engine.clone();

    thread::spawn ( move || unsafe {

        // the hook must be set from the thread that will run the message loop
        match SetWindowsHookExW (WH_KEYBOARD_LL, Some(kbd_proc), HINSTANCE(0), 0) {
            Ok (hhook) => {
                engine.hook_handle .store (hhook.0, Ordering::SeqCst);
                engine.hook_thread .store (GetCurrentThreadId(), Ordering::SeqCst);
                let _ = result_sender.send (Ok(()));
            }
            Err (_) => {
                let _ = result_sender.send (Err ( HotkeyError::HookInstall { code: GetLastError().0 } ));
                return
            }
        }

        // we create no windows, so this just parks the thread .. it gets awakened by the OS to
        // run the hook callback, and by our kill message at teardown
        let mut msg = MSG::default();
        while BOOL(0) != GetMessageW (&mut msg, HWND(0), 0, 0) {
            if msg.message == MSG_LOOP_KILL_MSG { break }
        }

    } );

    result_receiver .recv() .unwrap_or ( Err ( HotkeyError::HookInstall { code: 0 } ) )
}


/// Removes the hook and signals the message-loop thread to exit
pub(crate) fn uninstall (engine: &HookEngine) { unsafe {

    let hhook = HHOOK ( engine.hook_handle .swap (0, Ordering::SeqCst) );
    if hhook != HHOOK::default() {
        if true != UnhookWindowsHookEx (hhook) {
            tracing::warn! (code = GetLastError().0, "UnhookWindowsHookEx failed");
        }
    }

    let thread_id = engine.hook_thread .swap (0, Ordering::SeqCst);
    if thread_id != 0 {
        PostThreadMessageW (thread_id, MSG_LOOP_KILL_MSG, WPARAM::default(), LPARAM::default());
    }

} }


/// Keyboard lower-level-hook procedure .. invoked synchronously by the OS for every key event
/// system-wide. Everything here must be bounded and short (the OS force-unregisters hooks that
/// blow the timeout), and nothing may panic into this OS-owned stack frame.
pub(crate) unsafe extern "system"
fn kbd_proc (code: c_int, w_param: WPARAM, l_param: LPARAM) -> LRESULT {

    let return_call = || { CallNextHookEx (HHOOK(0), code, w_param, l_param) };

    if code < 0 { return return_call() }      // ms-docs says we MUST pass these straight through

    use KbdEventType::*;
    if let Some(ev_t) = match w_param.0 as u32 {
        WM_KEYDOWN      => Some (KbdEvent_KeyDown),
        WM_SYSKEYDOWN   => Some (KbdEvent_SysKeyDown),
        WM_KEYUP        => Some (KbdEvent_KeyUp),
        WM_SYSKEYUP     => Some (KbdEvent_SysKeyUp),
        _               => None,
    } {
        let kb_struct = *(l_param.0 as *const KBDLLHOOKSTRUCT);
        let event = KbdEvent { ev_t, key: KbdKey::from (kb_struct.vkCode), vk_code: kb_struct.vkCode };

        if HookEngine::instance().process_event (event) == EventPropagationDirective::EventProp_Stop {
            return LRESULT(1)   // non-zero return signals OS to drop the event
        }
    }

    return_call()
}
