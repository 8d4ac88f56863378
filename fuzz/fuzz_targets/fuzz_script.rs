#![no_main]
use libfuzzer_sys::fuzz_target;
use xmlprinter::script::{parse_script, ScriptEvent};
use xmlprinter::XmlPrinter;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Script parsing and printing should never panic
        if let Ok(events) = parse_script(s) {
            let mut printer = XmlPrinter::with_encoding("UTF-8");
            let mut out = Vec::new();
            for event in &events {
                let _ = printer.print_event(ScriptEvent::as_print_event(event), &mut out);
            }
            // UTF-8 output from UTF-8 input stays valid UTF-8
            assert!(std::str::from_utf8(&out).is_ok());
        }
    }
});
