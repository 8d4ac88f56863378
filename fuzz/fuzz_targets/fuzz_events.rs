#![no_main]
use libfuzzer_sys::fuzz_target;
use xmlprinter::encoding::OutputEncoding;
use xmlprinter::{PrintEvent, XmlPrinter};

fuzz_target!(|data: &[u8]| {
    let Some((&selector, mut rest)) = data.split_first() else {
        return;
    };
    let encoding = OutputEncoding::ALL[usize::from(selector) % OutputEncoding::ALL.len()];
    let mut printer = XmlPrinter::with_encoding(encoding.name());
    let mut out = Vec::new();

    // Each event is an opcode byte, a length byte, and that many payload bytes.
    while let [op, len, tail @ ..] = rest {
        let len = usize::from(*len % 16).min(tail.len());
        let (payload, next) = tail.split_at(len);
        rest = next;
        let event = match op % 4 {
            0 => PrintEvent::OpenTag(payload),
            1 => PrintEvent::Attribute(payload),
            2 => PrintEvent::Value(payload),
            _ => PrintEvent::CloseTag(payload),
        };
        let before = out.len();
        // Rejected events must leave the output untouched.
        if printer.print_event(event, &mut out).is_err() {
            assert_eq!(out.len(), before);
        }
        let copy = printer.clone();
        assert_eq!(copy.depth(), printer.depth());
    }

    if matches!(encoding, OutputEncoding::Ucs4Be | OutputEncoding::Ucs4Le) {
        assert_eq!(out.len() % 4, 0);
    }
});
