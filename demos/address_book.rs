//! Streaming an address book in several output encodings.
//!
//! Run with: `cargo run --example address_book`
#![allow(clippy::expect_used)]

use xmlprinter::encoding::OutputEncoding;
use xmlprinter::{print_document, DocumentAttributes, PrintEvent, XmlPrinter};

struct Entry {
    id: &'static str,
    name: &'static str,
    note: &'static str,
}

const ENTRIES: &[Entry] = &[
    Entry {
        id: "1",
        name: "John Smith",
        note: "prefers \"email\" & phone",
    },
    Entry {
        id: "2",
        name: "Zo\u{eb} Ch\u{e2}telet",
        note: "<unlisted>",
    },
];

fn events() -> Vec<PrintEvent<'static>> {
    let mut events = vec![PrintEvent::OpenTag(b"addresses")];
    for entry in ENTRIES {
        events.extend([
            PrintEvent::OpenTag(b"address"),
            PrintEvent::Attribute(b"id"),
            PrintEvent::Value(entry.id.as_bytes()),
            PrintEvent::Attribute(b"note"),
            PrintEvent::Value(entry.note.as_bytes()),
            PrintEvent::OpenTag(b"name"),
            PrintEvent::Value(entry.name.as_bytes()),
            PrintEvent::CloseTag(b"name"),
            PrintEvent::OpenTag(b"archived"),
            PrintEvent::CloseTag(b"archived"),
            PrintEvent::CloseTag(b"address"),
        ]);
    }
    events.push(PrintEvent::CloseTag(b"addresses"));
    events
}

fn main() {
    // Drive the printer call by call
    let mut printer = XmlPrinter::with_encoding("UTF-8");
    let mut out = Vec::new();
    printer
        .print_events(events(), &mut out)
        .expect("address book events are well formed");
    println!("=== UTF-8 ===");
    println!("{}", String::from_utf8_lossy(&out));

    // Same events, every supported output encoding
    println!("\n=== Output size per encoding ===");
    for encoding in OutputEncoding::ALL {
        let bytes = print_document(DocumentAttributes::new(encoding.name()), events())
            .expect("printing failed");
        println!("{:<12} {:>5} bytes", encoding.name(), bytes.len());
    }

    // An unknown label fails on the first operation and writes nothing
    let mut printer = XmlPrinter::with_encoding("EBCDIC");
    let mut out = Vec::new();
    let err = printer
        .open_tag(b"addresses", &mut out)
        .expect_err("EBCDIC is not supported");
    println!("\n=== Unsupported label ===");
    println!("{err} ({} bytes written)", out.len());
}
