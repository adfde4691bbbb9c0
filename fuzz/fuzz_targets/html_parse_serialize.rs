#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let dom = html::parse_document(input);
    let serialized = html::serialize::to_html(&dom);
    let reparsed = html::parse_document(&serialized);
    assert_eq!(dom.text_content(), reparsed.text_content());
});
