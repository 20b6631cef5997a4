#![no_main]
use libfuzzer_sys::fuzz_target;

use dns_types::protocol::types::Message;

fuzz_target!(|data: &[u8]| {
    if let Ok(message) = Message::from_octets(data) {
        let rendered = message.to_string();
        assert!(rendered.starts_with("DNS={"));
        assert_eq!(message.question.decoded_name(), message.question.decoded_name());
    }
});
