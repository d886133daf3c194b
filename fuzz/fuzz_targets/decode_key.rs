#![no_main]
use docwire::{DatabaseId, DocumentKey, Serializer};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|name: &str| {
    let serializer = Serializer::new(DatabaseId::new("p", "d"));
    if let Ok(key) = serializer.decode_key(name) {
        let encoded = serializer.encode_key(&key);
        assert_eq!(serializer.decode_key(&encoded).unwrap(), key);
    }
    // Treat the input as NUL-separated segments: any key that builds must survive a round trip
    if let Ok(key) = DocumentKey::from_segments(name.split('\0')) {
        let encoded = serializer.encode_key(&key);
        assert_eq!(serializer.decode_key(&encoded).unwrap(), key);
    }
});
