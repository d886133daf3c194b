#![no_main]
use docwire::{DatabaseId, Serializer, SerializerOptions, UnknownFields};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let strict = Serializer::new(DatabaseId::new("p", "d"));
    if let Ok(value) = strict.decode_value(data) {
        // Anything accepted must re-encode and decode to the same value
        let bytes = strict.encode_value(&value).unwrap();
        assert_eq!(strict.decode_value(&bytes).unwrap(), value);
    }
    let tolerant = Serializer::with_options(
        DatabaseId::new("p", "d"),
        SerializerOptions::default().unknown_fields(UnknownFields::Skip),
    );
    let _ = tolerant.decode_value(data);
});
