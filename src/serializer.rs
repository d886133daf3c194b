use crate::{
    error::{Error, Result},
    reader::WireReader,
    resource_name, value_codec,
    writer::WireWriter,
    DatabaseId, DocumentKey, SerializerOptions, Value,
};

/// Converts values and document keys to and from the backend's wire representation, for one
/// database.
///
/// A serializer holds no mutable state; every call sets up its own reader or writer. It can be
/// shared freely between threads.
#[derive(Clone, Debug)]
pub struct Serializer {
    database_id: DatabaseId,
    options: SerializerOptions,
}

impl Serializer {
    pub fn new(database_id: DatabaseId) -> Self {
        Self::with_options(database_id, SerializerOptions::default())
    }

    pub fn with_options(database_id: DatabaseId, options: SerializerOptions) -> Self {
        Self {
            database_id,
            options,
        }
    }

    pub fn database_id(&self) -> &DatabaseId {
        &self.database_id
    }

    pub fn options(&self) -> &SerializerOptions {
        &self.options
    }

    /// Encode a value as a `Value` message.
    pub fn encode_value(&self, value: &Value) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.encode_value_into(value, &mut buf)?;
        Ok(buf)
    }

    /// Encode a value as a `Value` message, appending it to `buf`. On failure, `buf` is left as it
    /// was.
    pub fn encode_value_into(&self, value: &Value, buf: &mut Vec<u8>) -> Result<()> {
        let start = buf.len();
        let result = {
            let mut writer =
                WireWriter::new(buf, self.options.max_message_size, self.options.max_depth);
            value_codec::encode(&mut writer, value).and_then(|_| writer.status())
        };
        if result.is_err() {
            buf.truncate(start);
        }
        result
    }

    /// Decode a complete `Value` message. All of `bytes` must belong to the one message.
    pub fn decode_value(&self, bytes: &[u8]) -> Result<Value> {
        if bytes.len() > self.options.max_message_size {
            let err = Error::LengthTooLong {
                max: self.options.max_message_size,
                actual: bytes.len(),
            };
            tracing::debug!(len = bytes.len(), error = %err, "value decode failed");
            return Err(err);
        }
        let mut reader =
            WireReader::new(bytes, self.options.unknown_fields, self.options.max_depth);
        let result = value_codec::decode(&mut reader);
        if let Err(ref err) = result {
            tracing::debug!(len = bytes.len(), error = %err, "value decode failed");
        }
        result
    }

    /// The fully qualified resource name of a document in this serializer's database.
    pub fn encode_key(&self, key: &DocumentKey) -> String {
        resource_name::encode_resource_name(&self.database_id, key.path())
    }

    /// Parse a fully qualified resource name into a document key. The name must belong to this
    /// serializer's database.
    pub fn decode_key(&self, name: &str) -> Result<DocumentKey> {
        let result = self.decode_key_inner(name);
        if let Err(ref err) = result {
            tracing::debug!(resource = name, error = %err, "key decode failed");
        }
        result
    }

    fn decode_key_inner(&self, name: &str) -> Result<DocumentKey> {
        let resource = resource_name::decode_resource_name(name)?;
        let database_id = resource_name::database_id_of(&resource)?;
        if database_id != self.database_id {
            return Err(Error::WrongDatabase {
                expected: self.database_id.clone(),
                actual: database_id,
            });
        }
        let local = resource_name::extract_local_path(&resource)?;
        DocumentKey::from_path(local)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{ObjectMap, Timestamp, UnknownFields, MAX_MESSAGE_SIZE};
    use rand::prelude::*;

    fn serializer() -> Serializer {
        Serializer::new(DatabaseId::new("p", "d"))
    }

    fn key(path: &str) -> DocumentKey {
        DocumentKey::from_path_string(path).unwrap()
    }

    fn gen_value<R: Rng>(rng: &mut R, depth: usize) -> Value {
        let choice = if depth == 0 { rng.gen_range(0..5) } else { rng.gen_range(0..6) };
        match choice {
            0 => Value::Null,
            1 => Value::Bool(rng.gen()),
            2 => Value::Int(rng.gen()),
            3 => {
                let len = rng.gen_range(0..20);
                Value::Str((0..len).map(|_| rng.gen::<char>()).collect())
            }
            4 => {
                let seconds = rng.gen_range(
                    Timestamp::min_value().seconds()..=Timestamp::max_value().seconds(),
                );
                let nanos = rng.gen_range(0..1_000_000_000);
                Value::Timestamp(Timestamp::new(seconds, nanos).unwrap())
            }
            _ => {
                let len = rng.gen_range(0..5);
                let map: ObjectMap = (0..len)
                    .map(|i| (format!("field{}", i), gen_value(rng, depth - 1)))
                    .collect();
                Value::Map(map)
            }
        }
    }

    /// A sample document that touches every kind of value, three objects deep.
    fn sample() -> Value {
        Value::from_iter([
            ("b", Value::from(true)),
            ("i", Value::from(-100)),
            ("n", Value::Null),
            ("s", Value::from("foo")),
            ("t", Value::from(Timestamp::new(1234, 5678).unwrap())),
            (
                "o",
                Value::from_iter([
                    ("d", Value::from(100)),
                    ("nested", Value::from_iter([("e", Value::from(i64::MAX))])),
                    ("empty", Value::Map(ObjectMap::new())),
                ]),
            ),
        ])
    }

    #[test]
    fn roundtrip_sample() {
        let ser = serializer();
        let value = sample();
        let enc = ser.encode_value(&value).unwrap();
        assert_eq!(ser.decode_value(&enc).unwrap(), value);
    }

    #[test]
    fn roundtrip_random() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let ser = serializer();
        for _ in 0..500 {
            let value = gen_value(&mut rng, 4);
            let enc = ser.encode_value(&value).unwrap();
            assert_eq!(ser.decode_value(&enc).unwrap(), value, "bytes: {:x?}", enc);
        }
    }

    #[test]
    fn length_prefixes_match() {
        // Enough content that the map's length prefix needs two bytes
        let long = "y".repeat(300);
        let value = Value::from_iter([("long", Value::from(long.as_str()))]);
        let enc = serializer().encode_value(&value).unwrap();
        assert_eq!(enc[0], 0x32);
        let mut rest = &enc[1..];
        let len = crate::varint::read(&mut rest).unwrap();
        assert_eq!(len as usize, rest.len());
        // MapValue.fields tag, then the entry's own prefix
        assert_eq!(rest[0], 0x0a);
        let mut entry = &rest[1..];
        let entry_len = crate::varint::read(&mut entry).unwrap();
        assert_eq!(entry_len as usize, entry.len());
    }

    #[test]
    fn encode_into_appends() {
        let ser = serializer();
        let mut buf = vec![0xAA];
        ser.encode_value_into(&Value::Null, &mut buf).unwrap();
        ser.encode_value_into(&Value::Bool(true), &mut buf).unwrap();
        assert_eq!(buf, vec![0xAA, 0x58, 0x00, 0x08, 0x01]);
    }

    #[test]
    fn encode_size_limit() {
        let ser = Serializer::with_options(
            DatabaseId::new("p", "d"),
            SerializerOptions::default().max_message_size(16),
        );
        let mut buf = vec![0xAA];
        let value = Value::from_iter([("key", Value::from("x".repeat(100)))]);
        let err = ser.encode_value_into(&value, &mut buf).unwrap_err();
        assert!(matches!(err, Error::EncodeLimit(_)));
        assert!(!err.is_data_corruption());
        assert_eq!(buf, vec![0xAA]);

        // Exactly at the limit is fine
        let fits = Value::from("x".repeat(13));
        assert_eq!(ser.encode_value(&fits).unwrap().len(), 16);
    }

    #[test]
    fn default_size_limit() {
        let ser = serializer();
        let big = Value::from("x".repeat(MAX_MESSAGE_SIZE));
        assert!(matches!(ser.encode_value(&big), Err(Error::EncodeLimit(_))));
        let bytes = vec![0u8; MAX_MESSAGE_SIZE + 1];
        assert!(matches!(
            ser.decode_value(&bytes),
            Err(Error::LengthTooLong { .. })
        ));
    }

    #[test]
    fn depth_limit() {
        let mut value = Value::Null;
        for _ in 0..4 {
            value = Value::from_iter([("inner", value)]);
        }
        let loose = serializer();
        let enc = loose.encode_value(&value).unwrap();
        let strict = Serializer::with_options(
            DatabaseId::new("p", "d"),
            SerializerOptions::default().max_depth(3),
        );
        assert!(matches!(strict.encode_value(&value), Err(Error::EncodeLimit(_))));
        assert!(matches!(strict.decode_value(&enc), Err(Error::ParseLimit(_))));
    }

    #[test]
    fn hostile_nesting() {
        // Build 200 levels of MapValue nesting by hand, far past the default limit
        let mut enc = vec![0x58, 0x00];
        for _ in 0..200 {
            let mut entry = vec![0x0a, 0x01, b'k', 0x12];
            crate::varint::write(&mut entry, enc.len() as u64);
            entry.extend_from_slice(&enc);
            let mut map = vec![0x0a];
            crate::varint::write(&mut map, entry.len() as u64);
            map.extend_from_slice(&entry);
            enc = vec![0x32];
            crate::varint::write(&mut enc, map.len() as u64);
            enc.extend_from_slice(&map);
        }
        assert!(matches!(
            serializer().decode_value(&enc),
            Err(Error::ParseLimit(_))
        ));
    }

    #[test]
    fn trailing_garbage() {
        let ser = serializer();
        let mut enc = ser.encode_value(&Value::Null).unwrap();
        enc.push(0x00);
        assert!(matches!(ser.decode_value(&enc), Err(Error::BadEncode(_))));
        assert!(ser.decode_value(&[]).is_err());
    }

    #[test]
    fn tolerant_decoding() {
        let ser = Serializer::with_options(
            DatabaseId::new("p", "d"),
            SerializerOptions::default().unknown_fields(UnknownFields::Skip),
        );
        // unknown field 31 before a null
        let data = [0xf8, 0x01, 0x00, 0x58, 0x00];
        assert_eq!(ser.decode_value(&data).unwrap(), Value::Null);
        assert!(serializer().decode_value(&data).is_err());
    }

    #[test]
    fn encodes_key() {
        let ser = serializer();
        assert_eq!(ser.encode_key(&key("")), "projects/p/databases/d/documents");
        assert_eq!(
            ser.encode_key(&key("one/two/three/four")),
            "projects/p/databases/d/documents/one/two/three/four"
        );
        let ser = Serializer::new(DatabaseId::new("p1", "d1"));
        assert_eq!(
            ser.encode_key(&key("c/doc1")),
            "projects/p1/databases/d1/documents/c/doc1"
        );
    }

    #[test]
    fn decodes_key() {
        let ser = serializer();
        assert_eq!(
            ser.decode_key("projects/p/databases/d/documents").unwrap(),
            key("")
        );
        assert_eq!(
            ser.decode_key("projects/p/databases/d/documents/one/two/three/four")
                .unwrap(),
            key("one/two/three/four")
        );
        // Same, but with a leading slash
        assert_eq!(
            ser.decode_key("/projects/p/databases/d/documents/one/two/three/four")
                .unwrap(),
            key("one/two/three/four")
        );
        let k = key("c/doc1");
        assert_eq!(ser.decode_key(&ser.encode_key(&k)).unwrap(), k);
    }

    #[test]
    fn keys_roundtrip_or_fail_to_build() {
        let ser = serializer();
        let cases: [&[&str]; 6] = [
            &["c", "doc1"],
            &["a/b", "c/d"],
            &["", ""],
            &["rooms", "a", "messages", "1"],
            &["rooms", "a/"],
            &["(╯°□°）╯", "┻━┻"],
        ];
        for segments in cases {
            match DocumentKey::from_segments(segments.iter().copied()) {
                Ok(k) => assert_eq!(ser.decode_key(&ser.encode_key(&k)).unwrap(), k),
                Err(err) => assert!(matches!(err, Error::BadResourceName(_))),
            }
        }
        assert!(DocumentKey::from_segments(["a/b", "c/d"]).is_err());
        assert!(DocumentKey::from_segments(["", ""]).is_err());
    }

    #[test]
    fn slash_in_database_id_is_rejected_on_decode() {
        for db in [DatabaseId::new("p/x", "d"), DatabaseId::new("p", "d/documents/c")] {
            assert!(!db.is_valid());
            let ser = Serializer::new(db);
            let name = ser.encode_key(&key("c/doc1"));
            assert!(ser.decode_key(&name).is_err(), "accepted {:?}", name);
        }
    }

    #[test]
    fn bad_key() {
        let ser = serializer();
        let bad_cases = [
            "",
            "projects/p",
            "projects/p/databases/d",
            "projects/p/databases/d/documents/odd_number_of_local_elements",
            "projects_spelled_wrong/p/databases/d/documents",
            "projects/p/databases_spelled_wrong/d/documents",
            "projects/not_project_p/databases/d/documents",
            "projects/p/databases/not_database_d/documents",
            "projects/p/databases/d/not_documents",
        ];
        for bad_key in bad_cases {
            let err = ser.decode_key(bad_key).unwrap_err();
            assert!(err.is_data_corruption(), "{:?} gave {:?}", bad_key, err);
        }
        assert_eq!(
            ser.decode_key("projects/q/databases/d/documents"),
            Err(Error::WrongDatabase {
                expected: DatabaseId::new("p", "d"),
                actual: DatabaseId::new("q", "d"),
            })
        );
    }

    #[test]
    fn shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Serializer>();

        let ser = std::sync::Arc::new(serializer());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let ser = ser.clone();
                std::thread::spawn(move || {
                    let value = Value::from_iter([("i", Value::from(i))]);
                    let enc = ser.encode_value(&value).unwrap();
                    ser.decode_value(&enc).unwrap() == value
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }

    #[test]
    fn logs_failures() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
        assert!(serializer().decode_value(&[0x58, 0x01]).is_err());
        assert!(serializer().decode_key("nope").is_err());
    }
}
