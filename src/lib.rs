//! docwire converts document values to and from the protobuf wire format a document database
//! backend speaks, without any schema-driven protobuf runtime. It also builds and checks the
//! fully qualified resource names documents are addressed by.
//!
//! A document value is one [`Value`]: null, a boolean, a 64-bit integer, a UTF-8 string, a
//! [`Timestamp`], or an object mapping field names to more values. On the wire a value is a
//! `google.firestore.v1.Value` message, with exactly one of these fields set:
//!
//! | Field             | Number | Wire type        | Payload                         |
//! |-------------------|--------|------------------|---------------------------------|
//! | `boolean_value`   | 1      | varint           | 0 or 1                          |
//! | `integer_value`   | 2      | varint           | two's complement bits, 10 bytes if negative |
//! | `map_value`       | 6      | length-delimited | `MapValue`                      |
//! | `timestamp_value` | 10     | length-delimited | `google.protobuf.Timestamp`     |
//! | `null_value`      | 11     | varint           | 0                               |
//! | `string_value`    | 17     | length-delimited | UTF-8 bytes                     |
//!
//! Input is never trusted. Every length and tag is checked against the bytes actually present,
//! object nesting is bounded, and every problem comes back as an [`Error`] instead of a panic.
//!
//! ```
//! # use docwire::{DatabaseId, DocumentKey, Serializer, Value};
//! let serializer = Serializer::new(DatabaseId::new("p", "d"));
//!
//! let value = Value::from_iter([("name", Value::from("Ada")), ("age", Value::from(36))]);
//! let bytes = serializer.encode_value(&value).unwrap();
//! assert_eq!(serializer.decode_value(&bytes).unwrap(), value);
//!
//! let key = DocumentKey::from_path_string("people/ada").unwrap();
//! let name = serializer.encode_key(&key);
//! assert_eq!(name, "projects/p/databases/d/documents/people/ada");
//! assert_eq!(serializer.decode_key(&name).unwrap(), key);
//! ```

mod database_id;
mod depth_tracking;
mod document_key;
mod error;
mod object_codec;
mod options;
mod resource_path;
mod serializer;
mod timestamp;
mod value;
mod value_codec;

pub mod reader;
pub mod resource_name;
pub mod varint;
pub mod wire;
pub mod writer;

pub use self::database_id::{DatabaseId, DEFAULT_DATABASE_ID};
pub use self::document_key::DocumentKey;
pub use self::error::{Error, ErrorKind, Result};
pub use self::options::{SerializerOptions, UnknownFields};
pub use self::resource_path::ResourcePath;
pub use self::serializer::Serializer;
pub use self::timestamp::Timestamp;
pub use self::value::{ObjectMap, Value};

/// The maximum size of an encoded value is 1 MiB, less 4 bytes: the backend's limit on a single
/// document.
pub const MAX_MESSAGE_SIZE: usize = (1usize << 20) - 4;
/// The maximum object nesting depth, on both encode and decode.
pub const MAX_DEPTH: usize = 100;
