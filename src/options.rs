//! Tunables for a [`Serializer`](crate::Serializer).
//!
//! Options are plain data and (de)serializable, so they can be embedded in whatever configuration
//! file the surrounding client already loads:
//!
//! ```
//! # use docwire::{SerializerOptions, UnknownFields};
//! let opts: SerializerOptions = serde_json::from_str(r#"{ "unknown_fields": "skip" }"#).unwrap();
//! assert_eq!(opts.unknown_fields, UnknownFields::Skip);
//! assert_eq!(opts.max_depth, docwire::MAX_DEPTH);
//! ```

use crate::{MAX_DEPTH, MAX_MESSAGE_SIZE};
use serde::{Deserialize, Serialize};

/// What to do with a field number that isn't part of the message being decoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownFields {
    /// Treat the message as a closed set of fields and fail decoding.
    #[default]
    Reject,
    /// Discard the field and keep going, the way a schema-evolving protobuf runtime would.
    Skip,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializerOptions {
    pub unknown_fields: UnknownFields,
    /// Maximum object nesting depth, on both encode and decode.
    pub max_depth: usize,
    /// Maximum size of a whole encoded value, in bytes, on both encode and decode.
    pub max_message_size: usize,
}

impl Default for SerializerOptions {
    fn default() -> Self {
        Self {
            unknown_fields: UnknownFields::Reject,
            max_depth: MAX_DEPTH,
            max_message_size: MAX_MESSAGE_SIZE,
        }
    }
}

impl SerializerOptions {
    pub fn unknown_fields(mut self, unknown_fields: UnknownFields) -> Self {
        self.unknown_fields = unknown_fields;
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_message_size(mut self, max_message_size: usize) -> Self {
        self.max_message_size = max_message_size;
        self
    }
}
