//! The DNS wire format: the header and question section of a message,
//! and the decoder which reads them from raw octets.

pub mod deserialise;
pub mod octets;
pub mod types;
