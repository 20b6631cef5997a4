//! Deserialisation of DNS messages from the network.  See the `types`
//! module for details of the format.

use bytes::{BufMut, BytesMut};
use std::fmt;

use crate::protocol::octets::read_u16_be;
use crate::protocol::types::*;

impl Message {
    /// # Errors
    ///
    /// If the header or the question cannot be parsed.
    pub fn from_octets(octets: &[u8]) -> Result<Self, Error> {
        Self::deserialise(&mut ConsumableBuffer::new(octets))
    }

    /// # Errors
    ///
    /// If the header or the question cannot be parsed.
    pub fn deserialise(buffer: &mut ConsumableBuffer) -> Result<Self, Error> {
        let header = Header::deserialise(buffer)?;
        tracing::trace!(id = %header.id, qdcount = %header.qdcount, "parsed header");

        let question = Question::deserialise(buffer)?;
        tracing::trace!(qname = %question.decoded_name(), qtype = %question.qtype, qclass = %question.qclass, "parsed question");

        let trailing = buffer.remaining();
        if trailing > 0 {
            tracing::debug!(%trailing, "ignoring octets after the question");
        }

        Ok(Self { header, question })
    }
}

impl Header {
    /// # Errors
    ///
    /// If there are fewer than `HEADER_LEN` octets.
    pub fn from_octets(octets: &[u8]) -> Result<Self, Error> {
        Self::deserialise(&mut ConsumableBuffer::new(octets))
    }

    /// # Errors
    ///
    /// If the header is too short.
    pub fn deserialise(buffer: &mut ConsumableBuffer) -> Result<Self, Error> {
        let actual_length = buffer.remaining();
        let octets = buffer
            .take(HEADER_LEN)
            .ok_or(Error::HeaderTooShort { actual_length })?;

        Ok(Self {
            id: read_u16_be(&octets[0..2]),
            flags: read_u16_be(&octets[2..4]),
            qdcount: read_u16_be(&octets[4..6]),
            ancount: read_u16_be(&octets[6..8]),
            nscount: read_u16_be(&octets[8..10]),
            arcount: read_u16_be(&octets[10..12]),
        })
    }
}

impl Question {
    /// Parse the question which starts `offset` octets into the
    /// message: for a message with one question, that is `HEADER_LEN`.
    ///
    /// # Errors
    ///
    /// If the question cannot be parsed.
    pub fn from_octets(octets: &[u8], offset: usize) -> Result<Self, Error> {
        Self::deserialise(&mut ConsumableBuffer::new(octets).at_offset(offset))
    }

    /// # Errors
    ///
    /// If the name is not terminated, or is not followed by both the
    /// type and class fields.
    pub fn deserialise(buffer: &mut ConsumableBuffer) -> Result<Self, Error> {
        let mut name = BytesMut::new();

        loop {
            match buffer.next_u8() {
                Some(0) => break,
                Some(octet) => name.put_u8(octet),
                None => return Err(Error::QuestionIncomplete),
            }
        }

        let fields = buffer.take(4).ok_or(Error::QuestionIncomplete)?;

        Ok(Self {
            name: name.freeze(),
            qtype: read_u16_be(&fields[0..2]),
            qclass: read_u16_be(&fields[2..4]),
        })
    }
}

/// Errors encountered when parsing a message.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Error {
    /// The message is shorter than the fixed-size header.
    HeaderTooShort { actual_length: usize },

    /// The question name is not terminated before the end of the
    /// message, or the type and class fields are cut off.
    QuestionIncomplete,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::HeaderTooShort { actual_length } => {
                write!(f, "unexpected header length: {actual_length}")
            }
            Error::QuestionIncomplete => write!(f, "question section is incomplete"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

/// A buffer which will be consumed by the parsing process.
pub struct ConsumableBuffer<'a> {
    octets: &'a [u8],
    position: usize,
}

impl<'a> ConsumableBuffer<'a> {
    pub fn new(octets: &'a [u8]) -> Self {
        Self {
            octets,
            position: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.octets.len().saturating_sub(self.position)
    }

    pub fn next_u8(&mut self) -> Option<u8> {
        let octet = self.octets.get(self.position).copied()?;
        self.position += 1;
        Some(octet)
    }

    pub fn next_u16(&mut self) -> Option<u16> {
        self.take(2).map(read_u16_be)
    }

    pub fn take(&mut self, size: usize) -> Option<&'a [u8]> {
        if self.remaining() >= size {
            let slice = &self.octets[self.position..self.position + size];
            self.position += size;
            Some(slice)
        } else {
            None
        }
    }

    pub fn at_offset(&self, position: usize) -> ConsumableBuffer<'a> {
        Self {
            octets: self.octets,
            position,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;
    use crate::protocol::types::test_util::*;

    #[rustfmt::skip]
    const WWW_EXAMPLE_COM: [u8; 33] = [
        // header
        0x12, 0x34, // id
        0x01, 0x00, // flags: RD
        0x00, 0x01, // qdcount
        0x00, 0x00, // ancount
        0x00, 0x00, // nscount
        0x00, 0x00, // arcount
        // question
        3, b'w', b'w', b'w',
        7, b'e', b'x', b'a', b'm', b'p', b'l', b'e',
        3, b'c', b'o', b'm',
        0,
        0x00, 0x01, // A
        0x00, 0x01, // IN
    ];

    #[test]
    fn decode_www_example_com() {
        let message = Message::from_octets(&WWW_EXAMPLE_COM).unwrap();

        assert_eq!(0x1234, message.header.id);
        assert_eq!(0x0100, message.header.flags);
        assert_eq!(0, message.header.qr());
        assert_eq!(Qr::Query, message.header.qr_kind());
        assert_eq!(1, message.header.rd());
        assert_eq!(1, message.header.qdcount);
        assert_eq!("www.example.com", message.question.decoded_name());
        assert_eq!(RecordType::A, message.question.qtype_kind());
        assert_eq!(RecordClass::IN, message.question.qclass_kind());
        assert_eq!("A", message.question.qtype_kind().to_string());
        assert_eq!("IN", message.question.qclass_kind().to_string());
    }

    #[test]
    fn decode_ignores_trailing_octets() {
        let mut octets = WWW_EXAMPLE_COM.to_vec();
        octets.extend_from_slice(&[0xde, 0xad, 0xbe, 0xef]);

        assert_eq!(
            Message::from_octets(&WWW_EXAMPLE_COM),
            Message::from_octets(&octets)
        );
    }

    #[test]
    fn header_eleven_octets() {
        assert_eq!(
            Err(Error::HeaderTooShort { actual_length: 11 }),
            Header::from_octets(&WWW_EXAMPLE_COM[..11])
        );
    }

    #[test]
    fn header_too_short_carries_length() {
        for len in 0..HEADER_LEN {
            let octets = vec![0xff; len];
            assert_eq!(
                Err(Error::HeaderTooShort { actual_length: len }),
                Header::from_octets(&octets)
            );
            assert_eq!(
                Err(Error::HeaderTooShort { actual_length: len }),
                Message::from_octets(&octets)
            );
        }
    }

    #[test]
    fn header_fields_are_big_endian_pairs() {
        let mut rng = rand::rng();
        for _ in 0..100 {
            let len = rng.random_range(HEADER_LEN..64);
            let octets = (0..len).map(|_| rng.random()).collect::<Vec<u8>>();
            let header = Header::from_octets(&octets).unwrap();

            let pair = |i: usize| u16::from_be_bytes([octets[i], octets[i + 1]]);
            assert_eq!(pair(0), header.id);
            assert_eq!(pair(2), header.flags);
            assert_eq!(pair(4), header.qdcount);
            assert_eq!(pair(6), header.ancount);
            assert_eq!(pair(8), header.nscount);
            assert_eq!(pair(10), header.arcount);
        }
    }

    #[test]
    fn question_empty_name_without_fields() {
        let mut octets = WWW_EXAMPLE_COM[..HEADER_LEN].to_vec();
        octets.push(0);

        assert_eq!(
            Err(Error::QuestionIncomplete),
            Question::from_octets(&octets, HEADER_LEN)
        );
        assert_eq!(Err(Error::QuestionIncomplete), Message::from_octets(&octets));
    }

    #[test]
    fn question_empty_name() {
        let mut octets = WWW_EXAMPLE_COM[..HEADER_LEN].to_vec();
        octets.extend_from_slice(&[0, 0x00, 0x02, 0x00, 0xff]);

        let question = Question::from_octets(&octets, HEADER_LEN).unwrap();
        assert!(question.name.is_empty());
        assert_eq!("", question.decoded_name());
        assert_eq!(RecordType::NS, question.qtype_kind());
        assert_eq!(RecordClass::Wildcard, question.qclass_kind());
    }

    #[test]
    fn question_unterminated_name() {
        let mut rng = rand::rng();
        for _ in 0..100 {
            let len = rng.random_range(0..64);
            let mut octets = WWW_EXAMPLE_COM[..HEADER_LEN].to_vec();
            for _ in 0..len {
                octets.push(rng.random_range(1..=u8::MAX));
            }

            assert_eq!(
                Err(Error::QuestionIncomplete),
                Question::from_octets(&octets, HEADER_LEN)
            );
        }
    }

    #[test]
    fn question_fields_cut_off() {
        let full = WWW_EXAMPLE_COM.len();
        for len in (full - 4)..full {
            assert_eq!(
                Err(Error::QuestionIncomplete),
                Message::from_octets(&WWW_EXAMPLE_COM[..len])
            );
        }
    }

    #[test]
    fn question_offset_past_end() {
        assert_eq!(
            Err(Error::QuestionIncomplete),
            Question::from_octets(&WWW_EXAMPLE_COM, WWW_EXAMPLE_COM.len() + 10)
        );
    }

    #[test]
    fn question_keeps_raw_name() {
        let question = Question::from_octets(&WWW_EXAMPLE_COM, HEADER_LEN).unwrap();
        assert_eq!(encode_name("www.example.com"), question.name);
    }

    #[test]
    fn decode_arbitrary_messages() {
        for _ in 0..100 {
            let original = arbitrary_message();
            let deserialised = Message::from_octets(&message_octets(&original));

            assert_eq!(Ok(original), deserialised);
        }
    }

    #[test]
    fn buffer_take_does_not_consume_on_failure() {
        let mut buffer = ConsumableBuffer::new(&[1, 2, 3]);
        assert_eq!(None, buffer.take(4));
        assert_eq!(0, buffer.position());
        assert_eq!(Some(0x0102), buffer.next_u16());
        assert_eq!(None, buffer.next_u16());
        assert_eq!(Some(3), buffer.next_u8());
        assert_eq!(None, buffer.next_u8());
        assert_eq!(0, buffer.remaining());
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            "unexpected header length: 11",
            Error::HeaderTooShort { actual_length: 11 }.to_string()
        );
        assert_eq!(
            "question section is incomplete",
            Error::QuestionIncomplete.to_string()
        );
    }
}
