use bytes::Bytes;
use std::fmt;

#[cfg(any(feature = "test-util", test))]
use bytes::{BufMut, BytesMut};

/// Length of the fixed header which begins every message.
pub const HEADER_LEN: usize = 12;

/// Maximum length of a single label in a domain name.
pub const LABEL_MAX_LEN: usize = 63;

/// Flags mask for the QR bit being set (response).
pub const HEADER_MASK_QR: u16 = 0b1000_0000_0000_0000;

/// Offset for the QR bit.
pub const HEADER_OFFSET_QR: u16 = 15;

/// Flags mask for the opcode field.
pub const HEADER_MASK_OPCODE: u16 = 0b0111_1000_0000_0000;

/// Offset for the opcode field.
pub const HEADER_OFFSET_OPCODE: u16 = 11;

/// Flags mask for the AA bit being set (authoritative).
pub const HEADER_MASK_AA: u16 = 0b0000_0100_0000_0000;

/// Offset for the AA bit.
pub const HEADER_OFFSET_AA: u16 = 10;

/// Flags mask for the TC bit being set (truncated).
pub const HEADER_MASK_TC: u16 = 0b0000_0010_0000_0000;

/// Offset for the TC bit.
pub const HEADER_OFFSET_TC: u16 = 9;

/// Flags mask for the RD bit being set (desired).
pub const HEADER_MASK_RD: u16 = 0b0000_0001_0000_0000;

/// Offset for the RD bit.
pub const HEADER_OFFSET_RD: u16 = 8;

/// Flags mask for the RA bit being set (available).
pub const HEADER_MASK_RA: u16 = 0b0000_0000_1000_0000;

/// Offset for the RA bit.
pub const HEADER_OFFSET_RA: u16 = 7;

/// Flags mask for the AD bit being set (authenticated data).
pub const HEADER_MASK_AD: u16 = 0b0000_0000_0010_0000;

/// Offset for the AD bit.
pub const HEADER_OFFSET_AD: u16 = 5;

/// Flags mask for the CD bit being set (checking disabled).
pub const HEADER_MASK_CD: u16 = 0b0000_0000_0001_0000;

/// Offset for the CD bit.
pub const HEADER_OFFSET_CD: u16 = 4;

/// Flags mask for the rcode field.
pub const HEADER_MASK_RCODE: u16 = 0b0000_0000_0000_1111;

/// Offset for the rcode field.
pub const HEADER_OFFSET_RCODE: u16 = 0;

/// A decoded message: the header and the (single) question.
///
/// ```text
///     +---------------------+
///     |        Header       |
///     +---------------------+
///     |       Question      | the question for the name server
///     +---------------------+
/// ```
///
/// The answer, authority, and additional sections are not decoded.
/// See section 4.1 of RFC 1035.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(any(feature = "test-util", test), derive(arbitrary::Arbitrary))]
pub struct Message {
    pub header: Header,
    pub question: Question,
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "DNS={{\n\tHeader={},\n\tQuestion={}\n}}",
            self.header, self.question
        )
    }
}

/// Common header type for all messages.
///
/// ```text
///                                     1  1  1  1  1  1
///       0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     |                      ID                       |
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     |QR|   Opcode  |AA|TC|RD|RA| Z|AD|CD|   RCODE   |
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     |                    QDCOUNT                    |
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     |                    ANCOUNT                    |
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     |                    NSCOUNT                    |
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     |                    ARCOUNT                    |
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// ```
///
/// See section 4.1.1 of RFC 1035, and section 3.2 of RFC 4035 for the
/// AD and CD bits.
///
/// The flags are kept packed, as they are on the wire, and are read
/// and written through the accessor methods.  The counts are what the
/// message claims: nothing checks that the sections really contain
/// that many entries.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(any(feature = "test-util", test), derive(arbitrary::Arbitrary))]
pub struct Header {
    /// A 16 bit identifier assigned by the program that generates any
    /// kind of query.  This identifier is copied the corresponding
    /// reply and can be used by the requester to match up replies to
    /// outstanding queries.
    pub id: u16,

    /// The packed QR, Opcode, AA, TC, RD, RA, Z, AD, CD, and RCODE
    /// fields.
    pub flags: u16,

    /// The number of entries in the question section.
    pub qdcount: u16,

    /// The number of resource records in the answer section.
    pub ancount: u16,

    /// The number of name server resource records in the authority
    /// records section.
    pub nscount: u16,

    /// The number of resource records in the additional records
    /// section.
    pub arcount: u16,
}

impl Header {
    #[allow(clippy::cast_possible_truncation)]
    fn field(&self, mask: u16, offset: u16) -> u8 {
        // every field is at most 4 bits wide
        ((self.flags & mask) >> offset) as u8
    }

    fn set(&mut self, mask: u16) {
        self.flags |= mask;
    }

    fn clear(&mut self, mask: u16) {
        self.flags &= !mask;
    }

    /// Whether this message is a query (0), or a response (1).
    pub fn qr(&self) -> u8 {
        self.field(HEADER_MASK_QR, HEADER_OFFSET_QR)
    }

    pub fn qr_kind(&self) -> Qr {
        Qr::from(self.qr())
    }

    pub fn set_qr(&mut self) {
        self.set(HEADER_MASK_QR);
    }

    pub fn clear_qr(&mut self) {
        self.clear(HEADER_MASK_QR);
    }

    /// The kind of query in this message.  This value is set by the
    /// originator of a query and copied into the response.
    pub fn opcode(&self) -> u8 {
        self.field(HEADER_MASK_OPCODE, HEADER_OFFSET_OPCODE)
    }

    pub fn opcode_kind(&self) -> Opcode {
        Opcode::from(self.opcode())
    }

    /// Authoritative Answer - this bit is valid in responses, and
    /// specifies that the responding name server is an authority for
    /// the domain name in question section.
    pub fn aa(&self) -> u8 {
        self.field(HEADER_MASK_AA, HEADER_OFFSET_AA)
    }

    pub fn set_aa(&mut self) {
        self.set(HEADER_MASK_AA);
    }

    pub fn clear_aa(&mut self) {
        self.clear(HEADER_MASK_AA);
    }

    /// Truncation - specifies that this message was truncated due to
    /// length greater than that permitted on the transmission
    /// channel.
    pub fn tc(&self) -> u8 {
        self.field(HEADER_MASK_TC, HEADER_OFFSET_TC)
    }

    pub fn set_tc(&mut self) {
        self.set(HEADER_MASK_TC);
    }

    pub fn clear_tc(&mut self) {
        self.clear(HEADER_MASK_TC);
    }

    /// Recursion Desired - this bit may be set in a query and is
    /// copied into the response.
    pub fn rd(&self) -> u8 {
        self.field(HEADER_MASK_RD, HEADER_OFFSET_RD)
    }

    pub fn set_rd(&mut self) {
        self.set(HEADER_MASK_RD);
    }

    pub fn clear_rd(&mut self) {
        self.clear(HEADER_MASK_RD);
    }

    /// Recursion Available - this be is set or cleared in a response,
    /// and denotes whether recursive query support is available in
    /// the name server.
    pub fn ra(&self) -> u8 {
        self.field(HEADER_MASK_RA, HEADER_OFFSET_RA)
    }

    pub fn set_ra(&mut self) {
        self.set(HEADER_MASK_RA);
    }

    pub fn clear_ra(&mut self) {
        self.clear(HEADER_MASK_RA);
    }

    /// Authentic Data - all the data in the answer and authority
    /// sections has been authenticated by the server.
    pub fn ad(&self) -> u8 {
        self.field(HEADER_MASK_AD, HEADER_OFFSET_AD)
    }

    pub fn set_ad(&mut self) {
        self.set(HEADER_MASK_AD);
    }

    pub fn clear_ad(&mut self) {
        self.clear(HEADER_MASK_AD);
    }

    /// Checking Disabled - the resolver will accept data which has
    /// not been authenticated.
    pub fn cd(&self) -> u8 {
        self.field(HEADER_MASK_CD, HEADER_OFFSET_CD)
    }

    pub fn set_cd(&mut self) {
        self.set(HEADER_MASK_CD);
    }

    pub fn clear_cd(&mut self) {
        self.clear(HEADER_MASK_CD);
    }

    /// Response code - this 4 bit field is set as part of responses.
    pub fn rcode(&self) -> u8 {
        self.field(HEADER_MASK_RCODE, HEADER_OFFSET_RCODE)
    }

    pub fn rcode_kind(&self) -> Rcode {
        Rcode::from(self.rcode())
    }

    /// ORs the low 4 bits of `rcode` into the rcode field.  Any bits
    /// already set stay set: use `assign_rcode` to replace the value.
    pub fn set_rcode(&mut self, rcode: u8) {
        self.flags |= u16::from(rcode) & HEADER_MASK_RCODE;
    }

    /// Replaces the rcode field with the low 4 bits of `rcode`.
    pub fn assign_rcode(&mut self, rcode: u8) {
        self.clear(HEADER_MASK_RCODE);
        self.set_rcode(rcode);
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{{ID={}, QR=\"{}\", OPCode=\"{}\", AA={}, TC={}, RD={}, RA={}, DA={}, CD={}, RCODE=\"{}\", QDCount={}, ANCount={}, NSCount={}, ARCount={}}}",
            self.id,
            self.qr_kind(),
            self.opcode_kind(),
            self.aa(),
            self.tc(),
            self.rd(),
            self.ra(),
            self.ad(),
            self.cd(),
            self.rcode_kind(),
            self.qdcount,
            self.ancount,
            self.nscount,
            self.arcount,
        )
    }
}

/// The question being asked.
///
/// ```text
///                                     1  1  1  1  1  1
///       0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     |                                               |
///     /                     QNAME                     /
///     /                                               /
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     |                     QTYPE                     |
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
///     |                     QCLASS                    |
///     +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// ```
///
/// See section 4.1.2 of RFC 1035.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Question {
    /// The encoded name as it appeared on the wire: a sequence of
    /// labels, where each label consists of a length octet followed by
    /// that number of octets.  The zero octet which terminates the
    /// name is not included.
    pub name: Bytes,

    /// a two octet code which specifies the type of the query.
    pub qtype: u16,

    /// a two octet code that specifies the class of the query.  For
    /// example, the QCLASS field is IN for the Internet.
    pub qclass: u16,
}

impl Question {
    /// The name in dotted form, without a trailing dot.
    ///
    /// The first length octet is dropped and every later one becomes
    /// a `.`, so `[3, w, w, w, 3, c, o, m]` is `"www.com"`.  Octets
    /// which are not UTF-8 are replaced.
    pub fn decoded_name(&self) -> String {
        let mut dotted = Vec::with_capacity(self.name.len());
        let mut next_length = 0;

        for (i, octet) in self.name.iter().enumerate() {
            if i == next_length {
                next_length = i + 1 + usize::from(*octet);
                if i > 0 {
                    dotted.push(b'.');
                }
            } else {
                dotted.push(*octet);
            }
        }

        String::from_utf8_lossy(&dotted).into_owned()
    }

    /// The content of each label, in order.  If the final length octet
    /// claims more octets than remain, the label is cut short.
    pub fn labels(&self) -> Vec<&[u8]> {
        let mut labels = Vec::new();
        let mut position = 0;

        while position < self.name.len() {
            let start = position + 1;
            let stop = usize::min(start + usize::from(self.name[position]), self.name.len());
            labels.push(&self.name[start..stop]);
            position = stop;
        }

        labels
    }

    pub fn qtype_kind(&self) -> RecordType {
        RecordType::from(self.qtype)
    }

    pub fn qclass_kind(&self) -> RecordClass {
        RecordClass::from(self.qclass)
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{{QName={}, QType={}, QClass={}}}",
            self.decoded_name(),
            self.qtype_kind(),
            self.qclass_kind()
        )
    }
}

#[cfg(any(feature = "test-util", test))]
impl<'a> arbitrary::Arbitrary<'a> for Question {
    // only generates well-formed names of printable ascii
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let num_labels = u.int_in_range::<usize>(0..=5)?;
        let mut name = BytesMut::new();
        for _ in 0..num_labels {
            let label_len = u.int_in_range::<u8>(1..=20)?;
            name.put_u8(label_len);
            for b in u.bytes(label_len.into())? {
                let ascii_byte = *b % 128;
                name.put_u8(
                    if ascii_byte == b'.' || !ascii_byte.is_ascii_graphic() {
                        b'x'
                    } else {
                        ascii_byte
                    },
                );
            }
        }
        Ok(Self {
            name: name.freeze(),
            qtype: u.arbitrary()?,
            qclass: u.arbitrary()?,
        })
    }
}

/// Whether a message is a query or a response.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Qr {
    Query,
    Response,
    Invalid(QrInvalid),
}

/// A struct with a private constructor, to ensure invalid `Qr`s
/// cannot be created.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct QrInvalid(u8);

impl Qr {
    pub fn is_invalid(&self) -> bool {
        matches!(self, Qr::Invalid(_))
    }
}

impl fmt::Display for Qr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Qr::Query => write!(f, "query"),
            Qr::Response => write!(f, "response"),
            Qr::Invalid(_) => write!(f, "invalid"),
        }
    }
}

impl From<u8> for Qr {
    fn from(octet: u8) -> Self {
        match octet {
            0 => Qr::Query,
            1 => Qr::Response,
            other => Qr::Invalid(QrInvalid(other)),
        }
    }
}

impl From<Qr> for u8 {
    fn from(value: Qr) -> Self {
        match value {
            Qr::Query => 0,
            Qr::Response => 1,
            Qr::Invalid(QrInvalid(octet)) => octet,
        }
    }
}

/// What sort of query this is.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Opcode {
    Standard,
    Inverse,
    Status,
    Reserved(OpcodeReserved),
}

/// A struct with a private constructor, to ensure invalid `Opcode`s
/// cannot be created.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct OpcodeReserved(u8);

impl Opcode {
    pub fn is_reserved(&self) -> bool {
        matches!(self, Opcode::Reserved(_))
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Opcode::Standard => write!(f, "QUERY"),
            Opcode::Inverse => write!(f, "IQUERY"),
            Opcode::Status => write!(f, "STATUS"),
            Opcode::Reserved(_) => write!(f, "RESERVED"),
        }
    }
}

impl From<u8> for Opcode {
    fn from(octet: u8) -> Self {
        match octet {
            0 => Opcode::Standard,
            1 => Opcode::Inverse,
            2 => Opcode::Status,
            other => Opcode::Reserved(OpcodeReserved(other)),
        }
    }
}

impl From<Opcode> for u8 {
    fn from(value: Opcode) -> Self {
        match value {
            Opcode::Standard => 0,
            Opcode::Inverse => 1,
            Opcode::Status => 2,
            Opcode::Reserved(OpcodeReserved(octet)) => octet,
        }
    }
}

/// What sort of response this is.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Rcode {
    NoError,
    FormatError,
    ServerFailure,
    NameError,
    NotImplemented,
    Refused,
    Reserved(RcodeReserved),
}

/// A struct with a private constructor, to ensure invalid `Rcode`s
/// cannot be created.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct RcodeReserved(u8);

impl Rcode {
    pub fn is_reserved(&self) -> bool {
        matches!(self, Rcode::Reserved(_))
    }
}

impl fmt::Display for Rcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Rcode::NoError => write!(f, "NoError"),
            Rcode::FormatError => write!(f, "FormatError"),
            Rcode::ServerFailure => write!(f, "ServerFailure"),
            Rcode::NameError => write!(f, "NameError"),
            Rcode::NotImplemented => write!(f, "NotImplemented"),
            Rcode::Refused => write!(f, "Refused"),
            Rcode::Reserved(_) => write!(f, "Reserved"),
        }
    }
}

impl From<u8> for Rcode {
    fn from(octet: u8) -> Self {
        match octet {
            0 => Rcode::NoError,
            1 => Rcode::FormatError,
            2 => Rcode::ServerFailure,
            3 => Rcode::NameError,
            4 => Rcode::NotImplemented,
            5 => Rcode::Refused,
            other => Rcode::Reserved(RcodeReserved(other)),
        }
    }
}

impl From<Rcode> for u8 {
    fn from(value: Rcode) -> Self {
        match value {
            Rcode::NoError => 0,
            Rcode::FormatError => 1,
            Rcode::ServerFailure => 2,
            Rcode::NameError => 3,
            Rcode::NotImplemented => 4,
            Rcode::Refused => 5,
            Rcode::Reserved(RcodeReserved(octet)) => octet,
        }
    }
}

/// Record types from section 3.2.2 of RFC 1035.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum RecordType {
    A,
    NS,
    MD,
    MF,
    CNAME,
    SOA,
    MB,
    MG,
    MR,
    NULL,
    WKS,
    PTR,
    HINFO,
    MINFO,
    MX,
    TXT,
    Unknown(RecordTypeUnknown),
}

/// A struct with a private constructor, to ensure invalid `RecordType`s
/// cannot be created.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct RecordTypeUnknown(u16);

impl RecordType {
    pub fn is_unknown(&self) -> bool {
        matches!(self, RecordType::Unknown(_))
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RecordType::A => write!(f, "A"),
            RecordType::NS => write!(f, "NS"),
            RecordType::MD => write!(f, "MD"),
            RecordType::MF => write!(f, "MF"),
            RecordType::CNAME => write!(f, "CNAME"),
            RecordType::SOA => write!(f, "SOA"),
            RecordType::MB => write!(f, "MB"),
            RecordType::MG => write!(f, "MG"),
            RecordType::MR => write!(f, "MR"),
            RecordType::NULL => write!(f, "NULL"),
            RecordType::WKS => write!(f, "WKS"),
            RecordType::PTR => write!(f, "PTR"),
            RecordType::HINFO => write!(f, "HINFO"),
            RecordType::MINFO => write!(f, "MINFO"),
            RecordType::MX => write!(f, "MX"),
            RecordType::TXT => write!(f, "TXT"),
            RecordType::Unknown(_) => write!(f, "INVALID"),
        }
    }
}

impl From<u16> for RecordType {
    fn from(value: u16) -> Self {
        match value {
            1 => RecordType::A,
            2 => RecordType::NS,
            3 => RecordType::MD,
            4 => RecordType::MF,
            5 => RecordType::CNAME,
            6 => RecordType::SOA,
            7 => RecordType::MB,
            8 => RecordType::MG,
            9 => RecordType::MR,
            10 => RecordType::NULL,
            11 => RecordType::WKS,
            12 => RecordType::PTR,
            13 => RecordType::HINFO,
            14 => RecordType::MINFO,
            15 => RecordType::MX,
            16 => RecordType::TXT,
            _ => RecordType::Unknown(RecordTypeUnknown(value)),
        }
    }
}

impl From<RecordType> for u16 {
    fn from(value: RecordType) -> Self {
        match value {
            RecordType::A => 1,
            RecordType::NS => 2,
            RecordType::MD => 3,
            RecordType::MF => 4,
            RecordType::CNAME => 5,
            RecordType::SOA => 6,
            RecordType::MB => 7,
            RecordType::MG => 8,
            RecordType::MR => 9,
            RecordType::NULL => 10,
            RecordType::WKS => 11,
            RecordType::PTR => 12,
            RecordType::HINFO => 13,
            RecordType::MINFO => 14,
            RecordType::MX => 15,
            RecordType::TXT => 16,
            RecordType::Unknown(RecordTypeUnknown(value)) => value,
        }
    }
}

/// Record classes from section 3.2.4 of RFC 1035, plus the `*` query
/// class from section 3.2.5.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum RecordClass {
    IN,
    CS,
    CH,
    HS,
    Wildcard,
    Unknown(RecordClassUnknown),
}

/// A struct with a private constructor, to ensure invalid
/// `RecordClass`es cannot be created.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct RecordClassUnknown(u16);

impl RecordClass {
    pub fn is_unknown(&self) -> bool {
        matches!(self, RecordClass::Unknown(_))
    }
}

impl fmt::Display for RecordClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RecordClass::IN => write!(f, "IN"),
            RecordClass::CS => write!(f, "CS"),
            RecordClass::CH => write!(f, "CH"),
            RecordClass::HS => write!(f, "HS"),
            RecordClass::Wildcard => write!(f, "*"),
            RecordClass::Unknown(_) => write!(f, "INVALID"),
        }
    }
}

impl From<u16> for RecordClass {
    fn from(value: u16) -> Self {
        match value {
            1 => RecordClass::IN,
            2 => RecordClass::CS,
            3 => RecordClass::CH,
            4 => RecordClass::HS,
            255 => RecordClass::Wildcard,
            _ => RecordClass::Unknown(RecordClassUnknown(value)),
        }
    }
}

impl From<RecordClass> for u16 {
    fn from(value: RecordClass) -> Self {
        match value {
            RecordClass::IN => 1,
            RecordClass::CS => 2,
            RecordClass::CH => 3,
            RecordClass::HS => 4,
            RecordClass::Wildcard => 255,
            RecordClass::Unknown(RecordClassUnknown(value)) => value,
        }
    }
}


#[cfg(any(feature = "test-util", test))]
#[allow(clippy::missing_panics_doc)]
pub mod test_util {
    use super::*;

    use crate::protocol::octets::write_u16_be;
    use arbitrary::{Arbitrary, Unstructured};
    use rand::Rng;

    pub fn arbitrary_message() -> Message {
        let mut rng = rand::rng();
        for size in [128, 256, 512, 1024] {
            let mut buf = BytesMut::with_capacity(size);
            for _ in 0..size {
                buf.put_u8(rng.random());
            }

            if let Ok(message) = Message::arbitrary(&mut Unstructured::new(&buf.freeze())) {
                return message;
            }
        }

        panic!("could not generate arbitrary value!");
    }

    /// Encode a dotted name as length-prefixed labels, without the
    /// terminating zero octet.
    pub fn encode_name(dotted: &str) -> Bytes {
        let mut octets = BytesMut::with_capacity(dotted.len() + 1);
        for label in dotted.split('.').filter(|label| !label.is_empty()) {
            octets.put_u8(label.len().try_into().unwrap());
            octets.put_slice(label.as_bytes());
        }
        octets.freeze()
    }

    pub fn question(dotted: &str, qtype: u16, qclass: u16) -> Question {
        Question {
            name: encode_name(dotted),
            qtype,
            qclass,
        }
    }

    /// The wire form of a message, with the question's name
    /// terminated.
    pub fn message_octets(message: &Message) -> Vec<u8> {
        let header = &message.header;
        let question = &message.question;

        let mut octets = Vec::with_capacity(HEADER_LEN + question.name.len() + 5);
        for field in [
            header.id,
            header.flags,
            header.qdcount,
            header.ancount,
            header.nscount,
            header.arcount,
        ] {
            octets.extend_from_slice(&write_u16_be(field));
        }
        octets.extend_from_slice(&question.name);
        octets.push(0);
        octets.extend_from_slice(&write_u16_be(question.qtype));
        octets.extend_from_slice(&write_u16_be(question.qclass));
        octets
    }
}
