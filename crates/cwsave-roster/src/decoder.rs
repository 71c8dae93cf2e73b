//! Decoding character records out of a blob store.
//!
//! A record is stored under its decimal ordinal (`"0"`, `"1"`, ...). The
//! [`LayoutDecoder`] reads the fixed little-endian header at its start:
//!
//! ```text
//! [4 bytes: class id (u32 LE)]
//! [4 bytes: specialization (u32 LE)]
//! [4 bytes: level (u32 LE)]
//! [16 bytes: name, UTF-8, NUL-padded]
//! ```
//!
//! Anything after the header (equipment, skills, the rest of the entity) is
//! left to other tools and ignored here.

use cwsave_store::BlobStore;
use cwsave_types::{record_key, CharacterClass, CharacterRecord, NAME_FIELD_LEN};

use crate::error::{DecodeError, DecodeResult};

/// Length of the fixed record header.
pub const RECORD_HEADER_LEN: usize = 12 + NAME_FIELD_LEN;

const CLASS_OFFSET: usize = 0;
const SPECIALIZATION_OFFSET: usize = 4;
const LEVEL_OFFSET: usize = 8;
const NAME_OFFSET: usize = 12;

/// Produces the character at a given ordinal from an open store.
pub trait RecordDecoder {
    /// Decode the record at `index`.
    ///
    /// The returned record must carry `index` as its ordinal.
    fn decode(&self, index: usize, store: &dyn BlobStore) -> DecodeResult<CharacterRecord>;
}

impl<F> RecordDecoder for F
where
    F: Fn(usize, &dyn BlobStore) -> DecodeResult<CharacterRecord>,
{
    fn decode(&self, index: usize, store: &dyn BlobStore) -> DecodeResult<CharacterRecord> {
        self(index, store)
    }
}

/// Decoder for the fixed record header.
#[derive(Clone, Copy, Debug, Default)]
pub struct LayoutDecoder;

impl LayoutDecoder {
    /// Decode a record from its raw blob.
    pub fn decode_bytes(index: usize, data: &[u8]) -> DecodeResult<CharacterRecord> {
        if data.len() < RECORD_HEADER_LEN {
            return Err(DecodeError::Truncated {
                len: data.len(),
                need: RECORD_HEADER_LEN,
            });
        }

        let class = CharacterClass::from_id(read_u32(data, CLASS_OFFSET))?;
        let specialization = read_u32(data, SPECIALIZATION_OFFSET);
        let level = read_u32(data, LEVEL_OFFSET);

        let field = &data[NAME_OFFSET..NAME_OFFSET + NAME_FIELD_LEN];
        let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
        let name = std::str::from_utf8(&field[..end])
            .map_err(|_| DecodeError::InvalidName)?
            .to_string();

        Ok(CharacterRecord {
            index,
            name,
            class,
            specialization,
            level,
        })
    }

    /// Encode the header of `record`.
    ///
    /// Names longer than the 16-byte field are cut at the last character
    /// boundary that fits.
    pub fn encode(record: &CharacterRecord) -> Vec<u8> {
        let mut buf = Vec::with_capacity(RECORD_HEADER_LEN);
        buf.extend_from_slice(&record.class.id().to_le_bytes());
        buf.extend_from_slice(&record.specialization.to_le_bytes());
        buf.extend_from_slice(&record.level.to_le_bytes());

        let mut end = record.name.len().min(NAME_FIELD_LEN);
        while !record.name.is_char_boundary(end) {
            end -= 1;
        }
        let mut name = [0u8; NAME_FIELD_LEN];
        name[..end].copy_from_slice(&record.name.as_bytes()[..end]);
        buf.extend_from_slice(&name);
        buf
    }
}

impl RecordDecoder for LayoutDecoder {
    fn decode(&self, index: usize, store: &dyn BlobStore) -> DecodeResult<CharacterRecord> {
        let data = store.read_blob(&record_key(index))?;
        Self::decode_bytes(index, &data)
    }
}

/// Read a little-endian u32. The caller has checked the bounds.
fn read_u32(data: &[u8], offset: usize) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&data[offset..offset + 4]);
    u32::from_le_bytes(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cwsave_store::InMemoryBlobStore;
    use cwsave_types::TypeError;

    fn record(index: usize, name: &str) -> CharacterRecord {
        CharacterRecord {
            index,
            name: name.into(),
            class: CharacterClass::Mage,
            specialization: 2,
            level: 31,
        }
    }

    #[test]
    fn header_layout() {
        let bytes = LayoutDecoder::encode(&record(0, "Ayla"));
        assert_eq!(bytes.len(), RECORD_HEADER_LEN);
        assert_eq!(&bytes[0..4], &3u32.to_le_bytes());
        assert_eq!(&bytes[4..8], &2u32.to_le_bytes());
        assert_eq!(&bytes[8..12], &31u32.to_le_bytes());
        assert_eq!(&bytes[12..16], b"Ayla");
        assert!(bytes[16..].iter().all(|&b| b == 0));
    }

    #[test]
    fn decode_reads_header_and_ignores_trailer() {
        let mut bytes = LayoutDecoder::encode(&record(0, "Ayla"));
        bytes.extend_from_slice(&[0xAB; 64]);
        let decoded = LayoutDecoder::decode_bytes(4, &bytes).unwrap();
        assert_eq!(decoded, record(4, "Ayla"));
    }

    #[test]
    fn full_width_name_has_no_terminator() {
        let name = "Sixteen_chars_ok";
        assert_eq!(name.len(), NAME_FIELD_LEN);
        let bytes = LayoutDecoder::encode(&record(0, name));
        assert_eq!(LayoutDecoder::decode_bytes(0, &bytes).unwrap().name, name);
    }

    #[test]
    fn long_names_are_cut_on_char_boundary() {
        // 15 ASCII bytes followed by a two-byte character.
        let name = "abcdefghijklmnoé";
        let bytes = LayoutDecoder::encode(&record(0, name));
        assert_eq!(
            LayoutDecoder::decode_bytes(0, &bytes).unwrap().name,
            "abcdefghijklmno"
        );
    }

    #[test]
    fn truncated_record() {
        let err = LayoutDecoder::decode_bytes(0, &[1, 0, 0, 0]).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Truncated { len: 4, need } if need == RECORD_HEADER_LEN
        ));
    }

    #[test]
    fn unknown_class() {
        let mut bytes = LayoutDecoder::encode(&record(0, "Ayla"));
        bytes[0..4].copy_from_slice(&9u32.to_le_bytes());
        let err = LayoutDecoder::decode_bytes(0, &bytes).unwrap_err();
        assert!(matches!(err, DecodeError::Class(TypeError::UnknownClass(9))));
    }

    #[test]
    fn invalid_utf8_name() {
        let mut bytes = LayoutDecoder::encode(&record(0, "Ayla"));
        bytes[NAME_OFFSET] = 0xFF;
        let err = LayoutDecoder::decode_bytes(0, &bytes).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidName));
    }

    #[test]
    fn decode_from_store_uses_ordinal_key() {
        let store = InMemoryBlobStore::new();
        store.insert("2", LayoutDecoder::encode(&record(2, "Brann")));

        let decoded = LayoutDecoder.decode(2, &store).unwrap();
        assert_eq!(decoded.name, "Brann");
        assert_eq!(decoded.index, 2);

        let err = LayoutDecoder.decode(0, &store).unwrap_err();
        assert!(matches!(err, DecodeError::Missing { ref key } if key == "0"));
    }

    #[test]
    fn closures_are_decoders() {
        let decoder = |index: usize, _store: &dyn BlobStore| -> DecodeResult<CharacterRecord> {
            Ok(record(index, "Stub"))
        };
        let store = InMemoryBlobStore::new();
        assert_eq!(decoder.decode(7, &store).unwrap().index, 7);
    }
}
