//! Arrays of length prefixed strings.
//!
//! | Type | Name    | Description |
//! | ---: | ------- | ----------- |
//! | i32  | count   | Number of strings that follow |
//! | str  | entries | `count` strings, see [`ByteCursor::read_length_prefixed_string`] |
//!
//! Each entry starts and ends on a 4-byte boundary relative to the array
//! start, there is no padding between the count and the first entry.
use crate::buf::{encoded_string_len, ByteCursor, ByteWriter};
use crate::error::FormatError;

/// Smallest possible entry: the length prefix plus a padded terminator.
pub const MIN_ENTRY_LEN: usize = 8;

/// Read an i32 count and check it against what is left in the buffer.
///
/// Each entry needs at least `min_entry_len` bytes, a count that could not
/// possibly fit is rejected before any allocation happens.
pub fn read_count(
    cursor: &mut ByteCursor,
    what: &'static str,
    min_entry_len: usize,
) -> Result<usize, FormatError> {
    let offset = cursor.position();
    let count = cursor.read_i32()?;

    if count < 0 || (count as usize).saturating_mul(min_entry_len) > cursor.remaining() {
        return Err(FormatError::ArrayCountImplausible {
            what,
            count,
            offset,
        });
    }
    Ok(count as usize)
}

pub fn read_string_array(
    cursor: &mut ByteCursor,
    what: &'static str,
) -> Result<Vec<String>, FormatError> {
    let count = read_count(cursor, what, MIN_ENTRY_LEN)?;

    let mut strings = Vec::with_capacity(count);
    for _ in 0..count {
        strings.push(cursor.read_length_prefixed_string()?);
    }
    Ok(strings)
}

/// Returns the number of bytes written.
pub fn write_string_array<S: AsRef<str>>(writer: &mut ByteWriter, strings: &[S]) -> usize {
    // The format can not represent more than i32::MAX entries
    writer.write_i32(strings.len() as i32);

    4 + strings
        .iter()
        .map(|s| writer.write_length_prefixed_string(s.as_ref()))
        .sum::<usize>()
}

pub fn string_array_len<S: AsRef<str>>(strings: &[S]) -> usize {
    4 + strings
        .iter()
        .map(|s| encoded_string_len(s.as_ref().len()))
        .sum::<usize>()
}

#[cfg(test)]
mod test_string_array {
    use super::*;
    use crate::buf::ALIGN;

    #[test]
    fn empty() {
        let mut writer = ByteWriter::new();
        let empty: [&str; 0] = [];
        assert_eq!(write_string_array(&mut writer, &empty), 4);

        let data = writer.into_inner();
        assert_eq!(data, vec![0, 0, 0, 0]);

        let mut cursor = ByteCursor::new(&data);
        assert!(read_string_array(&mut cursor, "classes").unwrap().is_empty());
    }

    #[test]
    fn layout() {
        let mut writer = ByteWriter::new();
        write_string_array(&mut writer, &["a", "bcde"]);

        assert_eq!(
            writer.into_inner(),
            vec![
                2, 0, 0, 0, // count
                1, 0, 0, 0, b'a', 0, 0, 0, // "a"
                4, 0, 0, 0, b'b', b'c', b'd', b'e', 0, 0, 0, 0, // "bcde"
            ]
        );
    }

    #[test]
    fn duplicates_kept_in_order() {
        let classes = vec!["row", "row", "row--selected", ""];
        let mut writer = ByteWriter::new();
        let written = write_string_array(&mut writer, &classes);
        let data = writer.into_inner();

        assert_eq!(written, data.len());
        assert_eq!(written, string_array_len(&classes));
        assert_eq!(written % ALIGN, 0);

        let mut cursor = ByteCursor::new(&data);
        assert_eq!(read_string_array(&mut cursor, "classes").unwrap(), classes);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn negative_count() {
        let data = [0xff, 0xff, 0xff, 0xff, 0, 0, 0, 0];
        let mut cursor = ByteCursor::new(&data);

        assert_eq!(
            read_string_array(&mut cursor, "classes"),
            Err(FormatError::ArrayCountImplausible {
                what: "classes",
                count: -1,
                offset: 0
            })
        );
    }

    #[test]
    fn count_past_end() {
        // Two entries need at least 16 bytes, only 8 are left
        let data = [2, 0, 0, 0, 1, 0, 0, 0, b'a', 0, 0, 0];
        let mut cursor = ByteCursor::new(&data);

        assert!(matches!(
            read_string_array(&mut cursor, "stylesheet paths"),
            Err(FormatError::ArrayCountImplausible { count: 2, .. })
        ));
    }
}
