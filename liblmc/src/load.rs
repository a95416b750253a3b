use std::io::Read;

use thiserror::Error;

use crate::digits::{NUM_DIGITS, NUM_MAILBOXES};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("File size is not a multiple of the number of digits per mailbox")]
    Truncated,
    #[error("Image is too long. {0} mailboxes, max {max}", max = NUM_MAILBOXES)]
    TooLong(usize),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Decode a raw image into mailbox values. Each byte holds one decimal
/// digit value (not ASCII), big-endian, `NUM_DIGITS` per mailbox.
pub fn decode_image(bytes: &[u8]) -> Result<Vec<u32>, LoadError> {
    if bytes.len() % NUM_DIGITS != 0 {
        return Err(LoadError::Truncated);
    }

    let mailboxes = bytes.len() / NUM_DIGITS;
    if mailboxes > NUM_MAILBOXES {
        return Err(LoadError::TooLong(mailboxes));
    }

    Ok(bytes
        .chunks(NUM_DIGITS)
        .map(|digits| digits.iter().fold(0u32, |value, &d| value * 10 + u32::from(d)))
        .collect())
}

/// Read an image to the end of the stream and decode it.
pub fn read_image<R: Read>(mut reader: R) -> Result<Vec<u32>, LoadError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    decode_image(&bytes)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decode() {
        let image = decode_image(&[0, 0, 5, 9, 0, 1]).unwrap();
        assert_eq!(image, vec![5, 901]);
    }

    #[test]
    fn empty_image() {
        assert_eq!(decode_image(&[]).unwrap(), Vec::<u32>::new());
    }

    #[test]
    fn truncated_image() {
        let err = decode_image(&[0, 0]).unwrap_err();
        assert!(matches!(err, LoadError::Truncated));
    }

    #[test]
    fn overlong_image() {
        let bytes = vec![0u8; (NUM_MAILBOXES + 1) * NUM_DIGITS];
        let err = decode_image(&bytes).unwrap_err();
        assert!(matches!(err, LoadError::TooLong(n) if n == NUM_MAILBOXES + 1));
    }

    #[test]
    fn read_from_stream() {
        let bytes: &[u8] = &[5, 0, 2];
        let image = read_image(bytes).unwrap();
        assert_eq!(image, vec![502]);
    }
}
