
use std::io::{self, ErrorKind, Read};

use super::errors::{GifError, GifResult};



/// Fills `buffer` as far as the source allows. Returns the number of bytes read,
/// which is less than `buffer.len()` only at end of stream.
pub fn read_fill<R: Read>(reader: &mut R, buffer: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buffer.len() {
        match reader.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Reads exactly `buffer.len()` bytes, or fails with `short` on end of stream.
pub fn read_exact_or<R: Read>(reader: &mut R, buffer: &mut [u8], short: GifError) -> GifResult<()> {
    if read_fill(reader, buffer)? < buffer.len() {
        return Err(short);
    }
    Ok(())
}

/// `None` at end of stream.
pub fn read_byte<R: Read>(reader: &mut R) -> GifResult<Option<u8>> {
    let mut byte = [0u8];
    if read_fill(reader, &mut byte)? == 0 {
        return Ok(None);
    }
    Ok(Some(byte[0]))
}


#[cfg(test)]
mod tests {
    use super::*;

    /// Hands out at most one byte per `read` call.
    struct Trickle<'a>(&'a [u8]);

    impl<'a> Read for Trickle<'a> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.0.is_empty() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.0[0];
            self.0 = &self.0[1..];
            Ok(1)
        }
    }

    #[test]
    fn test_partial_reads_are_not_truncation() {
        let mut source = Trickle(&[1, 2, 3, 4]);
        let mut buffer = [0u8; 3];
        read_exact_or(&mut source, &mut buffer, GifError::TruncatedStream).unwrap();
        assert_eq!(buffer, [1, 2, 3]);
        assert_eq!(read_byte(&mut source).unwrap(), Some(4));
        assert_eq!(read_byte(&mut source).unwrap(), None);
    }

    #[test]#[should_panic(expected="InvalidHeaderLength")]
    fn test_short_read() {
        let mut source: &[u8] = &[1, 2];
        let mut buffer = [0u8; 6];
        read_exact_or(&mut source, &mut buffer, GifError::InvalidHeaderLength).unwrap();
    }
}
