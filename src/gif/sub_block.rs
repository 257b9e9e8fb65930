
use std::io::Read;

use log::{debug, trace};

use super::errors::{GifError, GifResult};
use super::io::{read_byte, read_exact_or};



/// Reads a run of data sub-blocks and returns their concatenated payload.
///
/// End of stream where a length byte is expected ends the run; end of stream
/// inside a sub-block is `TruncatedStream`.
pub fn read_sub_blocks<R: Read>(reader: &mut R) -> GifResult<Vec<u8>> {
    let mut result = vec![];
    walk(reader, |chunk| result.extend_from_slice(chunk))?;
    Ok(result)
}

pub fn skip_sub_blocks<R: Read>(reader: &mut R) -> GifResult<()> {
    walk(reader, |_| ())
}


fn walk<R: Read, F: FnMut(&[u8])>(reader: &mut R, mut sink: F) -> GifResult<()> {
    let mut chunk = [0u8; 255];
    loop {
        let size = match read_byte(reader)? {
            Some(0) => return Ok(()),
            Some(size) => size as usize,
            None => {
                debug!("Sub-block run ended without terminator");
                return Ok(());
            }
        };
        trace!("sub-block: size={}", size);
        read_exact_or(reader, &mut chunk[..size], GifError::TruncatedStream)?;
        sink(&chunk[..size]);
    }
}
