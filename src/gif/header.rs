
use std::io::Read;

use byteorder::{ByteOrder, LittleEndian};
use log::debug;

use super::errors::{GifError, GifResult};
use super::io::read_exact_or;
use super::{ColorTable, Header, LogicalScreenDescriptor, Rgb, SIGNATURE};



pub fn read_header<R: Read>(reader: &mut R) -> GifResult<Header> {
    let mut buffer = [0u8; 6];
    read_exact_or(reader, &mut buffer, GifError::InvalidHeaderLength)?;

    if &buffer[0..3] != SIGNATURE {
        return Err(GifError::NotAGifFile);
    }

    let mut header = Header { signature: [0; 3], version: [0; 3] };
    header.signature.copy_from_slice(&buffer[0..3]);
    header.version.copy_from_slice(&buffer[3..6]);
    Ok(header)
}

pub fn read_screen_descriptor<R: Read>(reader: &mut R) -> GifResult<LogicalScreenDescriptor> {
    let mut buffer = [0u8; 7];
    read_exact_or(reader, &mut buffer, GifError::InvalidDescriptorLength)?;

    Ok(LogicalScreenDescriptor {
        width: LittleEndian::read_u16(&buffer[0..2]),
        height: LittleEndian::read_u16(&buffer[2..4]),
        packed: buffer[4],
        background_color_index: buffer[5],
        pixel_aspect_ratio: buffer[6],
    })
}

/// Reads the global color table, consuming nothing when the screen has none.
pub fn read_global_color_table<R: Read>(reader: &mut R, screen: &LogicalScreenDescriptor) -> GifResult<Option<ColorTable>> {
    if !screen.global_color_table_flag() {
        return Ok(None);
    }
    let size = screen.global_color_table_size();
    debug!("Global color table: size={}", size);
    read_color_table(reader, size, GifError::TruncatedColorTable).map(Some)
}

/// Reads `size` RGB triples, failing with `short` when fewer are available.
pub fn read_color_table<R: Read>(reader: &mut R, size: usize, short: GifError) -> GifResult<ColorTable> {
    let mut buffer = vec![0u8; size * 3];
    read_exact_or(reader, &mut buffer, short)?;

    let colors = buffer
        .chunks_exact(3)
        .map(|it| Rgb { r: it[0], g: it[1], b: it[2] })
        .collect();
    Ok(ColorTable { colors })
}
