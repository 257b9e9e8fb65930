
use std::io::Read;

use byteorder::{ByteOrder, LittleEndian};
use log::debug;

use super::errors::{GifError, GifResult};
use super::header::read_color_table;
use super::io::{read_byte, read_exact_or};
use super::lzw::{Decompressor, Termination};
use super::options::DecodeOptions;
use super::sub_block::read_sub_blocks;
use super::{ColorTable, Extensions, Frame, ImageDescriptor};



/// An image block as found in the stream, not yet decompressed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageBlock {
    pub descriptor: ImageDescriptor,
    pub local_color_table: Option<ColorTable>,
    pub extensions: Extensions,
    pub min_code_size: u8,
    pub data: Vec<u8>,
}


/// Reads the image block following a separator byte.
///
/// `extensions` are the ones seen since the previous image and belong to this one.
pub fn read_image_block<R: Read>(reader: &mut R, extensions: Extensions) -> GifResult<ImageBlock> {
    let descriptor = read_image_descriptor(reader)?;

    let local_color_table = if descriptor.local_color_table_flag() {
        let size = descriptor.local_color_table_size();
        Some(read_color_table(reader, size, GifError::TruncatedLocalColorTable)?)
    } else {
        None
    };

    let min_code_size = read_byte(reader)?.ok_or(GifError::TruncatedStream)?;
    let data = read_sub_blocks(reader)?;

    Ok(ImageBlock { descriptor, local_color_table, extensions, min_code_size, data })
}

pub fn read_image_descriptor<R: Read>(reader: &mut R) -> GifResult<ImageDescriptor> {
    let mut buffer = [0u8; 9];
    read_exact_or(reader, &mut buffer, GifError::InvalidImageDescriptorLength)?;

    Ok(ImageDescriptor {
        left: LittleEndian::read_u16(&buffer[0..2]),
        top: LittleEndian::read_u16(&buffer[2..4]),
        width: LittleEndian::read_u16(&buffer[4..6]),
        height: LittleEndian::read_u16(&buffer[6..8]),
        packed: buffer[8],
    })
}


impl ImageBlock {
    /// Decompresses the image data into a frame of exactly `width * height` indices.
    pub fn decode(self, options: &DecodeOptions) -> GifResult<Frame> {
        let expected = self.descriptor.pixel_count();
        options.check_frame_pixels(expected as u64)?;

        // The descriptor alone must not decide a large allocation.
        let mut indices = Vec::with_capacity(expected.min(self.data.len().saturating_mul(64)));
        let mut decompressor = Decompressor::new(self.min_code_size)?;
        let termination = decompressor.decompress_limited(&self.data, &mut indices, expected)?;

        match termination {
            Termination::Exhausted =>
                options.missing_end_code.check("Image data has no LZW end code", GifError::MissingEndCode)?,
            Termination::Filled =>
                debug!("Image data continues past {} indices", expected),
            Termination::EndCode => (),
        }

        if indices.len() < expected {
            return Err(GifError::TruncatedFrameData(expected, indices.len()));
        }
        if expected < indices.len() {
            debug!("Drop {} surplus indices", indices.len() - expected);
            indices.truncate(expected);
        }

        debug!(
            "Frame: {}x{}+{}+{}, local_color_table={}, interlace={}",
            self.descriptor.width,
            self.descriptor.height,
            self.descriptor.left,
            self.descriptor.top,
            self.local_color_table.is_some(),
            self.descriptor.interlace_flag());

        Ok(Frame {
            descriptor: self.descriptor,
            local_color_table: self.local_color_table,
            extensions: self.extensions,
            indices,
        })
    }
}
