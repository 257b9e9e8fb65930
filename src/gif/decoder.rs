
use std::io::Read;
use std::mem;

use log::{debug, trace};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::errors::{GifError, GifResult};
use super::extension::read_extension;
use super::header::{read_global_color_table, read_header, read_screen_descriptor};
use super::image::{read_image_block, ImageBlock};
use super::io::read_byte;
use super::options::DecodeOptions;
use super::sub_block::skip_sub_blocks;
use super::{Document, Extensions, Frame, EXTENSION_INTRODUCER, IMAGE_SEPARATOR, TRAILER};



pub struct Decoder<R: Read> {
    reader: R,
    options: DecodeOptions,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Idle,
    /// The tag byte of the block being read
    InBlock(u8),
    Terminated,
}


pub fn decode<R: Read>(reader: R) -> GifResult<Document> {
    Decoder::new(reader).decode()
}

pub fn decode_bytes(data: &[u8]) -> GifResult<Document> {
    Decoder::new(data).decode()
}


impl<R: Read> Decoder<R> {
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, DecodeOptions::default())
    }

    pub fn with_options(reader: R, options: DecodeOptions) -> Self {
        Decoder { reader, options }
    }

    pub fn decode(mut self) -> GifResult<Document> {
        let header = read_header(&mut self.reader)?;
        let screen = read_screen_descriptor(&mut self.reader)?;
        debug!("GIF{}: {}x{}", header.version_str(), screen.width, screen.height);
        let global_color_table = read_global_color_table(&mut self.reader, &screen)?;

        let images = self.read_blocks()?;
        let frames = decode_images(images, &self.options)?;
        debug!("Decoded {} frames", frames.len());

        Ok(Document { header, screen, global_color_table, frames })
    }

    /// Walks the blocks after the screen descriptor up to the trailer, collecting
    /// image blocks with their extensions. Image data is left compressed.
    pub fn read_blocks(&mut self) -> GifResult<Vec<ImageBlock>> {
        let mut images = vec![];
        let mut pending = Extensions::default();
        let mut state = State::Idle;

        while state != State::Terminated {
            state = match state {
                State::Idle => match read_byte(&mut self.reader)? {
                    Some(tag) => State::InBlock(tag),
                    None => {
                        self.options.missing_trailer.check("Stream ends without trailer", GifError::MissingTrailer)?;
                        State::Terminated
                    }
                },
                State::InBlock(TRAILER) =>
                    State::Terminated,
                State::InBlock(EXTENSION_INTRODUCER) => {
                    trace!("Extension block");
                    if let Some(extension) = read_extension(&mut self.reader)? {
                        pending.attach(extension);
                    }
                    State::Idle
                }
                State::InBlock(IMAGE_SEPARATOR) => {
                    trace!("Image block #{}", images.len());
                    self.options.check_frame_count(images.len() + 1)?;
                    let image = read_image_block(&mut self.reader, mem::take(&mut pending))?;
                    images.push(image);
                    State::Idle
                }
                State::InBlock(tag) => {
                    debug!("Skip unknown block: tag=0x{:02X}", tag);
                    skip_sub_blocks(&mut self.reader)?;
                    State::Idle
                }
                State::Terminated =>
                    State::Terminated,
            };
        }

        if !pending.is_empty() {
            debug!("Discard extensions not followed by an image");
        }

        Ok(images)
    }
}


fn decode_images(images: Vec<ImageBlock>, options: &DecodeOptions) -> GifResult<Vec<Frame>> {
    #[cfg(feature = "parallel")]
    {
        if options.parallel {
            return images.into_par_iter().map(|it| it.decode(options)).collect();
        }
    }

    images.into_iter().map(|it| it.decode(options)).collect()
}
