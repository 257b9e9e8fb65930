
use std::io::Read;

use byteorder::{ByteOrder, LittleEndian};
use log::debug;

use super::errors::{GifError, GifResult};
use super::io::{read_byte, read_exact_or};
use super::sub_block::{read_sub_blocks, skip_sub_blocks};
use super::{ApplicationExtension, CommentExtension, Extensions, GraphicControlExtension, PlainTextExtension};



pub const GRAPHIC_CONTROL_LABEL: u8 = 0xF9;
pub const PLAIN_TEXT_LABEL: u8 = 0x01;
pub const APPLICATION_LABEL: u8 = 0xFF;
pub const COMMENT_LABEL: u8 = 0xFE;


#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Extension {
    GraphicControl(GraphicControlExtension),
    PlainText(PlainTextExtension),
    Application(ApplicationExtension),
    Comment(CommentExtension),
}


/// Parses the extension following an introducer byte.
///
/// Returns `None` for unrecognized labels, whose sub-blocks are skipped.
pub fn read_extension<R: Read>(reader: &mut R) -> GifResult<Option<Extension>> {
    let label = read_byte(reader)?.ok_or(GifError::TruncatedStream)?;

    let extension = match label {
        GRAPHIC_CONTROL_LABEL =>
            Extension::GraphicControl(read_graphic_control(reader)?),
        PLAIN_TEXT_LABEL =>
            Extension::PlainText(read_plain_text(reader)?),
        APPLICATION_LABEL =>
            Extension::Application(read_application(reader)?),
        COMMENT_LABEL =>
            Extension::Comment(CommentExtension { data: read_sub_blocks(reader)? }),
        label => {
            debug!("Skip unknown extension: label=0x{:02X}", label);
            skip_sub_blocks(reader)?;
            return Ok(None);
        }
    };

    Ok(Some(extension))
}


/// Block size byte, 4 data bytes and the terminator. The size byte is not trusted.
fn read_graphic_control<R: Read>(reader: &mut R) -> GifResult<GraphicControlExtension> {
    let mut buffer = [0u8; 5];
    read_exact_or(reader, &mut buffer, GifError::InvalidGraphicControlLength)?;

    match read_byte(reader)? {
        None => debug!("Graphic control extension ends without a terminator"),
        Some(0) => (),
        Some(it) => debug!("Graphic control extension terminator is 0x{:02X}", it),
    }

    let packed = buffer[1];
    Ok(GraphicControlExtension {
        disposal: (packed & 0x1C) >> 2,
        user_input_flag: packed & 0x02 != 0,
        transparency_flag: packed & 0x01 != 0,
        delay_time: LittleEndian::read_u16(&buffer[2..4]),
        transparent_color_index: buffer[4],
    })
}

fn read_plain_text<R: Read>(reader: &mut R) -> GifResult<PlainTextExtension> {
    let mut buffer = [0u8; 13];
    read_exact_or(reader, &mut buffer, GifError::InvalidPlainTextLength)?;

    let fields = &buffer[1..];
    Ok(PlainTextExtension {
        left: LittleEndian::read_u16(&fields[0..2]),
        top: LittleEndian::read_u16(&fields[2..4]),
        width: LittleEndian::read_u16(&fields[4..6]),
        height: LittleEndian::read_u16(&fields[6..8]),
        cell_width: fields[8],
        cell_height: fields[9],
        foreground_color_index: fields[10],
        background_color_index: fields[11],
        text: read_sub_blocks(reader)?,
    })
}

fn read_application<R: Read>(reader: &mut R) -> GifResult<ApplicationExtension> {
    let mut buffer = [0u8; 12];
    read_exact_or(reader, &mut buffer, GifError::InvalidApplicationLength)?;

    let mut result = ApplicationExtension::default();
    result.identifier.copy_from_slice(&buffer[1..9]);
    result.authentication_code.copy_from_slice(&buffer[9..12]);
    result.data = read_sub_blocks(reader)?;
    Ok(result)
}


impl Extensions {
    /// Stores `extension`, replacing an earlier one of the same kind.
    pub fn attach(&mut self, extension: Extension) {
        match extension {
            Extension::GraphicControl(it) => replace(&mut self.graphic_control, it, "graphic control"),
            Extension::PlainText(it) => replace(&mut self.plain_text, it, "plain text"),
            Extension::Application(it) => replace(&mut self.application, it, "application"),
            Extension::Comment(it) => replace(&mut self.comment, it, "comment"),
        }
    }
}

fn replace<T>(slot: &mut Option<T>, value: T, name: &str) {
    if slot.replace(value).is_some() {
        debug!("Repeated {} extension replaces the previous one", name);
    }
}
