
use std::borrow::Cow;

use enum_iterator::IntoEnumIterator;

pub mod decoder;
pub mod errors;
pub mod extension;
pub mod header;
pub mod image;
mod io;
pub mod lzw;
pub mod options;
pub mod sub_block;



pub const SIGNATURE: &[u8; 3] = b"GIF";
pub const EXTENSION_INTRODUCER: u8 = 0x21;
pub const IMAGE_SEPARATOR: u8 = 0x2C;
pub const TRAILER: u8 = 0x3B;


#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub signature: [u8; 3],
    /// Informational only; "87a", "89a" or anything else is accepted.
    pub version: [u8; 3],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LogicalScreenDescriptor {
    pub width: u16,
    pub height: u16,
    pub packed: u8,
    pub background_color_index: u8,
    pub pixel_aspect_ratio: u8,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Always holds `2^(N+1)` entries for a 3-bit size field `N`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColorTable {
    pub colors: Vec<Rgb>,
}

#[derive(IntoEnumIterator, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisposalMethod {
    Unspecified = 0,
    DoNotDispose = 1,
    RestoreToBackground = 2,
    RestoreToPrevious = 3,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GraphicControlExtension {
    /// Raw 3-bit field. See `disposal_method`.
    pub disposal: u8,
    pub user_input_flag: bool,
    pub transparency_flag: bool,
    /// In 1/100 seconds
    pub delay_time: u16,
    pub transparent_color_index: u8,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlainTextExtension {
    pub left: u16,
    pub top: u16,
    pub width: u16,
    pub height: u16,
    pub cell_width: u8,
    pub cell_height: u8,
    pub foreground_color_index: u8,
    pub background_color_index: u8,
    pub text: Vec<u8>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApplicationExtension {
    pub identifier: [u8; 8],
    pub authentication_code: [u8; 3],
    pub data: Vec<u8>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommentExtension {
    pub data: Vec<u8>,
}

/// Extensions attached to a frame: at most one of each kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Extensions {
    pub graphic_control: Option<GraphicControlExtension>,
    pub plain_text: Option<PlainTextExtension>,
    pub application: Option<ApplicationExtension>,
    pub comment: Option<CommentExtension>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImageDescriptor {
    pub left: u16,
    pub top: u16,
    pub width: u16,
    pub height: u16,
    pub packed: u8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub descriptor: ImageDescriptor,
    pub local_color_table: Option<ColorTable>,
    pub extensions: Extensions,
    /// Color table indices in stream order, `width * height` long.
    pub indices: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    pub header: Header,
    pub screen: LogicalScreenDescriptor,
    pub global_color_table: Option<ColorTable>,
    pub frames: Vec<Frame>,
}


/// Number of entries for a 3-bit color table size field.
pub fn color_table_size(packed: u8) -> usize {
    1 << ((packed & 0x07) + 1)
}


impl Header {
    pub fn version_str(&self) -> Cow<str> {
        String::from_utf8_lossy(&self.version)
    }

    pub fn is_89a(&self) -> bool {
        &self.version == b"89a"
    }
}


impl LogicalScreenDescriptor {
    pub fn global_color_table_flag(&self) -> bool {
        self.packed & 0x80 != 0
    }

    /// Bits per primary color of the source image.
    pub fn color_resolution(&self) -> u8 {
        ((self.packed & 0x70) >> 4) + 1
    }

    pub fn sort_flag(&self) -> bool {
        self.packed & 0x08 != 0
    }

    /// Derived from the size field whether or not the table is present.
    pub fn global_color_table_size(&self) -> usize {
        color_table_size(self.packed)
    }
}


impl ColorTable {
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: u8) -> Option<Rgb> {
        self.colors.get(index as usize).cloned()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rgb> {
        self.colors.iter()
    }
}


impl DisposalMethod {
    pub fn from_u8(value: u8) -> Option<Self> {
        DisposalMethod::into_enum_iter().find(|it| *it as u8 == value)
    }
}


impl GraphicControlExtension {
    /// `None` for the reserved values 4 to 7.
    pub fn disposal_method(&self) -> Option<DisposalMethod> {
        DisposalMethod::from_u8(self.disposal)
    }

    pub fn delay_ms(&self) -> u32 {
        u32::from(self.delay_time) * 10
    }

    pub fn transparent_index(&self) -> Option<u8> {
        if self.transparency_flag {
            Some(self.transparent_color_index)
        } else {
            None
        }
    }
}


impl PlainTextExtension {
    pub fn text_lossy(&self) -> Cow<str> {
        String::from_utf8_lossy(&self.text)
    }
}


impl ApplicationExtension {
    pub fn identifier_str(&self) -> Cow<str> {
        String::from_utf8_lossy(&self.identifier)
    }

    pub fn authentication_str(&self) -> Cow<str> {
        String::from_utf8_lossy(&self.authentication_code)
    }

    /// Loop count of the Netscape looping extension, `0` meaning forever.
    pub fn netscape_loop_count(&self) -> Option<u16> {
        let known = match (&self.identifier, &self.authentication_code) {
            (b"NETSCAPE", b"2.0") | (b"ANIMEXTS", b"1.0") => true,
            _ => false,
        };
        if !known || self.data.len() < 3 || self.data[0] != 1 {
            return None;
        }
        Some(u16::from(self.data[1]) | u16::from(self.data[2]) << 8)
    }
}


impl CommentExtension {
    pub fn text_lossy(&self) -> Cow<str> {
        String::from_utf8_lossy(&self.data)
    }
}


impl Extensions {
    pub fn is_empty(&self) -> bool {
        self.graphic_control.is_none()
            && self.plain_text.is_none()
            && self.application.is_none()
            && self.comment.is_none()
    }
}


impl ImageDescriptor {
    pub fn local_color_table_flag(&self) -> bool {
        self.packed & 0x80 != 0
    }

    pub fn interlace_flag(&self) -> bool {
        self.packed & 0x40 != 0
    }

    pub fn sort_flag(&self) -> bool {
        self.packed & 0x20 != 0
    }

    /// `0` when there is no local color table.
    pub fn local_color_table_size(&self) -> usize {
        if self.local_color_table_flag() {
            color_table_size(self.packed)
        } else {
            0
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}


impl Frame {
    pub fn left(&self) -> u16 {
        self.descriptor.left
    }

    pub fn top(&self) -> u16 {
        self.descriptor.top
    }

    pub fn width(&self) -> u16 {
        self.descriptor.width
    }

    pub fn height(&self) -> u16 {
        self.descriptor.height
    }

    pub fn graphic_control(&self) -> Option<&GraphicControlExtension> {
        self.extensions.graphic_control.as_ref()
    }

    /// The local color table, falling back to the document's global one.
    pub fn color_table<'a>(&'a self, document: &'a Document) -> Option<&'a ColorTable> {
        self.local_color_table.as_ref().or_else(|| document.global_color_table.as_ref())
    }
}


impl Document {
    pub fn width(&self) -> u16 {
        self.screen.width
    }

    pub fn height(&self) -> u16 {
        self.screen.height
    }

    pub fn loop_count(&self) -> Option<u16> {
        self.frames.iter()
            .filter_map(|it| it.extensions.application.as_ref())
            .find_map(ApplicationExtension::netscape_loop_count)
    }
}
