
pub mod gif;

pub use crate::gif::decoder::{decode, decode_bytes, Decoder};
pub use crate::gif::errors::{GifError, GifResult};
pub use crate::gif::options::{DecodeOptions, Tolerance};
pub use crate::gif::{
    ApplicationExtension,
    ColorTable,
    CommentExtension,
    DisposalMethod,
    Document,
    Extensions,
    Frame,
    GraphicControlExtension,
    Header,
    ImageDescriptor,
    LogicalScreenDescriptor,
    PlainTextExtension,
    Rgb,
};
