
use failure::Fail;
use std::io::Error as IOError;


pub type GifResult<T> = Result<T, GifError>;



#[derive(Fail, Debug)]
pub enum GifError {
    #[fail(display = "Frame too large: pixels={}, limit={}", _0, _1)]
    FrameTooLarge(u64, u64),
    #[fail(display = "Invalid application extension length")]
    InvalidApplicationLength,
    #[fail(display = "Invalid logical screen descriptor length")]
    InvalidDescriptorLength,
    #[fail(display = "Invalid graphic control extension length")]
    InvalidGraphicControlLength,
    #[fail(display = "Invalid header length")]
    InvalidHeaderLength,
    #[fail(display = "Invalid image descriptor length")]
    InvalidImageDescriptorLength,
    #[fail(display = "Invalid LZW minimum code size: {}", _0)]
    InvalidLzwCodeSize(u8),
    #[fail(display = "Invalid LZW stream")]
    InvalidLzwStream,
    #[fail(display = "Invalid plain text extension length")]
    InvalidPlainTextLength,
    #[fail(display = "IO error: {}", _0)]
    Io(IOError),
    #[fail(display = "LZW end code is missing")]
    MissingEndCode,
    #[fail(display = "Trailer is missing")]
    MissingTrailer,
    #[fail(display = "Not a GIF file")]
    NotAGifFile,
    #[fail(display = "Too many frames: limit={}", _0)]
    TooManyFrames(usize),
    #[fail(display = "Truncated global color table")]
    TruncatedColorTable,
    #[fail(display = "Truncated frame data: expected={}, actual={}", _0, _1)]
    TruncatedFrameData(usize, usize),
    #[fail(display = "Truncated local color table")]
    TruncatedLocalColorTable,
    #[fail(display = "Truncated stream")]
    TruncatedStream,
}

macro_rules! define_error {
    ($source:ty, $kind:tt) => {
        impl From<$source> for GifError {
            fn from(error: $source) -> GifError {
                GifError::$kind(error)
            }
        }
    }
}

define_error!(std::io::Error, Io);
