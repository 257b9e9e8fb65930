
use log::warn;

use super::errors::{GifError, GifResult};



/// What to do with a stream that omits an optional terminator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tolerance {
    Silent,
    Warn,
    Reject,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Stream ends without the trailer byte
    pub missing_trailer: Tolerance,
    /// Image data ends without an LZW end code
    pub missing_end_code: Tolerance,
    pub max_frames: Option<usize>,
    /// Upper bound for `width * height` of a single frame
    pub max_frame_pixels: Option<u64>,
    /// Decompress frames on the rayon pool. Needs the `parallel` feature.
    pub parallel: bool,
}


impl Default for Tolerance {
    fn default() -> Self {
        Tolerance::Warn
    }
}

impl Tolerance {
    /// `Reject` turns the condition into `error`.
    pub fn check(self, condition: &str, error: GifError) -> GifResult<()> {
        match self {
            Tolerance::Silent => Ok(()),
            Tolerance::Warn => {
                warn!("{}", condition);
                Ok(())
            }
            Tolerance::Reject => Err(error),
        }
    }
}


impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            missing_trailer: Tolerance::default(),
            missing_end_code: Tolerance::default(),
            max_frames: None,
            max_frame_pixels: None,
            parallel: cfg!(feature = "parallel"),
        }
    }
}

impl DecodeOptions {
    /// Rejects everything the format makes mandatory.
    pub fn strict() -> Self {
        DecodeOptions {
            missing_trailer: Tolerance::Reject,
            missing_end_code: Tolerance::Reject,
            ..Default::default()
        }
    }

    pub fn with_missing_trailer(mut self, tolerance: Tolerance) -> Self {
        self.missing_trailer = tolerance;
        self
    }

    pub fn with_missing_end_code(mut self, tolerance: Tolerance) -> Self {
        self.missing_end_code = tolerance;
        self
    }

    pub fn with_max_frames(mut self, max: usize) -> Self {
        self.max_frames = Some(max);
        self
    }

    pub fn with_max_frame_pixels(mut self, max: u64) -> Self {
        self.max_frame_pixels = Some(max);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn check_frame_count(&self, count: usize) -> GifResult<()> {
        match self.max_frames {
            Some(max) if max < count => Err(GifError::TooManyFrames(max)),
            _ => Ok(()),
        }
    }

    pub fn check_frame_pixels(&self, pixels: u64) -> GifResult<()> {
        match self.max_frame_pixels {
            Some(max) if max < pixels => Err(GifError::FrameTooLarge(pixels, max)),
            _ => Ok(()),
        }
    }
}
