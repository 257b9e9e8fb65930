
use log::trace;

use super::errors::{GifError, GifResult};



pub const MAX_CODE_SIZE: u8 = 12;
const MAX_ENTRIES: usize = 1 << MAX_CODE_SIZE as usize;
const NO_PREFIX: u16 = u16::MAX;


/// How the code stream came to an end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    EndCode,
    /// The data ran out before an end code.
    Exhausted,
    /// The output reached its limit and the next code carried more data.
    Filled,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decompressed {
    pub indices: Vec<u8>,
    pub termination: Termination,
}

/// GIF flavored LZW decompressor.
///
/// The table is kept across `decompress` calls and reset in place, so one
/// instance can be reused for several frames of the same minimum code size.
pub struct Decompressor {
    min_code_size: u8,
    clear_code: u16,
    end_code: u16,
    code_size: u8,
    next_code: u16,
    table: Vec<Entry>,
}

/// A table entry is its prefix code plus one trailing index.
#[derive(Clone, Copy)]
struct Entry {
    prefix: u16,
    suffix: u8,
    first: u8,
    len: u16,
}

/// Least-significant-bit first code reader.
struct BitReader<'a> {
    data: &'a [u8],
    buffer: u32,
    bits: u8,
}


impl Decompressor {
    /// `min_code_size` must be in `1 ..= 8`.
    pub fn new(min_code_size: u8) -> GifResult<Self> {
        if min_code_size == 0 || min_code_size > 8 {
            return Err(GifError::InvalidLzwCodeSize(min_code_size));
        }

        let clear_code = 1u16 << min_code_size;
        let mut instance = Decompressor {
            min_code_size,
            clear_code,
            end_code: clear_code + 1,
            code_size: 0,
            next_code: 0,
            table: Vec::with_capacity(MAX_ENTRIES),
        };
        instance.reset();
        Ok(instance)
    }

    pub fn decompress(&mut self, data: &[u8]) -> GifResult<Decompressed> {
        let mut indices = vec![];
        let termination = self.decompress_into(data, &mut indices)?;
        Ok(Decompressed { indices, termination })
    }

    /// Appends decoded indices to `output`.
    pub fn decompress_into(&mut self, data: &[u8], output: &mut Vec<u8>) -> GifResult<Termination> {
        self.decompress_limited(data, output, usize::MAX)
    }

    /// Like `decompress_into`, but stops at the first data code after `limit`
    /// indices have been appended. One code may overshoot `limit` by at most a
    /// table string.
    pub fn decompress_limited(&mut self, data: &[u8], output: &mut Vec<u8>, limit: usize) -> GifResult<Termination> {
        self.reset();
        let start = output.len();

        let mut reader = BitReader::new(data);
        let mut previous: Option<u16> = None;

        while let Some(code) = reader.read(self.code_size) {
            if code == self.clear_code {
                trace!("LZW clear code: next_code={}, code_size={}", self.next_code, self.code_size);
                self.reset();
                previous = None;
                continue;
            }
            if code == self.end_code {
                return Ok(Termination::EndCode);
            }
            if limit <= output.len() - start {
                return Ok(Termination::Filled);
            }

            let first = if (code as usize) < self.table.len() {
                self.emit(code, output);
                self.table[code as usize].first
            } else {
                // Code not yet in the table: previous entry plus its own first index.
                // Only the very next code can be defined this way.
                if code != self.next_code {
                    return Err(GifError::InvalidLzwStream);
                }
                let previous = previous.ok_or(GifError::InvalidLzwStream)?;
                let first = self.table[previous as usize].first;
                self.emit(previous, output);
                output.push(first);
                first
            };

            if let Some(previous) = previous {
                self.add(previous, first);
            }
            previous = Some(code);
        }

        Ok(Termination::Exhausted)
    }

    pub fn min_code_size(&self) -> u8 {
        self.min_code_size
    }

    /// Width of the next code to be read.
    pub fn code_size(&self) -> u8 {
        self.code_size
    }

    pub fn next_code(&self) -> u16 {
        self.next_code
    }

    fn reset(&mut self) {
        self.code_size = self.min_code_size + 1;
        self.next_code = self.end_code + 1;
        self.table.clear();
        for index in 0 .. self.clear_code {
            let index = index as u8;
            self.table.push(Entry { prefix: NO_PREFIX, suffix: index, first: index, len: 1 });
        }
        // Placeholders keep codes and table positions aligned.
        let control = Entry { prefix: NO_PREFIX, suffix: 0, first: 0, len: 0 };
        self.table.push(control);
        self.table.push(control);
    }

    fn add(&mut self, prefix: u16, suffix: u8) {
        if MAX_ENTRIES <= self.next_code as usize {
            return;
        }
        let base = self.table[prefix as usize];
        self.table.push(Entry { prefix, suffix, first: base.first, len: base.len + 1 });
        self.next_code += 1;

        if self.next_code >= 1 << self.code_size && self.code_size < MAX_CODE_SIZE {
            self.code_size += 1;
        }
    }

    fn emit(&self, code: u16, output: &mut Vec<u8>) {
        let entry = self.table[code as usize];
        let start = output.len();
        output.resize(start + entry.len as usize, 0);

        let mut code = code;
        for slot in output[start ..].iter_mut().rev() {
            let entry = self.table[code as usize];
            *slot = entry.suffix;
            code = entry.prefix;
        }
    }
}


impl<'a> BitReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        BitReader { data, buffer: 0, bits: 0 }
    }

    fn read(&mut self, size: u8) -> Option<u16> {
        while self.bits < size {
            let (&byte, rest) = self.data.split_first()?;
            self.buffer |= u32::from(byte) << self.bits;
            self.bits += 8;
            self.data = rest;
        }
        let code = self.buffer & ((1 << size) - 1);
        self.buffer >>= size;
        self.bits -= size;
        Some(code as u16)
    }
}
