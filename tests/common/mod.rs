#![allow(dead_code)]

use std::collections::HashMap;



pub const WHITE: [u8; 3] = [0xff, 0xff, 0xff];
pub const BLACK: [u8; 3] = [0x00, 0x00, 0x00];


/// Writes GIF streams block by block.
pub struct GifBuilder {
    bytes: Vec<u8>,
}

pub struct ImageSpec<'a> {
    pub left: u16,
    pub top: u16,
    pub width: u16,
    pub height: u16,
    pub interlace: bool,
    pub local_color_table: Option<&'a [[u8; 3]]>,
    pub min_code_size: u8,
    pub indices: &'a [u8],
}

#[derive(Default)]
struct BitWriter {
    data: Vec<u8>,
    buffer: u32,
    bits: u8,
}


impl GifBuilder {
    pub fn new(width: u16, height: u16, global_color_table: Option<&[[u8; 3]]>) -> Self {
        let mut bytes = b"GIF89a".to_vec();
        bytes.extend_from_slice(&width.to_le_bytes());
        bytes.extend_from_slice(&height.to_le_bytes());
        match global_color_table {
            Some(table) => {
                bytes.extend_from_slice(&[0x80 | 0x70 | size_field(table.len()), 0, 0]);
                write_color_table(&mut bytes, table);
            }
            None => bytes.extend_from_slice(&[0x70, 0, 0]),
        }
        GifBuilder { bytes }
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    pub fn graphic_control(self, packed: u8, delay: [u8; 2], transparent_index: u8) -> Self {
        self.raw(&[0x21, 0xF9, 0x04, packed, delay[0], delay[1], transparent_index, 0x00])
    }

    pub fn application(mut self, identifier: &[u8; 11], data: &[u8]) -> Self {
        self.bytes.extend_from_slice(&[0x21, 0xFF, 0x0B]);
        self.bytes.extend_from_slice(identifier);
        self.bytes.extend_from_slice(&sub_blocks(data));
        self
    }

    pub fn netscape_loop(self, count: u16) -> Self {
        let count = count.to_le_bytes();
        self.application(b"NETSCAPE2.0", &[0x01, count[0], count[1]])
    }

    pub fn comment(mut self, text: &[u8]) -> Self {
        self.bytes.extend_from_slice(&[0x21, 0xFE]);
        self.bytes.extend_from_slice(&sub_blocks(text));
        self
    }

    pub fn plain_text(mut self, fields: [u8; 12], text: &[u8]) -> Self {
        self.bytes.extend_from_slice(&[0x21, 0x01, 0x0C]);
        self.bytes.extend_from_slice(&fields);
        self.bytes.extend_from_slice(&sub_blocks(text));
        self
    }

    pub fn image(self, spec: ImageSpec) -> Self {
        let data = lzw_encode(spec.min_code_size, spec.indices);
        self.image_data(spec, &data)
    }

    /// Image block with already compressed `data`.
    pub fn image_data(mut self, spec: ImageSpec, data: &[u8]) -> Self {
        self.bytes.push(0x2C);
        for value in &[spec.left, spec.top, spec.width, spec.height] {
            self.bytes.extend_from_slice(&value.to_le_bytes());
        }
        let mut packed = if spec.interlace { 0x40 } else { 0x00 };
        if let Some(table) = spec.local_color_table {
            packed |= 0x80 | size_field(table.len());
        }
        self.bytes.push(packed);
        if let Some(table) = spec.local_color_table {
            write_color_table(&mut self.bytes, table);
        }
        self.bytes.push(spec.min_code_size);
        self.bytes.extend_from_slice(&sub_blocks(data));
        self
    }

    pub fn trailer(self) -> Self {
        self.raw(&[0x3B])
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}


impl<'a> ImageSpec<'a> {
    pub fn new(width: u16, height: u16, min_code_size: u8, indices: &'a [u8]) -> Self {
        ImageSpec {
            left: 0,
            top: 0,
            width,
            height,
            interlace: false,
            local_color_table: None,
            min_code_size,
            indices,
        }
    }
}


/// Splits `data` into sub-blocks of at most 255 bytes plus the terminator.
pub fn sub_blocks(data: &[u8]) -> Vec<u8> {
    let mut result = vec![];
    for chunk in data.chunks(255) {
        result.push(chunk.len() as u8);
        result.extend_from_slice(chunk);
    }
    result.push(0);
    result
}

/// Reference GIF LZW encoder. Emits a clear code first, and again whenever the
/// table is full.
pub fn lzw_encode(min_code_size: u8, indices: &[u8]) -> Vec<u8> {
    let clear = 1u16 << min_code_size;
    let end = clear + 1;
    let mut writer = BitWriter::default();
    let mut table: HashMap<(u16, u8), u16> = HashMap::new();
    let mut size = min_code_size + 1;
    let mut next = end + 1;
    let mut current: Option<u16> = None;

    writer.write(clear, size);

    for &index in indices {
        let prefix = match current {
            Some(prefix) => prefix,
            None => {
                current = Some(u16::from(index));
                continue;
            }
        };
        if let Some(&code) = table.get(&(prefix, index)) {
            current = Some(code);
            continue;
        }

        writer.write(prefix, size);
        table.insert((prefix, index), next);
        next += 1;
        // The decoder adds its entry one code later, hence `>`.
        if next > 1 << size && size < 12 {
            size += 1;
        }
        if next == 4096 {
            writer.write(clear, size);
            table.clear();
            size = min_code_size + 1;
            next = end + 1;
        }
        current = Some(u16::from(index));
    }

    if let Some(code) = current {
        writer.write(code, size);
        if next == 1 << size && size < 12 {
            size += 1;
        }
    }
    writer.write(end, size);
    writer.finish()
}


/// Packs `(code, width)` pairs, least significant bit first.
pub fn pack_codes(codes: &[(u16, u8)]) -> Vec<u8> {
    let mut writer = BitWriter::default();
    for &(code, size) in codes {
        writer.write(code, size);
    }
    writer.finish()
}


fn size_field(len: usize) -> u8 {
    assert!(len.is_power_of_two() && 2 <= len && len <= 256);
    len.trailing_zeros() as u8 - 1
}

fn write_color_table(bytes: &mut Vec<u8>, table: &[[u8; 3]]) {
    for color in table {
        bytes.extend_from_slice(color);
    }
}


impl BitWriter {
    fn write(&mut self, code: u16, size: u8) {
        self.buffer |= u32::from(code) << self.bits;
        self.bits += size;
        while 8 <= self.bits {
            self.data.push(self.buffer as u8);
            self.buffer >>= 8;
            self.bits -= 8;
        }
    }

    fn finish(mut self) -> Vec<u8> {
        if 0 < self.bits {
            self.data.push(self.buffer as u8);
        }
        self.data
    }
}
