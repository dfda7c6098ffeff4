//! Encoding/decoding of Windows icon (.ico) containers.
//!
//! An ICO file is a 6-byte header, followed by one 16-byte directory entry per
//! image, followed by the image payloads.  All images written by this module
//! are stored as embedded PNG files, which every ICO reader since Windows
//! Vista (and every browser) understands.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Error, ErrorKind, Read, Seek, SeekFrom, Write};

#[cfg(feature = "pngio")]
use crate::image::Image;

/// The resource type stored in the header of an icon (as opposed to cursor)
/// file:
const ICON_RESOURCE_TYPE: u16 = 1;

/// The length of an icon directory header, in bytes:
const ICON_DIR_HEADER_LENGTH: u32 = 6;

/// The length of a single icon directory entry, in bytes:
const ICON_DIR_ENTRY_LENGTH: u32 = 16;

/// The largest width or height an ICO directory entry can describe.
pub const MAX_ICON_SIZE: u32 = 256;

/// A set of images stored in a single ICO file.
#[derive(Default)]
pub struct IconDir {
    /// The entries stored in the ICO file, in directory order.
    pub entries: Vec<IconDirEntry>,
}

impl IconDir {
    /// Creates a new, empty icon directory.
    pub fn new() -> IconDir {
        IconDir { entries: Vec::new() }
    }

    /// Returns true if the directory contains no images.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encodes the image and appends it to the directory.  Returns an error
    /// if the image is empty or larger than 256 pixels on either side.
    #[cfg(feature = "pngio")]
    pub fn add_image(&mut self, image: &Image) -> io::Result<()> {
        self.entries.push(IconDirEntry::encode_image(image)?);
        Ok(())
    }

    /// Returns the dimensions of every image in the directory, in order.
    pub fn sizes(&self) -> Vec<(u32, u32)> {
        self.entries.iter().map(|entry| (entry.width(), entry.height())).collect()
    }

    /// Reads an icon directory from an ICO file.
    pub fn read<R: Read + Seek>(mut reader: R) -> io::Result<IconDir> {
        let reserved = reader.read_u16::<LittleEndian>()?;
        let resource_type = reader.read_u16::<LittleEndian>()?;
        if reserved != 0 || resource_type != ICON_RESOURCE_TYPE {
            let msg = "not an ico file (bad header)";
            return Err(Error::new(ErrorKind::InvalidData, msg));
        }
        let count = reader.read_u16::<LittleEndian>()?;
        let mut headers = Vec::with_capacity(count as usize);
        for _ in 0..count {
            headers.push(EntryHeader::read(reader.by_ref())?);
        }
        let mut dir = IconDir::new();
        for header in headers {
            reader.seek(SeekFrom::Start(u64::from(header.data_offset)))?;
            let mut data = Vec::new();
            reader.by_ref()
                .take(u64::from(header.data_length))
                .read_to_end(&mut data)?;
            if data.len() != header.data_length as usize {
                let msg = format!("ico entry payload truncated ({} of {} \
                                   bytes)",
                                  data.len(),
                                  header.data_length);
                return Err(Error::new(ErrorKind::UnexpectedEof, msg));
            }
            dir.entries.push(IconDirEntry {
                width: header.width,
                height: header.height,
                bits_per_pixel: header.bits_per_pixel,
                data,
            });
        }
        Ok(dir)
    }

    /// Writes the icon directory to an ICO file.
    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        if self.entries.len() > usize::from(u16::MAX) {
            let msg = format!("too many images for one ico file ({})",
                              self.entries.len());
            return Err(Error::new(ErrorKind::InvalidInput, msg));
        }
        writer.write_u16::<LittleEndian>(0)?;
        writer.write_u16::<LittleEndian>(ICON_RESOURCE_TYPE)?;
        writer.write_u16::<LittleEndian>(self.entries.len() as u16)?;
        let mut data_offset = ICON_DIR_HEADER_LENGTH +
                              ICON_DIR_ENTRY_LENGTH * self.entries.len() as u32;
        for entry in &self.entries {
            entry.write_header(writer.by_ref(), data_offset)?;
            data_offset += entry.data_length();
        }
        for entry in &self.entries {
            writer.write_all(&entry.data)?;
        }
        Ok(())
    }

    /// Returns the encoded length of the file, in bytes, including the
    /// header and directory.
    pub fn total_length(&self) -> u32 {
        let mut length = ICON_DIR_HEADER_LENGTH;
        for entry in &self.entries {
            length += ICON_DIR_ENTRY_LENGTH + entry.data_length();
        }
        length
    }
}

/// One image stored in an ICO file.
pub struct IconDirEntry {
    width: u32,
    height: u32,
    bits_per_pixel: u16,
    data: Vec<u8>,
}

impl IconDirEntry {
    /// Creates an entry with the given dimensions and encoded payload.
    pub fn new(width: u32,
               height: u32,
               bits_per_pixel: u16,
               data: Vec<u8>)
               -> io::Result<IconDirEntry> {
        check_dimensions(width, height)?;
        Ok(IconDirEntry {
            width,
            height,
            bits_per_pixel,
            data,
        })
    }

    /// Encodes the image as a 32-bit PNG entry.
    #[cfg(feature = "pngio")]
    pub fn encode_image(image: &Image) -> io::Result<IconDirEntry> {
        check_dimensions(image.width(), image.height())?;
        let data = image.to_rgba().encode_png()?;
        IconDirEntry::new(image.width(), image.height(), 32, data)
    }

    /// Decodes the entry's PNG payload.  Returns an error if the payload is
    /// not a PNG, or if its dimensions disagree with the directory entry.
    #[cfg(feature = "pngio")]
    pub fn decode_image(&self) -> io::Result<Image> {
        if !self.is_png() {
            let msg = "bitmap (non-PNG) ico entries are not supported";
            return Err(Error::new(ErrorKind::InvalidData, msg));
        }
        let image = Image::decode_png(&self.data)?;
        if image.width() != self.width || image.height() != self.height {
            let msg = format!("decoded PNG has wrong dimensions \
                               ({}x{} instead of {}x{})",
                              image.width(),
                              image.height(),
                              self.width,
                              self.height);
            return Err(Error::new(ErrorKind::InvalidData, msg));
        }
        Ok(image)
    }

    /// Returns the width of the image, in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the image, in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns true if the payload is an embedded PNG file.
    pub fn is_png(&self) -> bool {
        self.data.starts_with(PNG_SIGNATURE)
    }

    /// Returns the encoded payload of this entry.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn data_length(&self) -> u32 {
        self.data.len() as u32
    }

    fn write_header<W: Write>(&self,
                              mut writer: W,
                              data_offset: u32)
                              -> io::Result<()> {
        writer.write_u8(encode_dimension(self.width))?;
        writer.write_u8(encode_dimension(self.height))?;
        writer.write_u8(0)?; // palette size
        writer.write_u8(0)?; // reserved
        writer.write_u16::<LittleEndian>(1)?; // color planes
        writer.write_u16::<LittleEndian>(self.bits_per_pixel)?;
        writer.write_u32::<LittleEndian>(self.data_length())?;
        writer.write_u32::<LittleEndian>(data_offset)?;
        Ok(())
    }
}

const PNG_SIGNATURE: &[u8; 8] = b"\x89PNG\r\n\x1a\n";

/// Directory entry fields that are read before the payloads.
struct EntryHeader {
    width: u32,
    height: u32,
    bits_per_pixel: u16,
    data_length: u32,
    data_offset: u32,
}

impl EntryHeader {
    fn read<R: Read>(mut reader: R) -> io::Result<EntryHeader> {
        let width = decode_dimension(reader.read_u8()?);
        let height = decode_dimension(reader.read_u8()?);
        let _palette_size = reader.read_u8()?;
        let _reserved = reader.read_u8()?;
        let _color_planes = reader.read_u16::<LittleEndian>()?;
        let bits_per_pixel = reader.read_u16::<LittleEndian>()?;
        let data_length = reader.read_u32::<LittleEndian>()?;
        let data_offset = reader.read_u32::<LittleEndian>()?;
        Ok(EntryHeader {
            width,
            height,
            bits_per_pixel,
            data_length,
            data_offset,
        })
    }
}

fn check_dimensions(width: u32, height: u32) -> io::Result<()> {
    let valid = 1..=MAX_ICON_SIZE;
    if valid.contains(&width) && valid.contains(&height) {
        Ok(())
    } else {
        let msg = format!("ico images must be 1 to {} pixels on each side \
                           (got {}x{})",
                          MAX_ICON_SIZE,
                          width,
                          height);
        Err(Error::new(ErrorKind::InvalidInput, msg))
    }
}

// A stored zero stands for 256.
fn encode_dimension(size: u32) -> u8 {
    if size == MAX_ICON_SIZE { 0 } else { size as u8 }
}

fn decode_dimension(byte: u8) -> u32 {
    if byte == 0 { MAX_ICON_SIZE } else { u32::from(byte) }
}
