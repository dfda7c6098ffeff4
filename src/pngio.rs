use crate::image::{Image, PixelFormat};
use std::io::{self, BufRead, Cursor, Seek, Write};

impl Image {
    /// Reads an image from a PNG file.
    pub fn read_png<R: BufRead + Seek>(input: R) -> io::Result<Image> {
        let mut decoder = png::Decoder::new(input);
        decoder.set_transformations(
            png::Transformations::STRIP_16 | png::Transformations::EXPAND,
        );
        let mut reader = decoder.read_info().map_err(decoding_error)?;
        let (width, height) = {
            let info = reader.info();
            (info.width, info.height)
        };

        let (color_type, bit_depth) = reader.output_color_type();
        if bit_depth != png::BitDepth::Eight {
            let msg = format!("unsupported PNG output bit depth {:?}",
                              bit_depth);
            return Err(io::Error::new(io::ErrorKind::InvalidData, msg));
        }
        let pixel_format = match color_type {
            png::ColorType::Rgba => PixelFormat::RGBA,
            png::ColorType::Rgb => PixelFormat::RGB,
            png::ColorType::GrayscaleAlpha => PixelFormat::GrayAlpha,
            png::ColorType::Grayscale => PixelFormat::Gray,
            _ => {
                // EXPAND should have turned palettes into RGB(A).
                return Err(io::Error::new(io::ErrorKind::InvalidData,
                                          "unexpected paletted PNG output"));
            }
        };

        let mut image = Image::try_new(pixel_format, width, height)
            .ok_or_else(|| {
                let msg = format!("PNG dimensions {}x{} are too large",
                                  width,
                                  height);
                io::Error::new(io::ErrorKind::InvalidData, msg)
            })?;
        if reader.output_buffer_size() != Some(image.data().len()) {
            return Err(io::Error::new(io::ErrorKind::InvalidData,
                                      "PNG frame size disagrees with header"));
        }
        reader.next_frame(image.data_mut()).map_err(decoding_error)?;
        reader.finish().map_err(decoding_error)?;
        Ok(image)
    }

    /// Writes the image to a PNG file.
    pub fn write_png<W: Write>(&self, output: W) -> io::Result<()> {
        let color_type = match self.format {
            PixelFormat::RGBA => png::ColorType::Rgba,
            PixelFormat::RGB => png::ColorType::Rgb,
            PixelFormat::GrayAlpha => png::ColorType::GrayscaleAlpha,
            PixelFormat::Gray => png::ColorType::Grayscale,
        };
        let mut encoder = png::Encoder::new(output, self.width(), self.height());
        encoder.set_color(color_type);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header().map_err(encoding_error)?;
        writer.write_image_data(&self.data).map_err(encoding_error)?;
        writer.finish().map_err(encoding_error)?;
        Ok(())
    }

    /// Encodes the image as an in-memory PNG file.
    pub fn encode_png(&self) -> io::Result<Vec<u8>> {
        let mut output = Vec::new();
        self.write_png(&mut output)?;
        Ok(output)
    }

    /// Decodes an image from an in-memory PNG file.
    pub fn decode_png(data: &[u8]) -> io::Result<Image> {
        Image::read_png(Cursor::new(data))
    }
}

fn decoding_error(error: png::DecodingError) -> io::Error {
    match error {
        png::DecodingError::IoError(error) => error,
        other => io::Error::new(io::ErrorKind::InvalidData, other),
    }
}

fn encoding_error(error: png::EncodingError) -> io::Error {
    match error {
        png::EncodingError::IoError(error) => error,
        other => io::Error::new(io::ErrorKind::InvalidInput, other),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[test]
    fn png_keeps_dimensions_and_pixels() {
        let mut image = Image::new(PixelFormat::RGBA, 3, 2);
        for (index, byte) in image.data_mut().iter_mut().enumerate() {
            *byte = index as u8;
        }
        let encoded = image.encode_png().expect("encode failed");
        assert_eq!(&encoded[1..4], b"PNG");
        let decoded = Image::decode_png(&encoded).expect("decode failed");
        assert_eq!(decoded.width(), 3);
        assert_eq!(decoded.height(), 2);
        assert_eq!(decoded.pixel_format(), PixelFormat::RGBA);
        assert_eq!(decoded.data(), image.data());
    }

    /// Builds a PNG whose header claims the given dimensions, followed by an
    /// empty image data chunk.
    pub(crate) fn png_with_header(width: u32, height: u32) -> Vec<u8> {
        let mut ihdr = Vec::new();
        ihdr.extend_from_slice(&width.to_be_bytes());
        ihdr.extend_from_slice(&height.to_be_bytes());
        ihdr.extend_from_slice(&[8, 6, 0, 0, 0]); // 8-bit RGBA
        let mut data = b"\x89PNG\r\n\x1a\n".to_vec();
        push_chunk(&mut data, b"IHDR", &ihdr);
        push_chunk(&mut data, b"IDAT", &[]);
        push_chunk(&mut data, b"IEND", &[]);
        data
    }

    fn push_chunk(output: &mut Vec<u8>, kind: &[u8; 4], payload: &[u8]) {
        output.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        let start = output.len();
        output.extend_from_slice(kind);
        output.extend_from_slice(payload);
        let crc = crc32(&output[start..]);
        output.extend_from_slice(&crc.to_be_bytes());
    }

    fn crc32(bytes: &[u8]) -> u32 {
        let mut crc = !0u32;
        for &byte in bytes {
            crc ^= u32::from(byte);
            for _ in 0..8 {
                let mask = (crc & 1).wrapping_neg();
                crc = (crc >> 1) ^ (0xedb8_8320 & mask);
            }
        }
        !crc
    }

    #[test]
    fn huge_header_is_invalid_data() {
        let error = Image::decode_png(&png_with_header(40000, 40000))
            .err()
            .expect("huge PNG decoded");
        assert_eq!(error.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn garbage_is_invalid_data() {
        let error = Image::decode_png(b"definitely not a png")
            .err()
            .expect("garbage decoded");
        assert_eq!(error.kind(), io::ErrorKind::InvalidData);
    }
}
