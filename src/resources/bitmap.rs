//! BMP encoding of a single RGB-planar tile.
//!
//! Produces a standard uncompressed Windows BMP: `BITMAPFILEHEADER` plus a
//! 40-byte `BITMAPINFOHEADER`, 24 bits per pixel, rows stored bottom-up and
//! padded to a 4-byte boundary, pixels in BGR byte order.

const FILE_HEADER_SIZE: u32 = 14;
const INFO_HEADER_SIZE: u32 = 40;
const BYTES_PER_PIXEL: u32 = 3;

/// Encodes one tile of `width * height` pixels, given as three separate
/// planes (R, then G, then B) each `width * height` bytes long, into a
/// complete BMP file.
///
/// Returns `None` if `planes` is not exactly `3 * width * height` bytes.
pub fn encode(width: u32, height: u32, planes: &[u8]) -> Option<Vec<u8>> {
    let plane_len = (width as usize).checked_mul(height as usize)?;
    if planes.len() != plane_len.checked_mul(3)? {
        return None;
    }
    let (r, gb) = planes.split_at(plane_len);
    let (g, b) = gb.split_at(plane_len);

    let row_size = ((width * BYTES_PER_PIXEL + 3) / 4) * 4;
    let pixel_data_size = row_size * height;
    let file_size = FILE_HEADER_SIZE + INFO_HEADER_SIZE + pixel_data_size;

    let mut out = Vec::with_capacity(file_size as usize);

    // BITMAPFILEHEADER
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // reserved
    out.extend_from_slice(&(FILE_HEADER_SIZE + INFO_HEADER_SIZE).to_le_bytes());

    // BITMAPINFOHEADER
    out.extend_from_slice(&INFO_HEADER_SIZE.to_le_bytes());
    out.extend_from_slice(&(width as i32).to_le_bytes());
    out.extend_from_slice(&(height as i32).to_le_bytes()); // positive => bottom-up
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&24u16.to_le_bytes()); // bits per pixel
    out.extend_from_slice(&0u32.to_le_bytes()); // BI_RGB, no compression
    out.extend_from_slice(&pixel_data_size.to_le_bytes());
    out.extend_from_slice(&0i32.to_le_bytes()); // x pixels per meter
    out.extend_from_slice(&0i32.to_le_bytes()); // y pixels per meter
    out.extend_from_slice(&0u32.to_le_bytes()); // colors used
    out.extend_from_slice(&0u32.to_le_bytes()); // important colors

    let padding = (row_size - width * BYTES_PER_PIXEL) as usize;
    for row in (0..height as usize).rev() {
        let row_start = row * width as usize;
        for col in 0..width as usize {
            let idx = row_start + col;
            out.push(b[idx]);
            out.push(g[idx]);
            out.push(r[idx]);
        }
        out.extend(std::iter::repeat(0u8).take(padding));
    }

    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_plane_length() {
        assert!(encode(32, 32, &[0u8; 10]).is_none());
    }

    #[test]
    fn header_reports_bmp_magic_and_dimensions() {
        let planes = vec![0u8; 32 * 32 * 3];
        let bmp = encode(32, 32, &planes).unwrap();
        assert_eq!(&bmp[0..2], b"BM");
        let width = i32::from_le_bytes(bmp[18..22].try_into().unwrap());
        let height = i32::from_le_bytes(bmp[22..26].try_into().unwrap());
        assert_eq!(width, 32);
        assert_eq!(height, 32);
        assert_eq!(bmp[28], 24); // bits per pixel (low byte of u16)
    }

    #[test]
    fn pixel_bytes_are_stored_bgr_and_rows_are_bottom_up() {
        let mut planes = vec![0u8; 2 * 1 * 3];
        // width=2, height=1: pixel 0 = (r=10,g=20,b=30), pixel 1 = (r=40,g=50,b=60)
        planes[0] = 10;
        planes[1] = 40;
        planes[2] = 20;
        planes[3] = 50;
        planes[4] = 30;
        planes[5] = 60;
        let bmp = encode(2, 1, &planes).unwrap();
        let pixel_data = &bmp[54..];
        assert_eq!(&pixel_data[0..3], &[30, 20, 10]); // BGR for first pixel
        assert_eq!(&pixel_data[3..6], &[60, 50, 40]);
    }

    #[test]
    fn row_padding_rounds_up_to_four_bytes() {
        // width=1 => row = 3 bytes of pixel data, padded to 4
        let planes = vec![1u8; 1 * 3 * 3];
        let bmp = encode(1, 3, &planes).unwrap();
        let pixel_data = &bmp[54..];
        assert_eq!(pixel_data.len(), 4 * 3);
        assert_eq!(pixel_data[3], 0);
    }
}
