use crate::params::{
    CalibIntrinsicsNonRectified, CalibIntrinsicsRectified, CalibRectParameters,
    MAX_NUM_INTRINSICS_PLATFORM, MAX_NUM_INTRINSICS_RIGHT, MAX_NUM_INTRINSICS_THIRD,
    MAX_NUM_RECTIFIED_MODES_LR, MAX_NUM_RECTIFIED_MODES_PLATFORM, MAX_NUM_RECTIFIED_MODES_THIRD,
};

use super::CalibParseError;

/// Lowest blob version with the layout decoded here.
///
/// Versions 0 and 1 predate the rectified parameter table.
pub const MIN_SUPPORTED_VERSION: u32 = 2;

/// Cursor over a raw calibration blob.
///
/// Advances monotonically; every decode takes exactly the bytes it needs.
struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Takes the next `len` bytes and advances the cursor past them.
    fn take(&mut self, len: usize) -> Result<&'a [u8], CalibParseError> {
        let chunk =
            self.buf
                .get(self.pos..self.pos + len)
                .ok_or(CalibParseError::TruncatedBuffer {
                    offset: self.pos,
                    needed: len,
                    len: self.buf.len(),
                })?;
        self.pos += len;
        Ok(chunk)
    }

    /// Decodes `dst.len()` elements in sequence.
    fn read_seq<T: FromWire>(&mut self, dst: &mut [T]) -> Result<(), CalibParseError> {
        for slot in dst.iter_mut() {
            *slot = T::read_from(self)?;
        }
        Ok(())
    }

    /// Decodes a 3x3 matrix in row-major order.
    fn read_mat3(&mut self, dst: &mut [[f32; 3]; 3]) -> Result<(), CalibParseError> {
        for row in dst.iter_mut() {
            self.read_seq(row)?;
        }
        Ok(())
    }
}

/// A value decodable from its big-endian wire encoding.
trait FromWire: Sized {
    fn read_from(reader: &mut WireReader) -> Result<Self, CalibParseError>;
}

impl FromWire for u32 {
    #[inline]
    fn read_from(reader: &mut WireReader) -> Result<Self, CalibParseError> {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(reader.take(4)?);
        Ok(u32::from_be_bytes(bytes))
    }
}

impl FromWire for f32 {
    #[inline]
    fn read_from(reader: &mut WireReader) -> Result<Self, CalibParseError> {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(reader.take(4)?);
        Ok(f32::from_be_bytes(bytes))
    }
}

impl FromWire for CalibIntrinsicsNonRectified {
    fn read_from(reader: &mut WireReader) -> Result<Self, CalibParseError> {
        let fx = f32::read_from(reader)?;
        let fy = f32::read_from(reader)?;
        let px = f32::read_from(reader)?;
        let py = f32::read_from(reader)?;
        let mut k = [0.0f32; 5];
        reader.read_seq(&mut k)?;
        let w = u32::read_from(reader)?;
        let h = u32::read_from(reader)?;
        Ok(Self {
            fx,
            fy,
            px,
            py,
            k,
            w,
            h,
        })
    }
}

impl FromWire for CalibIntrinsicsRectified {
    fn read_from(reader: &mut WireReader) -> Result<Self, CalibParseError> {
        let rfx = f32::read_from(reader)?;
        let rfy = f32::read_from(reader)?;
        let rpx = f32::read_from(reader)?;
        let rpy = f32::read_from(reader)?;
        let rw = u32::read_from(reader)?;
        let rh = u32::read_from(reader)?;
        Ok(Self {
            rfx,
            rfy,
            rpx,
            rpy,
            rw,
            rh,
        })
    }
}

/// Checks a decoded count against the record capacity and returns it as a
/// usable slice length.
fn bounded_count(
    field: &'static str,
    value: u32,
    max: usize,
) -> Result<usize, CalibParseError> {
    let count = value as usize;
    if count > max {
        return Err(CalibParseError::CountOutOfRange { field, value, max });
    }
    Ok(count)
}

/// Parses a calibration blob into `cal`.
///
/// Decodes the version and the six count fields, validates them, then walks
/// the remaining sections in wire order: left/right/third/platform
/// intrinsics, the rectified mode tables, the per-imager rotations,
/// baselines and translations, and the world rotation. All scalars are
/// big-endian on the wire.
///
/// On failure `cal` may be partially populated; callers must discard it.
///
/// # Arguments
///
/// * `buf` - The raw calibration blob read from the device.
/// * `cal` - The record to populate.
pub fn parse_calib_rect_parameters(
    buf: &[u8],
    cal: &mut CalibRectParameters,
) -> Result<(), CalibParseError> {
    let mut reader = WireReader::new(buf);

    cal.version = u32::read_from(&mut reader)?;
    if cal.version < MIN_SUPPORTED_VERSION {
        return Err(CalibParseError::UnsupportedVersion(cal.version));
    }

    cal.num_intrinsics_right = u32::read_from(&mut reader)?;
    cal.num_intrinsics_third = u32::read_from(&mut reader)?;
    cal.num_intrinsics_platform = u32::read_from(&mut reader)?;
    cal.num_rectified_modes_lr = u32::read_from(&mut reader)?;
    cal.num_rectified_modes_third = u32::read_from(&mut reader)?;
    cal.num_rectified_modes_platform = u32::read_from(&mut reader)?;

    let num_right = bounded_count(
        "numIntrinsicsRight",
        cal.num_intrinsics_right,
        MAX_NUM_INTRINSICS_RIGHT,
    )?;
    let num_third = bounded_count(
        "numIntrinsicsThird",
        cal.num_intrinsics_third,
        MAX_NUM_INTRINSICS_THIRD,
    )?;
    let num_platform = bounded_count(
        "numIntrinsicsPlatform",
        cal.num_intrinsics_platform,
        MAX_NUM_INTRINSICS_PLATFORM,
    )?;
    let num_modes_lr = bounded_count(
        "numRectifiedModesLR",
        cal.num_rectified_modes_lr,
        MAX_NUM_RECTIFIED_MODES_LR,
    )?;
    let num_modes_third = bounded_count(
        "numRectifiedModesThird",
        cal.num_rectified_modes_third,
        MAX_NUM_RECTIFIED_MODES_THIRD,
    )?;
    let num_modes_platform = bounded_count(
        "numRectifiedModesPlatform",
        cal.num_rectified_modes_platform,
        MAX_NUM_RECTIFIED_MODES_PLATFORM,
    )?;

    log::debug!(
        "calibration v{}: {} right, {} third, {} platform imagers, {}/{}/{} rectified modes",
        cal.version,
        num_right,
        num_third,
        num_platform,
        num_modes_lr,
        num_modes_third,
        num_modes_platform
    );

    cal.intrinsics_left = CalibIntrinsicsNonRectified::read_from(&mut reader)?;
    reader.read_seq(&mut cal.intrinsics_right[..num_right])?;
    reader.read_seq(&mut cal.intrinsics_third[..num_third])?;
    reader.read_seq(&mut cal.intrinsics_platform[..num_platform])?;

    for modes in &mut cal.modes_lr[..num_right] {
        reader.read_seq(&mut modes[..num_modes_lr])?;
    }
    for per_third in &mut cal.modes_third[..num_right] {
        for modes in &mut per_third[..num_third] {
            reader.read_seq(&mut modes[..num_modes_third])?;
        }
    }
    for per_platform in &mut cal.modes_platform[..num_right] {
        for modes in &mut per_platform[..num_platform] {
            reader.read_seq(&mut modes[..num_modes_platform])?;
        }
    }

    for rotation in &mut cal.r_left[..num_right] {
        reader.read_mat3(rotation)?;
    }
    for rotation in &mut cal.r_right[..num_right] {
        reader.read_mat3(rotation)?;
    }
    for rotation in &mut cal.r_third[..num_right] {
        reader.read_mat3(rotation)?;
    }
    for rotation in &mut cal.r_platform[..num_right] {
        reader.read_mat3(rotation)?;
    }

    reader.read_seq(&mut cal.b[..num_right])?;
    for translation in &mut cal.t[..num_right] {
        reader.read_seq(translation)?;
    }
    for translation in &mut cal.t_platform[..num_right] {
        reader.read_seq(translation)?;
    }
    reader.read_mat3(&mut cal.r_world)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_u32_big_endian() {
        let buf = [0x00, 0x01, 0x02, 0x03];
        let mut reader = WireReader::new(&buf);
        assert_eq!(u32::read_from(&mut reader).unwrap(), 0x0001_0203);
        assert_eq!(reader.pos, 4);
    }

    #[test]
    fn read_f32_big_endian() {
        let buf = 1.5f32.to_be_bytes();
        let mut reader = WireReader::new(&buf);
        assert_eq!(f32::read_from(&mut reader).unwrap(), 1.5);
        assert_eq!(reader.pos, 4);
    }

    #[test]
    fn be_encoding_round_trips() {
        for value in [0u32, 1, 0xdead_beef, u32::MAX] {
            let wire = value.to_be_bytes();
            let mut reader = WireReader::new(&wire);
            assert_eq!(u32::read_from(&mut reader).unwrap(), value);
        }
        for value in [0.0f32, -0.0, 1.0, -427.75, f32::MIN_POSITIVE] {
            let wire = value.to_be_bytes();
            let mut reader = WireReader::new(&wire);
            assert_eq!(f32::read_from(&mut reader).unwrap().to_bits(), value.to_bits());
        }
    }

    #[test]
    fn be_decode_is_byte_reversal_of_le() {
        let wire = [0x40, 0x49, 0x0f, 0xdb];
        let mut reversed = wire;
        reversed.reverse();
        let mut reader = WireReader::new(&wire);
        let decoded = f32::read_from(&mut reader).unwrap();
        assert_eq!(decoded.to_bits(), f32::from_le_bytes(reversed).to_bits());
    }

    #[test]
    fn scalar_reads_advance_in_steps() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&7u32.to_be_bytes());
        buf.extend_from_slice(&2.25f32.to_be_bytes());
        let mut reader = WireReader::new(&buf);
        assert_eq!(u32::read_from(&mut reader).unwrap(), 7);
        assert_eq!(reader.pos, 4);
        assert_eq!(f32::read_from(&mut reader).unwrap(), 2.25);
        assert_eq!(reader.pos, 8);
    }

    #[test]
    fn grid_decodes_row_major() {
        let mut buf = Vec::new();
        for value in 0..12u32 {
            buf.extend_from_slice(&value.to_be_bytes());
        }
        let mut grid = [[0u32; 4]; 3];
        let mut reader = WireReader::new(&buf);
        for row in grid.iter_mut() {
            reader.read_seq(row).unwrap();
        }
        for (row, cells) in grid.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                assert_eq!(*cell, (col + 4 * row) as u32);
            }
        }
    }

    #[test]
    fn non_rectified_field_order() {
        let mut buf = Vec::new();
        for value in [595.0f32, 596.5, 315.25, 242.75] {
            buf.extend_from_slice(&value.to_be_bytes());
        }
        for value in [0.1f32, -0.2, 0.3, -0.4, 0.5] {
            buf.extend_from_slice(&value.to_be_bytes());
        }
        buf.extend_from_slice(&640u32.to_be_bytes());
        buf.extend_from_slice(&480u32.to_be_bytes());

        let mut reader = WireReader::new(&buf);
        let intrinsics = CalibIntrinsicsNonRectified::read_from(&mut reader).unwrap();
        assert_eq!(intrinsics.fx, 595.0);
        assert_eq!(intrinsics.fy, 596.5);
        assert_eq!(intrinsics.px, 315.25);
        assert_eq!(intrinsics.py, 242.75);
        assert_eq!(intrinsics.k, [0.1, -0.2, 0.3, -0.4, 0.5]);
        assert_eq!(intrinsics.w, 640);
        assert_eq!(intrinsics.h, 480);
        assert_eq!(reader.pos, buf.len());
    }

    #[test]
    fn rectified_field_order() {
        let mut buf = Vec::new();
        for value in [580.0f32, 581.0, 320.0, 240.0] {
            buf.extend_from_slice(&value.to_be_bytes());
        }
        buf.extend_from_slice(&628u32.to_be_bytes());
        buf.extend_from_slice(&468u32.to_be_bytes());

        let mut reader = WireReader::new(&buf);
        let intrinsics = CalibIntrinsicsRectified::read_from(&mut reader).unwrap();
        assert_eq!(intrinsics.rfx, 580.0);
        assert_eq!(intrinsics.rfy, 581.0);
        assert_eq!(intrinsics.rpx, 320.0);
        assert_eq!(intrinsics.rpy, 240.0);
        assert_eq!(intrinsics.rw, 628);
        assert_eq!(intrinsics.rh, 468);
    }

    #[test]
    fn take_past_end_is_truncation() {
        let buf = [0u8; 6];
        let mut reader = WireReader::new(&buf);
        u32::read_from(&mut reader).unwrap();
        let err = u32::read_from(&mut reader).unwrap_err();
        match err {
            CalibParseError::TruncatedBuffer {
                offset,
                needed,
                len,
            } => {
                assert_eq!(offset, 4);
                assert_eq!(needed, 4);
                assert_eq!(len, 6);
            }
            other => panic!("expected TruncatedBuffer, got {other:?}"),
        }
        // the failed read must not advance the cursor
        assert_eq!(reader.pos, 4);
    }

    #[test]
    fn count_over_capacity_is_rejected() {
        let err = bounded_count("numIntrinsicsRight", 3, MAX_NUM_INTRINSICS_RIGHT).unwrap_err();
        match err {
            CalibParseError::CountOutOfRange { field, value, max } => {
                assert_eq!(field, "numIntrinsicsRight");
                assert_eq!(value, 3);
                assert_eq!(max, 2);
            }
            other => panic!("expected CountOutOfRange, got {other:?}"),
        }
        assert_eq!(bounded_count("numIntrinsicsRight", 2, 2).unwrap(), 2);
        assert_eq!(bounded_count("numIntrinsicsRight", 0, 2).unwrap(), 0);
    }
}
