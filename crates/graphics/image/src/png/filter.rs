//! Scanline filters, see <https://www.w3.org/TR/png/#9Filters>

use super::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Filter {
    None = 0,
    Sub = 1,
    Up = 2,
    Average = 3,
    Paeth = 4,
}

impl TryFrom<u8> for Filter {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Sub),
            2 => Ok(Self::Up),
            3 => Ok(Self::Average),
            4 => Ok(Self::Paeth),
            _ => {
                log::warn!("Unknown scanline filter type: {value}");
                Err(Error::UnknownFilterType)
            },
        }
    }
}

/// Undo the filters of every scanline in `from`, writing the raw scanlines to `to`.
///
/// Each filtered scanline is prefixed with its filter type, so `from` holds
/// `scanline_width + 1` bytes per row.
pub fn unfilter_scanlines(
    from: &[u8],
    to: &mut [u8],
    scanline_width: usize,
    bytes_per_pixel: usize,
) -> Result<(), Error> {
    let mut previous_scanline = vec![0; scanline_width];

    for (filtered_row, current_scanline) in from
        .chunks_exact(scanline_width + 1)
        .zip(to.chunks_exact_mut(scanline_width))
    {
        let filter = Filter::try_from(filtered_row[0])?;
        let filtered_data = &filtered_row[1..];

        for i in 0..scanline_width {
            // a: byte to the left, b: byte above, c: byte above and to the left
            let a = if i < bytes_per_pixel {
                0
            } else {
                current_scanline[i - bytes_per_pixel]
            };
            let b = previous_scanline[i];
            let c = if i < bytes_per_pixel {
                0
            } else {
                previous_scanline[i - bytes_per_pixel]
            };

            let predictor = match filter {
                Filter::None => 0,
                Filter::Sub => a,
                Filter::Up => b,
                Filter::Average => ((a as u16 + b as u16) / 2) as u8,
                Filter::Paeth => paeth(a, b, c),
            };

            current_scanline[i] = filtered_data[i].wrapping_add(predictor);
        }

        previous_scanline.copy_from_slice(current_scanline);
    }

    Ok(())
}

/// <https://www.w3.org/TR/png/#9Filter-type-4-Paeth>
/// Note that this function only implements a single selection
/// step in the paeth algorithm
#[inline]
#[must_use]
pub(crate) fn paeth(a: u8, b: u8, c: u8) -> u8 {
    // Note that we need to use i16's because all the calculations
    // must be performed without overflows
    let a_i16 = a as i16;
    let b_i16 = b as i16;
    let c_i16 = c as i16;

    let p = a_i16 + b_i16 - c_i16;
    let pa = (p - a_i16).abs();
    let pb = (p - b_i16).abs();
    let pc = (p - c_i16).abs();

    if pa <= pb && pa <= pc {
        a
    } else if pb <= pc {
        b
    } else {
        c
    }
}
