//! Row-level data parallelism
//!
//! Every row-independent kernel writes its output through
//! [`for_each_row`]. Each invocation receives one destination row and reads
//! only immutable inputs, so the result does not depend on how rows are
//! distributed between threads.
//!
//! With the `parallel` feature (default) rows are dispatched to the rayon
//! global pool; without it they are processed in order on the calling thread.

use crate::image::Image;

/// Run `f(y, row)` for every row of `image`.
///
/// `row` holds the pixel bytes of the row (padding excluded).
pub fn for_each_row<F>(image: &mut Image, f: F)
where
    F: Fn(u32, &mut [u8]) + Send + Sync,
{
    let (data, stride, line) = image.raw_parts_mut();
    for_each_chunk(data, stride, line, f);
}

#[cfg(feature = "parallel")]
fn for_each_chunk<F>(data: &mut [u8], stride: usize, line: usize, f: F)
where
    F: Fn(u32, &mut [u8]) + Send + Sync,
{
    use rayon::prelude::*;

    data.par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, chunk)| f(y as u32, &mut chunk[..line]));
}

#[cfg(not(feature = "parallel"))]
fn for_each_chunk<F>(data: &mut [u8], stride: usize, line: usize, f: F)
where
    F: Fn(u32, &mut [u8]) + Send + Sync,
{
    data.chunks_mut(stride)
        .enumerate()
        .for_each(|(y, chunk)| f(y as u32, &mut chunk[..line]));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::PixelFormat;

    #[test]
    fn test_rows_receive_their_index() {
        let mut image = Image::with_stride(3, 50, 8, PixelFormat::Grayscale8).unwrap();
        for_each_row(&mut image, |y, row| {
            assert_eq!(row.len(), 3);
            row.fill(y as u8);
        });
        for y in 0..50 {
            assert_eq!(image.row(y), &[y as u8; 3]);
        }
        // padding untouched
        assert_eq!(image.data()[3..8], [0; 5]);
    }
}
