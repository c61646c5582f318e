use rgb::RGB8;

const CHANNELS: usize = 4;

/// Visits every `stride`-th pixel on both axes, starting at the top-left
/// corner, and collects the RGB part of each pixel whose alpha is not zero.
///
/// The result is in row-major visit order and may be empty.
pub fn sample(width: u32, height: u32, buf: &[u8], stride: usize) -> Vec<RGB8> {
    let w = width as usize;
    let h = height as usize;
    assert_eq!(buf.len(), w * h * CHANNELS);

    let stride = stride.max(1);
    let mut samples = Vec::with_capacity(w.div_ceil(stride) * h.div_ceil(stride));

    for y in (0..h).step_by(stride) {
        let row = &buf[y * w * CHANNELS..(y + 1) * w * CHANNELS];
        for pixel in row.chunks_exact(CHANNELS).step_by(stride) {
            if pixel[3] == 0 {
                continue;
            }
            samples.push(RGB8 {
                r: pixel[0],
                g: pixel[1],
                b: pixel[2],
            });
        }
    }

    samples
}
