use crate::encode;

pub(crate) const CANVAS_WIDTH: usize = 400;
pub(crate) const CANVAS_HEIGHT: usize = 150;

/// Pen thickness in pixels, matching the page's `lineWidth = 2`.
const PEN: i64 = 2;

/// Freehand signature surface. Press begins a path and marks ink,
/// move extends it while pressed, release or leaving the canvas ends
/// it. Only the ink flag gates submission; the raster exists so the
/// POST revisions can serialize the drawing into the hidden field.
#[derive(Debug, Clone)]
pub(crate) struct SignaturePad {
    drawing: bool,
    has_ink: bool,
    cursor: Option<(i64, i64)>,
    pixels: Vec<u8>,
}

impl SignaturePad {
    pub(crate) fn new() -> Self {
        Self {
            drawing: false,
            has_ink: false,
            cursor: None,
            pixels: vec![0xFF; CANVAS_WIDTH * CANVAS_HEIGHT],
        }
    }

    pub(crate) fn pointer_down(&mut self, x: f64, y: f64) {
        self.drawing = true;
        self.has_ink = true;
        let p = clamp_point(x, y);
        self.cursor = Some(p);
        self.plot(p.0, p.1);
    }

    pub(crate) fn pointer_move(&mut self, x: f64, y: f64) {
        if !self.drawing {
            return;
        }
        let to = clamp_point(x, y);
        if let Some(from) = self.cursor {
            self.stroke_line(from, to);
        }
        self.cursor = Some(to);
    }

    pub(crate) fn pointer_up(&mut self) {
        self.drawing = false;
    }

    pub(crate) fn clear(&mut self) {
        self.drawing = false;
        self.has_ink = false;
        self.cursor = None;
        self.pixels.fill(0xFF);
    }

    pub(crate) fn has_ink(&self) -> bool {
        self.has_ink
    }

    fn stroke_line(&mut self, from: (i64, i64), to: (i64, i64)) {
        // Bresenham over the clamped grid.
        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.plot(x, y);
            if (x, y) == to {
                break;
            }
            let doubled = 2 * err;
            if doubled >= dy {
                err += dy;
                x += sx;
            }
            if doubled <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn plot(&mut self, x: i64, y: i64) {
        for oy in 0..PEN {
            for ox in 0..PEN {
                let (px, py) = (x + ox, y + oy);
                if (0..CANVAS_WIDTH as i64).contains(&px) && (0..CANVAS_HEIGHT as i64).contains(&py)
                {
                    self.pixels[py as usize * CANVAS_WIDTH + px as usize] = 0x00;
                }
            }
        }
    }

    /// Serialize the raster as `canvas.toDataURL("image/png")` did:
    /// an eight-bit grayscale PNG behind a base64 data URL.
    pub(crate) fn to_png_data_url(&self) -> String {
        let png = encode_grayscale_png(&self.pixels, CANVAS_WIDTH, CANVAS_HEIGHT);
        format!("data:image/png;base64,{}", encode::base64_encode(&png))
    }
}

fn clamp_point(x: f64, y: f64) -> (i64, i64) {
    let px = (x as i64).clamp(0, CANVAS_WIDTH as i64 - 1);
    let py = (y as i64).clamp(0, CANVAS_HEIGHT as i64 - 1);
    (px, py)
}

fn crc32(bytes: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for byte in bytes {
        crc ^= u32::from(*byte);
        for _ in 0..8 {
            let mask = (crc & 1).wrapping_neg();
            crc = (crc >> 1) ^ (0xEDB8_8320 & mask);
        }
    }
    !crc
}

fn adler32(bytes: &[u8]) -> u32 {
    let mut a = 1u32;
    let mut b = 0u32;
    for byte in bytes {
        a = (a + u32::from(*byte)) % 65_521;
        b = (b + a) % 65_521;
    }
    (b << 16) | a
}

fn push_chunk(out: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) {
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(kind);
    out.extend_from_slice(data);
    let mut checked = Vec::with_capacity(4 + data.len());
    checked.extend_from_slice(kind);
    checked.extend_from_slice(data);
    out.extend_from_slice(&crc32(&checked).to_be_bytes());
}

/// Minimal PNG writer: grayscale, filter 0 on every scanline, zlib
/// stream of stored deflate blocks. Valid output without pulling in a
/// compression dependency.
fn encode_grayscale_png(pixels: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut raw = Vec::with_capacity(height * (width + 1));
    for row in pixels.chunks(width) {
        raw.push(0);
        raw.extend_from_slice(row);
    }

    let mut idat = vec![0x78, 0x01];
    let mut blocks = raw.chunks(0xFFFF).peekable();
    while let Some(block) = blocks.next() {
        idat.push(if blocks.peek().is_none() { 1 } else { 0 });
        idat.extend_from_slice(&(block.len() as u16).to_le_bytes());
        idat.extend_from_slice(&(!(block.len() as u16)).to_le_bytes());
        idat.extend_from_slice(block);
    }
    idat.extend_from_slice(&adler32(&raw).to_be_bytes());

    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&(width as u32).to_be_bytes());
    ihdr.extend_from_slice(&(height as u32).to_be_bytes());
    // Bit depth 8, grayscale, deflate, adaptive filtering, no interlace.
    ihdr.extend_from_slice(&[8, 0, 0, 0, 0]);

    let mut out = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    push_chunk(&mut out, b"IHDR", &ihdr);
    push_chunk(&mut out, b"IDAT", &idat);
    push_chunk(&mut out, b"IEND", &[]);
    out
}
