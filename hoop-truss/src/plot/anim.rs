use super::*;
use image::{
    codecs::gif::{GifEncoder, Repeat},
    Delay, Frame, RgbImage,
};
use std::{io::Write, path::Path};

/// Error of the animation output.
#[derive(Debug)]
pub enum RenderError {
    /// Drawing error of the backend
    Draw(String),
    /// Encoding error of the animation
    Image(image::ImageError),
    /// Writing file error
    Io(std::io::Error),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Draw(e) => write!(f, "drawing error: {e}"),
            Self::Image(e) => write!(f, "encoding error: {e}"),
            Self::Io(e) => write!(f, "writing file error: {e}"),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<image::ImageError> for RenderError {
    fn from(e: image::ImageError) -> Self {
        Self::Image(e)
    }
}

impl From<std::io::Error> for RenderError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for RenderError {
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        Self::Draw(e.to_string())
    }
}

/// GIF animation of a deployment sequence.
///
/// The animation owns one RGB canvas, it is cleared and redrawn for each
/// pushed state, then appended to the GIF as a frame. Frames are drawn with
/// [`Opt::raster()`] by default.
///
/// The GIF trailer is written when the animation is dropped and a failure at
/// that point cannot be reported. Write into a `&mut` buffer or writer, then
/// save or flush it after [`Animation::finish()`].
///
/// ```
/// use hoop_truss::{plot::Animation, HoopTruss};
/// let hoop = HoopTruss::example();
/// let mut buf = Vec::new();
/// let mut anim = Animation::new(&mut buf, (200, 200), 100).unwrap();
/// for state in hoop.sequence_iter(hoop.folded, hoop.deployed, 4) {
///     anim.push(&state).unwrap();
/// }
/// assert_eq!(anim.finish(), 4);
/// assert!(buf.starts_with(b"GIF89a"));
/// ```
pub struct Animation<W: Write> {
    encoder: GifEncoder<W>,
    size: (u32, u32),
    delay: u32,
    canvas: Vec<u8>,
    bound: Option<[[f64; 2]; 3]>,
    opt: Opt,
    frames: usize,
}

impl<W: Write> Animation<W> {
    /// Create an endless looping animation, `delay` is the frame delay in
    /// milliseconds.
    pub fn new(w: W, size: (u32, u32), delay: u32) -> Result<Self, RenderError> {
        let mut encoder = GifEncoder::new_with_speed(w, 10);
        encoder.set_repeat(Repeat::Infinite)?;
        let canvas = vec![0; size.0 as usize * size.1 as usize * 3];
        let opt = Opt::raster();
        Ok(Self { encoder, size, delay, canvas, bound: None, opt, frames: 0 })
    }

    /// Fix the plot area for every frame.
    pub fn bound(self, bound: impl Into<Option<[[f64; 2]; 3]>>) -> Self {
        Self { bound: bound.into(), ..self }
    }

    /// Set the drawing options of the frames.
    pub fn with_opt(self, opt: Opt) -> Self {
        Self { opt, ..self }
    }

    /// Draw the state and append it as a frame.
    pub fn push(&mut self, state: &FoldingState) -> Result<(), RenderError> {
        let (w, h) = self.size;
        self.canvas.fill(0);
        {
            let root = BitMapBackend::with_buffer(&mut self.canvas, self.size);
            Figure::new(state)
                .with_opt(self.opt.clone())
                .bound(self.bound)
                .plot(root)?;
        }
        let img = RgbImage::from_raw(w, h, self.canvas.clone())
            .ok_or_else(|| RenderError::Draw("canvas size mismatch".to_string()))?;
        let img = image::DynamicImage::ImageRgb8(img).into_rgba8();
        let delay = Delay::from_numer_denom_ms(self.delay, 1);
        self.encoder.encode_frame(Frame::from_parts(img, 0, 0, delay))?;
        self.frames += 1;
        Ok(())
    }

    /// Number of the frames pushed.
    pub fn len(&self) -> usize {
        self.frames
    }

    /// Return true if there is no frame.
    pub fn is_empty(&self) -> bool {
        self.frames == 0
    }

    /// Close the animation and return the number of the frames.
    ///
    /// The trailer is written to the writer here, the writer is not flushed.
    pub fn finish(self) -> usize {
        self.frames
    }
}

/// Export the folding states as numbered SVG frames in `dir`.
///
/// Each frame carries the angle label. Return the file paths in angle order.
pub fn svg_frames<P>(
    dir: P,
    states: &[FoldingState],
    size: (u32, u32),
    opt: Opt,
) -> Result<Vec<std::path::PathBuf>, RenderError>
where
    P: AsRef<Path>,
{
    svg_frames_with(dir, states, size, opt, |_| ())
}

/// Export the SVG frames with a callback, which receives the index of each
/// written frame.
pub fn svg_frames_with<P, C>(
    dir: P,
    states: &[FoldingState],
    size: (u32, u32),
    opt: Opt,
    mut callback: C,
) -> Result<Vec<std::path::PathBuf>, RenderError>
where
    P: AsRef<Path>,
    C: FnMut(usize),
{
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;
    let bound = common_bound(states);
    let width = states.len().to_string().len();
    states
        .iter()
        .enumerate()
        .map(|(i, state)| -> Result<_, RenderError> {
            let path = dir.join(format!("frame_{i:0width$}.svg"));
            let root = SVGBackend::new(&path, size).into_drawing_area();
            Figure::new(state)
                .with_opt(opt.clone())
                .bound(bound)
                .plot::<SVGBackend, _>(root.clone())?;
            root.present()?;
            drop(root);
            callback(i);
            Ok(path)
        })
        .collect()
}
