//! Framebuffer and PPM output.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;
use rayon::prelude::*;

use crate::vec3::{Channel::*, Vec3};

/// A finished picture: colors in `[0, 1]`, stored top row first.
///
/// Pixel coordinates follow the camera: `(0, 0)` is the bottom-left corner.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    width: usize,
    height: usize,
    rows: Vec<Vec<Vec3>>,
}

impl Image {
    pub fn par_compute(nx: usize, ny: usize, f: impl Fn(usize, usize) -> Vec3 + Sync) -> Image {
        Image {
            width: nx,
            height: ny,
            rows: (0..ny)
                .into_par_iter()
                .rev()
                .map(|y| (0..nx).map(|x| f(x, y)).collect())
                .collect(),
        }
    }

    pub fn compute(nx: usize, ny: usize, mut f: impl FnMut(usize, usize) -> Vec3) -> Image {
        Image {
            width: nx,
            height: ny,
            rows: (0..ny)
                .rev()
                .map(|y| (0..nx).map(|x| f(x, y)).collect())
                .collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Gets pixel `(x, y)`, with `y = 0` at the bottom.
    pub fn get(&self, x: usize, y: usize) -> Vec3 {
        self.rows[self.height - 1 - y][x]
    }

    /// Iterates over rows from the top of the picture down.
    pub fn rows(&self) -> impl Iterator<Item = &[Vec3]> {
        self.rows.iter().map(Vec::as_slice)
    }
}

/// Converts a color channel in `[0, 1]` to a byte.
pub fn to_u8(x: f32) -> u8 {
    ((255.99 * x) as i32).clamp(0, 255) as u8
}

/// Writes `image` as an ASCII (`P3`) PPM, top row first, one line per row.
pub fn write_ppm(image: &Image, mut out: impl Write) -> io::Result<()> {
    writeln!(out, "P3\n{} {}\n255", image.width(), image.height())?;
    for row in image.rows() {
        let line = row
            .iter()
            .map(|col| format!("{} {} {}", to_u8(col[R]), to_u8(col[G]), to_u8(col[B])))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Writes numbered PPM captures into a directory: `<prefix>0.ppm`,
/// `<prefix>1.ppm` and so on.
#[derive(Debug)]
pub struct PpmSink {
    dir: PathBuf,
    prefix: String,
    next_id: u32,
}

impl PpmSink {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        PpmSink {
            dir: dir.into(),
            prefix: prefix.into(),
            next_id: 0,
        }
    }

    /// The number the next capture will get.
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `image` to the next numbered file and returns its path.
    pub fn write(&mut self, image: &Image) -> io::Result<PathBuf> {
        let path = self
            .dir
            .join(format!("{}{}.ppm", self.prefix, self.next_id));
        let mut out = BufWriter::new(File::create(&path)?);
        write_ppm(image, &mut out)?;
        out.flush()?;

        info!("capture {} written to {}", self.next_id, path.display());
        self.next_id += 1;
        Ok(path)
    }
}
