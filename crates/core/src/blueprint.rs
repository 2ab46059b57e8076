//! Colour-keyed room blueprints and their image-file loading.
//! This module exists to own pixel storage and the palette the layout language uses.
//! It does not classify pixels; see `mapgen::decode` for that.

use std::path::{Path, PathBuf};

use image::{ImageError, Rgba as ImageRgba, RgbaImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);
    pub const RED: Rgba = Rgba::opaque(255, 0, 0);
    pub const GREEN: Rgba = Rgba::opaque(0, 255, 0);
    pub const BLUE: Rgba = Rgba::opaque(0, 0, 255);
    pub const MAGENTA: Rgba = Rgba::opaque(255, 0, 255);
    pub const YELLOW: Rgba = Rgba::opaque(255, 255, 0);
    pub const CLEAR: Rgba = Rgba { r: 0, g: 0, b: 0, a: 0 };

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

#[derive(Debug, Error)]
pub enum BlueprintError {
    #[error("failed to read blueprint image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: ImageError,
    },
    #[error("blueprint has zero width or height")]
    Empty,
    #[error("expected {expected} pixels for the blueprint size, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("row {row} is {actual} glyphs wide, expected {expected}")]
    RaggedRow { row: usize, expected: usize, actual: usize },
    #[error("unknown blueprint glyph '{0}'")]
    UnknownGlyph(char),
}

/// A `width` x `height` grid of colours, stored row-major with row 0 at the
/// bottom of the source image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blueprint {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl Blueprint {
    pub fn new(width: usize, height: usize, pixels: Vec<Rgba>) -> Result<Self, BlueprintError> {
        if width == 0 || height == 0 {
            return Err(BlueprintError::Empty);
        }
        if pixels.len() != width * height {
            return Err(BlueprintError::SizeMismatch {
                expected: width * height,
                actual: pixels.len(),
            });
        }
        Ok(Self { width, height, pixels })
    }

    pub fn filled(width: usize, height: usize, color: Rgba) -> Result<Self, BlueprintError> {
        Self::new(width, height, vec![color; width * height])
    }

    /// Builds a blueprint from text rows, top row first.
    ///
    /// `#` wall, `M` boundary, `w` terrain, `e` enemy, `o` object, `p` player,
    /// `X` exit, `.` transparent ground, `?` an unrecognised grey.
    pub fn from_glyphs(rows: &[&str]) -> Result<Self, BlueprintError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.chars().count());
        let mut pixels = Vec::with_capacity(width * height);
        for (row, glyphs) in rows.iter().rev().enumerate() {
            let actual = glyphs.chars().count();
            if actual != width {
                return Err(BlueprintError::RaggedRow { row, expected: width, actual });
            }
            for glyph in glyphs.chars() {
                pixels.push(glyph_color(glyph)?);
            }
        }
        Self::new(width, height, pixels)
    }

    pub fn load_png(path: &Path) -> Result<Self, BlueprintError> {
        let image = image::open(path)
            .map_err(|source| BlueprintError::Image { path: path.to_path_buf(), source })?
            .to_rgba8();
        let (width, height) = (image.width() as usize, image.height() as usize);
        let mut pixels = Vec::with_capacity(width * height);
        for row in 0..height {
            let image_y = (height - 1 - row) as u32;
            for column in 0..width {
                let ImageRgba([r, g, b, a]) = *image.get_pixel(column as u32, image_y);
                pixels.push(Rgba { r, g, b, a });
            }
        }
        Self::new(width, height, pixels)
    }

    pub fn save_png(&self, path: &Path) -> Result<(), BlueprintError> {
        let image = RgbaImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            let row = self.height - 1 - y as usize;
            let color = self.pixels[row * self.width + x as usize];
            ImageRgba([color.r, color.g, color.b, color.a])
        });
        image
            .save(path)
            .map_err(|source| BlueprintError::Image { path: path.to_path_buf(), source })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Raw buffer access; `None` past the end of the buffer.
    pub fn pixel_at_index(&self, index: usize) -> Option<Rgba> {
        self.pixels.get(index).copied()
    }

    pub fn set(&mut self, column: usize, row: usize, color: Rgba) {
        self.pixels[row * self.width + column] = color;
    }

    /// Shop room first, then the regular rooms.
    pub fn demo_set() -> Vec<Blueprint> {
        [DEMO_SHOP, DEMO_HALL, DEMO_CHASM, DEMO_GARDEN]
            .iter()
            .filter_map(|rows| Self::from_glyphs(rows).ok())
            .collect()
    }
}

fn glyph_color(glyph: char) -> Result<Rgba, BlueprintError> {
    Ok(match glyph {
        '#' => Rgba::BLACK,
        'M' => Rgba::MAGENTA,
        'w' => Rgba::WHITE,
        'e' => Rgba::RED,
        'o' => Rgba::BLUE,
        'p' => Rgba::GREEN,
        'X' => Rgba::YELLOW,
        '.' => Rgba::CLEAR,
        '?' => Rgba::opaque(128, 128, 128),
        other => return Err(BlueprintError::UnknownGlyph(other)),
    })
}

const DEMO_SHOP: [&str; 12] = [
    "############",
    "#..........#",
    "#.o..X...o.#",
    "#..........#",
    "#....oo....#",
    "#..........#",
    "#.w......w.#",
    "#..........#",
    "#...p.p.p..#",
    "#..........#",
    "#....o.....#",
    "############",
];

const DEMO_HALL: [&str; 12] = [
    "############",
    "#...w..w...#",
    "#.e......e.#",
    "#..www.....#",
    "#......M.o.#",
    "#.p....M...#",
    "#.p..e.M...#",
    "#.p........#",
    "#...ww..e..#",
    "#.o.....X..#",
    "#....e.....#",
    "############",
];

const DEMO_CHASM: [&str; 12] = [
    "############",
    "#p.......e.#",
    "#p..MMMM...#",
    "#p..M..M.e.#",
    "#...M..M...#",
    "#.w.MMMM.w.#",
    "#.w......w.#",
    "#.e..o...e.#",
    "#..w....w..#",
    "#.....X..o.#",
    "#.e.ww.....#",
    "############",
];

const DEMO_GARDEN: [&str; 12] = [
    "############",
    "#wwww..wwww#",
    "#w..e..e..w#",
    "#w........w#",
    "#..o.pp.o..#",
    "#....p.....#",
    "#.e..?...e.#",
    "#w........w#",
    "#w.e....e.w#",
    "#wwww.Xwwww#",
    "#..........#",
    "############",
];
