//! Plain-text grayscale raster (PGM `P2`) loading.
//!
//! The format is:
//!
//! ```text
//! P2
//! <width> <height>
//! <max value, ignored>
//! <width * height whitespace-separated integers>
//! ```
//!
//! Values are read in file order and assigned x-major: token `k` goes to
//! `x = k / height`, `y = k % height`.

use crate::edge::EdgeBehavior;
use crate::error::SpaceError;
use crate::grid::Grid;
use crate::occupancy::Occupancy;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

/// The only accepted magic line.
const MAGIC: &str = "P2";

/// A parsed `P2` raster.
///
/// # Examples
///
/// ```
/// use tilth_space::Raster;
///
/// let text = "P2\n2 3\n255\n1 2 3\n4 5 6\n";
/// let raster = Raster::parse(text.as_bytes()).unwrap();
/// assert_eq!((raster.width(), raster.height()), (2, 3));
/// assert_eq!(raster.value(0, 2), 3);
/// assert_eq!(raster.value(1, 0), 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    values: Vec<i64>,
}

impl Raster {
    /// Parse a raster from a reader.
    ///
    /// Fails with `Err(SpaceError::UnsupportedFormat)` if the first line is
    /// not exactly `P2`, and `Err(SpaceError::InvalidRaster)` if the size
    /// line is malformed, a value is not an integer, or there are fewer
    /// than `width * height` values. Values beyond that count are ignored.
    pub fn parse<R: BufRead>(mut reader: R) -> Result<Self, SpaceError> {
        let mut line = String::new();
        reader.read_line(&mut line)?;
        let magic = line.trim_end_matches(|c| c == '\n' || c == '\r');
        if magic != MAGIC {
            warn!(found = magic, "raster rejected: unsupported format");
            return Err(SpaceError::UnsupportedFormat {
                found: magic.to_string(),
            });
        }

        line.clear();
        reader.read_line(&mut line)?;
        let (width, height) = parse_size(&line)?;

        // Max-value line.
        line.clear();
        reader.read_line(&mut line)?;

        let mut body = String::new();
        reader.read_to_string(&mut body)?;
        let expected = width as usize * height as usize;
        let values = body
            .split_whitespace()
            .take(expected)
            .map(|token| {
                token.parse::<i64>().map_err(|_| SpaceError::InvalidRaster {
                    detail: format!("value {token:?} is not an integer"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if values.len() < expected {
            return Err(SpaceError::InvalidRaster {
                detail: format!("expected {expected} values, found {}", values.len()),
            });
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Number of columns (x extent).
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows (y extent).
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The value at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the raster.
    pub fn value(&self, x: u32, y: u32) -> i64 {
        assert!(
            x < self.width && y < self.height,
            "({x}, {y}) outside {}x{} raster",
            self.width,
            self.height
        );
        self.values[x as usize * self.height as usize + y as usize]
    }
}

fn parse_size(line: &str) -> Result<(u32, u32), SpaceError> {
    let invalid = || SpaceError::InvalidRaster {
        detail: format!("expected \"<width> <height>\", found {:?}", line.trim_end()),
    };
    let mut fields = line.split_whitespace();
    let width = fields.next().and_then(|t| t.parse().ok()).ok_or_else(invalid)?;
    let height = fields.next().and_then(|t| t.parse().ok()).ok_or_else(invalid)?;
    if fields.next().is_some() {
        return Err(invalid());
    }
    Ok((width, height))
}

impl<O: Occupancy<i64>> Grid<i64, O> {
    /// Build a 2D grid of raster values read from `reader`.
    ///
    /// The grid is `width x height`; each cell receives its raster value as
    /// its single occupant.
    pub fn from_raster<R: BufRead>(reader: R, edge: EdgeBehavior) -> Result<Self, SpaceError> {
        let raster = Raster::parse(reader)?;
        Self::from_raster_data(&raster, edge)
    }

    /// [`from_raster`](Self::from_raster) over a file.
    pub fn from_raster_path(path: impl AsRef<Path>, edge: EdgeBehavior) -> Result<Self, SpaceError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        debug!(path = %path.display(), "loading raster");
        Self::from_raster(BufReader::new(file), edge)
    }

    /// Build a 2D grid from an already parsed raster.
    pub fn from_raster_data(raster: &Raster, edge: EdgeBehavior) -> Result<Self, SpaceError> {
        let mut grid = Self::new_2d(raster.width(), raster.height(), edge)?;
        for x in 0..raster.width() {
            for y in 0..raster.height() {
                let placed = grid.put_agent_at(raster.value(x, y), &[x as i32, y as i32])?;
                debug_assert!(placed, "fresh cell refused a raster value");
            }
        }
        debug!(
            width = raster.width(),
            height = raster.height(),
            cells = grid.occupied_count(),
            "raster loaded"
        );
        Ok(grid)
    }
}
