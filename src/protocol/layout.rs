//! # ESC/POS Layout Commands
//!
//! Alignment and print-area commands emitted ahead of a raster image.
//!
//! ## Print Area
//!
//! ```text
//! ├── left ──┼──────── area width ────────┼── right ──┤
//! │  margin  │   image aligned in here     │  margin   │
//! └──────────┴─────── print_width ─────────┴───────────┘
//! ```
//!
//! ## Upside-Down Printing
//!
//! A mechanism mounted upside-down prints the page rotated 180°. Everything
//! the printer treats as "left" ends up on the reader's right, so the layout
//! prefix is emitted mirrored: margins swap sides and left/right alignment
//! swap. Center alignment is unaffected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::commands::{ESC, GS, u16_le};

/// Horizontal alignment of the image within the print area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
}

impl Alignment {
    /// The alignment as seen through a 180° rotation.
    ///
    /// ```
    /// use escraster::protocol::layout::Alignment;
    ///
    /// assert_eq!(Alignment::Left.mirrored(), Alignment::Right);
    /// assert_eq!(Alignment::Center.mirrored(), Alignment::Center);
    /// ```
    pub fn mirrored(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Center => Self::Center,
            Self::Right => Self::Left,
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        };
        f.write_str(name)
    }
}

impl FromStr for Alignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" | "0" => Ok(Self::Left),
            "center" | "centre" | "1" => Ok(Self::Center),
            "right" | "2" => Ok(Self::Right),
            other => Err(format!(
                "Unknown alignment '{}'. Use 'left', 'center' or 'right'",
                other
            )),
        }
    }
}

/// # Select Justification (ESC a n)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC a n |
/// | Hex     | 1B 61 n |
///
/// - `n = 0`: Left (default)
/// - `n = 1`: Center
/// - `n = 2`: Right
///
/// ```
/// use escraster::protocol::layout::{align, Alignment};
///
/// assert_eq!(align(Alignment::Center), vec![0x1B, 0x61, 0x01]);
/// ```
pub fn align(alignment: Alignment) -> Vec<u8> {
    vec![ESC, b'a', alignment as u8]
}

/// # Set Left Margin (GS L nL nH)
///
/// Left margin in dots, measured from the physical left edge of the
/// printable area.
pub fn left_margin(dots: u16) -> Vec<u8> {
    let [nl, nh] = u16_le(dots);
    vec![GS, b'L', nl, nh]
}

/// # Set Print Area Width (GS W nL nH)
///
/// Width in dots of the area that starts at the left margin.
pub fn print_area_width(dots: u16) -> Vec<u8> {
    let [nl, nh] = u16_le(dots);
    vec![GS, b'W', nl, nh]
}

/// Horizontal placement of an image on the paper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintArea {
    /// Physical print width in dots
    pub print_width: u16,
    /// Left margin in dots (reader's left)
    pub left: u16,
    /// Right margin in dots (reader's right)
    pub right: u16,
    pub alignment: Alignment,
}

impl PrintArea {
    /// Width left between the margins, or `None` when the margins leave no
    /// room.
    pub fn area_width(&self) -> Option<u16> {
        self.print_width
            .checked_sub(self.left)?
            .checked_sub(self.right)
            .filter(|&w| w > 0)
    }

    /// The same area as the printer sees it when mounted upside-down.
    pub fn rotated(&self) -> Self {
        Self {
            print_width: self.print_width,
            left: self.right,
            right: self.left,
            alignment: self.alignment.mirrored(),
        }
    }

    /// Emit `GS L`, `GS W` and `ESC a` for this area.
    ///
    /// ```
    /// use escraster::protocol::layout::{Alignment, PrintArea};
    ///
    /// let area = PrintArea { print_width: 576, left: 16, right: 0, alignment: Alignment::Center };
    /// assert_eq!(
    ///     area.commands(false),
    ///     vec![0x1D, b'L', 16, 0, 0x1D, b'W', 0x30, 0x02, 0x1B, b'a', 1],
    /// );
    /// ```
    pub fn commands(&self, upside_down: bool) -> Vec<u8> {
        let area = if upside_down { self.rotated() } else { *self };
        let width = area.area_width().unwrap_or(0);

        let mut cmd = Vec::with_capacity(11);
        cmd.extend(left_margin(area.left));
        cmd.extend(print_area_width(width));
        cmd.extend(align(area.alignment));
        cmd
    }
}
