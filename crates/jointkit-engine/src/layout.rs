//! Part placement
//!
//! Parts are laid out with a small move language: `up`, `down`, `left`
//! and `right` shift the cursor by the part's size plus spacing, `only`
//! moves without drawing. `down` and `left` move before the part is drawn,
//! `up` and `right` after it.

use crate::error::{EngineError, EngineResult};
use crate::sheet::Sheet;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveToken {
    Up,
    Down,
    Left,
    Right,
    Only,
}

impl MoveToken {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::Only => "only",
        }
    }
}

impl FromStr for MoveToken {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "only" => Ok(Self::Only),
            other => Err(EngineError::UnknownMove(other.to_string())),
        }
    }
}

/// A parsed move string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveSpec {
    tokens: Vec<MoveToken>,
}

impl MoveSpec {
    pub fn new(tokens: &[MoveToken]) -> Self {
        Self {
            tokens: tokens.to_vec(),
        }
    }

    pub fn tokens(&self) -> &[MoveToken] {
        &self.tokens
    }

    pub fn contains(&self, token: MoveToken) -> bool {
        self.tokens.contains(&token)
    }

    pub fn is_only(&self) -> bool {
        self.contains(MoveToken::Only)
    }
}

impl FromStr for MoveSpec {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = s
            .split_whitespace()
            .map(str::parse)
            .collect::<EngineResult<Vec<_>>>()?;
        Ok(Self { tokens })
    }
}

impl fmt::Display for MoveSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words: Vec<_> = self.tokens.iter().map(MoveToken::as_str).collect();
        write!(f, "{}", words.join(" "))
    }
}

impl Sheet {
    /// Move around a part of `width` by `height`.
    ///
    /// Call once with `before` set before drawing and once after. The
    /// before pass saves the cursor and steps in by half the spacing; the
    /// after pass strokes and restores it. Returns whether drawing should
    /// be skipped (`only` in the before pass).
    pub fn place(
        &mut self,
        width: f64,
        height: f64,
        moves: &MoveSpec,
        before: bool,
    ) -> EngineResult<bool> {
        let dont_draw = before && moves.is_only();
        let x = width + self.spacing();
        let y = height + self.spacing();

        if !before {
            self.stroke();
            self.restore()?;
        }

        for token in moves.tokens() {
            let (dx, dy, move_before) = match token {
                MoveToken::Up => (0.0, y, false),
                MoveToken::Down => (0.0, -y, true),
                MoveToken::Left => (-x, 0.0, true),
                MoveToken::Right => (x, 0.0, false),
                MoveToken::Only => continue,
            };
            if move_before == before || dont_draw {
                self.move_to(dx, dy, 0.0);
            }
        }

        if before && !dont_draw {
            self.save();
            let half = self.spacing() / 2.0;
            self.move_to(half, half, 0.0);
        }
        Ok(dont_draw)
    }

    /// Lay out `n` copies of a part, `width` per row.
    ///
    /// `part` draws one copy with the move string it is given. A `width` of
    /// zero lays the parts out one per row.
    pub fn parts_matrix<F>(&mut self, n: usize, width: usize, moves: &str, mut part: F) -> EngineResult<()>
    where
        F: FnMut(&mut Sheet, &str) -> EngineResult<()>,
    {
        if n == 0 {
            return Ok(());
        }
        let width = width.max(1);
        let rows = n.div_ceil(width);
        let moves: MoveSpec = moves.parse()?;
        debug!(n, width, rows, %moves, "parts matrix");

        // move down / left before
        for token in moves.tokens() {
            match token {
                MoveToken::Left => {
                    for _ in 0..width {
                        part(self, "left only")?;
                    }
                }
                MoveToken::Down => {
                    for _ in 0..rows {
                        part(self, "down only")?;
                    }
                }
                _ => {}
            }
        }

        for i in 0..rows {
            self.save();
            if !moves.is_only() {
                for _ in (0..width).take_while(|j| width * i + j < n) {
                    part(self, "right")?;
                }
            }
            self.restore()?;
            part(self, "up only")?;
        }

        // move back down
        if !moves.contains(MoveToken::Up) {
            for _ in 0..rows {
                part(self, "down only")?;
            }
        }

        if moves.contains(MoveToken::Right) {
            for _ in 0..width {
                part(self, "right only")?;
            }
        }
        Ok(())
    }
}
