//! Living hinge (`X`): rows of parallel cuts that let the sheet bend.
//! Use a straight edge for the opposing side.

use super::{BoundaryEdge, EdgeDrawOptions};
use crate::error::{EngineError, EngineResult};
use crate::params::{AbsoluteDefault, Settings, SettingsSchema, SharedSettings};
use crate::sheet::Sheet;

fn check_flex(settings: &Settings) -> EngineResult<()> {
    if settings.number("distance") < 0.01 {
        return Err(settings.invalid("distance", "must be > 0.01mm"));
    }
    if settings.number("width") < 0.1 {
        return Err(settings.invalid("width", "must be > 0.1mm"));
    }
    Ok(())
}

pub static FLEX: SettingsSchema = SettingsSchema {
    name: "Flex",
    // how much the flex part should be shortened
    absolute: &[("stretch", AbsoluteDefault::Number(1.05))],
    relative: &[("distance", 0.5), ("connection", 1.0), ("width", 5.0)],
    check: check_flex,
};

#[derive(Debug, Clone)]
pub struct FlexEdge {
    settings: SharedSettings,
}

impl FlexEdge {
    pub fn new(settings: SharedSettings) -> Self {
        Self { settings }
    }

    pub fn stretch(&self) -> f64 {
        self.settings.borrow().number("stretch")
    }
}

fn cut(sheet: &mut Sheet, x: f64, from: f64, to: f64) {
    let cursor = sheet.cursor_mut();
    cursor.jump_to(x, from);
    cursor.line_to(x, to);
}

impl BoundaryEdge for FlexEdge {
    fn symbol(&self) -> Option<char> {
        Some('X')
    }

    fn description(&self) -> &'static str {
        "Flex cut"
    }

    fn settings(&self) -> Option<SharedSettings> {
        Some(self.settings.clone())
    }

    /// Cuts span `opts.height` above the baseline.
    fn draw(&self, sheet: &mut Sheet, x: f64, opts: &EdgeDrawOptions<'_>) -> EngineResult<()> {
        let h = opts
            .height
            .ok_or_else(|| EngineError::MissingHeight(self.description().to_string()))?;
        let (dist, connection, width) = {
            let s = self.settings.borrow();
            (
                s.number("distance"),
                s.number("connection"),
                s.number("width"),
            )
        };

        let h = h + 2.0 * sheet.burn();
        let lines = (x / dist).floor() as i64;
        let leftover = x - lines as f64 * dist;
        let sections = (((h - connection) / width).floor() as i64).max(1);
        let sheight = (h - connection) / sections as f64 - connection;
        let pitch = sheight + connection;

        sheet.stroke();
        for i in 1..lines {
            let pos = i as f64 * dist + leftover / 2.0;

            if i % 2 == 1 {
                cut(sheet, pos, 0.0, pitch);
                for j in 0..(sections - 1) / 2 {
                    let j = j as f64;
                    cut(
                        sheet,
                        pos,
                        (2.0 * j + 1.0) * sheight + (2.0 * j + 2.0) * connection,
                        (2.0 * j + 3.0) * pitch,
                    );
                }
                if sections % 2 == 0 {
                    cut(sheet, pos, h - pitch, h);
                }
            } else if sections % 2 == 1 {
                cut(sheet, pos, h, h - pitch);
                for j in 0..(sections - 1) / 2 {
                    let j = j as f64;
                    cut(
                        sheet,
                        pos,
                        h - ((2.0 * j + 1.0) * sheight + (2.0 * j + 2.0) * connection),
                        h - (2.0 * j + 3.0) * pitch,
                    );
                }
            } else {
                for j in 0..sections / 2 {
                    let j = j as f64;
                    cut(
                        sheet,
                        pos,
                        h - connection - 2.0 * j * pitch,
                        h - 2.0 * (j + 1.0) * pitch,
                    );
                }
            }
        }
        sheet.stroke();
        sheet.edge(x);
        Ok(())
    }
}
