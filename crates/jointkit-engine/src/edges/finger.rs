//! Finger joints
//!
//! Uses finger/space multiples of thickness for automatic finger
//! calculation. The positive edge (`f`) carries the fingers, the negative
//! edge (`F`) the matching notches, and [`FingerHoles`] cuts the same
//! pattern as slots into the middle of a panel.

use super::{BoundaryEdge, EdgeDrawOptions};
use crate::bolts::BoltPolicy;
use crate::cursor::Poly;
use crate::error::EngineResult;
use crate::params::{AbsoluteDefault, Settings, SettingsSchema, SharedSettings};
use crate::sheet::Sheet;
use crate::walls::WallOptions;
use jointkit_core::CutColor;
use std::str::FromStr;
use tracing::trace;

fn check_finger_joint(settings: &Settings) -> EngineResult<()> {
    if (settings.number("space") + settings.number("finger")).abs() < 0.1 {
        return Err(settings.invalid("space", "space + finger must not be close to zero"));
    }
    Ok(())
}

pub static FINGER_JOINT: SettingsSchema = SettingsSchema {
    name: "FingerJoint",
    absolute: &[
        (
            "style",
            AbsoluteDefault::Choice(&["rectangular", "springs", "barbs", "snap"]),
        ),
        ("surroundingspaces", AbsoluteDefault::Number(2.0)),
        ("angle", AbsoluteDefault::Number(90.0)),
    ],
    relative: &[
        ("space", 2.0),
        ("finger", 2.0),
        ("width", 1.0),
        ("edge_width", 1.0),
        ("play", 0.0),
        ("extra_length", 0.0),
        ("bottom_lip", 0.0),
    ],
    check: check_finger_joint,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FingerStyle {
    #[default]
    Rectangular,
    Springs,
    Barbs,
    Snap,
}

impl FromStr for FingerStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rectangular" => Ok(Self::Rectangular),
            "springs" => Ok(Self::Springs),
            "barbs" => Ok(Self::Barbs),
            "snap" => Ok(Self::Snap),
            other => Err(format!("unknown finger style '{}'", other)),
        }
    }
}

/// Finger joint parameters in millimetres, read once per draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FingerParams {
    pub style: FingerStyle,
    /// Space at start and end in multiples of normal spaces
    pub surrounding_spaces: f64,
    /// Angle of the walls meeting
    pub angle: f64,
    pub space: f64,
    pub finger: f64,
    /// Width of finger holes
    pub width: f64,
    /// Material below the holes of a finger hole edge
    pub edge_width: f64,
    /// Extra space to allow fingers to move in/out
    pub play: f64,
    /// Extra material for burn marks
    pub extra_length: f64,
    pub bottom_lip: f64,
    pub thickness: f64,
}

/// Result of fitting fingers into a length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FingerLayout {
    pub fingers: usize,
    /// Length not covered by fingers and gaps, split over both ends.
    pub leftover: f64,
    /// Finger width to draw with.
    pub finger: f64,
    /// A single small finger replaced the regular pattern.
    pub small: bool,
}

impl FingerParams {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            style: settings.text("style").parse().unwrap_or_default(),
            surrounding_spaces: settings.number("surroundingspaces"),
            angle: settings.number("angle"),
            space: settings.number("space"),
            finger: settings.number("finger"),
            width: settings.number("width"),
            edge_width: settings.number("edge_width"),
            play: settings.number("play"),
            extra_length: settings.number("extra_length"),
            bottom_lip: settings.number("bottom_lip"),
            thickness: settings.thickness(),
        }
    }

    /// Finger depth and space recess for walls meeting at `angle` degrees.
    pub fn finger_length(&self, angle: f64) -> (f64, f64) {
        let t = self.thickness;
        // sharp corners
        if angle >= 90.0 || angle <= -90.0 {
            return (t + self.extra_length, 0.0);
        }
        // inner blunt corners
        if angle < 0.0 {
            return ((-angle).to_radians().sin() * t + self.extra_length, 0.0);
        }

        let a = 90.0 - (180.0 - angle) / 2.0;
        let finger_length = t * a.to_radians().tan();
        let b = 90.0 - 2.0 * a;
        let space_recess = -b.to_radians().sin() * finger_length;
        (finger_length + self.extra_length, space_recess)
    }

    /// Calculate number of fingers and leftover space for a given length
    pub fn calc_fingers(&self, length: f64, bolts: Option<&dyn BoltPolicy>) -> (usize, f64) {
        let (space, finger) = (self.space, self.finger);
        let mut fingers =
            ((length - (self.surrounding_spaces - 1.0) * space) / (space + finger)).floor() as i64;

        // shrink surrounding space up to half a thickness each side
        if fingers == 0 && length > finger + self.thickness {
            fingers = 1;
        }
        if finger == 0.0 {
            fingers = 0;
        }
        if fingers <= 0 {
            return (0, length);
        }

        let fingers = bolts.map_or(fingers as usize, |b| b.num_fingers(fingers as usize));
        if fingers == 0 {
            return (0, length);
        }
        (fingers, length - fingers as f64 * (space + finger) + space)
    }

    /// Like [`FingerParams::calc_fingers`], falling back to one small
    /// rectangular finger when no regular one fits.
    pub fn layout(&self, length: f64, bolts: Option<&dyn BoltPolicy>) -> FingerLayout {
        let (fingers, leftover) = self.calc_fingers(length, bolts);
        if fingers == 0
            && self.finger != 0.0
            && leftover > 0.75 * self.thickness
            && leftover > 4.0 * self.play
        {
            return FingerLayout {
                fingers: 1,
                leftover: leftover / 2.0,
                finger: leftover / 2.0,
                small: true,
            };
        }
        FingerLayout {
            fingers,
            leftover,
            finger: self.finger,
            small: false,
        }
    }
}

fn springs(f: f64, h: f64) -> Vec<Poly> {
    use Poly::*;
    vec![
        Line(0.0),
        Turn(-90.0),
        Line(0.8 * h),
        Round(90.0, 0.2 * h),
        Line(0.1 * h),
        Turn(90.0),
        Line(0.9 * h),
        Turn(-180.0),
        Line(0.9 * h),
        Turn(90.0),
        Line(f - 0.6 * h),
        Turn(90.0),
        Line(0.9 * h),
        Turn(-180.0),
        Line(0.9 * h),
        Turn(90.0),
        Line(0.1 * h),
        Round(90.0, 0.2 * h),
        Line(0.8 * h),
        Turn(-90.0),
    ]
}

fn barbs(f: f64, h: f64, t: f64) -> Vec<Poly> {
    use Poly::*;
    let n = ((h - 0.1 * t) / (0.3 * t)).floor().max(0.0) as usize;
    let a = 0.5f64.atan().to_degrees();
    let l = 5f64.sqrt();

    let mut side = vec![Line(h - n as f64 * 0.3 * t)];
    for _ in 0..n {
        side.extend([
            Turn(-45.0),
            Line(0.1 * 2f64.sqrt() * t),
            Turn(45.0 + a),
            Line(l * 0.1 * t),
            Turn(-a),
            Line(0.0),
        ]);
    }

    let mut steps = vec![Line(0.0), Turn(-90.0)];
    steps.extend(side.iter().copied());
    steps.extend([Turn(90.0), Line(f), Turn(90.0)]);
    steps.extend(side.iter().rev().copied());
    steps.push(Turn(-90.0));
    steps
}

fn snap(f: f64, h: f64, t: f64, first_half: bool) -> Vec<Poly> {
    use Poly::*;
    let a12 = 0.5f64.atan().to_degrees();
    let l12 = t / a12.to_radians().cos();
    let d = 4.0 * t;
    let d2 = d + t;
    let a = ((0.5 * t) / (h + d2)).atan().to_degrees();
    let l = (h + d2) / a.to_radians().cos();

    let mut steps = vec![
        Line(0.0),
        Turn(90.0),
        Line(d),
        Turn(-180.0),
        Line(d + h),
        Turn(-90.0),
        Line(0.5 * t),
        Turn(90.0 + a12),
        Line(l12),
        Turn(90.0 - a12),
        Line(0.5 * t),
        Turn(90.0 - a),
        Line(l),
        Turn(a),
        Line(0.0),
        Round(-180.0, 0.1 * t),
        Line(h + d2),
        Turn(90.0),
        Line(f - 1.7 * t),
        Turn(90.0 - a12),
        Line(l12),
        Turn(a12),
        Line(h),
        Turn(-90.0),
        Line(0.0),
    ];
    if first_half {
        steps.reverse();
    }
    steps
}

fn draw_finger(
    sheet: &mut Sheet,
    f: f64,
    h: f64,
    style: FingerStyle,
    positive: bool,
    first_half: bool,
) {
    use Poly::*;
    let t = sheet.thickness();

    if !positive {
        sheet.polyline(&[
            Line(0.0),
            Turn(90.0),
            Line(h),
            Turn(-90.0),
            Line(f),
            Turn(-90.0),
            Line(h),
            Turn(90.0),
        ]);
        return;
    }

    match style {
        FingerStyle::Springs => sheet.polyline(&springs(f, h)),
        FingerStyle::Barbs => sheet.polyline(&barbs(f, h, t)),
        FingerStyle::Snap if f > 1.9 * t => sheet.polyline(&snap(f, h, t, first_half)),
        _ => sheet.polyline(&[
            Line(0.0),
            Turn(-90.0),
            Line(h),
            Turn(90.0),
            Line(f),
            Turn(90.0),
            Line(h),
            Turn(-90.0),
        ]),
    }
}

/// Finger joint edge, `f` for fingers and `F` for the opposing side.
#[derive(Debug, Clone)]
pub struct FingerJointEdge {
    settings: SharedSettings,
    positive: bool,
}

impl FingerJointEdge {
    pub fn new(settings: SharedSettings, positive: bool) -> Self {
        Self { settings, positive }
    }

    pub fn is_positive(&self) -> bool {
        self.positive
    }

    fn params(&self) -> FingerParams {
        FingerParams::from_settings(&self.settings.borrow())
    }

    fn widths(&self) -> (f64, f64) {
        let p = self.params();
        p.finger_length(p.angle)
    }
}

impl BoundaryEdge for FingerJointEdge {
    fn symbol(&self) -> Option<char> {
        Some(if self.positive { 'f' } else { 'F' })
    }

    fn description(&self) -> &'static str {
        if self.positive {
            "Finger Joint"
        } else {
            "Finger Joint (opposing side)"
        }
    }

    fn settings(&self) -> Option<SharedSettings> {
        Some(self.settings.clone())
    }

    fn draw(&self, sheet: &mut Sheet, length: f64, opts: &EdgeDrawOptions<'_>) -> EngineResult<()> {
        let p = self.params();
        let layout = p.layout(length, opts.bolts);
        if layout.fingers == 0 {
            trace!(length, positive = self.positive, "finger joint without fingers");
            sheet.edge(length);
            return Ok(());
        }
        let (bolts, style) = if layout.small {
            (None, FingerStyle::Rectangular)
        } else {
            (opts.bolts, p.style)
        };

        let (mut f, mut s, mut leftover) = (layout.finger, p.space, layout.leftover);
        if !self.positive {
            f += p.play;
            s -= p.play;
            leftover -= p.play;
        }
        trace!(
            length,
            fingers = layout.fingers,
            leftover,
            positive = self.positive,
            "finger joint"
        );

        let (l1, l2) = p.finger_length(p.angle);
        let h = l1 - l2;
        let bed = opts.bed_bolt.unwrap_or_else(|| sheet.bed_bolt());

        sheet.edge(leftover / 2.0);
        for i in 0..layout.fingers {
            if i != 0 {
                let bolt = bolts.is_some_and(|b| b.draw_bolt(i, layout.fingers));
                if !self.positive && bolt {
                    sheet.hole(0.5 * s, 0.5 * p.thickness, 0.5 * bed.d)?;
                }
                if self.positive && bolt {
                    sheet.bed_bolt_hole(s, Some(bed))?;
                } else {
                    sheet.edge(s);
                }
            }
            draw_finger(
                sheet,
                f,
                h,
                style,
                self.positive,
                i < layout.fingers / 2,
            );
        }
        sheet.edge(leftover / 2.0);
        Ok(())
    }

    fn start_width(&self) -> f64 {
        let (depth, recess) = self.widths();
        if self.positive {
            recess
        } else {
            depth
        }
    }

    fn margin(&self) -> f64 {
        if !self.positive {
            return 0.0;
        }
        let (depth, recess) = self.widths();
        let p = self.params();
        if p.style == FingerStyle::Snap {
            depth - recess + p.thickness
        } else {
            depth - recess
        }
    }
}

/// Holes matching a finger joint edge.
#[derive(Debug, Clone)]
pub struct FingerHoles {
    settings: SharedSettings,
}

impl FingerHoles {
    pub fn new(settings: SharedSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> SharedSettings {
        self.settings.clone()
    }

    /// Draw holes for a finger joint edge of `length` running from `(x, y)`
    /// at `angle` degrees.
    pub fn draw(
        &self,
        sheet: &mut Sheet,
        x: f64,
        y: f64,
        length: f64,
        angle: f64,
        opts: &EdgeDrawOptions<'_>,
    ) -> EngineResult<()> {
        let p = FingerParams::from_settings(&self.settings.borrow());
        let layout = p.layout(length, opts.bolts);
        let bolts = if layout.small { None } else { opts.bolts };

        sheet.saved(|sheet| {
            sheet.move_to(x, y, angle);
            let b = sheet.burn();

            if sheet.debug() {
                let (x0, y0) = (b, -p.width / 2.0 + b);
                let (x1, y1) = (length - b, p.width / 2.0 - b);
                sheet.stroke();
                sheet.set_color(CutColor::Annotation);
                let cursor = sheet.cursor_mut();
                cursor.jump_to(x0, y0);
                cursor.line_to(x1, y0);
                cursor.line_to(x1, y1);
                cursor.line_to(x0, y1);
                cursor.line_to(x0, y0);
                sheet.stroke();
                sheet.set_color(CutColor::OuterCut);
            }

            for i in 0..layout.fingers {
                let pos = layout.leftover / 2.0 + i as f64 * (p.space + layout.finger);
                if bolts.is_some_and(|bp| bp.draw_bolt(i, layout.fingers)) {
                    let d = opts.bed_bolt.unwrap_or_else(|| sheet.bed_bolt()).d;
                    sheet.hole(pos - 0.5 * p.space, 0.0, d * 0.5)?;
                }
                sheet.rectangular_hole(
                    pos + 0.5 * layout.finger,
                    0.0,
                    layout.finger + p.play,
                    p.width + p.play,
                    0.0,
                )?;
            }
            Ok(())
        })
    }
}

/// Edge with holes for a parallel finger joint (`h`).
#[derive(Debug, Clone)]
pub struct FingerHoleEdge {
    holes: FingerHoles,
    spacing: f64,
}

impl FingerHoleEdge {
    /// `spacing` is the sheet's part spacing, used for the bottom lip.
    pub fn new(holes: FingerHoles, spacing: f64) -> Self {
        Self { holes, spacing }
    }

    fn params(&self) -> FingerParams {
        FingerParams::from_settings(&self.holes.settings.borrow())
    }
}

impl BoundaryEdge for FingerHoleEdge {
    fn symbol(&self) -> Option<char> {
        Some('h')
    }

    fn description(&self) -> &'static str {
        "Edge (parallel Finger Joint Holes)"
    }

    fn settings(&self) -> Option<SharedSettings> {
        Some(self.holes.settings())
    }

    fn draw(&self, sheet: &mut Sheet, length: f64, opts: &EdgeDrawOptions<'_>) -> EngineResult<()> {
        let p = self.params();
        sheet.saved(|sheet| {
            let y = sheet.burn() + p.edge_width + p.thickness / 2.0;
            self.holes.draw(sheet, 0.0, y, length, 0.0, opts)?;

            if p.bottom_lip > 0.0 {
                let h = p.bottom_lip + p.edge_width;
                let sp = sheet.spacing();
                sheet.move_to(-sp / 2.0, -h - sp, 0.0);
                let width = length - 1.05 * sheet.thickness();
                sheet.rectangular_wall(width, h, "eeee", WallOptions::new())?;
            }
            Ok(())
        })?;
        sheet.edge(length);
        Ok(())
    }

    fn start_width(&self) -> f64 {
        let p = self.params();
        p.edge_width + p.thickness
    }

    fn margin(&self) -> f64 {
        let p = self.params();
        if p.bottom_lip > 0.0 {
            p.bottom_lip + p.edge_width + self.spacing
        } else {
            0.0
        }
    }
}
