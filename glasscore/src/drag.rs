//! Title-bar dragging for a frameless window
//!
//! The window has no OS decorations, so it moves itself: a press inside the
//! title band records the global pointer position, every motion shifts the
//! window by the distance travelled since the last position, and a release
//! ends the gesture.

use egui::{Pos2, Vec2};

/// An in-progress drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveDrag {
    /// Last global pointer position seen during this drag.
    pub anchor: Pos2,
}

/// Drag tracking for the title band at the top of the window.
#[derive(Debug, Clone)]
pub struct TitleBarDrag {
    title_bar_height: f32,
    active: Option<ActiveDrag>,
}

impl TitleBarDrag {
    pub fn new(title_bar_height: f32) -> Self {
        Self {
            title_bar_height,
            active: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Pointer pressed at `local` (window coordinates), `global` (screen).
    /// Returns `true` if a drag started.
    pub fn press(&mut self, local: Pos2, global: Pos2) -> bool {
        if local.y <= self.title_bar_height {
            self.active = Some(ActiveDrag { anchor: global });
            true
        } else {
            self.active = None;
            false
        }
    }

    /// Pointer moved to `global`. Returns how far the window has to move.
    pub fn motion(&mut self, global: Pos2) -> Option<Vec2> {
        let drag = self.active.as_mut()?;
        let delta = global - drag.anchor;
        drag.anchor = global;
        Some(delta)
    }

    pub fn release(&mut self) {
        self.active = None;
    }
}

/// Where the window is on screen, as far as this process knows.
///
/// While a drag is running the OS may report the old position for a frame
/// or two, so the tracked origin is authoritative until the drag ends.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WindowPlacement {
    origin: Pos2,
}

impl WindowPlacement {
    pub fn new(origin: Pos2) -> Self {
        Self { origin }
    }

    pub fn origin(&self) -> Pos2 {
        self.origin
    }

    /// Take the position reported by the window system.
    pub fn sync(&mut self, reported: Option<Pos2>) {
        if let Some(origin) = reported {
            self.origin = origin;
        }
    }

    /// Convert a window-local pointer position to screen coordinates.
    pub fn to_global(&self, local: Pos2) -> Pos2 {
        self.origin + local.to_vec2()
    }

    /// Move by `delta` and return the new origin.
    pub fn translate(&mut self, delta: Vec2) -> Pos2 {
        self.origin += delta;
        self.origin
    }
}

/// Pointer input for one frame, read from egui before anything is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerFrame {
    pub pressed: bool,
    pub released: bool,
    /// A pointer-move event arrived this frame. Repaints without one (a
    /// cursor blink, say) carry a stale position and must not move anything.
    pub moved: bool,
    /// The pointer is over a title-bar control, which keeps the press.
    pub over_control: bool,
    /// Latest pointer position in window coordinates.
    pub local: Option<Pos2>,
    /// Outer position the window system reports for the window.
    pub reported_origin: Option<Pos2>,
}

/// Drag gesture plus the window position it moves.
#[derive(Debug, Clone)]
pub struct WindowDrag {
    drag: TitleBarDrag,
    placement: WindowPlacement,
}

impl WindowDrag {
    pub fn new(title_bar_height: f32) -> Self {
        Self {
            drag: TitleBarDrag::new(title_bar_height),
            placement: WindowPlacement::default(),
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Advance one frame. Returns the new window origin when the window has
    /// to move.
    pub fn step(&mut self, frame: PointerFrame) -> Option<Pos2> {
        if !self.drag.is_dragging() {
            self.placement.sync(frame.reported_origin);
        }

        let mut target = None;
        if let Some(local) = frame.local {
            let global = self.placement.to_global(local);
            if frame.pressed {
                if !frame.over_control {
                    self.drag.press(local, global);
                }
            } else if frame.moved {
                if let Some(delta) = self.drag.motion(global) {
                    if delta != Vec2::ZERO {
                        target = Some(self.placement.translate(delta));
                    }
                }
            }
        }

        if frame.released {
            self.drag.release();
        }
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    #[test]
    fn test_press_in_title_bar_starts_drag() {
        let mut drag = TitleBarDrag::new(30.0);
        assert!(drag.press(pos2(50.0, 10.0), pos2(150.0, 110.0)));
        assert_eq!(drag.motion(pos2(170.0, 110.0)), Some(vec2(20.0, 0.0)));
    }

    #[test]
    fn test_title_bar_edge_is_inclusive() {
        let mut drag = TitleBarDrag::new(30.0);
        assert!(drag.press(pos2(0.0, 30.0), pos2(0.0, 30.0)));
        assert!(!drag.press(pos2(0.0, 30.5), pos2(0.0, 30.5)));
    }

    #[test]
    fn test_press_below_title_bar_never_drags() {
        let mut drag = TitleBarDrag::new(30.0);
        assert!(!drag.press(pos2(50.0, 100.0), pos2(150.0, 200.0)));
        assert_eq!(drag.motion(pos2(170.0, 200.0)), None);
        assert_eq!(drag.motion(pos2(300.0, 400.0)), None);
    }

    #[test]
    fn test_moves_add_up_to_total_delta() {
        let mut drag = TitleBarDrag::new(30.0);
        drag.press(pos2(5.0, 5.0), pos2(100.0, 100.0));
        let mut total = Vec2::ZERO;
        for p in [pos2(103.0, 99.0), pos2(110.0, 90.0), pos2(95.0, 120.0)] {
            total += drag.motion(p).unwrap();
        }
        assert_eq!(total, vec2(-5.0, 20.0));
    }

    #[test]
    fn test_release_clears_anchor() {
        let mut drag = TitleBarDrag::new(30.0);
        drag.press(pos2(5.0, 5.0), pos2(100.0, 100.0));
        assert!(drag.is_dragging());
        drag.release();
        assert!(!drag.is_dragging());
        assert_eq!(drag.motion(pos2(200.0, 200.0)), None);
    }

    #[test]
    fn test_placement_follows_drag() {
        let mut placement = WindowPlacement::new(pos2(100.0, 100.0));
        let mut drag = TitleBarDrag::new(30.0);

        let local = pos2(50.0, 10.0);
        assert!(drag.press(local, placement.to_global(local)));

        // The pointer moved 20 points right; the window follows, so the
        // pointer stays at the same local position afterwards.
        let delta = drag.motion(placement.to_global(pos2(70.0, 10.0))).unwrap();
        assert_eq!(placement.translate(delta), pos2(120.0, 100.0));
        assert_eq!(drag.motion(placement.to_global(local)), Some(Vec2::ZERO));
    }

    #[test]
    fn test_sync_ignores_missing_report() {
        let mut placement = WindowPlacement::new(pos2(10.0, 20.0));
        placement.sync(None);
        assert_eq!(placement.origin(), pos2(10.0, 20.0));
        placement.sync(Some(pos2(1.0, 2.0)));
        assert_eq!(placement.origin(), pos2(1.0, 2.0));
    }

    fn frame(local: Pos2, origin: Pos2) -> PointerFrame {
        PointerFrame {
            local: Some(local),
            reported_origin: Some(origin),
            ..Default::default()
        }
    }

    #[test]
    fn test_stationary_frames_do_not_move_window() {
        let mut drag = WindowDrag::new(30.0);
        let start = pos2(100.0, 100.0);

        assert_eq!(drag.step(PointerFrame { pressed: true, ..frame(pos2(50.0, 10.0), start) }), None);
        assert!(drag.is_dragging());

        let moved = PointerFrame { moved: true, ..frame(pos2(70.0, 10.0), start) };
        assert_eq!(drag.step(moved), Some(pos2(120.0, 100.0)));

        // Repaints with the old pointer position while the OS still reports
        // the old origin.
        assert_eq!(drag.step(frame(pos2(70.0, 10.0), start)), None);
        assert_eq!(drag.step(frame(pos2(70.0, 10.0), start)), None);

        // The window caught up; the pointer is back at its local grab point.
        let caught_up = PointerFrame { moved: true, ..frame(pos2(50.0, 10.0), pos2(120.0, 100.0)) };
        assert_eq!(drag.step(caught_up), None);

        let next = PointerFrame { moved: true, ..frame(pos2(55.0, 12.0), start) };
        assert_eq!(drag.step(next), Some(pos2(125.0, 102.0)));
    }

    #[test]
    fn test_stale_origin_is_ignored_until_release() {
        let mut drag = WindowDrag::new(30.0);
        drag.step(PointerFrame { pressed: true, ..frame(pos2(10.0, 10.0), pos2(0.0, 0.0)) });
        let moved = PointerFrame { moved: true, ..frame(pos2(40.0, 10.0), pos2(0.0, 0.0)) };
        assert_eq!(drag.step(moved), Some(pos2(30.0, 0.0)));

        drag.step(PointerFrame { released: true, ..frame(pos2(10.0, 10.0), pos2(0.0, 0.0)) });
        assert!(!drag.is_dragging());

        // After the gesture the window system is the source of truth again.
        drag.step(PointerFrame { pressed: true, ..frame(pos2(10.0, 10.0), pos2(30.0, 0.0)) });
        let moved = PointerFrame { moved: true, ..frame(pos2(15.0, 10.0), pos2(30.0, 0.0)) };
        assert_eq!(drag.step(moved), Some(pos2(35.0, 0.0)));
    }

    #[test]
    fn test_press_on_control_does_not_drag() {
        let mut drag = WindowDrag::new(30.0);
        let press = PointerFrame { pressed: true, over_control: true, ..frame(pos2(780.0, 10.0), pos2(0.0, 0.0)) };
        drag.step(press);
        assert!(!drag.is_dragging());
        let moved = PointerFrame { moved: true, ..frame(pos2(700.0, 10.0), pos2(0.0, 0.0)) };
        assert_eq!(drag.step(moved), None);
    }

    #[test]
    fn test_press_below_band_in_frame_step() {
        let mut drag = WindowDrag::new(30.0);
        drag.step(PointerFrame { pressed: true, ..frame(pos2(50.0, 100.0), pos2(0.0, 0.0)) });
        let moved = PointerFrame { moved: true, ..frame(pos2(90.0, 140.0), pos2(0.0, 0.0)) };
        assert_eq!(drag.step(moved), None);
    }
}
