//! Button cosmetics: the magnetic pull on hover and the glitch label setup.

/// Fraction of the pointer's offset from the centre a button follows.
pub const MAGNET_STRENGTH: f64 = 0.2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Offset a button should move by for a pointer at `(client_x, client_y)`.
pub fn magnetic_offset(rect: Rect, client_x: f64, client_y: f64) -> (f64, f64) {
    let x = client_x - rect.left - rect.width / 2.0;
    let y = client_y - rect.top - rect.height / 2.0;
    (x * MAGNET_STRENGTH, y * MAGNET_STRENGTH)
}

pub fn magnetic_transform(rect: Rect, client_x: f64, client_y: f64) -> String {
    let (dx, dy) = magnetic_offset(rect, client_x, client_y);
    format!("translate({dx}px, {dy}px) translateY(-2px)")
}

/// Which element of a button carries the glitch label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelTarget {
    /// The button's `.glitch-target` child.
    Child,
    Button,
    /// Icon buttons are left alone.
    Skip,
}

pub fn label_target(has_glitch_child: bool, has_icon: bool) -> LabelTarget {
    match (has_glitch_child, has_icon) {
        (true, _) => LabelTarget::Child,
        (false, true) => LabelTarget::Skip,
        (false, false) => LabelTarget::Button,
    }
}
