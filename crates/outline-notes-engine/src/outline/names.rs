//! Local names of the page format elements and attributes this crate touches.

pub const OUTLINE: &str = "Outline";
pub const OE_CHILDREN: &str = "OEChildren";
pub const OE: &str = "OE";
pub const T: &str = "T";
pub const POSITION: &str = "Position";
pub const SIZE: &str = "Size";

pub const SELECTED: &str = "selected";
pub const X: &str = "x";
pub const Y: &str = "y";
pub const WIDTH: &str = "width";
pub const HEIGHT: &str = "height";
