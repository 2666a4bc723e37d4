//! Per-agent control input for one tick

use serde::{Deserialize, Serialize};

/// Seven independent intents, in wire order:
/// left, right, forward, backward, shoot, rotate-left, rotate-right
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub left: bool,
    pub right: bool,
    pub forward: bool,
    pub backward: bool,
    pub shoot: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
}

impl Action {
    /// No intent at all
    pub const IDLE: Action = Action {
        left: false,
        right: false,
        forward: false,
        backward: false,
        shoot: false,
        rotate_left: false,
        rotate_right: false,
    };

    /// Flags in wire order
    pub fn to_array(&self) -> [bool; 7] {
        [
            self.left,
            self.right,
            self.forward,
            self.backward,
            self.shoot,
            self.rotate_left,
            self.rotate_right,
        ]
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        *self == Self::IDLE
    }
}

impl From<[bool; 7]> for Action {
    fn from(v: [bool; 7]) -> Self {
        Self {
            left: v[0],
            right: v[1],
            forward: v[2],
            backward: v[3],
            shoot: v[4],
            rotate_left: v[5],
            rotate_right: v[6],
        }
    }
}

/// Any value above zero counts as set
impl From<[u8; 7]> for Action {
    fn from(v: [u8; 7]) -> Self {
        Self::from(v.map(|x| x > 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_wire_order() {
        let a = Action::from([1, 0, 0, 0, 1, 0, 1]);
        assert!(a.left && a.shoot && a.rotate_right);
        assert!(!a.right && !a.forward && !a.backward && !a.rotate_left);
        assert_eq!(a.to_array(), [true, false, false, false, true, false, true]);
    }

    #[test]
    fn test_idle() {
        assert!(Action::from([0u8; 7]).is_idle());
        assert_eq!(Action::default(), Action::IDLE);
        assert!(!Action::from([0, 0, 2, 0, 0, 0, 0]).is_idle());
    }
}
