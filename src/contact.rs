use bitflags::bitflags;

bitflags! {
    /// Lifecycle flags of a single contact sample.
    ///
    /// The bit values are the ones Windows uses for `POINTER_FLAGS`, so the
    /// platform layer can pass them through untouched.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PhaseFlags: u32 {
        const IN_RANGE = 0x0000_0002;
        const IN_CONTACT = 0x0000_0004;
        const DOWN = 0x0001_0000;
        const UPDATE = 0x0002_0000;
        const UP = 0x0004_0000;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Touch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchFeedback {
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContactRect {
    pub top: i32,
    pub bottom: i32,
    pub left: i32,
    pub right: i32,
}

/// Half the edge length of the square contact area.
const CONTACT_RADIUS: i32 = 2;

/// Orientation reported with every contact, in degrees.
pub const CONTACT_ORIENTATION: u32 = 90;

/// One touch point at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchContact {
    pub kind: ContactKind,
    pub id: u32,
    pub x: i32,
    pub y: i32,
    pub flags: PhaseFlags,
    pub area: ContactRect,
    pub orientation: u32,
    pub feedback: TouchFeedback,
}

impl TouchContact {
    pub fn new(flags: PhaseFlags, x: i32, y: i32, id: u32) -> Self {
        Self {
            kind: ContactKind::Touch,
            id,
            x,
            y,
            flags,
            area: ContactRect {
                top: y - CONTACT_RADIUS,
                bottom: y + CONTACT_RADIUS,
                left: x - CONTACT_RADIUS,
                right: x + CONTACT_RADIUS,
            },
            orientation: CONTACT_ORIENTATION,
            feedback: TouchFeedback::None,
        }
    }

    pub fn is_touching(&self) -> bool {
        self.flags
            .contains(PhaseFlags::IN_RANGE | PhaseFlags::IN_CONTACT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_area_is_centered_square() {
        let contact = TouchContact::new(PhaseFlags::DOWN, 300, 300, 0);
        assert_eq!(
            contact.area,
            ContactRect {
                top: 298,
                bottom: 302,
                left: 298,
                right: 302,
            }
        );

        let contact = TouchContact::new(PhaseFlags::UP, -1, 7, 3);
        assert_eq!(contact.area.left, -3);
        assert_eq!(contact.area.right, 1);
        assert_eq!(contact.area.top, 5);
        assert_eq!(contact.area.bottom, 9);
        assert_eq!(contact.area.right - contact.area.left, 4);
        assert_eq!(contact.area.bottom - contact.area.top, 4);
    }

    #[test]
    fn fixed_fields() {
        let contact = TouchContact::new(PhaseFlags::UPDATE, 10, 20, 4);
        assert_eq!(contact.kind, ContactKind::Touch);
        assert_eq!(contact.feedback, TouchFeedback::None);
        assert_eq!(contact.orientation, 90);
        assert_eq!(contact.id, 4);
        assert_eq!((contact.x, contact.y), (10, 20));
    }

    #[test]
    fn flag_bits_match_pointer_flags() {
        assert_eq!(PhaseFlags::IN_RANGE.bits(), 0x2);
        assert_eq!(PhaseFlags::IN_CONTACT.bits(), 0x4);
        assert_eq!(PhaseFlags::DOWN.bits(), 0x10000);
        assert_eq!(PhaseFlags::UPDATE.bits(), 0x20000);
        assert_eq!(PhaseFlags::UP.bits(), 0x40000);
    }

    #[test]
    fn touching_requires_range_and_contact() {
        let flags = PhaseFlags::DOWN | PhaseFlags::IN_RANGE | PhaseFlags::IN_CONTACT;
        assert!(TouchContact::new(flags, 0, 0, 0).is_touching());
        assert!(!TouchContact::new(PhaseFlags::DOWN | PhaseFlags::IN_RANGE, 0, 0, 0).is_touching());
        assert!(!TouchContact::new(PhaseFlags::UP, 0, 0, 0).is_touching());
    }
}
