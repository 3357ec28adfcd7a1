//! Lightbox navigation model
//!
//! Index model for the modal photo viewer: wraps around at both ends and
//! closes on an explicit dismiss. Left/right/escape are the only mapped
//! keys. The embedded UI mirrors this logic client-side; the model lives
//! here so the wraparound contract stays unit-tested.

/// Keyboard input recognized by the lightbox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxKey {
    ArrowLeft,
    ArrowRight,
    Escape,
}

impl LightboxKey {
    /// Map a DOM key name; unmapped keys yield None
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" => Some(LightboxKey::ArrowLeft),
            "ArrowRight" => Some(LightboxKey::ArrowRight),
            "Escape" => Some(LightboxKey::Escape),
            _ => None,
        }
    }
}

/// Open lightbox over a photo list of fixed length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lightbox {
    index: usize,
    len: usize,
}

impl Lightbox {
    /// Open at the given index; None for an empty list or out-of-range
    /// index
    pub fn open(len: usize, index: usize) -> Option<Self> {
        if len == 0 || index >= len {
            return None;
        }
        Some(Self { index, len })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Advance to the next photo, wrapping last -> 0
    pub fn next(&mut self) {
        self.index = if self.index == self.len - 1 { 0 } else { self.index + 1 };
    }

    /// Step to the previous photo, wrapping 0 -> last
    pub fn prev(&mut self) {
        self.index = if self.index == 0 { self.len - 1 } else { self.index - 1 };
    }

    /// Apply a key press; returns false when the lightbox closes
    pub fn handle_key(&mut self, key: LightboxKey) -> bool {
        match key {
            LightboxKey::ArrowRight => {
                self.next();
                true
            }
            LightboxKey::ArrowLeft => {
                self.prev();
                true
            }
            LightboxKey::Escape => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_wraps_from_last_to_first() {
        let mut lb = Lightbox::open(4, 3).unwrap();
        lb.next();
        assert_eq!(lb.index(), 0);
    }

    #[test]
    fn test_prev_wraps_from_first_to_last() {
        let mut lb = Lightbox::open(4, 0).unwrap();
        lb.prev();
        assert_eq!(lb.index(), 3);
    }

    #[test]
    fn test_single_photo_always_stays_at_zero() {
        let mut lb = Lightbox::open(1, 0).unwrap();
        lb.next();
        assert_eq!(lb.index(), 0);
        lb.prev();
        assert_eq!(lb.index(), 0);
    }

    #[test]
    fn test_escape_closes() {
        let mut lb = Lightbox::open(3, 1).unwrap();
        assert!(lb.handle_key(LightboxKey::ArrowRight));
        assert_eq!(lb.index(), 2);
        assert!(!lb.handle_key(LightboxKey::Escape));
    }

    #[test]
    fn test_open_rejects_empty_or_out_of_range() {
        assert!(Lightbox::open(0, 0).is_none());
        assert!(Lightbox::open(3, 3).is_none());
    }

    #[test]
    fn test_key_mapping_ignores_unmapped_keys() {
        assert_eq!(LightboxKey::from_key_name("ArrowRight"), Some(LightboxKey::ArrowRight));
        assert_eq!(LightboxKey::from_key_name("Enter"), None);
    }
}
