/// Number of white keys the binding tables describe.
pub const KEY_COUNT: usize = 10;

/// Computer keyboard letter bound to each white key (home row).
pub const KEY_NAMES: [&str; KEY_COUNT] = ["A", "S", "D", "F", "G", "H", "J", "K", "L", ";"];

/// Letter bound to the accidental sitting just before each white key.
/// Empty where the key has no accidental before it.
pub const ACCIDENTAL_NAMES: [&str; KEY_COUNT] = ["", "W", "E", "", "T", "Y", "U", "", "O", "P"];

/// Whether a black key sits on the left edge of white key `index`.
///
/// Counting from C, the pattern repeats every 7 white keys: C and F have no
/// accidental below them.
pub fn has_accidental_before(index: usize) -> bool {
    matches!(index % 7, 1 | 2 | 4 | 5 | 6)
}

pub fn key_binding(index: usize) -> Option<&'static str> {
    KEY_NAMES.get(index).copied()
}

pub fn accidental_binding(index: usize) -> Option<&'static str> {
    if !has_accidental_before(index) {
        return None;
    }
    ACCIDENTAL_NAMES
        .get(index)
        .copied()
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_of_every_seven_keys_have_an_accidental() {
        for start in 0..21 {
            let count = (start..start + 7).filter(|&i| has_accidental_before(i)).count();
            assert_eq!(count, 5, "window starting at {}", start);
        }
    }

    #[test]
    fn accidental_offsets_match_piano_pattern() {
        let offsets: Vec<usize> = (0..7).filter(|&i| has_accidental_before(i)).collect();
        assert_eq!(offsets, vec![1, 2, 4, 5, 6]);
    }

    #[test]
    fn accidental_names_line_up_with_pattern() {
        for i in 0..KEY_COUNT {
            assert_eq!(
                has_accidental_before(i),
                !ACCIDENTAL_NAMES[i].is_empty(),
                "key {}",
                i
            );
        }
    }

    #[test]
    fn bindings_are_bounds_checked() {
        assert_eq!(key_binding(0), Some("A"));
        assert_eq!(key_binding(9), Some(";"));
        assert_eq!(key_binding(10), None);
        assert_eq!(accidental_binding(1), Some("W"));
        assert_eq!(accidental_binding(3), None);
        assert_eq!(accidental_binding(9), Some("P"));
        assert_eq!(accidental_binding(13), None);
    }

    #[test]
    fn bindings_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for name in KEY_NAMES.iter().chain(ACCIDENTAL_NAMES.iter()) {
            if !name.is_empty() {
                assert!(seen.insert(*name), "duplicate binding {}", name);
            }
        }
    }
}
