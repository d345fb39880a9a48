use crate::core::hit::Alignment;

/// Find the longest run of `needle`'s leading terms inside `haystack`.
///
/// A run starting at haystack index `i` has length `k` when
/// `haystack[i..i + k] == needle[..k]`. The longest run wins, and among runs of
/// equal length the earliest start wins. Returns [`Alignment::NONE`] when either
/// side is empty or no term lines up.
///
/// Start positions that cannot beat the current best are skipped, and the
/// scan ends as soon as the whole needle has been found.
#[must_use]
pub fn best_match<T: PartialEq>(haystack: &[T], needle: &[T]) -> Alignment {
    if haystack.is_empty() || needle.is_empty() {
        return Alignment::NONE;
    }

    let mut best = Alignment::NONE;
    for start in 0..haystack.len() {
        if haystack.len() - start <= best.len() {
            break;
        }

        let run = haystack[start..]
            .iter()
            .zip(needle)
            .take_while(|(h, n)| h == n)
            .count();

        if run > best.len() {
            best = Alignment::new(run, start);
            if run == needle.len() {
                break;
            }
        }
    }

    best
}
