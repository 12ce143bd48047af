//! Span extraction: turning a boolean-like signal into merged intervals.
//!
//! A span is an inclusive `[start, stop]` range of index labels over which a
//! signal is continuously "on". Spans are what the time-series helpers draw as
//! highlighted bands, but nothing here depends on rendering.
//!
//! ```rust
//! use plot_helpers::spans::{Span, extract_spans};
//!
//! let spans = extract_spans(&[0, 1, 1, 0, 0, 1, 0]).unwrap();
//! assert_eq!(spans, vec![Span::new(1, 2), Span::new(5, 5)]);
//! ```

use std::cmp::Ordering;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::traits::BoolLike;
use crate::{PlotError, PlotResult};

/// An inclusive interval of index labels during which a signal was "on".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span<I> {
    /// Label of the first "on" position.
    pub start: I,
    /// Label of the last "on" position.
    pub stop: I,
}

/// Ordered, non-overlapping list of spans.
pub type SpanList<I> = Vec<Span<I>>;

impl<I> Span<I> {
    /// Create a new span.
    pub const fn new(start: I, stop: I) -> Self {
        Self { start, stop }
    }

    /// Returns the span as a `(start, stop)` tuple.
    pub fn into_tuple(self) -> (I, I) {
        (self.start, self.stop)
    }
}

impl<I: PartialOrd> Span<I> {
    /// Whether `label` falls inside this span (both ends inclusive).
    pub fn contains(&self, label: &I) -> bool {
        &self.start <= label && label <= &self.stop
    }
}

impl<I> From<(I, I)> for Span<I> {
    fn from((start, stop): (I, I)) -> Self {
        Self { start, stop }
    }
}

impl<I: Display> Display for Span<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.stop)
    }
}

/// Extract merged spans from `signal` using positional indices `0..signal.len()`.
///
/// # Errors
/// Returns [`PlotError::EmptyInput`] if `signal` is empty.
pub fn extract_spans<B: BoolLike>(signal: &[B]) -> PlotResult<SpanList<usize>> {
    if signal.is_empty() {
        return Err(PlotError::empty("extract_spans"));
    }
    let positions: Vec<usize> = (0..signal.len()).collect();
    extract_spans_with_index(signal, &positions)
}

/// Extract merged spans from `signal`, labelling each position with `index`.
///
/// `index` is typically a time axis. Its values are returned verbatim as span
/// boundaries, so every span satisfies `start <= stop`.
///
/// # Errors
/// - [`PlotError::EmptyInput`] if `signal` is empty.
/// - [`PlotError::LengthMismatch`] if `index.len() != signal.len()`.
/// - [`PlotError::InvalidParameter`] if `index` is not non-decreasing.
pub fn extract_spans_with_index<B, I>(signal: &[B], index: &[I]) -> PlotResult<SpanList<I>>
where
    B: BoolLike,
    I: Copy + PartialOrd,
{
    if signal.is_empty() {
        return Err(PlotError::empty("extract_spans"));
    }
    if index.len() != signal.len() {
        return Err(PlotError::length_mismatch(
            "extract_spans",
            signal.len(),
            index.len(),
        ));
    }
    if index.windows(2).any(|w| w[1] < w[0]) {
        return Err(PlotError::invalid_value("index", "must be non-decreasing"));
    }

    let flags: Vec<i8> = signal.iter().map(BoolLike::as_flag).collect();

    // Position 0 is compared against an implicit "off" sample.
    let mut starts = Vec::new();
    let mut stops = Vec::new();
    let mut previous = 0i8;
    for (pos, &flag) in flags.iter().enumerate() {
        match flag - previous {
            d if d > 0 => starts.push(index[pos]),
            d if d < 0 => stops.push(index[pos - 1]),
            _ => {}
        }
        previous = flag;
    }

    if stops.len() + 1 == starts.len() {
        stops.push(index[index.len() - 1]);
    }

    let raw = starts.into_iter().zip(stops).map(Span::from);
    let spans = join_spans(raw);

    tracing::trace!(
        signal_len = signal.len(),
        span_count = spans.len(),
        "extracted spans"
    );
    Ok(spans)
}

/// Merge spans that overlap or touch at the same label.
///
/// A span is folded into its predecessor when `span.start <= previous.stop`;
/// the merged stop is the larger of the two stops. Spans that are merely
/// adjacent (`start == previous.stop + 1`) stay separate.
///
/// Input is stably sorted by `start` first, so already-ordered input keeps its order.
pub fn join_spans<I, S>(spans: S) -> SpanList<I>
where
    I: Copy + PartialOrd,
    S: IntoIterator<Item = Span<I>>,
{
    let mut spans: Vec<Span<I>> = spans.into_iter().collect();
    if spans.len() <= 1 {
        return spans;
    }

    spans.sort_by(|a, b| a.start.partial_cmp(&b.start).unwrap_or(Ordering::Equal));

    let mut out = Vec::with_capacity(spans.len());
    let mut current = spans[0];

    for span in spans.into_iter().skip(1) {
        if span.start <= current.stop {
            if span.stop > current.stop {
                current.stop = span.stop;
            }
        } else {
            out.push(current);
            current = span;
        }
    }

    out.push(current);
    out
}

/// Rebuild a boolean signal of length `len` that is `true` exactly inside `spans`.
///
/// Spans extending past `len` are clipped.
pub fn spans_to_mask(spans: &[Span<usize>], len: usize) -> Vec<bool> {
    let mut mask = vec![false; len];
    for span in spans {
        if span.start >= len {
            continue;
        }
        let stop = span.stop.min(len - 1);
        for v in mask.iter_mut().take(stop + 1).skip(span.start) {
            *v = true;
        }
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(pairs: &[(usize, usize)]) -> SpanList<usize> {
        pairs.iter().copied().map(Span::from).collect()
    }

    #[test]
    fn all_false_has_no_spans() {
        assert!(extract_spans(&[false; 6]).unwrap().is_empty());
        assert!(extract_spans(&[0.0, f64::NAN, 0.0]).unwrap().is_empty());
    }

    #[test]
    fn all_true_is_one_span() {
        let result = extract_spans(&[true; 7]).unwrap();
        assert_eq!(result, spans(&[(0, 6)]));

        let single = extract_spans(&[1u8]).unwrap();
        assert_eq!(single, spans(&[(0, 0)]));
    }

    #[test]
    fn interior_runs() {
        let result = extract_spans(&[0, 1, 1, 0, 0, 1, 0]).unwrap();
        assert_eq!(result, spans(&[(1, 2), (5, 5)]));
    }

    #[test]
    fn runs_touching_both_ends() {
        let result = extract_spans(&[1, 1, 0, 1, 1]).unwrap();
        assert_eq!(result, spans(&[(0, 1), (3, 4)]));
    }

    #[test]
    fn nan_and_none_break_runs() {
        let result = extract_spans(&[1.0, f64::NAN, 2.0, 3.0]).unwrap();
        assert_eq!(result, spans(&[(0, 0), (2, 3)]));

        let result = extract_spans(&[Some(true), None, Some(true)]).unwrap();
        assert_eq!(result, spans(&[(0, 0), (2, 2)]));
    }

    #[test]
    fn index_labels_are_used() {
        let index = [10.0, 10.5, 11.0, 11.5, 12.0];
        let result = extract_spans_with_index(&[0, 1, 1, 0, 1], &index).unwrap();
        assert_eq!(result, vec![Span::new(10.5, 11.0), Span::new(12.0, 12.0)]);
    }

    #[test]
    fn mismatched_index_is_rejected() {
        let err = extract_spans_with_index(&[true, false, true], &[0u32, 1]).unwrap_err();
        assert!(matches!(
            err,
            PlotError::LengthMismatch {
                expected: 3,
                actual: 2,
                ..
            }
        ));
    }

    #[test]
    fn descending_index_is_rejected() {
        let err = extract_spans_with_index(&[1, 1, 0, 1, 1], &[4, 3, 2, 1, 0]).unwrap_err();
        assert!(matches!(err, PlotError::InvalidParameter { ref parameter, .. } if parameter == "index"));

        // Repeated labels are still ordered.
        let result = extract_spans_with_index(&[1, 1, 0, 1], &[0, 0, 1, 2]).unwrap();
        assert_eq!(result, vec![Span::new(0, 0), Span::new(2, 2)]);
    }

    #[test]
    fn empty_signal_is_rejected() {
        let empty: [bool; 0] = [];
        assert!(matches!(
            extract_spans(&empty),
            Err(PlotError::EmptyInput { .. })
        ));
        assert!(matches!(
            extract_spans_with_index::<bool, usize>(&empty, &[]),
            Err(PlotError::EmptyInput { .. })
        ));
    }

    #[test]
    fn reextracting_from_mask_is_stable() {
        let signals: [&[u8]; 4] = [
            &[0, 1, 1, 0, 0, 1, 0],
            &[1, 1, 0, 1, 1],
            &[1, 0, 1, 0, 1, 0, 1],
            &[0, 0, 0, 1, 1, 1, 1, 1, 0],
        ];
        for signal in signals {
            let first = extract_spans(signal).unwrap();
            let mask = spans_to_mask(&first, signal.len());
            let second = extract_spans(&mask).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn adjacent_spans_are_not_merged() {
        let joined = join_spans(spans(&[(0, 2), (3, 5)]));
        assert_eq!(joined, spans(&[(0, 2), (3, 5)]));
    }

    #[test]
    fn spans_sharing_a_label_are_merged() {
        let joined = join_spans(spans(&[(0, 3), (3, 5)]));
        assert_eq!(joined, spans(&[(0, 5)]));
    }

    #[test]
    fn contained_span_keeps_outer_stop() {
        let joined = join_spans(spans(&[(0, 9), (2, 4), (12, 13)]));
        assert_eq!(joined, spans(&[(0, 9), (12, 13)]));
    }

    #[test]
    fn join_sorts_by_start() {
        let joined = join_spans(spans(&[(6, 8), (0, 2), (2, 3)]));
        assert_eq!(joined, spans(&[(0, 3), (6, 8)]));
        assert!(join_spans(Vec::<Span<usize>>::new()).is_empty());
    }

    #[test]
    fn merged_spans_are_strictly_separated() {
        let signal: Vec<bool> = (0..64).map(|i| (i * 7) % 5 < 2).collect();
        let result = extract_spans(&signal).unwrap();
        for w in result.windows(2) {
            assert!(w[0].stop < w[1].start);
        }
    }

    #[test]
    fn mask_clips_out_of_range_spans() {
        let mask = spans_to_mask(&spans(&[(1, 2), (4, 10), (20, 21)]), 6);
        assert_eq!(mask, vec![false, true, true, false, true, true]);
    }

    #[test]
    fn span_display_and_contains() {
        let span = Span::new(3, 7);
        assert_eq!(span.to_string(), "[3, 7]");
        assert!(span.contains(&3));
        assert!(span.contains(&7));
        assert!(!span.contains(&8));
        assert_eq!(span.into_tuple(), (3, 7));
    }
}
