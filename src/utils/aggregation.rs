/// Average consecutive points down to roughly `target_points` to keep long series readable
/// and cheap to draw.
pub fn aggregate_points(data: &[(f64, f64)], target_points: usize) -> Vec<(f64, f64)> {
    if target_points == 0 || data.len() <= target_points {
        return data.to_vec();
    }

    let window_size = (data.len() as f64 / target_points as f64).ceil() as usize;
    let mut aggregated = Vec::with_capacity(target_points);

    for chunk in data.chunks(window_size) {
        let x = chunk[0].0; // Keep the first position in the chunk
        let finite: Vec<f64> = chunk.iter().map(|(_, y)| *y).filter(|y| y.is_finite()).collect();
        let y = if finite.is_empty() {
            f64::NAN
        } else {
            finite.iter().sum::<f64>() / finite.len() as f64
        };
        aggregated.push((x, y));
    }

    aggregated
}

/// Equal-width histogram bins over `[min, max]`; returns the bin edges and per-column counts.
pub fn histogram(columns: &[&[f64]], bins: usize) -> (Vec<f64>, Vec<Vec<usize>>) {
    let all: Vec<f64> = columns
        .iter()
        .flat_map(|c| c.iter().copied())
        .filter(|v| v.is_finite())
        .collect();
    let (lo, hi) = crate::types::finite_min_max(&all).unwrap_or((0.0, 1.0));
    let (lo, hi) = if hi > lo { (lo, hi) } else { (lo - 0.5, hi + 0.5) };
    let width = (hi - lo) / bins as f64;
    let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();

    let counts = columns
        .iter()
        .map(|column| {
            let mut counts = vec![0usize; bins];
            for v in column.iter().filter(|v| v.is_finite()) {
                // The last bin is closed on the right.
                let idx = (((v - lo) / width) as usize).min(bins - 1);
                counts[idx] += 1;
            }
            counts
        })
        .collect();

    (edges, counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_aggregation_needed() {
        let data = vec![(0.0, 10.0), (1.0, 20.0)];
        let result = aggregate_points(&data, 5);
        assert_eq!(result, data);
    }

    #[test]
    fn test_basic_aggregation() {
        let data = vec![(0.0, 10.0), (1.0, 20.0), (2.0, 30.0), (3.0, 40.0)];
        let result = aggregate_points(&data, 2);
        assert_eq!(result, vec![(0.0, 15.0), (2.0, 35.0)]);
    }

    #[test]
    fn test_empty_data() {
        let data: Vec<(f64, f64)> = vec![];
        assert!(aggregate_points(&data, 5).is_empty());
    }

    #[test]
    fn test_uneven_chunks() {
        let data = vec![(0.0, 10.0), (1.0, 20.0), (2.0, 30.0), (3.0, 40.0), (4.0, 50.0)];
        // 5 points and a target of 2 give a window of 3: chunks [0,1,2] and [3,4]
        let result = aggregate_points(&data, 2);
        assert_eq!(result, vec![(0.0, 20.0), (3.0, 45.0)]);
    }

    #[test]
    fn test_nan_values_are_skipped() {
        let data = vec![(0.0, f64::NAN), (1.0, 4.0), (2.0, 8.0), (3.0, 2.0)];
        let result = aggregate_points(&data, 2);
        assert_eq!(result[0], (0.0, 4.0));
    }

    #[test]
    fn test_histogram_shared_edges() {
        let a = [0.0, 1.0, 2.0, 3.0, 4.0];
        let b = [4.0, 4.0];
        let (edges, counts) = histogram(&[&a, &b], 4);
        assert_eq!(edges, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(counts[0], vec![1, 1, 1, 2]);
        assert_eq!(counts[1], vec![0, 0, 0, 2]);
    }

    #[test]
    fn test_histogram_constant_column() {
        let (edges, counts) = histogram(&[&[2.0, 2.0]], 2);
        assert_eq!(edges, vec![1.5, 2.0, 2.5]);
        assert_eq!(counts[0], vec![0, 2]);
    }
}
