//! Scale computation. Pure functions of the data: no drawing happens here.

/// Ordinal scale mapping each distinct label to an evenly spaced position.
///
/// With inner padding 1 and outer padding 0 it is a point scale (bandwidth
/// 0); otherwise a band scale whose bands are `bandwidth` wide.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    categories: Vec<String>,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    pub fn new<'a, I>(labels: I, range: (f64, f64), padding_inner: f64, padding_outer: f64) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut categories: Vec<String> = Vec::new();
        for label in labels {
            if !categories.iter().any(|c| c == label) {
                categories.push(label.to_string());
            }
        }

        let n = categories.len() as f64;
        let (r0, r1) = range;
        let step = (r1 - r0) / f64::max(1.0, n - padding_inner + padding_outer * 2.0);
        // Centered alignment
        let start = r0 + (r1 - r0 - step * (n - padding_inner)) * 0.5;
        let bandwidth = step * (1.0 - padding_inner);

        Self {
            categories,
            start,
            step,
            bandwidth,
        }
    }

    /// Band scale with the same inner and outer padding
    pub fn band<'a, I>(labels: I, range: (f64, f64), padding: f64) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self::new(labels, range, padding, padding)
    }

    /// Point scale: positions only, no band width
    pub fn point<'a, I>(labels: I, range: (f64, f64)) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self::new(labels, range, 1.0, 0.0)
    }

    /// Start of the band for `label` (the point itself for point scales)
    pub fn position(&self, label: &str) -> Option<f64> {
        self.categories
            .iter()
            .position(|c| c == label)
            .map(|idx| self.start + self.step * idx as f64)
    }

    /// Middle of the band for `label`; where axis ticks go
    pub fn center(&self, label: &str) -> Option<f64> {
        self.position(label).map(|p| p + self.bandwidth / 2.0)
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }
}

/// Continuous linear scale
#[derive(Debug, Clone, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Domain from zero to the largest value; NaN values are ignored and an
    /// all-NaN input gives the degenerate domain [0, 0]
    pub fn zero_to_max<I>(values: I, range: (f64, f64)) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let max = values
            .into_iter()
            .filter(|v| !v.is_nan())
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))
            .unwrap_or(0.0);
        Self::new((0.0, max), range)
    }

    /// Map a domain value into the range. A zero-width domain maps
    /// everything to the middle of the range.
    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        let t = if span.is_nan() {
            f64::NAN
        } else if span == 0.0 {
            0.5
        } else {
            (value - d0) / span
        };
        r0 + t * (r1 - r0)
    }

    /// Roughly `count` evenly spaced "nice" tick values inside the domain
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count)
    }

    /// Decimal places needed to label ticks produced by `ticks(count)`
    pub fn tick_precision(&self, count: usize) -> usize {
        let (start, stop) = ordered(self.domain.0, self.domain.1);
        match tick_spec(start, stop, count as f64) {
            Some((_, _, inc)) if inc < 0.0 => (-inc).log10().ceil().max(0.0) as usize,
            _ => 0,
        }
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if b < a {
        (b, a)
    } else {
        (a, b)
    }
}

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = 1.4142135623730951; // sqrt(2)

/// Integer tick bounds and increment. A negative increment means the ticks
/// are `i / -inc` (used for fractional steps to avoid float drift).
fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(f64, f64, f64)> {
    let step = (stop - start) / count.max(0.0);
    if !step.is_finite() || step <= 0.0 {
        return None;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let inv = 10f64.powf(-power) / factor;
        i1 = (start * inv).round();
        i2 = (stop * inv).round();
        if i1 / inv < start {
            i1 += 1.0;
        }
        if i2 / inv > stop {
            i2 -= 1.0;
        }
        inc = -inv;
    } else {
        let step = 10f64.powf(power) * factor;
        i1 = (start / step).round();
        i2 = (stop / step).round();
        if i1 * step < start {
            i1 += 1.0;
        }
        if i2 * step > stop {
            i2 -= 1.0;
        }
        inc = step;
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    Some((i1, i2, inc))
}

/// Nice tick values between `start` and `stop` (either order)
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let reverse = stop < start;
    let (lo, hi) = ordered(start, stop);
    let Some((i1, i2, inc)) = tick_spec(lo, hi, count as f64) else {
        return Vec::new();
    };
    if i2 < i1 {
        return Vec::new();
    }

    let n = (i2 - i1) as usize + 1;
    let mut values: Vec<f64> = (0..n)
        .map(|i| {
            let k = i1 + i as f64;
            if inc < 0.0 {
                k / -inc
            } else {
                k * inc
            }
        })
        .collect();
    if reverse {
        values.reverse();
    }
    values
}

/// Format a tick label with a fixed number of decimals and thousands
/// separators, e.g. `1,250` or `0.5`
pub fn format_tick(value: f64, precision: usize) -> String {
    let fixed = format!("{:.*}", precision, value);
    let (sign, digits) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // "-0" and "-0.0" read as zero
    let is_zero = digits.chars().all(|c| c == '0' || c == '.');
    let sign = if is_zero { "" } else { sign };
    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_band_scale_two_categories() {
        let scale = BandScale::band(["A", "B"], (0.0, 910.0), 0.2);
        let step = 910.0 / 2.2;
        assert!(approx(scale.step(), step));
        assert!(approx(scale.bandwidth(), step * 0.8));
        // outer padding of 0.2 steps on the left
        assert!(approx(scale.position("A").unwrap(), step * 0.2));
        assert!(approx(scale.position("B").unwrap(), step * 1.2));
        assert_eq!(scale.position("C"), None);
    }

    #[test]
    fn test_band_scale_dedupes_labels() {
        let scale = BandScale::band(["A", "B", "A"], (0.0, 100.0), 0.2);
        assert_eq!(scale.categories(), &["A", "B"]);
    }

    #[test]
    fn test_point_scale_spans_range() {
        let scale = BandScale::point(["a", "b", "c"], (0.0, 100.0));
        assert_eq!(scale.bandwidth(), 0.0);
        assert!(approx(scale.position("a").unwrap(), 0.0));
        assert!(approx(scale.position("b").unwrap(), 50.0));
        assert!(approx(scale.position("c").unwrap(), 100.0));
    }

    #[test]
    fn test_point_scale_single_category_centered() {
        let scale = BandScale::point(["only"], (0.0, 910.0));
        assert!(approx(scale.position("only").unwrap(), 455.0));
    }

    #[test]
    fn test_linear_zero_to_max() {
        let scale = LinearScale::zero_to_max(vec![10.0, 5.0, f64::NAN], (330.0, 0.0));
        assert_eq!(scale.domain, (0.0, 10.0));
        assert!(approx(scale.apply(10.0), 0.0));
        assert!(approx(scale.apply(5.0), 165.0));
        assert!(approx(scale.apply(0.0), 330.0));
    }

    #[test]
    fn test_linear_degenerate_domain_maps_to_middle() {
        let scale = LinearScale::zero_to_max(vec![f64::NAN], (330.0, 0.0));
        assert_eq!(scale.domain, (0.0, 0.0));
        assert!(approx(scale.apply(0.0), 165.0));
    }

    #[test]
    fn test_ticks_integer_steps() {
        assert_eq!(ticks(0.0, 10.0, 10), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
        assert_eq!(ticks(0.0, 95.0, 10), vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0]);
    }

    #[test]
    fn test_ticks_fractional_steps() {
        let values = ticks(0.0, 1.0, 5);
        assert_eq!(values, vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }

    #[test]
    fn test_ticks_reversed_and_degenerate() {
        assert_eq!(ticks(10.0, 0.0, 2), vec![10.0, 5.0, 0.0]);
        assert_eq!(ticks(3.0, 3.0, 10), vec![3.0]);
        assert!(ticks(0.0, f64::INFINITY, 10).is_empty());
    }

    #[test]
    fn test_tick_precision() {
        assert_eq!(LinearScale::new((0.0, 10.0), (0.0, 1.0)).tick_precision(10), 0);
        assert_eq!(LinearScale::new((0.0, 1.0), (0.0, 1.0)).tick_precision(10), 1);
        assert_eq!(LinearScale::new((0.0, 0.05), (0.0, 1.0)).tick_precision(10), 3);
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(0.0, 0), "0");
        assert_eq!(format_tick(1250.0, 0), "1,250");
        assert_eq!(format_tick(1234567.0, 0), "1,234,567");
        assert_eq!(format_tick(0.5, 1), "0.5");
        assert_eq!(format_tick(-2000.0, 0), "-2,000");
        assert_eq!(format_tick(-0.0, 1), "0.0");
    }
}
