//! Distribution summary of a numeric stream
//!
//! Values are quantized to five decimal places so that floating point noise
//! doesn't split one symbol into many, sorted once, and then summarised as
//! a frequency table, an ideal coding cost, and evenly spaced breakpoints
//! over the sorted ranks. Nothing here knows where the stream came from;
//! coefficients, single levels and raw pixels are all analysed the same way.

use std::collections::BTreeMap;

use crate::analysis::entropy;
use crate::io::configuration::{BREAKPOINT_COUNT, QUANTIZATION_SCALE};
use crate::io::error::{BigPixelsError, Result, computation_error};
use crate::math::interpolation::Linear;

/// A value rounded to a whole number of `1 / QUANTIZATION_SCALE` units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantized(i64);

impl Quantized {
    /// Quantize a finite value; halves round up
    pub fn new(value: f64) -> Option<Self> {
        value
            .is_finite()
            .then(|| Self(value.mul_add(QUANTIZATION_SCALE, 0.5).floor() as i64))
    }

    /// The quantized value as a real number
    pub fn value(self) -> f64 {
        self.0 as f64 / QUANTIZATION_SCALE
    }

    /// Number of quantization units
    pub const fn units(self) -> i64 {
        self.0
    }
}

/// Occurrence count of each distinct quantized value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<Quantized, usize>,
    total: usize,
}

impl FrequencyTable {
    /// Count occurrences of each value
    pub fn from_quantized<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Quantized>,
    {
        let mut table = Self::default();
        for value in values {
            *table.counts.entry(value).or_insert(0) += 1;
            table.total += 1;
        }
        table
    }

    /// Occurrences of `value` after quantization
    pub fn count_of(&self, value: f64) -> usize {
        Quantized::new(value).map_or(0, |key| self.get(key))
    }

    /// Occurrences of an already quantized value
    pub fn get(&self, key: Quantized) -> usize {
        self.counts.get(&key).copied().unwrap_or(0)
    }

    /// Number of distinct values
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether nothing was counted
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of values counted, repeats included
    pub const fn total(&self) -> usize {
        self.total
    }

    /// `(value, count)` pairs in ascending value order
    pub fn iter(&self) -> impl Iterator<Item = (Quantized, usize)> + '_ {
        self.counts.iter().map(|(&key, &count)| (key, count))
    }

    /// Ideal cost, in bits, of coding every counted value
    pub fn total_bits(&self) -> f64 {
        entropy::total_bits(self.counts.values().copied())
    }
}

/// One evenly spaced point of the sorted distribution
#[derive(Debug, Clone, PartialEq)]
pub struct Breakpoint {
    /// Position among the breakpoints, starting at 0 for the minimum
    pub break_number: usize,
    /// Fractional rank this breakpoint falls on
    pub ideal_index: f64,
    /// Average of the sorted values at the floor and ceiling of `ideal_index`
    pub value: f64,
    /// Values ranked from the ceiling of `ideal_index` up to, not including,
    /// the floor of the next breakpoint's; `None` for the last
    pub band: Option<FrequencyTable>,
}

/// Statistics of a numeric stream
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    /// Number of values analysed
    pub input_count: usize,
    /// Mean of the quantized values
    pub mean: f64,
    /// Number of distinct quantized values
    pub distinct_count: usize,
    /// Occurrences of each quantized value
    pub frequencies: FrequencyTable,
    /// Ideal entropy-coding cost of the whole stream in bits
    pub total_bits: f64,
    /// `BREAKPOINT_COUNT` evenly spaced points from minimum to maximum
    pub breakpoints: Vec<Breakpoint>,
}

impl Distribution {
    /// Summarise `values`
    ///
    /// An empty slice yields a zero count, zero mean, zero bits and no
    /// breakpoints.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSourceData` if any value is not finite
    pub fn analyze(values: &[f64]) -> Result<Self> {
        let mut sorted = values
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                Quantized::new(value).ok_or_else(|| BigPixelsError::InvalidSourceData {
                    reason: format!("value {value} at index {index} is not finite"),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        sorted.sort_unstable();

        let input_count = sorted.len();
        let frequencies = FrequencyTable::from_quantized(sorted.iter().copied());
        let total_bits = frequencies.total_bits();

        if input_count == 0 {
            return Ok(Self {
                input_count,
                mean: 0.0,
                distinct_count: 0,
                frequencies,
                total_bits,
                breakpoints: Vec::new(),
            });
        }

        let mean = sorted.iter().map(|value| value.value()).sum::<f64>() / input_count as f64;
        let breakpoints = Self::breakpoints(&sorted)?;

        Ok(Self {
            input_count,
            mean,
            distinct_count: frequencies.len(),
            frequencies,
            total_bits,
            breakpoints,
        })
    }

    /// Average ideal cost of one value in bits
    pub fn bits_per_value(&self) -> f64 {
        if self.input_count == 0 {
            0.0
        } else {
            self.total_bits / self.input_count as f64
        }
    }

    // A band runs from its breakpoint's ceiling rank up to, but excluding,
    // the next breakpoint's floor rank. Ranks strictly inside a fractional
    // breakpoint belong to no band.
    fn breakpoints(sorted: &[Quantized]) -> Result<Vec<Breakpoint>> {
        let last_rank = sorted.len().saturating_sub(1);
        let ranks = Linear::new(
            0.0,
            0.0,
            (BREAKPOINT_COUNT - 1) as f64,
            last_rank as f64,
        )?;

        let ideal_indices: Vec<f64> = (0..BREAKPOINT_COUNT)
            .map(|break_number| ranks.evaluate(break_number as f64).clamp(0.0, last_rank as f64))
            .collect();

        let mut breakpoints = Vec::with_capacity(BREAKPOINT_COUNT);
        for (break_number, &ideal_index) in ideal_indices.iter().enumerate() {
            let low_index = ideal_index.floor() as usize;
            let high_index = ideal_index.ceil() as usize;
            let (Some(low), Some(high)) = (sorted.get(low_index), sorted.get(high_index)) else {
                return Err(computation_error(
                    "distribution breakpoints",
                    &format!("rank {ideal_index} outside {} values", sorted.len()),
                ));
            };

            let band = ideal_indices.get(break_number + 1).map(|&next_index| {
                let band_end = (next_index.floor() as usize).max(high_index);
                FrequencyTable::from_quantized(
                    sorted.get(high_index..band_end).unwrap_or_default().iter().copied(),
                )
            });

            breakpoints.push(Breakpoint {
                break_number,
                ideal_index,
                value: f64::midpoint(low.value(), high.value()),
                band,
            });
        }

        Ok(breakpoints)
    }
}
