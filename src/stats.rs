//! Log-binned probability density for heavy-tailed samples such as degree
//! sequences.

use crate::error::{NetsciError, Result};

/// Density estimate on logarithmic bins: geometric bin centers and the
/// matching normalized densities. Empty bins are omitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogBinnedPdf {
    pub centers: Vec<f64>,
    pub density: Vec<f64>,
}

/// Histogram the positive, finite values of `samples` on `nbins`
/// geometrically spaced bins between `xmin` and `xmax` (defaulting to the
/// sample range). Values outside the range are ignored; the last bin is
/// closed on the right.
pub fn log_binned_pdf(
    samples: &[f64],
    nbins: usize,
    xmin: Option<f64>,
    xmax: Option<f64>,
) -> Result<LogBinnedPdf> {
    if nbins == 0 {
        return Err(NetsciError::invalid_parameter("nbins must be at least 1"));
    }

    let x: Vec<f64> = samples
        .iter()
        .copied()
        .filter(|v| v.is_finite() && *v > 0.0)
        .collect();
    if x.is_empty() {
        return Ok(LogBinnedPdf::default());
    }

    let lo = xmin.unwrap_or_else(|| x.iter().copied().fold(f64::INFINITY, f64::min));
    let hi = xmax.unwrap_or_else(|| x.iter().copied().fold(f64::NEG_INFINITY, f64::max));
    if !(lo > 0.0 && hi.is_finite()) {
        return Err(NetsciError::invalid_parameter(format!(
            "bin range must be positive and finite, got [{}, {}]",
            lo, hi
        )));
    }
    if lo > hi {
        return Err(NetsciError::invalid_parameter(format!(
            "xmin ({}) exceeds xmax ({})",
            lo, hi
        )));
    }
    if lo == hi {
        return Ok(LogBinnedPdf {
            centers: vec![lo],
            density: vec![1.0],
        });
    }

    let (log_lo, log_hi) = (lo.ln(), hi.ln());
    let step = (log_hi - log_lo) / nbins as f64;
    let edges: Vec<f64> = (0..=nbins)
        .map(|i| match i {
            0 => lo,
            i if i == nbins => hi,
            i => (log_lo + step * i as f64).exp(),
        })
        .collect();

    let mut counts = vec![0usize; nbins];
    for &value in &x {
        if value < lo || value > hi {
            continue;
        }
        let mut bin = (((value.ln() - log_lo) / step) as usize).min(nbins - 1);
        // Float error in ln/exp can land a value one bin off its edges
        if bin > 0 && value < edges[bin] {
            bin -= 1;
        } else if bin + 1 < nbins && value >= edges[bin + 1] {
            bin += 1;
        }
        counts[bin] += 1;
    }

    let total: usize = counts.iter().sum();
    let mut pdf = LogBinnedPdf::default();
    if total == 0 {
        return Ok(pdf);
    }

    for (i, &count) in counts.iter().enumerate() {
        if count == 0 {
            continue;
        }
        let width = edges[i + 1] - edges[i];
        pdf.centers.push((edges[i] * edges[i + 1]).sqrt());
        pdf.density.push(count as f64 / (total as f64 * width));
    }
    Ok(pdf)
}
