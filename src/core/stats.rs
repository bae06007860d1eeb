use std::num::NonZeroUsize;

use crate::core::Catalog;
use crate::error::EmptyCatalogError;
use crate::models::{
    AttributePair, BreedAttribute, BreedRecord, GroupKey, GroupMean, Histogram, LifespanSummary,
    SizeCategory, SizeLifespan,
};

/// Upper bound on histogram bins; larger requests are clamped
pub const MAX_HISTOGRAM_BINS: usize = 100;

/// Min, max, mean and mode of `average_lifespan` over the whole catalog.
///
/// All four values are truncated toward zero. When several lifespans are
/// equally frequent, the mode is the one that appears first in catalog order.
pub fn descriptive_lifespan(catalog: &Catalog) -> Result<LifespanSummary, EmptyCatalogError> {
    let lifespans: Vec<f64> = catalog.iter().map(BreedRecord::average_lifespan).collect();

    let mode = first_mode(&lifespans).ok_or(EmptyCatalogError)?;
    let min = lifespans.iter().copied().fold(f64::INFINITY, f64::min);
    let max = lifespans.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = lifespans.iter().sum::<f64>() / lifespans.len() as f64;

    Ok(LifespanSummary {
        min: min as i64,
        max: max as i64,
        mean: mean as i64,
        mode: mode as i64,
    })
}

/// Most frequent value; ties go to the value seen first
fn first_mode(values: &[f64]) -> Option<f64> {
    let mut counts: Vec<(f64, usize)> = Vec::new();
    for &value in values {
        match counts.iter_mut().find(|(seen, _)| *seen == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }

    let mut best: Option<(f64, usize)> = None;
    for (value, count) in counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// Mean `average_lifespan` per size category, small to big.
/// Categories without breeds are left out.
pub fn lifespan_by_size(catalog: &Catalog) -> Vec<SizeLifespan> {
    SizeCategory::ALL
        .into_iter()
        .filter_map(|size| {
            let lifespans: Vec<f64> = catalog
                .iter()
                .filter(|record| record.size_category() == size)
                .map(BreedRecord::average_lifespan)
                .collect();

            if lifespans.is_empty() {
                return None;
            }

            Some(SizeLifespan {
                size,
                mean_lifespan: lifespans.iter().sum::<f64>() / lifespans.len() as f64,
                breeds: lifespans.len(),
            })
        })
        .collect()
}

/// Pearson correlation of `average_size` and `average_lifespan`.
///
/// `None` with fewer than two breeds or when either column is constant.
pub fn size_lifespan_correlation(catalog: &Catalog) -> Option<f64> {
    let n = catalog.len();
    if n < 2 {
        return None;
    }

    let mean_size = catalog.iter().map(BreedRecord::average_size).sum::<f64>() / n as f64;
    let mean_life = catalog.iter().map(BreedRecord::average_lifespan).sum::<f64>() / n as f64;

    let (mut covariance, mut size_variance, mut life_variance) = (0.0, 0.0, 0.0);
    for record in catalog {
        let ds = record.average_size() - mean_size;
        let dl = record.average_lifespan() - mean_life;
        covariance += ds * dl;
        size_variance += ds * ds;
        life_variance += dl * dl;
    }

    if size_variance == 0.0 || life_variance == 0.0 {
        return None;
    }

    Some(covariance / (size_variance.sqrt() * life_variance.sqrt()))
}

/// Equal-width histogram of one attribute.
///
/// Bins span `[min, max]`; the last bin is closed on both sides. A constant
/// column is spread over `[value - 0.5, value + 0.5]`. At most
/// [`MAX_HISTOGRAM_BINS`] bins are produced.
pub fn histogram<'a, I>(
    records: I,
    attribute: BreedAttribute,
    bins: NonZeroUsize,
) -> Result<Histogram, EmptyCatalogError>
where
    I: IntoIterator<Item = &'a BreedRecord>,
{
    let values: Vec<f64> = records
        .into_iter()
        .map(|record| record.attribute(attribute))
        .collect();
    if values.is_empty() {
        return Err(EmptyCatalogError);
    }

    let mut low = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut high = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if low == high {
        low -= 0.5;
        high += 0.5;
    }

    let bins = bins.get().min(MAX_HISTOGRAM_BINS);
    let width = (high - low) / bins as f64;
    let edges: Vec<f64> = (0..=bins).map(|i| low + width * i as f64).collect();

    let mut counts = vec![0usize; bins];
    for value in values {
        let slot = (((value - low) / width) as usize).min(bins - 1);
        counts[slot] += 1;
    }

    Ok(Histogram {
        attribute,
        edges,
        counts,
    })
}

/// Every breed as an `(x, y)` point, in catalog order
pub fn attribute_pairs(catalog: &Catalog, x: BreedAttribute, y: BreedAttribute) -> Vec<AttributePair> {
    catalog
        .iter()
        .map(|record| AttributePair {
            breed: record.breed().to_string(),
            x: record.attribute(x),
            y: record.attribute(y),
        })
        .collect()
}

/// Mean of `y` per label of `key`, groups in order of first appearance
pub fn grouped_mean(catalog: &Catalog, key: GroupKey, y: BreedAttribute) -> Vec<GroupMean> {
    let mut sums: Vec<(&str, f64, usize)> = Vec::new();
    for record in catalog {
        let label = key.label(record);
        let value = record.attribute(y);
        match sums.iter_mut().find(|(group, _, _)| *group == label) {
            Some((_, sum, count)) => {
                *sum += value;
                *count += 1;
            }
            None => sums.push((label, value, 1)),
        }
    }

    sums.into_iter()
        .map(|(group, sum, breeds)| GroupMean {
            group: group.to_string(),
            mean: sum / breeds as f64,
            breeds,
        })
        .collect()
}
