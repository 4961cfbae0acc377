//! Synthetic housing dataset with injected gaps and outliers.
//!
//! The table resembles the California Housing data and is meant as demo
//! input for the cleaner: roughly 5% of the values in five columns are
//! blanked, and a handful of rows get extreme `MedInc` / `Population` values.

use polars::prelude::*;
use rand::prelude::*;
use std::f64::consts::PI;

/// Columns produced by [`generate_housing`], in order.
pub const HOUSING_COLUMNS: [&str; 9] = [
    "MedInc",
    "HouseAge",
    "AveRooms",
    "AveBedrms",
    "Population",
    "AveOccup",
    "Latitude",
    "Longitude",
    "MedHouseVal",
];

/// Parameters for [`generate_housing`].
#[derive(Debug, Clone)]
pub struct HousingParams {
    pub n_samples: usize,
    pub seed: u64,
    /// Chance of blanking each cell of the columns that receive gaps.
    pub missing_rate: f64,
    /// Rows given an extreme value; the first half in `MedInc`, the rest in
    /// `Population`.
    pub n_outliers: usize,
}

impl Default for HousingParams {
    fn default() -> Self {
        Self {
            n_samples: 1000,
            seed: 42,
            missing_rate: 0.05,
            n_outliers: 10,
        }
    }
}

fn uniform(rng: &mut StdRng, low: f64, high: f64) -> f64 {
    rng.gen_range(low..high)
}

/// Standard normal draw (Box-Muller).
fn standard_normal(rng: &mut StdRng) -> f64 {
    let u1 = 1.0 - rng.gen_range(0.0..1.0); // (0, 1], keeps ln finite
    let u2 = rng.gen_range(0.0..1.0);
    (-2.0 * f64::ln(u1)).sqrt() * (2.0 * PI * u2).cos()
}

fn normal(rng: &mut StdRng, mean: f64, sigma: f64) -> f64 {
    mean + sigma * standard_normal(rng)
}

fn lognormal(rng: &mut StdRng, mean: f64, sigma: f64) -> f64 {
    normal(rng, mean, sigma).exp()
}

/// Build the synthetic housing table. Deterministic for a given seed.
pub fn generate_housing(params: &HousingParams) -> PolarsResult<DataFrame> {
    let n = params.n_samples;
    let mut rng = StdRng::seed_from_u64(params.seed);

    let med_inc: Vec<f64> = (0..n).map(|_| lognormal(&mut rng, 1.5, 0.5)).collect();
    let house_age: Vec<f64> = (0..n).map(|_| uniform(&mut rng, 1.0, 52.0)).collect();
    let ave_rooms: Vec<f64> = (0..n).map(|_| uniform(&mut rng, 2.0, 10.0)).collect();
    let ave_bedrms: Vec<f64> = ave_rooms
        .iter()
        .map(|rooms| rooms * uniform(&mut rng, 0.15, 0.35))
        .collect();
    let population: Vec<f64> = (0..n).map(|_| lognormal(&mut rng, 6.0, 0.8)).collect();
    let ave_occup: Vec<f64> = (0..n).map(|_| uniform(&mut rng, 1.5, 5.0)).collect();
    let latitude: Vec<f64> = (0..n).map(|_| uniform(&mut rng, 32.5, 42.0)).collect();
    let longitude: Vec<f64> = (0..n).map(|_| uniform(&mut rng, -124.5, -114.3)).collect();

    // House value driven by income and location, plus noise
    let med_house_val: Vec<f64> = (0..n)
        .map(|i| {
            let value = med_inc[i] * 0.5 + (52.0 - house_age[i]) * 0.01 + ave_rooms[i] * 0.05
                - ave_occup[i] * 0.02
                + normal(&mut rng, 0.0, 0.3);
            value.clamp(0.15, 5.0)
        })
        .collect();

    let to_cells = |values: Vec<f64>| -> Vec<Option<f64>> { values.into_iter().map(Some).collect() };
    let mut med_inc = to_cells(med_inc);
    let mut house_age = to_cells(house_age);
    let mut ave_rooms = to_cells(ave_rooms);
    let mut ave_bedrms = to_cells(ave_bedrms);
    let mut population = to_cells(population);

    for column in [
        &mut med_inc,
        &mut house_age,
        &mut ave_rooms,
        &mut ave_bedrms,
        &mut population,
    ] {
        for cell in column.iter_mut() {
            if rng.gen_range(0.0..1.0) < params.missing_rate {
                *cell = None;
            }
        }
    }

    let indices: Vec<usize> = (0..n).collect();
    let outlier_rows: Vec<usize> = indices
        .choose_multiple(&mut rng, params.n_outliers.min(n))
        .copied()
        .collect();
    let (income_rows, population_rows) = outlier_rows.split_at(outlier_rows.len().div_ceil(2));
    for &row in income_rows {
        med_inc[row] = Some(uniform(&mut rng, 20.0, 30.0));
    }
    for &row in population_rows {
        population[row] = Some(uniform(&mut rng, 30000.0, 50000.0));
    }

    df![
        "MedInc" => med_inc,
        "HouseAge" => house_age,
        "AveRooms" => ave_rooms,
        "AveBedrms" => ave_bedrms,
        "Population" => population,
        "AveOccup" => ave_occup,
        "Latitude" => latitude,
        "Longitude" => longitude,
        "MedHouseVal" => med_house_val,
    ]
}
