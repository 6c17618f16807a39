/// a module drives the evaluator across a numeric domain: ideal series,
/// noise-perturbed generated series, pointwise error and its statistics
///
///# Example
/// ```
/// use series_engine::series::sampler::{Domain, Noise, SeriesKind, generate_series_data};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// let domain = Domain::new(0.0, 6.28, 100);
/// let mut rng = StdRng::seed_from_u64(42);
/// let result = generate_series_data(SeriesKind::Sine, None, &domain, Noise::default(), &mut rng).unwrap();
/// println!("{}", result.statistics_table());
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod sampler;
///____________________________________________________________________________________________________________________________
/// reduces a finalized pointwise-error sequence to max, min, mean and
/// population standard deviation
pub mod statistics;
