//! # Series Sampler Module
//!
//! Drives the evaluator across a numeric domain to produce the ideal
//! series, synthesizes the noise-perturbed "generated" series and reduces
//! the pointwise error to summary statistics.
//!
//! ## Purpose
//!
//! - `Domain` - evenly spaced sample abscissas over [start, end]
//! - `Noise` - explicit, injectable perturbation model
//! - `SeriesKind` - preset source expressions (sine, cosine, tangent, custom)
//! - `sample()` - expression x domain -> `SeriesResult` or `SampleError`
//! - `generate_series_data()` - the whole normalize -> parse -> sample
//!   pipeline behind one call
//!
//! The noise draw consumes an injected random generator; it is the only
//! impurity in the crate. Callers requiring reproducibility must pass a
//! seeded generator - with the same seed, expression and domain two calls
//! produce identical generated sequences.

use crate::expressions::evaluator::EvalError;
use crate::expressions::expression_engine::Expr;
use crate::expressions::parse_expr::ParseError;
use crate::series::statistics::{ErrorStats, aggregate};
use log::{debug, info};
use nalgebra::DVector;
use rand::Rng;
use std::fmt;
use strum_macros::{Display, EnumString};
use tabled::builder::Builder;
use tabled::settings::Style;

/// Sampling interval [start, end] plus the number of evenly spaced sample
/// points, endpoints inclusive. Sane bounds on `points` (e.g. 10..=1000)
/// are enforced by the caller, not here; the sampler only rejects domains
/// it cannot mesh at all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    pub start: f64,
    pub end: f64,
    pub points: usize,
}

impl Domain {
    pub fn new(start: f64, end: f64, points: usize) -> Domain {
        Domain { start, end, points }
    }

    /// step between adjacent abscissas, (end - start) / (points - 1)
    pub fn step(&self) -> f64 {
        (self.end - self.start) / (self.points as f64 - 1.0)
    }

    /// The sample abscissas: `points` evenly spaced values inclusive of
    /// both endpoints.
    pub fn mesh(&self) -> DVector<f64> {
        let step = self.step();
        DVector::from_iterator(
            self.points,
            (0..self.points).map(|i| self.start + i as f64 * step),
        )
    }
}

/// Perturbation model for the generated series: independent draws uniform
/// on [-amplitude, +amplitude]. A stand-in for real measurement noise,
/// kept as an explicit configuration rather than a hardcoded constant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Noise {
    pub amplitude: f64,
}

impl Default for Noise {
    fn default() -> Self {
        Noise { amplitude: 0.25 }
    }
}

impl Noise {
    fn draw(&self, rng: &mut impl Rng) -> f64 {
        (rng.random::<f64>() - 0.5) * (2.0 * self.amplitude)
    }
}

/// Preset source series of the dashboard, plus free-form custom expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum SeriesKind {
    Sine,
    Cosine,
    Tangent,
    Custom,
}

impl SeriesKind {
    /// The expression text this kind stands for. `Custom` uses the supplied
    /// expression, falling back to a default when none is given.
    pub fn expression<'a>(&self, custom_expression: Option<&'a str>) -> &'a str {
        match self {
            SeriesKind::Sine => "sin(x)",
            SeriesKind::Cosine => "cos(x)",
            SeriesKind::Tangent => "tan(x)",
            SeriesKind::Custom => custom_expression.unwrap_or("sin(x) + cos(x)/2"),
        }
    }
}

/// One generation request's complete output: abscissas, ideal and
/// generated ordinates, pointwise absolute error and its statistics.
/// Created once per request and immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesResult {
    pub x_mesh: DVector<f64>,
    pub ideal: DVector<f64>,
    pub generated: DVector<f64>,
    pub error: DVector<f64>,
    pub stats: ErrorStats,
}

impl SeriesResult {
    /// Chart axis labels: the abscissas formatted to two decimals.
    pub fn labels(&self) -> Vec<String> {
        self.x_mesh.iter().map(|x| format!("{:.2}", x)).collect()
    }

    /// Human-readable table of the error statistics.
    pub fn statistics_table(&self) -> String {
        let mut builder = Builder::default();
        builder.push_record(["statistic".to_string(), "value".to_string()]);
        builder.push_record(["max error".to_string(), self.stats.max.to_string()]);
        builder.push_record(["min error".to_string(), self.stats.min.to_string()]);
        builder.push_record(["mean error".to_string(), self.stats.mean.to_string()]);
        builder.push_record(["std of error".to_string(), self.stats.std.to_string()]);
        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.to_string()
    }
}

/// Sampling failure. Terminal for the call: a series with a hole is not
/// meaningful for charting or error statistics, so no partial result is
/// ever returned, and this core performs no retries.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleError {
    /// fewer than 2 sample points requested
    TooFewPoints { points: usize },
    /// zero-length interval with more than one point
    DegenerateDomain { start: f64, end: f64 },
    /// evaluation of the ideal ordinate failed at a known sample index
    EvaluationFailed { index: usize, cause: EvalError },
}

impl fmt::Display for SampleError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SampleError::TooFewPoints { points } => {
                write!(f, "domain needs at least 2 points, got {}", points)
            }
            SampleError::DegenerateDomain { start, end } => {
                write!(f, "degenerate domain [{}, {}]", start, end)
            }
            SampleError::EvaluationFailed { index, cause } => {
                write!(f, "evaluation failed at sample index {}: {}", index, cause)
            }
        }
    }
}

impl std::error::Error for SampleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SampleError::EvaluationFailed { cause, .. } => Some(cause),
            _ => None,
        }
    }
}

/// Samples the expression over the domain: ideal ordinates through the
/// evaluator, generated ordinates as ideal + noise draw, pointwise
/// absolute error and its statistics.
///
/// Requires `domain.points >= 2` and `domain.end != domain.start`. If
/// evaluation fails at any abscissa the whole call fails with
/// `SampleError::EvaluationFailed` carrying the sample index and cause.
pub fn sample(
    expr: &Expr,
    domain: &Domain,
    noise: Noise,
    rng: &mut impl Rng,
) -> Result<SeriesResult, SampleError> {
    if domain.points < 2 {
        return Err(SampleError::TooFewPoints {
            points: domain.points,
        });
    }
    if domain.end == domain.start {
        return Err(SampleError::DegenerateDomain {
            start: domain.start,
            end: domain.end,
        });
    }

    let x_mesh = domain.mesh();
    let mut ideal = Vec::with_capacity(domain.points);
    for (index, &x) in x_mesh.iter().enumerate() {
        let y = expr
            .eval_at(x)
            .map_err(|cause| SampleError::EvaluationFailed { index, cause })?;
        ideal.push(y);
    }
    let ideal = DVector::from_vec(ideal);
    let generated = ideal.map(|y| y + noise.draw(rng));
    let error = ideal.zip_map(&generated, |a, b| (a - b).abs());
    let stats = aggregate(error.as_slice());
    debug!(
        "sampled {} over [{}, {}], {} points, mean error {}",
        expr, domain.start, domain.end, domain.points, stats.mean
    );
    Ok(SeriesResult {
        x_mesh,
        ideal,
        generated,
        error,
        stats,
    })
}

/// Top-level failure of a generation request, tagged with the stage that
/// produced it so the caller can render the right message.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesError {
    Parse(ParseError),
    Sample(SampleError),
}

impl fmt::Display for SeriesError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SeriesError::Parse(err) => write!(f, "parse error: {}", err),
            SeriesError::Sample(err) => write!(f, "sampling error: {}", err),
        }
    }
}

impl std::error::Error for SeriesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SeriesError::Parse(err) => Some(err),
            SeriesError::Sample(err) => Some(err),
        }
    }
}

impl From<ParseError> for SeriesError {
    fn from(err: ParseError) -> Self {
        SeriesError::Parse(err)
    }
}

impl From<SampleError> for SeriesError {
    fn from(err: SampleError) -> Self {
        SeriesError::Sample(err)
    }
}

/// The whole generation pipeline behind one call: resolve the preset (or
/// custom expression), normalize and parse it, then sample it over the
/// domain. Each request is independent; nothing is shared between calls
/// except the generator the caller passes in.
pub fn generate_series_data(
    kind: SeriesKind,
    custom_expression: Option<&str>,
    domain: &Domain,
    noise: Noise,
    rng: &mut impl Rng,
) -> Result<SeriesResult, SeriesError> {
    let source = kind.expression(custom_expression);
    info!("generating {} series from '{}'", kind, source);
    let expr = Expr::parse(source)?;
    let result = sample(&expr, domain, noise, rng)?;
    Ok(result)
}

//___________________________________TESTS____________________________________

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_mesh_is_evenly_spaced_inclusive() {
        let domain = Domain::new(0.0, 10.0, 11);
        let mesh = domain.mesh();
        assert_eq!(mesh.len(), 11);
        for (i, &x) in mesh.iter().enumerate() {
            assert_eq!(x, i as f64);
        }
    }

    #[test]
    fn test_identity_sampling() {
        let expr = Expr::parse("x").unwrap();
        let domain = Domain::new(0.0, 10.0, 11);
        let mut rng = StdRng::seed_from_u64(1);
        let result = sample(&expr, &domain, Noise::default(), &mut rng).unwrap();
        assert_eq!(result.ideal, result.x_mesh);
        assert_eq!(result.error.len(), 11);
        // noise amplitude bounds the pointwise error
        for &e in result.error.iter() {
            assert!((0.0..=0.25).contains(&e));
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let expr = Expr::parse("sin(x) + cos(x)/2").unwrap();
        let domain = Domain::new(0.0, 6.28, 100);
        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);
        let first = sample(&expr, &domain, Noise::default(), &mut rng_a).unwrap();
        let second = sample(&expr, &domain, Noise::default(), &mut rng_b).unwrap();
        assert_eq!(first.generated, second.generated);
        assert_eq!(first.stats, second.stats);
    }

    #[test]
    fn test_too_few_points() {
        let expr = Expr::parse("x").unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let result = sample(&expr, &Domain::new(0.0, 1.0, 1), Noise::default(), &mut rng);
        assert_eq!(result, Err(SampleError::TooFewPoints { points: 1 }));
    }

    #[test]
    fn test_degenerate_domain() {
        let expr = Expr::parse("x").unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let result = sample(&expr, &Domain::new(2.0, 2.0, 50), Noise::default(), &mut rng);
        assert_eq!(
            result,
            Err(SampleError::DegenerateDomain {
                start: 2.0,
                end: 2.0
            })
        );
    }

    #[test]
    fn test_failure_carries_sample_index_and_no_partial_result() {
        // x = 0 is the 6th abscissa of [-5, 5] with 11 points
        let expr = Expr::parse("1/x").unwrap();
        let domain = Domain::new(-5.0, 5.0, 11);
        let mut rng = StdRng::seed_from_u64(0);
        match sample(&expr, &domain, Noise::default(), &mut rng) {
            Err(SampleError::EvaluationFailed { index, cause }) => {
                assert_eq!(index, 5);
                assert!(matches!(cause, EvalError::NonFinite { x, .. } if x == 0.0));
            }
            other => panic!("expected EvaluationFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_noise_amplitude_is_respected() {
        let expr = Expr::parse("0").unwrap();
        let domain = Domain::new(0.0, 1.0, 200);
        let mut rng = StdRng::seed_from_u64(7);
        let noise = Noise { amplitude: 0.05 };
        let result = sample(&expr, &domain, noise, &mut rng).unwrap();
        assert!(result.stats.max <= 0.05);
    }

    #[test]
    fn test_preset_expressions() {
        assert_eq!(SeriesKind::Sine.expression(None), "sin(x)");
        assert_eq!(SeriesKind::Cosine.expression(None), "cos(x)");
        assert_eq!(SeriesKind::Tangent.expression(None), "tan(x)");
        assert_eq!(SeriesKind::Custom.expression(None), "sin(x) + cos(x)/2");
        assert_eq!(SeriesKind::Custom.expression(Some("2x")), "2x");
        assert_eq!("sine".parse::<SeriesKind>().unwrap(), SeriesKind::Sine);
    }

    #[test]
    fn test_pipeline_custom_expression() {
        let domain = Domain::new(0.0, 6.28, 100);
        let mut rng = StdRng::seed_from_u64(3);
        let result = generate_series_data(
            SeriesKind::Custom,
            Some("sin(x) + 0.5*cos(2x)"),
            &domain,
            Noise::default(),
            &mut rng,
        )
        .unwrap();
        assert_eq!(result.ideal.len(), 100);
        assert_relative_eq!(result.ideal[0], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_pipeline_reports_parse_stage() {
        let domain = Domain::new(0.0, 1.0, 10);
        let mut rng = StdRng::seed_from_u64(3);
        let result = generate_series_data(
            SeriesKind::Custom,
            Some("foo(x)"),
            &domain,
            Noise::default(),
            &mut rng,
        );
        assert!(matches!(result, Err(SeriesError::Parse(_))));
    }

    #[test]
    fn test_labels_format_two_decimals() {
        let expr = Expr::parse("x").unwrap();
        let domain = Domain::new(0.0, 1.0, 3);
        let mut rng = StdRng::seed_from_u64(0);
        let result = sample(&expr, &domain, Noise::default(), &mut rng).unwrap();
        assert_eq!(result.labels(), vec!["0.00", "0.50", "1.00"]);
    }

    #[test]
    fn test_statistics_table_mentions_all_four() {
        let expr = Expr::parse("sin(x)").unwrap();
        let domain = Domain::new(0.0, 3.14, 20);
        let mut rng = StdRng::seed_from_u64(9);
        let result = sample(&expr, &domain, Noise::default(), &mut rng).unwrap();
        let table = result.statistics_table();
        for row in ["max error", "min error", "mean error", "std of error"] {
            assert!(table.contains(row), "missing row {:?}", row);
        }
    }
}
