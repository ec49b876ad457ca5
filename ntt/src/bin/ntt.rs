//! ntt: forward/inverse round trip over a generated or loaded input.
//!
//! Either samples an input of length N, picks a modulus and runs the
//! round trip, or emits the input as a JSON test vector for external
//! simulators.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ntt::dft::table::TwiddleTable;
use ntt::dft::Scheme;
use ntt::modulus::oracle::DefaultOracle;
use ntt::modulus::prime_generation::DEFAULT_MAX_CANDIDATES;
use ntt::validator::{Parameters, RoundTrip};
use ntt::vectors::TestVector;
use sampling::source::new_seed;
use sampling::Source;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SchemeArg {
    /// Powers of a primitive n-th root of unity
    Plain,
    /// Square roots of the powers, for negative-wrap convolution
    Phi,
}

impl From<SchemeArg> for Scheme {
    fn from(value: SchemeArg) -> Self {
        match value {
            SchemeArg::Plain => Scheme::RootOfUnity,
            SchemeArg::Phi => Scheme::NegativeWrapPhi,
        }
    }
}

#[derive(Parser)]
#[command(name = "ntt")]
#[command(about = "Number theoretic transform round trip")]
#[command(version)]
struct Args {
    /// Transform length, a power of two
    #[arg(default_value = "2048")]
    num: usize,

    /// Print the input as a JSON test vector instead of running the round trip
    #[arg(short = 'd', long)]
    dump: bool,

    /// Include the natural-order transform (ret0) in the dumped vector
    #[arg(short = 'o', long, requires = "dump")]
    output: bool,

    /// Read the input, modulus and omega table from a JSON test vector
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,

    /// Largest input value
    #[arg(long, default_value = "1000")]
    bound: u64,

    #[arg(long, value_enum, default_value = "plain")]
    scheme: SchemeArg,

    /// Random seed for the input (optional)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of candidate moduli examined before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_CANDIDATES)]
    max_candidates: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args: Args = Args::parse();
    let scheme: Scheme = args.scheme.into();

    let (round_trip, input, loaded): (RoundTrip, Vec<u64>, Option<TestVector>) =
        match &args.input {
            Some(path) => {
                let json: String = fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                let vector: TestVector = TestVector::from_json(&json)
                    .with_context(|| format!("failed to parse {}", path.display()))?;
                let table: TwiddleTable = vector.table(scheme, &DefaultOracle)?;
                info!("Loaded test vector: n={} q={}", table.n(), table.q());
                let input: Vec<u64> = vector.input().to_vec();
                (
                    RoundTrip::from_table(Arc::new(table), args.bound),
                    input,
                    Some(vector),
                )
            }
            None => {
                let params: Parameters = Parameters {
                    n: args.num,
                    input_bound: args.bound,
                    scheme,
                    max_candidates: args.max_candidates,
                };
                let setup_start: Instant = Instant::now();
                let round_trip: RoundTrip = RoundTrip::setup(params, &DefaultOracle)?;
                info!(
                    "Setup: n={} q={} omega={} ({:.2?})",
                    round_trip.table().n(),
                    round_trip.table().q(),
                    round_trip.table().omega(),
                    setup_start.elapsed()
                );
                let mut source: Source = match args.seed {
                    Some(seed) => Source::from_u64(seed),
                    None => Source::new(new_seed()),
                };
                let input: Vec<u64> = round_trip.sample_input(&mut source);
                (round_trip, input, None)
            }
        };

    if args.dump {
        let vector: TestVector = if args.output {
            round_trip.run(&input)?;
            TestVector::with_transform(&input, round_trip.table())?
        } else {
            TestVector::new(&input, round_trip.table())
        };
        println!("{}", vector.to_json()?);
        return Ok(());
    }

    let start: Instant = Instant::now();
    round_trip.run(&input)?;
    info!("Round trip ok: n={} ({:.2?})", input.len(), start.elapsed());

    if let Some(vector) = loaded.filter(TestVector::has_transform) {
        if let Err(err) = vector.check_transform() {
            bail!("ret0 is not the transform of inp0: {}", err);
        }
        info!("Test vector transform matches");
    }

    Ok(())
}
