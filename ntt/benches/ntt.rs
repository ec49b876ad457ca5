use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ntt::dft::table::TwiddleTable;
use ntt::dft::{Scheme, DFT};
use ntt::modulus::oracle::DefaultOracle;
use ntt::modulus::WordOps;

const Q: u64 = 0x1fffffffffe00001u64;

fn new_input(n: usize) -> Vec<u64> {
    (0..n as u64).collect()
}

fn ntt(c: &mut Criterion) {
    fn runner<'a>(table: &'a TwiddleTable) -> Box<dyn FnMut() + 'a> {
        let mut a: Vec<u64> = new_input(table.n());
        Box::new(move || {
            let _ = table.forward_inplace(&mut a);
        })
    }

    let mut b: criterion::BenchmarkGroup<'_, criterion::measurement::WallTime> =
        c.benchmark_group("ntt");

    for log_n in 10..17 {
        let tables: [TwiddleTable; 2] = [Scheme::RootOfUnity, Scheme::NegativeWrapPhi]
            .map(|scheme| TwiddleTable::build(1 << log_n, Q, scheme, &DefaultOracle).unwrap());

        for table in tables.iter() {
            let name: String = format!("scheme={:?}/q={}", table.scheme(), Q.log2());
            let id: BenchmarkId = BenchmarkId::new(name, format!("n={}", 1 << log_n));
            let mut run = runner(table);
            b.bench_with_input(id, &(), |b: &mut criterion::Bencher<'_>, _| b.iter(&mut run));
        }
    }
}

fn intt(c: &mut Criterion) {
    fn runner<'a>(table: &'a TwiddleTable) -> Box<dyn FnMut() + 'a> {
        let mut a: Vec<u64> = new_input(table.n());
        Box::new(move || {
            let _ = table.backward_inplace(&mut a);
        })
    }

    let mut b: criterion::BenchmarkGroup<'_, criterion::measurement::WallTime> =
        c.benchmark_group("intt");

    for log_n in 10..17 {
        let tables: [TwiddleTable; 2] = [Scheme::RootOfUnity, Scheme::NegativeWrapPhi]
            .map(|scheme| TwiddleTable::build(1 << log_n, Q, scheme, &DefaultOracle).unwrap());

        for table in tables.iter() {
            let name: String = format!("scheme={:?}/q={}", table.scheme(), Q.log2());
            let id: BenchmarkId = BenchmarkId::new(name, format!("n={}", 1 << log_n));
            let mut run = runner(table);
            b.bench_with_input(id, &(), |b: &mut criterion::Bencher<'_>, _| b.iter(&mut run));
        }
    }
}

criterion_group!(benches, ntt, intt);
criterion_main!(benches);
