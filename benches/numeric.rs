// Copyright Materialize, Inc. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository, or online at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use criterion::{criterion_group, criterion_main, Criterion};
use rand::{thread_rng, Rng};

use bigdec::Numeric;

pub fn bench_parse_format(c: &mut Criterion) {
    let mut rng = thread_rng();
    let input = format!("{}.{:09}", rng.gen::<i64>(), rng.gen_range(0..1_000_000_000u32));
    c.bench_function("parse", |b| b.iter(|| input.parse::<Numeric>().unwrap()));

    let value: Numeric = input.parse().unwrap();
    c.bench_function("format", |b| b.iter(|| value.to_string()));
}

pub fn bench_arithmetic(c: &mut Criterion) {
    let mut rng = thread_rng();
    let x = Numeric::from(rng.gen::<i64>());
    let y = Numeric::from(rng.gen_range(1..i64::MAX));

    c.bench_function("mul", |b| b.iter(|| x.checked_mul(&y).unwrap()));
    c.bench_function("div", |b| b.iter(|| x.checked_div(&y).unwrap()));
    c.bench_function("sqrt", |b| b.iter(|| y.sqrt().unwrap()));
}

criterion_group!(benches, bench_parse_format, bench_arithmetic);
criterion_main!(benches);
