// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use gungraun::{library_benchmark, library_benchmark_group, main};


use runner::Workload;

fn setup(name: &str) -> Workload {
    Workload::new(name)
}

macro_rules! bench_harness {
    ($($ID:ident : $name:literal,)*) => {
        #[library_benchmark(setup=setup)]
        $(#[bench::$ID($name)])*
        fn bench_exec(workload: Workload) {
            workload.run();
        }
    };
}

bench_harness!(
    sort_default : "sort/default",
    sort_comparator : "sort/comparator",
    to_sorted_comparator : "toSorted/comparator",
    flat_infinity : "flat/infinity",
    reduce_sparse : "reduce/sparse",
    includes_nan : "includes/nan",
);

library_benchmark_group!(
   name = bench_exec_group;
   benchmarks = bench_exec
);

main!(library_benchmark_groups = bench_exec_group);
