#![allow(dead_code)]

use criterion::{criterion_group, criterion_main, Criterion};
use somersault::{callable, instance, utils::thread_safety::RcThreadSafety, Callable, Container, Inject, InjectCloned};

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("resolve_value", |b| {
        let container = Container::new();
        container.register("value", instance(1u64)).unwrap();

        b.iter(|| container.resolve::<u64>("value").unwrap());
    })
    .bench_function("resolve_single", |b| {
        struct A;

        let container = Container::new();
        container.register("a", callable!(|| Ok(A))).unwrap();

        b.iter(|| container.resolve::<A>("a").unwrap());
    })
    .bench_function("resolve_many", |b| {
        struct A(RcThreadSafety<B>, RcThreadSafety<C>);
        struct B(i32);
        struct C(RcThreadSafety<CA>);
        struct CA(RcThreadSafety<CAA>);
        struct CAA(RcThreadSafety<CAAA>);
        struct CAAA;

        let container = Container::new();
        container.register("caaa", callable!(|| Ok(CAAA))).unwrap();
        container.register("caa", callable!(|caaa: Inject<CAAA>| Ok(CAA(caaa.0)))).unwrap();
        container.register("ca", callable!(|caa: Inject<CAA>| Ok(CA(caa.0)))).unwrap();
        container.register("c", callable!(|ca: Inject<CA>| Ok(C(ca.0)))).unwrap();
        container.register("b", callable!(|| Ok(B(2)))).unwrap();
        container.register("a", callable!(|b: Inject<B>, c: Inject<C>| Ok(A(b.0, c.0)))).unwrap();

        b.iter(|| container.resolve::<A>("a").unwrap());
    })
    .bench_function("resolve_through_hierarchy", |b| {
        struct A(u8);

        let root = Container::new();
        root.register("seed", instance(2u8)).unwrap();
        root.register_with_dependencies("a", Callable::new(|InjectCloned(seed): InjectCloned<u8>| Ok(A(seed))), "seed")
            .unwrap();

        let mut container = root.create_container();
        for _ in 0..8 {
            container = container.create_container();
        }
        let filtered = container.filter_out("unused").unwrap();

        b.iter(|| filtered.resolve::<A>("a").unwrap());
    })
    .bench_function("resolve_all", |b| {
        let container = Container::new();
        for value in 0..16u32 {
            container.register("plugin", instance(value)).unwrap();
        }

        b.iter(|| container.resolve_all::<u32>("plugin").unwrap());
    })
    .bench_function("build", |b| {
        struct A(RcThreadSafety<u8>);

        let container = Container::new();
        container.register("seed", instance(2u8)).unwrap();

        b.iter(|| {
            container
                .build::<A>(callable!(|seed: Inject<u8>| Ok(A(seed.0))))
                .unwrap()
        });
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
