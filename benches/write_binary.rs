use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ndarray::Array1;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;

use vtkwrite::{Compression, Encoding, GridType, Payload, VtkDocument};

fn write_appended(values: &Array1<f64>, compression: Compression) {
    let mut doc = VtkDocument::new(GridType::RectilinearGrid, values.len(), 0)
        .encoding(Encoding::Appended)
        .compression(compression);
    doc.add_piece(None);

    doc.attach_data(&Payload::from(values), "u", None).unwrap();

    let mut out = Vec::new();
    doc.write_document(&mut out).unwrap();
}

fn write_binary_bench(c: &mut Criterion) {
    let n = 100 * 100 * 100;
    let values: Array1<f64> = Array1::random(n, Uniform::new(0., 10.));

    c.bench_function("appended raw 1e6", |b| {
        b.iter(|| write_appended(black_box(&values), Compression::None))
    });

    c.bench_function("appended zlib-1 1e6", |b| {
        b.iter(|| write_appended(black_box(&values), Compression::zlib(1)))
    });
}

criterion_group!(benches, write_binary_bench);
criterion_main!(benches);
