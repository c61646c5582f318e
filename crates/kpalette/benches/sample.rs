use criterion::{
    AxisScale, BenchmarkId, Criterion, PlotConfiguration, criterion_group, criterion_main,
};
use kpalette::{rng, sample};
use rand::Rng;

struct Size {
    label: &'static str,
    width: u32,
    height: u32,
}

const SIZES: &[Size] = &[
    Size {
        label: "small",
        width: 100,
        height: 100,
    },
    Size {
        label: "medium",
        width: 1000,
        height: 750,
    },
    Size {
        label: "large",
        width: 1024,
        height: 1024,
    },
];

const STRIDES: &[usize] = &[1, 8, 50];

fn bench(c: &mut Criterion) {
    let plot_config = PlotConfiguration::default().summary_scale(AxisScale::Logarithmic);

    let buffers: Vec<Vec<u8>> = SIZES
        .iter()
        .map(|size| {
            let len = size.width as usize * size.height as usize * 4;
            let mut buf = vec![0u8; len];
            rng::new().fill_bytes(&mut buf);
            buf
        })
        .collect();

    for &stride in STRIDES {
        let mut group = c.benchmark_group(format!("sample/stride{stride}"));
        group.plot_config(plot_config.clone());

        for (size, buf) in SIZES.iter().zip(buffers.iter()) {
            group.bench_with_input(BenchmarkId::from_parameter(size.label), buf, |b, buf| {
                b.iter_with_large_drop(|| sample::sample(size.width, size.height, buf, stride))
            });
        }
        group.finish();
    }
}

criterion_group!(benches, bench);
criterion_main!(benches);
