use label_distance_map::prelude::*;
use criterion::{ Criterion, criterion_group, criterion_main };

fn labels_from_function<I>(width: usize, height: usize, image: I) -> Vec<u32>
    where I: Fn(usize, usize) -> u32
{
    let mut labels = vec![0_u32; width * height];

    for y in 0..height {
        for x in 0..width {
            labels[y * width + x] = image(x, y);
        }
    }

    labels
}

fn cells(cell_width: usize, cell_height: usize)
    -> impl (Fn(usize, usize) -> u32)
{
    move |x, y|{
        // a grid of touching regions with a background gap every fourth cell
        let column = x / cell_width;
        let row = y / cell_height;
        if (column + row) % 4 == 0 { 0 } else { (row * 1000 + column + 1) as u32 }
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let width = 1080;
    let height = 1920;
    let labels = labels_from_function(width, height, cells(37, 23));

    c.bench_function("cells f32", |bencher| {
        let weights = ChamferWeights::from_preset(WeightPreset::Borgefors);

        bencher.iter(||{
            let image = LabelGrid::from_slice(width, height, &labels);
            compute_f32_distance_map(&image, &weights, true)
        })
    });

    c.bench_function("cells u16", |bencher| {
        let weights = ChamferWeights::from_preset(WeightPreset::Weights57);

        bencher.iter(||{
            let image = LabelGrid::from_slice(width, height, &labels);
            compute_u16_distance_map(&image, &weights, false)
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
