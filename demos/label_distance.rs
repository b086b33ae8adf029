//! Renders the distance map of a 16 bit label image.
//! Usage: `label_distance <labels.png> <distances.png> [config.json]`

use label_distance_map::prelude::*;
use std::path::Path;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let arguments: Vec<String> = std::env::args().collect();
    if arguments.len() < 3 {
        eprintln!("usage: {} <labels.png> <distances.png> [config.json]", arguments[0]);
        std::process::exit(2);
    }

    let config = match arguments.get(3) {
        Some(path) => TransformConfig::from_json_file(Path::new(path))?,
        None => TransformConfig::default(),
    };

    let labels = image::open(&arguments[1])?.to_luma16();
    let labels = label_piston_image::of_luma_image(&labels);

    let transform = config.build::<F32DistanceStorage>()?;
    let result = transform.transform(&labels, &mut LogProgress);

    log::info!("largest distance: {}", result.max_value);
    result.map.to_gray_u8_image(result.max_value).save(&arguments[2])?;

    Ok(())
}
