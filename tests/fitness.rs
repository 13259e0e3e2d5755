use huebox::data::TargetImage;
use huebox::engines::encoding::BitVector;
use huebox::engines::evaluation::hue::{hue_rgb8, score, ACHROMATIC_HUE, MAX_SCORE};
use huebox::engines::evaluation::FitnessEvaluator;
use huebox::engines::generation::{BitGenome, Genome};
use huebox::engines::rendering::{BoxDescriptor, GenomeLayout};
use image::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn random_bits(len: usize, rng: &mut StdRng) -> BitVector {
    (0..len).map(|_| rng.gen::<bool>()).collect()
}

/// Small gradient-ish target with both chromatic and gray pixels
fn patterned_target(width: u32, height: u32) -> TargetImage {
    let pixels = RgbImage::from_fn(width, height, |x, y| {
        if (x + y) % 5 == 0 {
            Rgb([90, 90, 90])
        } else {
            Rgb([(x * 37 % 256) as u8, (y * 53 % 256) as u8, ((x * y) % 256) as u8])
        }
    });
    TargetImage::from_rgb(pixels).unwrap()
}

fn full_canvas_box(rgb: [u32; 3]) -> BoxDescriptor {
    BoxDescriptor { x0: 0, y0: 0, x1: 4095, y1: 4095, r: rgb[0], g: rgb[1], b: rgb[2], a: 255 }
}

#[test]
fn test_all_zero_genome_scores_maximum_on_black_target() {
    init_logging();
    let layout = GenomeLayout::new(30, 12, 8).unwrap();
    let target = Arc::new(TargetImage::solid(64, 48, [0, 0, 0]).unwrap());
    let evaluator = FitnessEvaluator::new(layout.clone(), target).unwrap();

    let bits = BitVector::zeros(layout.total_bits());
    let canvas = evaluator.renderer().render(&bits).unwrap();
    assert!(canvas.as_raw().chunks_exact(4).all(|p| p == [0, 0, 0, 255]));

    let mut genome = BitGenome::new(bits);
    assert_eq!(evaluator.evaluate(&mut genome).unwrap(), 360 * 64 * 48);
    assert_eq!(genome.fitness(), 360 * 64 * 48);
}

#[test]
fn test_white_box_beats_black_box_on_white_target() {
    let layout = GenomeLayout::new(1, 12, 8).unwrap();
    let target = Arc::new(TargetImage::solid(20, 10, [255, 255, 255]).unwrap());
    let evaluator = FitnessEvaluator::new(layout.clone(), target).unwrap();

    let white = layout.encode_boxes(&[full_canvas_box([255, 255, 255])]).unwrap();
    let black = layout.encode_boxes(&[full_canvas_box([0, 0, 0])]).unwrap();

    let white_fitness = evaluator.fitness_of(&white).unwrap();
    let black_fitness = evaluator.fitness_of(&black).unwrap();

    assert_eq!(white_fitness, evaluator.max_fitness());
    // pure black and pure white share the achromatic hue
    assert!(white_fitness >= black_fitness);

    let red = layout.encode_boxes(&[full_canvas_box([255, 0, 0])]).unwrap();
    assert!(white_fitness > evaluator.fitness_of(&red).unwrap());
}

#[test]
fn test_chromatic_full_box_beats_mismatched_hue() {
    let layout = GenomeLayout::new(1, 12, 8).unwrap();
    let target = Arc::new(TargetImage::solid(16, 16, [0, 200, 0]).unwrap());
    let evaluator = FitnessEvaluator::new(layout.clone(), target).unwrap();

    let green = layout.encode_boxes(&[full_canvas_box([0, 255, 0])]).unwrap();
    let black = layout.encode_boxes(&[full_canvas_box([0, 0, 0])]).unwrap();
    let magenta = layout.encode_boxes(&[full_canvas_box([255, 0, 255])]).unwrap();

    let green_fitness = evaluator.fitness_of(&green).unwrap();
    assert_eq!(green_fitness, evaluator.max_fitness());
    assert!(green_fitness > evaluator.fitness_of(&black).unwrap());
    assert!(green_fitness > evaluator.fitness_of(&magenta).unwrap());
}

#[test]
fn test_rendering_and_decoding_are_deterministic() {
    let mut rng = StdRng::seed_from_u64(7);
    let layout = GenomeLayout::new(30, 12, 8).unwrap();
    let target = Arc::new(patterned_target(40, 30));
    let evaluator = FitnessEvaluator::new(layout.clone(), target).unwrap();

    for _ in 0..5 {
        let bits = random_bits(layout.total_bits(), &mut rng);
        assert_eq!(layout.decode_boxes(&bits).unwrap(), layout.decode_boxes(&bits).unwrap());
        assert_eq!(
            evaluator.renderer().render(&bits).unwrap(),
            evaluator.renderer().render(&bits).unwrap()
        );
    }
}

#[test]
fn test_evaluation_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(11);
    let layout = GenomeLayout::new(30, 12, 8).unwrap();
    let evaluator = FitnessEvaluator::new(layout.clone(), Arc::new(patterned_target(32, 32))).unwrap();

    let mut genome = BitGenome::new(random_bits(layout.total_bits(), &mut rng));
    let first = evaluator.evaluate(&mut genome).unwrap();
    let second = evaluator.evaluate(&mut genome).unwrap();

    assert_eq!(first, second);
    assert!(first <= evaluator.max_fitness());
}

#[test]
fn test_parallel_population_matches_sequential() {
    init_logging();
    let mut rng = StdRng::seed_from_u64(23);
    let layout = GenomeLayout::new(10, 12, 8).unwrap();
    let evaluator = FitnessEvaluator::new(layout.clone(), Arc::new(patterned_target(24, 18))).unwrap();

    let mut population: Vec<BitGenome> = (0..16)
        .map(|_| BitGenome::new(random_bits(layout.total_bits(), &mut rng)))
        .collect();
    let expected: Vec<u64> = population
        .iter()
        .map(|g| evaluator.fitness_of(g.bits()).unwrap())
        .collect();

    let pool = rayon::ThreadPoolBuilder::new().num_threads(4).build().unwrap();
    pool.install(|| evaluator.evaluate_population(&mut population)).unwrap();

    let actual: Vec<u64> = population.iter().map(|g| g.fitness()).collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_population_with_malformed_genome_fails() {
    let layout = GenomeLayout::new(2, 12, 8).unwrap();
    let evaluator = FitnessEvaluator::new(layout, Arc::new(TargetImage::solid(4, 4, [1, 2, 3]).unwrap())).unwrap();

    let mut population = vec![
        BitGenome::new(BitVector::zeros(160)),
        BitGenome::new(BitVector::zeros(159)),
    ];
    assert!(evaluator.evaluate_population(&mut population).is_err());
}

#[test]
fn test_hue_score_is_reflexive_for_random_colors() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..1000 {
        let rgb: [u8; 3] = [rng.gen(), rng.gen(), rng.gen()];
        let h = hue_rgb8(rgb);
        assert!((0.0..=ACHROMATIC_HUE).contains(&h), "hue {} for {:?}", h, rgb);
        assert_eq!(score(h, h), MAX_SCORE);
    }
}

#[test]
fn test_black_and_white_share_sentinel() {
    assert_eq!(hue_rgb8([0, 0, 0]), 360.0);
    assert_eq!(hue_rgb8([255, 255, 255]), 360.0);
    assert_eq!(hue_rgb8([0, 0, 0]), hue_rgb8([255, 255, 255]));
}

#[test]
fn test_translucent_box_blends_toward_target() {
    // half-transparent red over black is dark red, which still has hue 0
    let layout = GenomeLayout::new(1, 12, 8).unwrap();
    let target = Arc::new(TargetImage::solid(8, 8, [120, 0, 0]).unwrap());
    let evaluator = FitnessEvaluator::new(layout.clone(), target).unwrap();

    let mut translucent = full_canvas_box([255, 0, 0]);
    translucent.a = 128;
    let bits = layout.encode_boxes(&[translucent]).unwrap();

    let canvas = evaluator.renderer().render(&bits).unwrap();
    assert_eq!(canvas.pixel(3, 3).0, [128, 0, 0, 255]);
    assert_eq!(evaluator.fitness_of(&bits).unwrap(), evaluator.max_fitness());
}
