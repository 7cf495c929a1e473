use super::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn grid_drops_partial_blocks() {
    let grid = BlockGrid::new(70, 33, 16).unwrap();
    assert_eq!((grid.blocks_x, grid.blocks_y), (4, 2));
    assert_eq!(grid.total(), 8);
    assert_eq!(grid.block_origin(0), (0, 0));
    assert_eq!(grid.block_origin(5), (16, 16));
}

#[test]
fn grid_rejects_oversized_blocks() {
    assert!(matches!(
        BlockGrid::new(15, 64, 16),
        Err(GlitchError::ImageTooSmall(_))
    ));
    assert!(matches!(
        BlockGrid::new(64, 64, 0),
        Err(GlitchError::Configuration(_))
    ));
}

#[test]
fn min_segment_must_cover_a_block() {
    let grid = BlockGrid::new(32, 32, 16).unwrap();
    assert!(grid.check_min_segment(0.25).is_ok());
    let mut rng = StdRng::seed_from_u64(0);
    assert!(matches!(
        select_segment(&mut rng, grid, 0.2, 0.5),
        Err(GlitchError::ImageTooSmall(_))
    ));
}

#[test]
fn full_fraction_selects_every_block() {
    let grid = BlockGrid::new(64, 48, 16).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..50 {
        let seg = select_segment(&mut rng, grid, 1.0, 1.0).unwrap().unwrap();
        assert_eq!((seg.start, seg.count), (0, 12));
        assert!(seg.shift < 12);
    }
}

#[test]
fn segments_stay_in_range() {
    let grid = BlockGrid::new(100, 100, 10).unwrap();
    let mut rng = StdRng::seed_from_u64(2);
    let mut shifted = 0;
    for _ in 0..500 {
        let Some(seg) = select_segment(&mut rng, grid, 0.01, 0.3).unwrap() else {
            continue;
        };
        assert!(seg.count >= 1 && seg.count <= 30);
        assert!(seg.end() <= grid.total());
        assert!(seg.shift < grid.total());
        if seg.shift != 0 {
            shifted += 1;
        }
    }
    assert!(shifted > 150 && shifted < 350);
}

#[test]
fn shift_applies_to_first_stage_only() {
    let grid = BlockGrid::new(64, 64, 16).unwrap();
    let seg = Segment {
        start: 10,
        count: 6,
        shift: 9,
    };
    assert_eq!(seg.source_block(grid, 10, 0), 3);
    assert_eq!(seg.source_block(grid, 10, 1), 10);
}

#[test]
fn row_stripe_spans_touched_block_rows() {
    let grid = BlockGrid::new(64, 64, 16).unwrap();
    let seg = Segment {
        start: 3,
        count: 3,
        shift: 0,
    };
    assert_eq!(grid.row_stripe(seg), (0, 32));
    let seg = Segment {
        start: 8,
        count: 8,
        shift: 0,
    };
    assert_eq!(grid.row_stripe(seg), (32, 64));
}
