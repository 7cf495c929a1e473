use super::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn inner_stages_replace() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..100 {
        let chain = build_chain(&mut rng, 1, 5, &FilterKind::ALL, &[BlendOp::XorYcc]);
        assert!((1..=5).contains(&chain.len()));
        let (last, inner) = chain.stages().split_last().unwrap();
        assert_eq!(last.op, BlendOp::XorYcc);
        assert!(inner.iter().all(|s| s.op == BlendOp::Replace));
    }
}

#[test]
fn allow_lists_restrict_draws() {
    let mut rng = StdRng::seed_from_u64(6);
    let filters = [FilterKind::Inv, FilterKind::BitRasp];
    let ops = [BlendOp::Add, BlendOp::MulRgb];
    for _ in 0..100 {
        let chain = build_chain(&mut rng, 3, 3, &filters, &ops);
        assert_eq!(chain.len(), 3);
        assert!(chain.stages().iter().all(|s| filters.contains(&s.filter.kind())));
        assert!(ops.contains(&chain.stages()[2].op));
    }
}

#[test]
fn display_lists_each_stage() {
    let mut rng = StdRng::seed_from_u64(7);
    let chain = build_chain(&mut rng, 2, 2, &[FilterKind::Inv], &[BlendOp::Compose]);
    assert_eq!(chain.to_string(), "[{inv,src},{inv,cmp}]");
}

#[test]
fn same_seed_same_chain() {
    let a = build_chain(&mut StdRng::seed_from_u64(8), 1, 4, &FilterKind::ALL, &BlendOp::ALL);
    let b = build_chain(&mut StdRng::seed_from_u64(8), 1, 4, &FilterKind::ALL, &BlendOp::ALL);
    assert_eq!(a, b);
}
