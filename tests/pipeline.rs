//! End-to-end use of the public API: sorted shards are merged, the merged stream feeds a
//! top-K selection and a running median, and the results are checked against plain sorting.

use ordstat::{
    order, BinaryHeap, BoundedTopK, DualHeapMedian, HeapError, KWayMerge, Keep, OrdTotalOrder,
    Orientation,
};
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

fn sorted_shards(rng: &mut XorShiftRng, shards: usize, len: usize) -> Vec<Vec<i64>> {
    (0..shards)
        .map(|_| {
            let mut shard: Vec<i64> =
                (0..rng.gen_range(0..len)).map(|_| rng.gen_range(-500..500)).collect();
            shard.sort_unstable();
            shard
        })
        .collect()
}

fn median_of(sorted: &[i64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid] as f64
    } else {
        (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0
    }
}

#[test]
fn merge_then_select_then_median() {
    let mut rng = XorShiftRng::seed_from_u64(7);
    let shards = sorted_shards(&mut rng, 12, 80);
    let mut everything: Vec<i64> = shards.iter().flatten().copied().collect();
    everything.sort_unstable();

    let mut merge = KWayMerge::ascending(shards);
    let mut top = BoundedTopK::largest(10);
    let mut bottom = BoundedTopK::smallest(10);
    let mut median = DualHeapMedian::new();
    let mut merged = Vec::new();

    while let Ok(value) = merge.try_next() {
        top.offer(value);
        bottom.offer(value);
        median.add_num(value);
        merged.push(value);
    }
    assert_eq!(merge.try_next(), Err(HeapError::Exhausted));
    assert_eq!(merged, everything);

    let expected_top: Vec<i64> = everything.iter().rev().take(10).copied().collect();
    let expected_bottom: Vec<i64> = everything.iter().take(10).copied().collect();
    assert_eq!(top.into_sorted_vec(), expected_top);
    assert_eq!(bottom.into_sorted_vec(), expected_bottom);

    if everything.is_empty() {
        assert_eq!(median.find_median(), Err(HeapError::EmptyStream));
    } else {
        assert_eq!(median.find_median(), Ok(median_of(&everything)));
    }
}

#[test]
fn records_ranked_by_field() {
    #[derive(Clone, Debug, PartialEq)]
    struct Hit {
        doc: u32,
        score: f32,
    }

    let by_score = order::from_fn(|a: &Hit, b: &Hit| a.score.total_cmp(&b.score));
    let hits = [(1, 0.3), (2, 0.9), (3, 0.1), (4, 0.7), (5, 0.8)]
        .into_iter()
        .map(|(doc, score)| Hit { doc, score });

    let mut top = BoundedTopK::try_new(3, by_score, Keep::Largest).unwrap();
    top.extend(hits.clone());
    let docs: Vec<u32> = top.drain_sorted().into_iter().map(|hit| hit.doc).collect();
    assert_eq!(docs, [2, 5, 4]);

    let by_score = order::from_fn(|a: &Hit, b: &Hit| a.score.total_cmp(&b.score));
    let mut heap = BinaryHeap::new(by_score, Orientation::Min);
    heap.build(hits);
    assert_eq!(heap.peek_top().map(|hit| hit.doc), Ok(3));
}

#[test]
fn misuse_is_an_error_not_a_panic() {
    assert_eq!(
        BoundedTopK::<u8, _>::try_new(-3i32, OrdTotalOrder::default(), Keep::Smallest).err(),
        Some(HeapError::CapacityMisuse)
    );

    let mut heap: BinaryHeap<u8> = BinaryHeap::default();
    assert_eq!(heap.extract_top(), Err(HeapError::EmptyHeap));
    assert_eq!(heap.peek_top(), Err(HeapError::EmptyHeap));
}
