use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use simplelog::{Config, LevelFilter, TestLogger};

#[allow(dead_code)]
/// Routes the crate's `log` output through the test harness capture.
pub(super) fn init_logging() {
    // a second init in the same process is rejected, which is fine
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}

#[allow(dead_code)]
pub(super) fn shuffled(count: u32, seed: u64) -> Vec<u32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut keys: Vec<u32> = (0..count).collect();
    keys.shuffle(&mut rng);
    keys
}

#[allow(dead_code)]
pub(super) type SmallIntPairs = Vec<(u16, u16)>;

#[allow(dead_code)]
pub(super) fn small_int_pairs() -> impl Strategy<Value = SmallIntPairs> {
    prop::collection::vec((0u16..1024u16, 0u16..1024u16), 0..512)
}

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub(super) enum Op {
    Insert(u16, u16),
    Remove(u16),
    PollMin,
    PollMax,
}

#[allow(dead_code)]
pub(super) fn op_sequences() -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        4 => (0u16..256, any::<u16>()).prop_map(|(k, v)| Op::Insert(k, v)),
        2 => (0u16..256).prop_map(Op::Remove),
        1 => Just(Op::PollMin),
        1 => Just(Op::PollMax),
    ];

    prop::collection::vec(op, 0..400)
}
