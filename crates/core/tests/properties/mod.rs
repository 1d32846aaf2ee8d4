//! Randomized invariant checks over generated traces.

use proptest::prelude::*;

use dynsched_core::SimConfig;
use dynsched_core::pipeline::Pipeline;
use dynsched_core::pipeline::instruction::Stage;
use dynsched_core::trace::TraceOp;

use crate::common::op;

/// Far above the worst case for the trace sizes generated here; tripping it
/// means the pipeline deadlocked.
const CYCLE_GUARD: u64 = 100_000;

fn trace_strategy() -> impl Strategy<Value = Vec<TraceOp>> {
    prop::collection::vec((0i64..3, -1i64..67, -1i64..67, -1i64..67), 1..60).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (class, dst, src1, src2))| {
                op(0x1000 + (i as u64) * 4, class, dst, src1, src2)
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn pipeline_invariants_hold(
        ops in trace_strategy(),
        rob_size in 4usize..32,
        iq_size in 2usize..16,
        width in 1usize..4,
    ) {
        // A bundle wider than the IQ can never dispatch; that degenerate
        // machine stalls forever by construction, so don't generate it.
        prop_assume!(width <= iq_size);
        let config = SimConfig::new(rob_size, iq_size, width);
        let mut pipeline = Pipeline::new(&config, ops.clone().into_iter());
        let mut retired = Vec::new();
        let mut guard = 0u64;
        loop {
            let more = pipeline.advance();
            prop_assert!(pipeline.iq_occupancy() <= iq_size, "issue queue over capacity");
            prop_assert!(pipeline.rob_occupancy() <= rob_size, "reorder buffer over capacity");
            retired.extend(pipeline.drain_retired());
            if !more {
                break;
            }
            guard += 1;
            prop_assert!(guard < CYCLE_GUARD, "pipeline never drained");
        }

        // Every fetched instruction retires, in program order.
        prop_assert_eq!(retired.len(), ops.len());
        for (rec, traced) in retired.iter().zip(&ops) {
            prop_assert_eq!(rec.pc, traced.pc);
        }

        for rec in &retired {
            let t = &rec.timing;
            for pair in Stage::ALL.windows(2) {
                prop_assert!(
                    t.begin(pair[0]) <= t.begin(pair[1]),
                    "{} begins after {} for pc {:#x}",
                    pair[0].mnemonic(), pair[1].mnemonic(), rec.pc
                );
            }
            for stage in Stage::ALL {
                prop_assert!(t.spent(stage) >= 1, "zero-cycle {} for pc {:#x}", stage.mnemonic(), rec.pc);
            }
            prop_assert_eq!(t.spent(Stage::Execute), rec.op.latency());
        }

        // Retirement cycles never go backwards. RT begin alone is not
        // monotone (younger ops park ready behind a slow head), so compare
        // the cycle each instruction actually left the pipeline.
        for pair in retired.windows(2) {
            let first = pair[0].timing.begin(Stage::Retire) + pair[0].timing.spent(Stage::Retire);
            let second = pair[1].timing.begin(Stage::Retire) + pair[1].timing.spent(Stage::Retire);
            prop_assert!(first <= second);
        }

        // IPC can never beat the machine width.
        prop_assert!(pipeline.stats().ipc() <= width as f64);
    }
}
