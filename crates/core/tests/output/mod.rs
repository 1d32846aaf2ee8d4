//! Exact report-format checks: timing lines and the summary block as they
//! appear on stdout.

use pretty_assertions::assert_eq;

use dynsched_core::sim::report;
use dynsched_core::{SimConfig, Simulator};

use crate::common::op;

fn run_to_string(config: &SimConfig, ops: Vec<dynsched_core::trace::TraceOp>) -> String {
    let mut sim = Simulator::new(config, ops.into_iter());
    let mut out = Vec::new();
    sim.run(&mut out).unwrap();
    report::write_summary(&mut out, config, "trace.txt", sim.stats()).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn single_instruction_report() {
    let config = SimConfig::new(8, 4, 1);
    let text = run_to_string(&config, vec![op(0x1000, 0, 1, 2, 3)]);
    assert_eq!(
        text,
        "0 fu{0} src{2,3} dst{1} FE{0,1} DE{1,1} RN{2,1} RR{3,1} DI{4,1} \
         IS{5,1} EX{6,1} WB{7,1} RT{8,1}\n\
         # === Simulator Command =========\n\
         # ./sim 8 4 1 trace.txt\n\
         # === Processor Configuration ===\n\
         # ROB_SIZE = 8\n\
         # IQ_SIZE  = 4\n\
         # WIDTH    = 1\n\
         # === Simulation Results ========\n\
         # Dynamic Instruction Count    = 1\n\
         # Cycles                       = 9\n\
         # Instructions Per Cycle (IPC) = 0.11\n"
    );
}

#[test]
fn raw_hazard_pair_report() {
    let config = SimConfig::new(8, 4, 1);
    let text = run_to_string(&config, vec![op(0x0, 0, 5, -1, -1), op(0x4, 0, 6, 5, -1)]);
    assert_eq!(
        text,
        "0 fu{0} src{-1,-1} dst{5} FE{0,1} DE{1,1} RN{2,1} RR{3,1} DI{4,1} \
         IS{5,1} EX{6,1} WB{7,1} RT{8,1}\n\
         1 fu{0} src{5,-1} dst{6} FE{1,1} DE{2,1} RN{3,1} RR{4,1} DI{5,1} \
         IS{6,1} EX{7,1} WB{8,1} RT{9,1}\n\
         # === Simulator Command =========\n\
         # ./sim 8 4 1 trace.txt\n\
         # === Processor Configuration ===\n\
         # ROB_SIZE = 8\n\
         # IQ_SIZE  = 4\n\
         # WIDTH    = 1\n\
         # === Simulation Results ========\n\
         # Dynamic Instruction Count    = 2\n\
         # Cycles                       = 10\n\
         # Instructions Per Cycle (IPC) = 0.20\n"
    );
}
