//! Shared setup for engine integration tests.

#![allow(dead_code)]

use iso3dfd_arena::{FieldBuffer, WavefieldPair};
use iso3dfd_core::{CoefficientTable, Dims3, PaddedLayout, HALF_LENGTH};
use iso3dfd_engine::{InitialCondition, IterationDriver, ReferenceEngine, SourceSpec};
use iso3dfd_kernel::{Execution, KernelStrategy};

pub fn layout(n: [usize; 3]) -> PaddedLayout {
    PaddedLayout::for_stencil(Dims3::try_from(n).unwrap(), HALF_LENGTH).unwrap()
}

pub fn init(source: SourceSpec) -> InitialCondition {
    InitialCondition {
        velocity: 1500.0,
        dt: 0.002,
        source,
    }
}

pub fn impulse() -> InitialCondition {
    init(SourceSpec::Impulse { amplitude: 1.0 })
}

pub fn driver(
    layout: PaddedLayout,
    ic: &InitialCondition,
    strategy: KernelStrategy,
    execution: Execution,
) -> IterationDriver {
    let mut prev = FieldBuffer::zeroed(layout).unwrap();
    let mut next = FieldBuffer::zeroed(layout).unwrap();
    let mut vel = FieldBuffer::zeroed(layout).unwrap();
    ic.apply(&mut prev, &mut next, &mut vel).unwrap();
    IterationDriver::new(
        WavefieldPair::new(prev, next).unwrap(),
        vel,
        CoefficientTable::default(),
        strategy,
        execution,
    )
    .unwrap()
}

pub fn reference(layout: PaddedLayout, ic: &InitialCondition, steps: u64) -> ReferenceEngine {
    let mut r = ReferenceEngine::new(layout, CoefficientTable::default(), ic).unwrap();
    r.run(steps);
    r
}

/// Current field after `steps` steps.
pub fn evolve(
    layout: PaddedLayout,
    ic: &InitialCondition,
    strategy: KernelStrategy,
    steps: u64,
) -> Vec<f32> {
    let mut d = driver(layout, ic, strategy, Execution::Parallel);
    let wf = d.run(steps).unwrap();
    d.read(wf.current).unwrap().as_slice().to_vec()
}

pub fn strategies() -> [KernelStrategy; 3] {
    [
        KernelStrategy::Direct,
        KernelStrategy::PointerOffset,
        KernelStrategy::default(),
    ]
}
