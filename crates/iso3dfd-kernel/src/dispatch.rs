//! Parallel dispatch over z-slabs of the interior.
//!
//! Every interior point of a step is independent, so the output buffer is
//! cut into disjoint runs of whole `k`-planes and each run is handed to a
//! closure. Returning from [`for_each_slab`] is the barrier between steps.

use iso3dfd_core::{Axis, PaddedLayout};
use rayon::prelude::*;

/// How a kernel spreads slabs across threads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Execution {
    /// Slabs run on the rayon global pool.
    #[default]
    Parallel,
    /// Slabs run in order on the calling thread.
    Serial,
}

/// Run `f(k_start, slab)` over the interior planes of `next`.
///
/// `slab` covers planes `k_start..k_start + slab.len() / plane_len` in
/// full (halo rows and columns included), so a point `(i, j, k)` lives at
/// `layout.index(i, j, k) - k_start * plane_len` within it. Slabs hold
/// `depth` planes except possibly the last. Halo planes along `k` are
/// never handed out.
///
/// # Panics
///
/// Panics if `depth` is zero or `next` is shorter than the layout.
pub fn for_each_slab<F>(layout: &PaddedLayout, next: &mut [f32], depth: usize, exec: Execution, f: F)
where
    F: Fn(usize, &mut [f32]) + Send + Sync,
{
    let plane = layout.plane_len();
    let planes = layout.interior(Axis::Z);
    let k0 = planes.start;
    let interior = &mut next[planes.start * plane..planes.end * plane];
    let chunk = depth * plane;
    match exec {
        Execution::Parallel => interior
            .par_chunks_mut(chunk)
            .enumerate()
            .for_each(|(c, slab)| f(k0 + c * depth, slab)),
        Execution::Serial => interior
            .chunks_mut(chunk)
            .enumerate()
            .for_each(|(c, slab)| f(k0 + c * depth, slab)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iso3dfd_core::Dims3;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn layout() -> PaddedLayout {
        PaddedLayout::new(Dims3::new(2, 2, 5).unwrap(), 1).unwrap()
    }

    #[test]
    fn slabs_cover_interior_planes_only() {
        let l = layout();
        for exec in [Execution::Serial, Execution::Parallel] {
            let mut next = vec![0.0f32; l.len()];
            for_each_slab(&l, &mut next, 2, exec, |k_start, slab| {
                let planes = slab.len() / l.plane_len();
                for (p, plane) in slab.chunks_mut(l.plane_len()).enumerate() {
                    plane.fill((k_start + p) as f32);
                }
                assert!(planes == 2 || (k_start == 5 && planes == 1));
            });
            for k in 0..l.extent()[2] {
                let expected = if l.interior(Axis::Z).contains(&k) { k as f32 } else { 0.0 };
                assert_eq!(next[l.index(0, 0, k)], expected, "k={k} under {exec:?}");
            }
        }
    }

    #[test]
    fn every_slab_visited_once() {
        let l = layout();
        let mut next = vec![0.0f32; l.len()];
        let calls = AtomicUsize::new(0);
        for_each_slab(&l, &mut next, 1, Execution::Parallel, |_, _| {
            calls.fetch_add(1, Ordering::Relaxed);
        });
        assert_eq!(calls.into_inner(), 5);
    }
}
