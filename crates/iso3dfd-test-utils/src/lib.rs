//! Test utilities for iso3dfd development.
//!
//! Provides deterministic field fixtures (seeded random, impulse,
//! mirror-symmetric) and [`GuardedField`], a buffer wrapped in sentinel
//! guard cells for proving that kernels never write outside the region
//! they were handed.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod guarded;

pub use guarded::GuardedField;

use iso3dfd_arena::FieldBuffer;
use iso3dfd_core::{Axis, Dims3, PaddedLayout, HALF_LENGTH};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Layout with the minimum stencil halo. Panics on invalid extents.
pub fn stencil_layout(n1: usize, n2: usize, n3: usize) -> PaddedLayout {
    let dims = Dims3::new(n1, n2, n3).expect("non-zero extents");
    PaddedLayout::for_stencil(dims, HALF_LENGTH).expect("layout fits in memory")
}

/// Values uniform in `[-1, 1)` over the interior, zero in the halo.
pub fn random_field(layout: PaddedLayout, seed: u64) -> FieldBuffer {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut buf = FieldBuffer::zeroed(layout).expect("test allocation");
    for k in layout.interior(Axis::Z) {
        for j in layout.interior(Axis::Y) {
            for i in layout.interior(Axis::X) {
                buf.set(i, j, k, rng.random_range(-1.0..1.0));
            }
        }
    }
    buf
}

/// Values uniform in `[lo, hi)` over every element, halo included.
pub fn random_everywhere(layout: PaddedLayout, seed: u64, lo: f32, hi: f32) -> FieldBuffer {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let data = (0..layout.len()).map(|_| rng.random_range(lo..hi)).collect();
    FieldBuffer::from_vec(layout, data).expect("length matches layout")
}

/// Zero field with `amplitude` at the interior centre `(H + n/2)` per axis.
pub fn centre_impulse(layout: PaddedLayout, amplitude: f32) -> FieldBuffer {
    let mut buf = FieldBuffer::zeroed(layout).expect("test allocation");
    let [i, j, k] = centre(&layout);
    buf.set(i, j, k, amplitude);
    buf
}

/// Padded coordinate of the interior centre.
pub fn centre(layout: &PaddedLayout) -> [usize; 3] {
    let h = layout.halo();
    let d = layout.dims();
    [h + d.n1() / 2, h + d.n2() / 2, h + d.n3() / 2]
}

/// Interior values whose magnitude depends only on the distance from the
/// interior centre, so the field is mirror-symmetric on every axis when
/// the extents are odd.
pub fn radial_field(layout: PaddedLayout) -> FieldBuffer {
    let mut buf = FieldBuffer::zeroed(layout).expect("test allocation");
    let [ci, cj, ck] = centre(&layout);
    for k in layout.interior(Axis::Z) {
        for j in layout.interior(Axis::Y) {
            for i in layout.interior(Axis::X) {
                let d2 = i.abs_diff(ci).pow(2) + j.abs_diff(cj).pow(2) + k.abs_diff(ck).pow(2);
                buf.set(i, j, k, 1.0 / (1.0 + d2 as f32));
            }
        }
    }
    buf
}

/// Velocity factors falling from `peak` at the interior centre towards
/// `floor` with distance, over every element (halo included).
///
/// Mirror-symmetric on every axis, and invariant under axis permutation
/// for cubic grids, when the extents are odd.
pub fn radial_velocity(layout: PaddedLayout, floor: f32, peak: f32) -> FieldBuffer {
    let mut buf = FieldBuffer::zeroed(layout).expect("test allocation");
    let [ci, cj, ck] = centre(&layout);
    let [e1, e2, e3] = layout.extent();
    for k in 0..e3 {
        for j in 0..e2 {
            for i in 0..e1 {
                let d2 = i.abs_diff(ci).pow(2) + j.abs_diff(cj).pow(2) + k.abs_diff(ck).pow(2);
                buf.set(i, j, k, floor + (peak - floor) / (1.0 + 0.1 * d2 as f32));
            }
        }
    }
    buf
}

/// Largest absolute difference between two equally long slices.
pub fn max_abs_diff(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len(), "slices differ in length");
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).fold(0.0, f32::max)
}

/// Every halo element of `buf` as `(offset, value)` pairs.
pub fn halo_values(buf: &FieldBuffer) -> Vec<(usize, f32)> {
    let layout = *buf.layout();
    buf.as_slice()
        .iter()
        .enumerate()
        .filter(|&(o, _)| {
            let (i, j, k) = layout.coords(o);
            !layout.is_interior(i, j, k)
        })
        .map(|(o, &v)| (o, v))
        .collect()
}
