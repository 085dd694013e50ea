use glam::{IVec4, Vec3, Vec4};
use procedural_meshes::noise::*;
use procedural_meshes::{SmallXXHash, SmallXXHash4};
use proptest::prelude::*;

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn coordinate() -> impl Strategy<Value = f32> {
    -50.0f32..50.0
}

// Coordinates whose scaled fraction is not right at a cell edge, so the
// floor cannot flip under rounding when shifted by a whole period
fn interior(frequency: u32) -> impl Strategy<Value = f32> {
    (0.0f32..1.0).prop_filter("away from cell edges", move |x| {
        let fraction = (x * frequency as f32).fract();
        fraction > 1e-3 && fraction < 1.0 - 1e-3
    })
}

proptest! {
    #[test]
    fn normal_span_brackets_coordinate(x in coordinate(), frequency in 1u32..16) {
        let span = LatticeNormal::span4(Vec4::splat(x), frequency);
        prop_assert_eq!(span.p1, span.p0 + IVec4::ONE);
        prop_assert_eq!(span.g1, span.g0 - Vec4::ONE);
        prop_assert!(span.g0.x >= 0.0 && span.g0.x <= 1.0);
        prop_assert!(span.t.x >= 0.0 && span.t.x <= 1.0);
        prop_assert!(span.dt.x >= 0.0 && span.dt.x <= 1.875 + 1e-4);
    }

    #[test]
    fn tiling_points_stay_in_lattice(x in coordinate(), frequency in 1u32..16) {
        let span = LatticeTiling::span4(Vec4::splat(x), frequency);
        let f = frequency as i32;
        prop_assert!(span.p0.x >= 0 && span.p0.x < f);
        prop_assert!(span.p1.x >= 0 && span.p1.x < f);
        prop_assert_eq!(span.p1.x, (span.p0.x + 1) % f);
    }

    #[test]
    fn tiling_span_is_periodic(
        (frequency, x) in (1u32..8).prop_flat_map(|f| (Just(f), interior(f))),
        period in -3i32..4,
    ) {
        let a = LatticeTiling::span4(Vec4::splat(x), frequency);
        let b = LatticeTiling::span4(Vec4::splat(x + period as f32), frequency);
        prop_assert_eq!(a.p0, b.p0);
        prop_assert_eq!(a.p1, b.p1);
        prop_assert!(approx(a.g0.x, b.g0.x, 1e-4));
    }

    #[test]
    fn tiling_noise_repeats_every_unit(
        x in interior(4),
        z in interior(4),
        y in 0.0f32..1.0,
        seed in any::<i32>(),
    ) {
        let hash = SmallXXHash4::splat(SmallXXHash::seed(seed));
        let a = Point4::splat(Vec3::new(x, y, z));
        let b = Point4::splat(Vec3::new(x + 1.0, y, z - 2.0));
        let na = Lattice2D::<LatticeTiling, Perlin>::noise4(a, hash, 4);
        let nb = Lattice2D::<LatticeTiling, Perlin>::noise4(b, hash, 4);
        prop_assert!(approx(na.v.x, nb.v.x, 1e-3));
        prop_assert!(approx(na.dx.x, nb.dx.x, 1e-2));
        prop_assert!(approx(na.dz.x, nb.dz.x, 1e-2));
    }
}
