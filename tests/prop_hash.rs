use glam::IVec4;
use procedural_meshes::{SmallXXHash, SmallXXHash4};
use proptest::prelude::*;

proptest! {
    // Lane i of the 4-wide hash equals the scalar hash of the same inputs
    #[test]
    fn lanes_match_scalar(
        seeds in prop::array::uniform4(any::<i32>()),
        first in prop::array::uniform4(any::<i32>()),
        second in prop::array::uniform4(any::<i32>()),
    ) {
        let wide = SmallXXHash4::seed(IVec4::from_array(seeds))
            .eat(IVec4::from_array(first))
            .eat(IVec4::from_array(second))
            .finalize()
            .to_array();
        for i in 0..4 {
            let scalar = SmallXXHash::seed(seeds[i]).eat(first[i]).eat(second[i]).finalize();
            prop_assert_eq!(wide[i], scalar);
        }
    }

    // Octave offsets commute with splatting
    #[test]
    fn offset_matches_scalar(seed in any::<i32>(), octave in 0i32..6, data in any::<i32>()) {
        let scalar = (SmallXXHash::seed(seed) + octave).eat(data);
        let wide = (SmallXXHash4::splat(SmallXXHash::seed(seed)) + octave).eat(IVec4::splat(data));
        for lane in wide.lanes() {
            prop_assert_eq!(lane, scalar);
        }
    }

    // Float extraction stays in [0, 1]
    #[test]
    fn floats_in_unit_range(seed in any::<i32>(), data in any::<i32>(), count in 1u32..24) {
        let hash = SmallXXHash::seed(seed).eat(data);
        for value in [
            hash.floats01_a(),
            hash.floats01_b(),
            hash.floats01_c(),
            hash.floats01_d(),
            hash.get_bits_as_floats01(count, 32 - count),
        ] {
            prop_assert!((0.0..=1.0).contains(&value));
        }
    }

    // Equal inputs always hash equally
    #[test]
    fn deterministic(seed in any::<i32>(), data in any::<i32>()) {
        prop_assert_eq!(
            SmallXXHash::seed(seed).eat(data).finalize(),
            SmallXXHash::seed(seed).eat(data).finalize()
        );
    }
}
