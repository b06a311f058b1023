//! Integration tests for module exports.
//!
//! Verify that all public modules and types are correctly exported
//! and accessible via absolute paths.

/// Test that the tridiagonal solver is accessible via absolute path.
#[test]
fn test_math_module_exports() {
    use diffusion_core::math::tridiagonal::TridiagonalSystem;
    use diffusion_core::math::TridiagonalSystem as Reexported;

    let system: Reexported = TridiagonalSystem::decompose(&[2.0], &[], &[]).unwrap();
    assert_eq!(system.solve(&[4.0]), vec![2.0]);
}

/// Test that element and error types are accessible via absolute path.
#[test]
fn test_types_module_exports() {
    use diffusion_core::types::element::Element;
    use diffusion_core::types::error::{ElementTypeError, TridiagonalError, VolumeError};
    use diffusion_core::types::ElementType;

    fn widen<T: Element>(value: T) -> f64 {
        value.to_f64()
    }
    assert_eq!(widen(7_i16), 7.0);
    assert_eq!(<u8 as Element>::ELEMENT_TYPE, ElementType::UInt8);

    let _ = ElementTypeError::Unknown("x".to_string());
    let _ = VolumeError::ZeroDimension { axis: 0 };
    let _ = TridiagonalError::EmptySystem;
}

/// Test that volume types are accessible via absolute path.
#[test]
fn test_volume_module_exports() {
    use diffusion_core::volume::{Axis, StridedVolume, StridedVolumeMut, Volume, VolumeShape};

    let shape = VolumeShape::new([2, 3, 4]).unwrap();
    let input = Volume::from_fn(shape, |i0, i1, i2| (i0 + i1 + i2) as i8);
    let mut output = vec![0.0_f64; shape.num_elements()];

    let view: StridedVolume<'_, i8> = input.view();
    let mut out_view = StridedVolumeMut::new(&mut output, shape).unwrap();

    for axis in Axis::AOS_ORDER {
        for pair in shape.lines(axis) {
            let line = view.extract(axis, pair);
            out_view.accumulate(axis, pair, &line);
        }
    }

    // Every element received its own value once per axis.
    for (out, &inp) in output.iter().zip(input.as_slice()) {
        assert_eq!(*out, 3.0 * inp as f64);
    }
}
