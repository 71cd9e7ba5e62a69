use planebuf::format::{LayoutKind, PixelFormat};
use planebuf::layout::{Builder, LayoutError};
use planebuf::sample::Sample;
use planebuf::Image;

/// Statistics of a 4×2 plane holding 0 to 7, for each sample type.
macro_rules! statistics {
    ($name:ident, $ty:ty) => {
        #[test]
        fn $name() -> Result<(), LayoutError> {
            let layout = Builder::new(4, 2)
                .pixel_format(PixelFormat::Grayscale)
                .pixel_precision(3)
                .border(1)
                .build()?;
            let image = Image::<$ty>::new(layout);
            let plane = image.view().plane(0).expect("one plane");
            plane.for_each(|x, y| plane.set(x, y, <$ty>::from_i64(i64::from(y * 4 + x))));
            plane.set(-1, -1, <$ty>::from_i64(-9));
            plane.set(4, 2, <$ty>::from_i64(9));

            // Border samples are not part of the plane.
            assert_eq!(plane.minimum(), <$ty>::from_i64(0));
            assert_eq!(plane.maximum(), <$ty>::from_i64(7));
            assert!((plane.mean() - 3.5).abs() < 1e-6);
            Ok(())
        }
    };
}

statistics!(statistics_i8, i8);
statistics!(statistics_u8, u8);
statistics!(statistics_i16, i16);
statistics!(statistics_u16, u16);
statistics!(statistics_f32, f32);
statistics!(statistics_f64, f64);

#[test]
fn histogram_of_precision() -> Result<(), LayoutError> {
    let layout = Builder::new(4, 2)
        .pixel_format(PixelFormat::Grayscale)
        .pixel_precision(3)
        .build()?;
    let image = Image::<u16>::from_slice(layout, &[0, 1, 1, 2, 7, 7, 7, 9])?;
    let histogram = image.view().plane(0).expect("one plane").histogram();

    assert_eq!(histogram.axis().size(), 8);
    assert_eq!(histogram.counts(), [1, 2, 1, 0, 0, 0, 0, 3]);
    assert_eq!(histogram.underflow(), 0);
    assert_eq!(histogram.overflow(), 1);
    assert_eq!(histogram.total_count(), 8);
    Ok(())
}

#[test]
fn histogram_ranges() -> Result<(), LayoutError> {
    let layout = Builder::new(5, 1)
        .pixel_format(PixelFormat::Grayscale)
        .build()?;
    let image = Image::<i16>::from_slice(layout, &[-5, 0, 50, 99, 100])?;
    let plane = image.view().plane(0).expect("one plane");
    let histogram = plane.histogram_with(4, 0, 99);

    // Each bin covers 25 values.
    assert_eq!(histogram.counts(), [1, 0, 1, 1]);
    assert_eq!(histogram.underflow(), 1);
    assert_eq!(histogram.overflow(), 1);
    assert_eq!(histogram.axis().lower(1), 25.0);
    assert_eq!(histogram.axis().center(0), 12.5);
    Ok(())
}

#[test]
fn float_histogram() -> Result<(), LayoutError> {
    let layout = Builder::new(4, 1)
        .pixel_format(PixelFormat::Grayscale)
        .build()?;
    let image = Image::<f32>::from_slice(layout, &[0.0, 0.25, 0.5, 1.0])?;
    let histogram = image
        .view()
        .plane(0)
        .expect("one plane")
        .histogram_with(4, 0.0, 1.0);

    assert_eq!(histogram.counts(), [1, 1, 1, 1]);
    Ok(())
}

#[test]
fn planes_of_interleaved_image() -> Result<(), LayoutError> {
    let layout = Builder::new(3, 2)
        .pixel_format(PixelFormat::Rgb)
        .layout_kind(LayoutKind::Interleaved)
        .build()?;
    let image = Image::<u8>::from_expr(layout, planebuf::Pixel([1u8, 2, 3]));
    let view = image.view();
    let green = view.plane(1).expect("three planes");

    assert_eq!(green.index(), 1);
    assert_eq!(green.minimum(), 2);
    green.assign_mul(10);
    assert_eq!(green.maximum(), 20);
    assert_eq!(view.plane(0).expect("three planes").maximum(), 1);
    assert_eq!(view.plane(2).expect("three planes").minimum(), 3);

    let row = green.row(1).expect("row in range");
    assert_eq!(row.len(), 7);
    assert_eq!(row[0].get(), 20);
    assert_eq!(row[3].get(), 20);
    Ok(())
}

#[test]
fn subsampled_plane_extent() -> Result<(), LayoutError> {
    let layout = Builder::new(5, 3)
        .layout_kind(LayoutKind::Yuv420)
        .build()?;
    let image = Image::<u8>::new(layout);
    let view = image.view();
    let chroma = view.plane(2).expect("three planes");

    assert_eq!((chroma.width(), chroma.height()), (3, 2));
    assert!(chroma.try_at(3, 0).is_err());
    assert!(view.plane(3).is_none());
    Ok(())
}
