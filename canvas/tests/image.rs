use planebuf::format::{BayerColor, LayoutKind, PixelFormat};
use planebuf::layout::{Builder, LayoutDescriptor, LayoutError, Rect};
use planebuf::sample::Sample;
use planebuf::{convert, expr, Image, ImageView, OutOfBounds, Pixel};

fn two_planes() -> Result<LayoutDescriptor, LayoutError> {
    Builder::new(2, 2)
        .pixel_format(PixelFormat::GrayAlpha)
        .build()
}

/// Sample `i` of a 2×2×2 image, in traversal order.
fn value<T: Sample>(i: i64) -> T {
    T::from_i64(i + 1)
}

/// Writes, copies and updates a 2×2 image with two planes of samples `$ty`.
macro_rules! typed_image {
    ($name:ident, $ty:ty) => {
        #[test]
        fn $name() -> Result<(), LayoutError> {
            let image = Image::<$ty>::new(two_planes()?);
            let view = image.view();

            let mut i = 0;
            view.for_each(|x, y, n| {
                view.set(x, y, n, value(i));
                i += 1;
            });
            assert_eq!(i, 8);

            assert_eq!(view.at(0, 0, 0), value::<$ty>(0));
            assert_eq!(view.at(1, 0, 0), value::<$ty>(1));
            assert_eq!(view.at(0, 1, 0), value::<$ty>(2));
            assert_eq!(view.at(1, 1, 1), value::<$ty>(7));
            assert_eq!(view.minimum(), value::<$ty>(0));
            assert_eq!(view.maximum(), value::<$ty>(7));

            let copy = image.clone_image();
            view.assign(<$ty as Sample>::ZERO);
            assert_eq!(copy.view().at(1, 1, 1), value::<$ty>(7));
            assert_eq!(view.at(1, 1, 1), <$ty as Sample>::ZERO);

            view.assign(&copy);
            view.assign_add(1);
            assert_eq!(view.at(1, 0, 1), value::<$ty>(6));
            view.assign_mul(2);
            assert_eq!(view.at(0, 0, 0), value::<$ty>(3));
            view.assign_sub(&copy);
            assert_eq!(view.at(0, 0, 0), value::<$ty>(2));
            view.assign_div(3);
            assert_eq!(view.at(0, 0, 0), value::<$ty>(0));
            Ok(())
        }
    };
}

typed_image!(image_i8, i8);
typed_image!(image_i16, i16);
typed_image!(image_u8, u8);
typed_image!(image_u16, u16);
typed_image!(image_f32, f32);
typed_image!(image_f64, f64);

#[test]
fn bounds_are_checked() -> Result<(), LayoutError> {
    let image = Image::<u8>::new(two_planes()?);
    let view = image.view();

    assert_eq!(
        view.try_at(2, 0, 0),
        Err(OutOfBounds {
            x: 2,
            y: 0,
            plane: 0
        })
    );
    assert!(view.try_at(0, -1, 1).is_err());
    assert!(view.try_at(0, 0, 2).is_err());
    assert!(view.try_set(0, 0, 1, 3).is_ok());
    assert_eq!(view.get(0, 0, 1), Some(3));
    Ok(())
}

#[test]
#[should_panic(expected = "out of bounds")]
fn out_of_bounds_panics() {
    if let Ok(layout) = two_planes() {
        Image::<u8>::new(layout).view().at(0, 2, 0);
    }
}

#[test]
fn border_is_addressable() -> Result<(), LayoutError> {
    let layout = Builder::new(3, 3)
        .pixel_format(PixelFormat::Grayscale)
        .border(1)
        .build()?;
    let image = Image::<u8>::new(layout);
    let view = image.view();

    view.set(-1, -1, 0, 9);
    view.set(3, 3, 0, 8);
    assert_eq!(view.at(-1, -1, 0), 9);
    assert!(view.try_at(-2, 0, 0).is_err());
    assert!(view.try_at(4, 0, 0).is_err());
    Ok(())
}

#[test]
fn from_slice_and_rows() -> Result<(), LayoutError> {
    let layout = Builder::new(3, 2)
        .pixel_format(PixelFormat::Grayscale)
        .width_alignment(4)
        .build()?;
    let samples: Vec<u16> = (0..8).collect();
    let image = Image::from_slice(layout, &samples)?;

    assert_eq!(image.view().at(2, 1, 0), 6);
    let row: Vec<u16> = image
        .view()
        .row(0, 1)
        .map(|row| row.iter().map(|c| c.get()).collect())
        .unwrap_or_default();
    assert_eq!(row, [4, 5, 6]);

    assert!(Image::<u16>::from_slice(layout, &samples[..7]).is_err());
    Ok(())
}

#[test]
fn unallocated_images() -> Result<(), LayoutError> {
    let mut image = Image::<f32>::unallocated(two_planes()?);
    assert!(!image.is_allocated());
    assert!(image.view().try_at(0, 0, 0).is_err());

    image.allocate();
    assert!(image.is_allocated());
    image.view().set(1, 1, 1, 0.5);
    image.allocate();
    assert_eq!(image.view().at(1, 1, 1), 0.5);
    Ok(())
}

#[test]
fn borrowed_buffers() -> Result<(), LayoutError> {
    let layout = Builder::new(2, 2).pixel_format(PixelFormat::Grayscale).build()?;
    let mut samples = [1u8, 2, 3, 4];
    {
        let view = ImageView::from_slice_mut(layout, &mut samples)?;
        view.assign(view * 10);
    }
    assert_eq!(samples, [10, 20, 30, 40]);

    let mut short = [0u8; 3];
    assert!(ImageView::from_slice_mut(layout, &mut short).is_err());
    Ok(())
}

#[test]
fn cloned_roi() -> Result<(), LayoutError> {
    let layout = Builder::new(4, 4).pixel_format(PixelFormat::Grayscale).build()?;
    let image = Image::<u8>::new(layout);
    let view = image.view();
    view.for_each(|x, y, n| view.set(x, y, n, (y * 4 + x) as u8));

    let roi = view.roi(Rect::new(1, 2, 2, 2))?;
    let cloned = convert::clone::<u8, _>(&roi)?;
    assert_eq!((cloned.layout().width(), cloned.layout().height()), (2, 2));
    assert_eq!(cloned.view().at(0, 0, 0), 9);
    assert_eq!(cloned.view().at(1, 1, 0), 14);

    view.assign(0);
    assert_eq!(cloned.view().at(0, 0, 0), 9);
    cloned.view().assign(1);
    assert_eq!(view.at(1, 2, 0), 0);
    Ok(())
}

#[test]
fn planes_of_yuv() -> Result<(), LayoutError> {
    let layout = Builder::new(4, 4).layout_kind(LayoutKind::Yuv420).build()?;
    let image = Image::<u8>::new(layout);
    let view = image.view();

    let sizes: Vec<_> = view.planes().map(|p| (p.width(), p.height())).collect();
    assert_eq!(sizes, [(4, 4), (2, 2), (2, 2)]);

    let mut visited = 0;
    view.for_each(|_, _, _| visited += 1);
    assert_eq!(visited, 16 + 4 + 4);

    if let Some(chroma) = view.plane(2) {
        chroma.assign(128);
    }
    assert_eq!(view.at(1, 1, 2), 128);
    assert_eq!(view.at(1, 1, 1), 0);
    assert!(view.pixel_view::<3>().is_err());
    Ok(())
}

#[test]
fn pixel_views() -> Result<(), LayoutError> {
    let layout = Builder::new(2, 2).pixel_format(PixelFormat::Rgb).build()?;
    let image = Image::<u8>::new(layout);
    let pixels = image.view().pixel_view::<3>()?;

    pixels.assign(Pixel([1u8, 2, 3]));
    pixels.assign_add(1);
    assert_eq!(pixels.at(1, 1), Pixel([2, 3, 4]));
    assert_eq!(image.view().at(0, 1, 2), 4);

    pixels.assign(expr::shift(pixels, 0, 0) * Pixel([1, 2, 3]));
    assert_eq!(pixels.at(0, 0), Pixel([2, 6, 12]));

    assert!(image.view().pixel_view::<4>().is_err());
    Ok(())
}

#[test]
#[should_panic(expected = "plane index")]
fn multi_plane_without_plane_index() {
    if let Ok(layout) = two_planes() {
        let image = Image::<u8>::new(layout);
        let plane = image.view().plane(0);
        if let Some(plane) = plane {
            plane.assign(image.view());
        }
    }
}

#[test]
fn bayer_views() -> Result<(), LayoutError> {
    let layout = Builder::new(4, 4)
        .pixel_format(PixelFormat::BayerRggb)
        .build()?;
    let image = Image::<u8>::new(layout);
    let view = image.view();
    view.for_each(|x, y, n| view.set(x, y, n, (y * 4 + x) as u8));

    let red = view.bayer(BayerColor::Red)?;
    assert_eq!(red.color(), BayerColor::Red);
    assert_eq!((red.width(), red.height()), (2, 2));
    assert_eq!(red.at(1, 0), 2);
    assert_eq!(view.bayer(BayerColor::GreenRed)?.at(0, 0), 1);
    assert_eq!(view.bayer(BayerColor::GreenBlue)?.at(1, 1), 14);
    assert_eq!(view.bayer(BayerColor::Blue)?.at(0, 1), 13);

    let planar = view.bayer_planar()?;
    assert_eq!(planar.at(1, 1), Pixel([10, 11, 14, 15]));

    view.bayer(BayerColor::Blue)?.assign(0);
    assert_eq!(view.at(3, 3, 0), 0);
    assert_eq!(view.at(2, 2, 0), 10);

    let gray = Builder::new(4, 4).pixel_format(PixelFormat::Grayscale).build()?;
    assert!(Image::<u8>::new(gray).view().bayer(BayerColor::Red).is_err());
    Ok(())
}

#[test]
fn lookup_and_saturate() -> Result<(), LayoutError> {
    let layout = Builder::new(4, 1).pixel_format(PixelFormat::Grayscale).build()?;
    let image = Image::<u8>::from_slice(layout, &[0, 1, 2, 3])?;
    let table = [10u16, 20, 30, 40];

    let mapped = Image::<u16>::from_expr(layout, expr::lut(&image, &table));
    assert_eq!(mapped.to_vec(), [10, 20, 30, 40]);

    let clamped = Image::<u16>::from_expr(layout, expr::saturate(&mapped, 15u16, 35));
    assert_eq!(clamped.to_vec(), [15, 20, 30, 35]);

    let picked = Image::<u8>::from_expr(layout, expr::select(expr::gt(&image, 1), 100, &image));
    assert_eq!(picked.to_vec(), [0, 1, 100, 100]);
    Ok(())
}

#[test]
#[should_panic(expected = "lookup index 3")]
fn lookup_out_of_range_panics() {
    if let Ok(layout) = Builder::new(4, 1).pixel_format(PixelFormat::Grayscale).build() {
        if let Ok(image) = Image::<u8>::from_slice(layout, &[0, 1, 2, 3]) {
            Image::<u8>::from_expr(layout, expr::lut(&image, &[1u8, 2, 3]));
        }
    }
}
