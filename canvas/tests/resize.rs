use planebuf::expr::{self, Bicubic, CropRect, Nearest, ResizeAlignment};
use planebuf::format::PixelFormat;
use planebuf::layout::{Builder, LayoutError};
use planebuf::Image;

const EPSILON: f32 = 1e-5;

fn gray(width: i32, height: i32) -> Builder {
    Builder::new(width, height).pixel_format(PixelFormat::Grayscale)
}

/// A 3×3 image holding 1 to 9 in row order.
fn counting() -> Result<Image<f32>, LayoutError> {
    let layout = gray(3, 3).build()?;
    Image::from_slice(layout, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0])
}

fn assert_rows(image: &Image<f32>, expected: &[&[f32]]) {
    let view = image.view();
    for (y, row) in expected.iter().enumerate() {
        for (x, &want) in row.iter().enumerate() {
            let got = view.at(x as i32, y as i32, 0);
            assert!((got - want).abs() < EPSILON, "({x}, {y}): {got} != {want}");
        }
    }
}

#[test]
fn upscale_corners() -> Result<(), LayoutError> {
    let source = counting()?;
    let resized = Image::<f32>::from_expr(
        gray(4, 4).build()?,
        expr::resize(source.view(), 4, 4, ResizeAlignment::Corners),
    );

    let view = resized.view();
    assert!((view.at(0, 0, 0) - 1.0).abs() < EPSILON);
    assert!((view.at(1, 0, 0) - (1.0 + 2.0 / 3.0)).abs() < EPSILON);
    assert!((view.at(0, 1, 0) - 3.0).abs() < EPSILON);
    assert!((view.at(3, 3, 0) - 9.0).abs() < EPSILON);
    Ok(())
}

#[test]
fn upscale_centers() -> Result<(), LayoutError> {
    let source = counting()?;
    let resized = Image::<f32>::from_expr(
        gray(4, 4).build()?,
        expr::resize(source.view(), 4, 4, ResizeAlignment::Centers),
    );

    assert_rows(
        &resized,
        &[
            &[1.0, 1.625, 2.375, 3.0],
            &[2.875, 3.5, 4.25, 4.875],
            &[5.125, 5.75, 6.5, 7.125],
            &[7.0, 7.625, 8.375, 9.0],
        ],
    );
    Ok(())
}

#[test]
fn downscale() -> Result<(), LayoutError> {
    let source = counting()?;
    let layout = gray(2, 2).build()?;

    let corners = Image::<f32>::from_expr(
        layout,
        expr::resize(source.view(), 2, 2, ResizeAlignment::Corners),
    );
    assert_rows(&corners, &[&[1.0, 3.0], &[7.0, 9.0]]);

    let centers = Image::<f32>::from_expr(
        layout,
        expr::resize(source.view(), 2, 2, ResizeAlignment::Centers),
    );
    assert_rows(&centers, &[&[2.0, 3.5], &[6.5, 8.0]]);
    Ok(())
}

#[test]
fn nearest_keeps_samples() -> Result<(), LayoutError> {
    let layout = gray(3, 3).build()?;
    let source = Image::<u8>::from_slice(layout, &[1, 2, 3, 4, 5, 6, 7, 8, 9])?;
    let resized = Image::<u8>::from_expr(
        gray(4, 4).build()?,
        expr::resize_with(source.view(), Nearest, 4, 4, ResizeAlignment::Corners),
    );

    let view = resized.view();
    let row: Vec<u8> = (0..4).map(|x| view.at(x, 0, 0)).collect();
    assert_eq!(row, [1, 2, 2, 3]);
    assert_eq!(view.at(3, 3, 0), 9);
    Ok(())
}

#[test]
fn bicubic() -> Result<(), LayoutError> {
    let source = counting()?;
    let resized = Image::<f32>::from_expr(
        gray(5, 5).build()?,
        expr::resize_with(source.view(), Bicubic, 5, 5, ResizeAlignment::Corners),
    );

    // Every other column lands exactly on a source column. Between them the spline also weighs
    // the clamped neighbours outside the image.
    assert_rows(&resized, &[&[1.0, 1.4375, 2.0, 2.5625, 3.0]]);
    assert!((resized.view().at(4, 4, 0) - 9.0).abs() < EPSILON);
    assert!((resized.view().at(2, 2, 0) - 5.0).abs() < EPSILON);

    let flat = Image::<f32>::from_expr(gray(3, 3).build()?, 4.0f32);
    let resized = Image::<f32>::from_expr(
        gray(7, 5).build()?,
        expr::resize_with(flat.view(), Bicubic, 7, 5, ResizeAlignment::Centers),
    );
    resized
        .view()
        .for_each(|x, y, n| assert!((resized.view().at(x, y, n) - 4.0).abs() < EPSILON));
    Ok(())
}

#[test]
fn crop() -> Result<(), LayoutError> {
    let source = counting()?;
    // The right half of the middle row, stretched over three columns.
    let resized = Image::<f32>::from_expr(
        gray(3, 1).build()?,
        expr::resize_crop(
            source.view(),
            expr::Bilinear,
            3,
            1,
            CropRect::new(0.5, 0.5, 0.5, 0.0),
        ),
    );
    assert_rows(&resized, &[&[5.0, 5.5, 6.0]]);
    Ok(())
}

#[test]
fn interleaved_planes() -> Result<(), LayoutError> {
    let layout = Builder::new(2, 2)
        .pixel_format(PixelFormat::Rgb)
        .layout_kind(planebuf::format::LayoutKind::Interleaved)
        .build()?;
    let source = Image::<f32>::from_expr(layout, planebuf::Pixel([0.0f32, 10.0, 20.0]));
    let target = Builder::from_layout(&layout).width(3).height(3).build()?;
    let resized = Image::<f32>::from_expr(
        target,
        expr::resize(source.view(), 3, 3, ResizeAlignment::Corners),
    );

    let view = resized.view();
    assert_eq!(view.width(), 3);
    assert!((view.at(1, 1, 1) - 10.0).abs() < EPSILON);
    assert!((view.at(2, 0, 2) - 20.0).abs() < EPSILON);
    Ok(())
}
