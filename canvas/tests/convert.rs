use planebuf::convert;
use planebuf::format::{LayoutKind, PixelFormat};
use planebuf::layout::{Builder, LayoutError, Rect};
use planebuf::{Image, ImageCow, Pixel};

#[test]
fn planar_to_interleaved() -> Result<(), LayoutError> {
    let layout = Builder::new(2, 2).pixel_format(PixelFormat::Rgb).build()?;
    let planar = Image::<u8>::from_expr(layout, Pixel([1u8, 2, 3]));
    planar.view().set(1, 1, 2, 30);

    let interleaved = convert::convert_layout(&planar.view(), LayoutKind::Interleaved, 0)?;
    let plane = interleaved.layout().planes()[1];
    assert_eq!(interleaved.layout().layout_kind(), LayoutKind::Interleaved);
    assert_eq!((plane.pixel_stride, plane.row_stride), (3, 6));
    assert_eq!(
        interleaved.to_vec(),
        [1, 2, 3, 1, 2, 3, 1, 2, 3, 1, 2, 30]
    );

    let aligned = convert::convert_layout(&interleaved.view(), LayoutKind::Planar, 4)?;
    assert_eq!(aligned.layout().planes()[0].row_stride, 4);
    assert_eq!(aligned.view().at(1, 1, 2), 30);
    Ok(())
}

#[test]
fn precision_to_wider_integers() -> Result<(), LayoutError> {
    let layout = Builder::new(4, 1)
        .pixel_format(PixelFormat::Grayscale)
        .pixel_precision(8)
        .build()?;
    let source = Image::<u8>::from_slice(layout, &[0, 1, 128, 255])?;

    let wide = convert::convert_pixel_precision::<u16, _>(&source.view(), 16)?;
    assert_eq!(wide.layout().pixel_precision(), 16);
    assert_eq!(wide.to_vec(), [0, 257, 32896, 65535]);

    let twelve = convert::convert_pixel_precision::<u16, _>(&source.view(), 12)?;
    assert_eq!(twelve.to_vec(), [0, 16, 2056, 4095]);

    let back = convert::convert_pixel_precision::<u8, _>(&twelve.view(), 8)?;
    assert_eq!(back.to_vec(), source.to_vec());
    Ok(())
}

#[test]
fn precision_to_floats() -> Result<(), LayoutError> {
    let layout = Builder::new(3, 1)
        .pixel_format(PixelFormat::Grayscale)
        .pixel_precision(8)
        .build()?;
    let source = Image::<u8>::from_slice(layout, &[0, 51, 255])?;

    let normalized = convert::convert_pixel_precision::<f32, _>(&source.view(), 0)?;
    let samples = normalized.to_vec();
    assert_eq!(samples[0], 0.0);
    assert!((samples[1] - 0.2).abs() < 1e-6);
    assert_eq!(samples[2], 1.0);

    let restored = convert::convert_pixel_precision::<u8, _>(&normalized.view(), 8)?;
    assert_eq!(restored.to_vec(), [0, 51, 255]);
    Ok(())
}

#[test]
fn alignment_borrows_when_possible() -> Result<(), LayoutError> {
    let layout = Builder::new(4, 2).pixel_format(PixelFormat::Grayscale).build()?;
    let image = Image::<u8>::from_slice(layout, &[1, 2, 3, 4, 5, 6, 7, 8])?;
    let view = image.view();

    let same = convert::convert_alignment(&view, 4, 2, 0, false)?;
    assert!(same.is_borrowed());
    assert_eq!(same.view().layout().width_alignment(), 4);
    assert_eq!(same.view().buffer().as_ptr(), image.as_cells().as_ptr());

    let forced = convert::convert_alignment(&view, 4, 0, 0, true)?;
    assert!(!forced.is_borrowed());
    assert_ne!(forced.view().buffer().as_ptr(), image.as_cells().as_ptr());
    assert_eq!(forced.view().at(3, 1, 0), 8);

    let padded = convert::convert_alignment(&view, 8, 0, 0, false)?;
    let ImageCow::Owned(padded) = padded else {
        panic!("padding the rows needs a new buffer");
    };
    assert_eq!(padded.layout().planes()[0].row_stride, 8);
    assert_eq!(padded.layout().required_buffer_size(), 16);
    assert_eq!(padded.view().at(0, 1, 0), 5);
    Ok(())
}

#[test]
fn like_a_region() -> Result<(), LayoutError> {
    let layout = Builder::new(4, 4)
        .pixel_format(PixelFormat::Grayscale)
        .border(1)
        .build()?;
    let image = Image::<u8>::new(layout);
    let roi = image.view().roi(Rect::new(1, 1, 2, 3))?;

    let blank = convert::like::<f32, _>(&roi)?;
    assert_eq!((blank.layout().width(), blank.layout().height()), (2, 3));
    assert_eq!(blank.layout().border(), 1);
    assert_eq!(blank.layout().required_buffer_size(), 4 * 5);
    Ok(())
}

#[test]
fn reshape_rows() -> Result<(), LayoutError> {
    let layout = Builder::new(3, 2)
        .pixel_format(PixelFormat::Grayscale)
        .width_alignment(4)
        .build()?;
    let image = Image::<u8>::from_slice(layout, &[1, 2, 3, 0, 4, 5, 6, 0])?;
    let view = image.view();

    let wide = view.align_width(4)?;
    assert_eq!(wide.width(), 4);
    assert_eq!(wide.at(3, 0, 0), 0);
    assert!(view.align_width(8).is_err());
    assert!(view.align_height(4).is_err());

    let flat = view.flatten(1)?;
    assert_eq!((flat.width(), flat.height()), (8, 1));
    let samples: Vec<u8> = (0..8).map(|x| flat.at(x, 0, 0)).collect();
    assert_eq!(samples, [1, 2, 3, 0, 4, 5, 6, 0]);
    Ok(())
}

#[test]
fn reshape_planes() -> Result<(), LayoutError> {
    let layout = Builder::new(2, 2).pixel_format(PixelFormat::Rgb).build()?;
    let image = Image::<u8>::from_expr(layout, Pixel([1u8, 2, 3]));
    let view = image.view();

    let rows = view.flatten_planes()?;
    assert_eq!((rows.width(), rows.height(), rows.num_planes()), (4, 3, 1));
    for (y, value) in [1, 2, 3].into_iter().enumerate() {
        assert!((0..4).all(|x| rows.at(x, y as i32, 0) == value));
    }

    let interleaved = Builder::from_layout(&layout)
        .layout_kind(LayoutKind::Interleaved)
        .build()?;
    let image = Image::<u8>::new(interleaved);
    assert!(image.view().flatten_planes().is_err());
    Ok(())
}
