//! Benchmarks assigning expressions over whole images.
use brunch::Bench;

use planebuf::expr::{self, BorderMode, ResizeAlignment};
use planebuf::format::{LayoutKind, PixelFormat};
use planebuf::layout::{Builder, LayoutError};
use planebuf::{Image, Pixel};

#[derive(Clone, Copy, Debug)]
enum Kind {
    Arithmetic,
    Blur,
    Resize,
    Pixels,
}

struct Assign {
    kind: Kind,
    layout: LayoutKind,
    sz: i32,
}

impl Assign {
    fn name(&self) -> String {
        format!("assign({:?}, {:?}, {})", self.kind, self.layout, self.sz)
    }

    fn prepare(self) -> Result<impl FnMut(), LayoutError> {
        let layout = Builder::new(self.sz, self.sz)
            .pixel_format(PixelFormat::Rgb)
            .layout_kind(self.layout)
            .build()?;
        let from = Image::<u8>::from_expr(layout, Pixel([10u8, 20, 30]));
        let into = Image::<f32>::new(layout);

        Ok(move || {
            let (from, into) = (from.view(), into.view());
            match self.kind {
                Kind::Arithmetic => into.assign(expr::min(from * 3 + 1, 255) / 255.0f32),
                Kind::Blur => into.assign(expr::convolve_y(
                    expr::convolve_x(
                        expr::border(from, BorderMode::Mirror),
                        [0.25f32, 0.5, 0.25],
                    ),
                    [0.25f32, 0.5, 0.25],
                )),
                Kind::Resize => into.assign(expr::resize(
                    from,
                    self.sz,
                    self.sz,
                    ResizeAlignment::Centers,
                )),
                Kind::Pixels => {
                    if let (Ok(pixels), Ok(target)) =
                        (from.pixel_view::<3>(), into.pixel_view::<3>())
                    {
                        target.assign(pixels);
                    }
                }
            }
        })
    }
}

fn main() {
    let tests = [
        Assign {
            kind: Kind::Arithmetic,
            layout: LayoutKind::Planar,
            sz: 128,
        },
        Assign {
            kind: Kind::Arithmetic,
            layout: LayoutKind::Interleaved,
            sz: 128,
        },
        Assign {
            kind: Kind::Blur,
            layout: LayoutKind::Planar,
            sz: 128,
        },
        Assign {
            kind: Kind::Resize,
            layout: LayoutKind::Planar,
            sz: 128,
        },
        Assign {
            kind: Kind::Pixels,
            layout: LayoutKind::Interleaved,
            sz: 128,
        },
    ];

    let mut benches = brunch::Benches::default();
    benches.extend(tests.map(|assign| {
        Bench::new(format!("planebuf::expression::main::{}", assign.name()))
            .run(assign.prepare().expect("Failed to setup benchmark"))
    }));
    benches.finish();
}
