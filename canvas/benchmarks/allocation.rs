//! Benchmarks allocating and dropping images with each allocator.
use brunch::Bench;

use planebuf::format::LayoutKind;
use planebuf::layout::{Builder, LayoutError};
use planebuf::{use_recycling_allocator, use_standard_allocator, Image};

#[derive(Clone, Copy, Debug)]
enum Allocator {
    Standard,
    Recycling,
}

struct Allocate {
    allocator: Allocator,
    kind: LayoutKind,
    sz: i32,
}

impl Allocate {
    fn name(&self) -> String {
        format!("allocate({:?}, {:?}, {})", self.allocator, self.kind, self.sz)
    }

    fn prepare(self) -> Result<impl FnMut() -> usize, LayoutError> {
        let layout = Builder::new(self.sz, self.sz)
            .layout_kind(self.kind)
            .border(8)
            .width_alignment(64)
            .build()?;

        Ok(move || {
            match self.allocator {
                Allocator::Standard => use_standard_allocator(),
                Allocator::Recycling => use_recycling_allocator(),
            }

            Image::<u16>::new(layout).as_cells().len()
        })
    }
}

fn main() {
    let tests = [
        Allocate {
            allocator: Allocator::Standard,
            kind: LayoutKind::Planar,
            sz: 1024,
        },
        Allocate {
            allocator: Allocator::Recycling,
            kind: LayoutKind::Planar,
            sz: 1024,
        },
        Allocate {
            allocator: Allocator::Standard,
            kind: LayoutKind::Yuv420,
            sz: 1920,
        },
        Allocate {
            allocator: Allocator::Recycling,
            kind: LayoutKind::Yuv420,
            sz: 1920,
        },
    ];

    let mut benches = brunch::Benches::default();
    benches.extend(tests.map(|allocate| {
        Bench::new(format!("planebuf::allocation::main::{}", allocate.name()))
            .run(allocate.prepare().expect("Failed to setup benchmark"))
    }));
    benches.finish();
    use_standard_allocator();
}
