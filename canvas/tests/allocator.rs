use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use planebuf::alloc::{Allocation, Allocator, AllocatorManager, Block, RecyclingAllocator};
use planebuf::format::PixelFormat;
use planebuf::layout::{Builder, LayoutDescriptor, LayoutError};
use planebuf::{
    clear_allocator_cache, use_allocator, use_recycling_allocator, use_standard_allocator, Image,
};
use serial_test::serial;

fn gray(width: i32, height: i32) -> Result<LayoutDescriptor, LayoutError> {
    Builder::new(width, height)
        .pixel_format(PixelFormat::Grayscale)
        .build()
}

/// Start from an empty pool with the standard allocator selected.
fn reset() {
    use_recycling_allocator();
    clear_allocator_cache();
    use_standard_allocator();
}

#[derive(Debug, Default)]
struct Counting {
    allocated: AtomicUsize,
    freed: AtomicUsize,
}

impl Allocator for Counting {
    fn allocate(&self, size: usize) -> Block {
        self.allocated.fetch_add(1, Ordering::SeqCst);
        Block::new(size)
    }

    fn deallocate(&self, block: Block) {
        self.freed.fetch_add(1, Ordering::SeqCst);
        drop(block);
    }
}

#[test]
#[serial]
fn recycling_reuses_equal_sizes() -> Result<(), LayoutError> {
    reset();
    use_recycling_allocator();

    let first = Image::<u8>::new(gray(64, 64)?);
    first.view().assign(7);
    let address = first.as_cells().as_ptr();
    drop(first);
    assert_eq!(AllocatorManager::recycling().pooled_blocks(), 1);

    let second = Image::<u8>::new(gray(64, 64)?);
    assert_eq!(second.as_cells().as_ptr(), address);
    // Pooled blocks keep their content.
    assert_eq!(second.view().at(0, 0, 0), 7);
    assert_eq!(AllocatorManager::recycling().pooled_blocks(), 0);

    let other = Image::<u8>::new(gray(32, 64)?);
    assert_ne!(other.as_cells().as_ptr(), address);

    drop((second, other));
    assert_eq!(AllocatorManager::recycling().pooled_blocks(), 2);
    reset();
    Ok(())
}

#[test]
#[serial]
fn standard_allocates_fresh_memory() -> Result<(), LayoutError> {
    reset();

    let first = Image::<u16>::new(gray(16, 16)?);
    let second = Image::<u16>::new(gray(16, 16)?);
    assert_ne!(first.as_cells().as_ptr(), second.as_cells().as_ptr());
    assert_eq!(first.view().maximum(), 0);

    drop((first, second));
    assert_eq!(AllocatorManager::recycling().pooled_blocks(), 0);
    Ok(())
}

#[test]
#[serial]
fn cache_is_cleared_only_when_selected() -> Result<(), LayoutError> {
    reset();
    use_recycling_allocator();
    drop(Image::<f32>::new(gray(8, 8)?));
    assert_eq!(AllocatorManager::recycling().pooled_blocks(), 1);

    use_standard_allocator();
    clear_allocator_cache();
    assert_eq!(AllocatorManager::recycling().pooled_blocks(), 1);

    use_recycling_allocator();
    clear_allocator_cache();
    assert_eq!(AllocatorManager::recycling().pooled_blocks(), 0);
    reset();
    Ok(())
}

#[test]
#[serial]
fn blocks_return_to_their_allocator() -> Result<(), LayoutError> {
    reset();
    let private = Arc::new(RecyclingAllocator::new());

    let image = Image::<u8>::with_allocator(gray(4, 4)?, private.clone());
    assert!(image.allocator().is_some());
    drop(image);
    assert_eq!(private.pooled_blocks(), 1);
    assert_eq!(AllocatorManager::recycling().pooled_blocks(), 0);

    // Switching the selection does not redirect live images.
    use_recycling_allocator();
    let image = Image::<u8>::new(gray(4, 4)?);
    use_standard_allocator();
    drop(image);
    assert_eq!(AllocatorManager::recycling().pooled_blocks(), 1);

    private.clear();
    assert_eq!(private.pooled_blocks(), 0);
    reset();
    Ok(())
}

#[test]
#[serial]
fn custom_allocator() -> Result<(), LayoutError> {
    reset();
    let counting = Arc::new(Counting::default());
    use_allocator(counting.clone());

    let images = [
        Image::<i16>::new(gray(3, 3)?),
        Image::<i16>::new(gray(5, 5)?),
    ];
    let mut lazy = Image::<i16>::unallocated(gray(2, 2)?);
    assert_eq!(counting.allocated.load(Ordering::SeqCst), 2);
    lazy.allocate();
    lazy.allocate();
    assert_eq!(counting.allocated.load(Ordering::SeqCst), 3);

    use_standard_allocator();
    drop(Image::<i16>::new(gray(3, 3)?));
    assert_eq!(counting.allocated.load(Ordering::SeqCst), 3);

    drop((images, lazy));
    assert_eq!(counting.freed.load(Ordering::SeqCst), 3);
    Ok(())
}

#[test]
#[serial]
fn recycling_shared_between_threads() {
    let pool = Arc::new(RecyclingAllocator::new());

    // Every thread holds its blocks until all are handed to this thread.
    let held: Vec<Allocation> = thread::scope(|scope| {
        let workers: Vec<_> = (0..4)
            .map(|_| {
                let pool = pool.clone();
                scope.spawn(move || {
                    (0..8)
                        .map(|_| Allocation::new(256, pool.clone()))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        workers
            .into_iter()
            .flat_map(|worker| worker.join().expect("worker panicked"))
            .collect()
    });

    let addresses: HashSet<_> = held.iter().map(|a| a.block().as_ptr() as usize).collect();
    assert_eq!(addresses.len(), 32);
    assert_eq!(pool.pooled_blocks(), 0);
    drop(held);
    assert_eq!(pool.pooled_blocks(), 32);

    // At most 32 blocks are live at once, so every request is served from the pool.
    thread::scope(|scope| {
        for _ in 0..4 {
            let pool = pool.clone();
            scope.spawn(move || {
                for _ in 0..16 {
                    let blocks: Vec<_> = (0..8)
                        .map(|_| Allocation::new(256, pool.clone()))
                        .collect();
                    assert!(blocks.iter().all(|a| a.block().size() == 256));
                }
            });
        }
    });
    assert_eq!(pool.pooled_blocks(), 32);

    pool.clear();
    assert_eq!(pool.pooled_blocks(), 0);
}

#[test]
#[serial]
fn selection_changes_during_allocation() {
    reset();
    let counting = Arc::new(Counting::default());
    use_recycling_allocator();

    let held: Vec<Allocation> = thread::scope(|scope| {
        let switcher = scope.spawn(|| {
            for round in 0..200 {
                if round % 2 == 0 {
                    use_allocator(counting.clone());
                } else {
                    use_recycling_allocator();
                }
                thread::yield_now();
            }
        });

        let workers: Vec<_> = (0..3)
            .map(|_| {
                scope.spawn(|| {
                    (0..100)
                        .map(|_| {
                            thread::yield_now();
                            Allocation::current(64)
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        switcher.join().expect("switcher panicked");
        workers
            .into_iter()
            .flat_map(|worker| worker.join().expect("worker panicked"))
            .collect()
    });
    use_standard_allocator();

    let counting_ptr = Arc::as_ptr(&counting) as *const ();
    let from_counting = held
        .iter()
        .filter(|a| Arc::as_ptr(a.allocator()) as *const () == counting_ptr)
        .count();
    assert_eq!(held.len(), 300);
    assert_eq!(counting.allocated.load(Ordering::SeqCst), from_counting);

    // Dropped here, on another thread than the one that allocated.
    drop(held);
    assert_eq!(counting.freed.load(Ordering::SeqCst), from_counting);
    assert_eq!(
        AllocatorManager::recycling().pooled_blocks(),
        300 - from_counting
    );
    reset();
}
