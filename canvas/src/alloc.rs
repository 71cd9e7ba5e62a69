//! Allocation of image buffers.
//!
//! Every owned buffer is an [`Allocation`]: a [`Block`] together with the allocator it came from.
//! Dropping it returns the block to that same allocator, whichever allocator is selected for the
//! process at that time.
use std::collections::HashMap;
use std::fmt;
use std::mem;
use std::sync::{Arc, Mutex, OnceLock, PoisonError, RwLock};

pub use planebuf_texel::Block;
use tracing::{debug, trace};

/// A source of buffers.
pub trait Allocator: Send + Sync + fmt::Debug {
    /// Obtain a block of at least `size` bytes.
    fn allocate(&self, size: usize) -> Block;
    /// Give back a block obtained from this allocator.
    fn deallocate(&self, block: Block);
}

/// Allocates fresh, zeroed memory for every request and frees it on return.
#[derive(Debug, Default)]
pub struct StandardAllocator;

/// Keeps returned blocks in a pool keyed by their exact byte size.
///
/// A request for a size that was returned before gets the pooled block back, with whatever
/// content it had. The pool is unbounded; release it with [`RecyclingAllocator::clear`].
#[derive(Debug, Default)]
pub struct RecyclingAllocator {
    pool: Mutex<HashMap<usize, Vec<Block>>>,
}

/// An owned block, returned to its allocator on drop.
pub struct Allocation {
    block: Block,
    allocator: Arc<dyn Allocator>,
}

/// The process-wide allocator selection.
///
/// Changing the selection only affects future allocations.
pub struct AllocatorManager;

#[derive(Clone)]
enum Selection {
    Standard,
    Recycling,
    Custom(Arc<dyn Allocator>),
}

static SELECTION: RwLock<Selection> = RwLock::new(Selection::Standard);
static STANDARD: OnceLock<Arc<StandardAllocator>> = OnceLock::new();
static RECYCLING: OnceLock<Arc<RecyclingAllocator>> = OnceLock::new();

impl Allocator for StandardAllocator {
    fn allocate(&self, size: usize) -> Block {
        trace!(size, "allocating block");
        Block::new(size)
    }

    fn deallocate(&self, block: Block) {
        trace!(size = block.size(), "freeing block");
        drop(block);
    }
}

impl RecyclingAllocator {
    pub fn new() -> Self {
        RecyclingAllocator::default()
    }

    /// Free every pooled block.
    pub fn clear(&self) {
        let pool = mem::take(&mut *self.lock());
        let blocks: usize = pool.values().map(Vec::len).sum();
        let bytes: usize = pool.iter().map(|(size, list)| size * list.len()).sum();
        debug!(blocks, bytes, "cleared recycling pool");
    }

    /// The number of blocks waiting for reuse.
    pub fn pooled_blocks(&self) -> usize {
        self.lock().values().map(Vec::len).sum()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<usize, Vec<Block>>> {
        self.pool.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Allocator for RecyclingAllocator {
    fn allocate(&self, size: usize) -> Block {
        if size == 0 {
            return Block::empty();
        }

        if let Some(block) = self.lock().get_mut(&size).and_then(Vec::pop) {
            trace!(size, "reusing pooled block");
            return block;
        }

        trace!(size, "allocating block");
        Block::new(size)
    }

    fn deallocate(&self, block: Block) {
        if block.is_empty() {
            return;
        }

        trace!(size = block.size(), "returning block to pool");
        self.lock().entry(block.size()).or_default().push(block);
    }
}

impl Allocation {
    /// Allocate `size` bytes from `allocator`, which will also receive the block back.
    pub fn new(size: usize, allocator: Arc<dyn Allocator>) -> Self {
        let block = allocator.allocate(size);
        Allocation { block, allocator }
    }

    /// Allocate from the currently selected allocator.
    pub fn current(size: usize) -> Self {
        Allocation::new(size, AllocatorManager::current())
    }

    pub fn block(&self) -> &Block {
        &self.block
    }

    pub fn block_mut(&mut self) -> &mut Block {
        &mut self.block
    }

    pub fn allocator(&self) -> &Arc<dyn Allocator> {
        &self.allocator
    }
}

impl Drop for Allocation {
    fn drop(&mut self) {
        let block = mem::take(&mut self.block);
        self.allocator.deallocate(block);
    }
}

impl fmt::Debug for Allocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Allocation")
            .field("block", &self.block)
            .field("allocator", &self.allocator)
            .finish()
    }
}

impl AllocatorManager {
    /// The allocator new images draw from.
    pub fn current() -> Arc<dyn Allocator> {
        match &*SELECTION.read().unwrap_or_else(PoisonError::into_inner) {
            Selection::Standard => Self::standard(),
            Selection::Recycling => Self::recycling() as Arc<dyn Allocator>,
            Selection::Custom(allocator) => Arc::clone(allocator),
        }
    }

    /// The shared standard allocator.
    pub fn standard() -> Arc<dyn Allocator> {
        let standard = STANDARD.get_or_init(Default::default);
        Arc::clone(standard) as Arc<dyn Allocator>
    }

    /// The shared recycling allocator, selected or not.
    pub fn recycling() -> Arc<RecyclingAllocator> {
        Arc::clone(RECYCLING.get_or_init(Default::default))
    }

    pub fn use_standard() {
        Self::select(Selection::Standard);
        debug!("selected standard allocator");
    }

    pub fn use_recycling() {
        Self::select(Selection::Recycling);
        debug!("selected recycling allocator");
    }

    /// Select a caller-provided allocator.
    pub fn use_custom(allocator: Arc<dyn Allocator>) {
        debug!(?allocator, "selected custom allocator");
        Self::select(Selection::Custom(allocator));
    }

    /// Free the pool of the recycling allocator, if it is the one selected.
    pub fn clear_cache() {
        let selection = SELECTION
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        if let Selection::Recycling = selection {
            Self::recycling().clear();
        }
    }

    fn select(selection: Selection) {
        *SELECTION.write().unwrap_or_else(PoisonError::into_inner) = selection;
    }
}

/// Allocate new images with fresh memory.
pub fn use_standard_allocator() {
    AllocatorManager::use_standard()
}

/// Allocate new images from a pool of returned buffers.
pub fn use_recycling_allocator() {
    AllocatorManager::use_recycling()
}

/// Allocate new images from the given allocator.
pub fn use_allocator(allocator: Arc<dyn Allocator>) {
    AllocatorManager::use_custom(allocator)
}

/// Release pooled buffers when the recycling allocator is selected.
pub fn clear_allocator_cache() {
    AllocatorManager::clear_cache()
}
