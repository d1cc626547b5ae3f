//! Chunked allocator that owns every node of a tree.

use std::mem;
use std::ops::{Index, IndexMut};
use std::vec::Vec;

/// Number of objects per chunk used by the maps when no chunk size is given.
pub const DEFAULT_CHUNK_SIZE: usize = 64;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
struct Slot {
    chunk_index: usize,
    block_index: usize,
}

/// A generation-checked reference to an object inside a `TypedArena<T>`.
///
/// Freeing an object bumps the generation of its slot, so a handle to a freed object never
/// resolves to whatever is allocated in that slot afterwards.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle {
    slot: Slot,
    generation: u32,
}

enum Block<T> {
    Occupied { generation: u32, value: T },
    Vacant { generation: u32, next: Option<Slot> },
}

/// A typed arena that allocates objects in fixed-size chunks and recycles freed slots.
///
/// All objects inside the arena are destroyed exactly once: either when they are freed, or when
/// the arena is cleared or dropped. Growing the arena pushes a new chunk, so existing objects are
/// never moved by an allocation. The implementation is a plain `Vec` of chunks with an intrusive
/// free list threaded through the vacant blocks and uses no unsafe code.
///
/// # Examples
///
/// ```
/// use search_trees::arena::TypedArena;
///
/// let mut arena = TypedArena::new(16);
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(&x), 2);
/// assert_eq!(arena.get(&x), None);
/// ```
pub struct TypedArena<T> {
    head: Option<Slot>,
    chunks: Vec<Vec<Block<T>>>,
    chunk_size: usize,
    len: usize,
    capacity: usize,
}

impl<T> TypedArena<T> {
    /// Constructs a new, empty `TypedArena<T>` that holds `chunk_size` objects per chunk. A
    /// chunk size of zero is treated as one.
    ///
    /// # Examples
    ///
    /// ```
    /// use search_trees::arena::TypedArena;
    ///
    /// let arena: TypedArena<u32> = TypedArena::new(1024);
    /// assert!(arena.is_empty());
    /// ```
    pub fn new(chunk_size: usize) -> Self {
        TypedArena {
            head: None,
            chunks: Vec::new(),
            chunk_size: chunk_size.max(1),
            len: 0,
            capacity: 0,
        }
    }

    fn block(&self, handle: &Handle) -> Option<&Block<T>> {
        self.chunks
            .get(handle.slot.chunk_index)
            .and_then(|chunk| chunk.get(handle.slot.block_index))
    }

    fn block_mut(&mut self, handle: &Handle) -> Option<&mut Block<T>> {
        self.chunks
            .get_mut(handle.slot.chunk_index)
            .and_then(|chunk| chunk.get_mut(handle.slot.block_index))
    }

    /// Allocates an object in the arena and returns a handle to it.
    ///
    /// # Examples
    ///
    /// ```
    /// use search_trees::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(16);
    /// let x = arena.allocate("node");
    /// assert_eq!(arena.get(&x), Some(&"node"));
    /// ```
    pub fn allocate(&mut self, value: T) -> Handle {
        self.len += 1;

        match self.head.take() {
            None => {
                if self.chunks.last().map_or(true, |chunk| chunk.len() == self.chunk_size) {
                    self.chunks.push(Vec::with_capacity(self.chunk_size));
                    self.capacity += self.chunk_size;
                }
                let chunk_index = self.chunks.len() - 1;
                let chunk = &mut self.chunks[chunk_index];
                chunk.push(Block::Occupied { generation: 0, value });
                Handle {
                    slot: Slot {
                        chunk_index,
                        block_index: chunk.len() - 1,
                    },
                    generation: 0,
                }
            },
            Some(slot) => {
                let block = &mut self.chunks[slot.chunk_index][slot.block_index];
                let (generation, next) = match *block {
                    Block::Vacant { generation, next } => (generation, next),
                    Block::Occupied { .. } => panic!("Error: free list points at an occupied block."),
                };
                *block = Block::Occupied { generation, value };
                self.head = next;
                Handle { slot, generation }
            },
        }
    }

    /// Deallocates an object in the arena and returns it.
    ///
    /// # Panics
    ///
    /// Panics if the handle refers to a vacant block or to an object that was already freed.
    ///
    /// # Examples
    ///
    /// ```
    /// use search_trees::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(16);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.free(&x), 0);
    /// ```
    pub fn free(&mut self, handle: &Handle) -> T {
        let next = self.head;
        let block = match self.block_mut(handle) {
            Some(block) => block,
            None => panic!("Error: attempting to free invalid block."),
        };
        match *block {
            Block::Occupied { generation, .. } if generation == handle.generation => {},
            _ => panic!("Error: attempting to free vacant block."),
        }
        let old_block = mem::replace(
            block,
            Block::Vacant {
                generation: handle.generation.wrapping_add(1),
                next,
            },
        );
        self.len -= 1;
        self.head = Some(handle.slot);
        match old_block {
            Block::Occupied { value, .. } => value,
            Block::Vacant { .. } => unreachable!(),
        }
    }

    /// Returns an immutable reference to an object in the arena, or `None` if the handle is
    /// stale or invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use search_trees::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(16);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get(&x), Some(&0));
    /// ```
    pub fn get(&self, handle: &Handle) -> Option<&T> {
        match self.block(handle) {
            Some(Block::Occupied { generation, value }) if *generation == handle.generation => {
                Some(value)
            },
            _ => None,
        }
    }

    /// Returns a mutable reference to an object in the arena, or `None` if the handle is stale
    /// or invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use search_trees::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(16);
    /// let x = arena.allocate(0);
    /// *arena.get_mut(&x).unwrap() = 5;
    /// assert_eq!(arena[x], 5);
    /// ```
    pub fn get_mut(&mut self, handle: &Handle) -> Option<&mut T> {
        let expected = handle.generation;
        match self.block_mut(handle) {
            Some(Block::Occupied { generation, value }) if *generation == expected => Some(value),
            _ => None,
        }
    }

    /// Returns the number of live objects in the arena.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the arena holds no live objects.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of objects the arena can hold before it allocates another chunk.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Destroys every object in the arena and releases its chunks.
    ///
    /// # Examples
    ///
    /// ```
    /// use search_trees::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(16);
    /// arena.allocate(1);
    /// arena.allocate(2);
    /// arena.clear();
    /// assert!(arena.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.chunks.clear();
        self.head = None;
        self.len = 0;
        self.capacity = 0;
    }
}

impl<T> Index<Handle> for TypedArena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(&handle).expect("Error: handle does not refer to a live object.")
    }
}

impl<T> IndexMut<Handle> for TypedArena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(&handle).expect("Error: handle does not refer to a live object.")
    }
}
